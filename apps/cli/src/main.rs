mod cli;
mod config;
mod main_lib;

use clap::Parser;
use cli::Cli;
use config::Config;
use main_lib::{init_tracing, render, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if cli.normalize {
        config.pipeline.normalize_before_scoring = true;
    }
    init_tracing();
    tracing::info!("Processing {}", cli.file.display());

    let result = run(&cli, &config).await?;
    println!("{}", render(&result, cli.format)?);
    Ok(())
}
