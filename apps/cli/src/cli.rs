//! CLI argument parsing for esgfolio

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Esgfolio - validate, score and aggregate an ESG holdings file
#[derive(Parser, Debug)]
#[command(name = "esgfolio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// CSV file with one holding per row
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    pub format: OutputFormat,

    /// Rescale sub-scores to 0-100 before scoring
    #[arg(long)]
    pub normalize: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report summary
    Summary,
    /// Full processing result as JSON
    Json,
}
