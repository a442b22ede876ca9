use std::sync::Arc;

use anyhow::Context;
use esgfolio_core::audit::CalculationAuditor;
use esgfolio_core::pipeline::{ProcessingOrchestrator, ProcessingResult};
use esgfolio_core::validation::report_summary;
use esgfolio_storage_memory::{InMemoryHoldingRepository, InMemoryPortfolioRepository};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;

pub fn init_tracing() {
    let log_format = std::env::var("ESGFOLIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_orchestrator(config: &Config) -> ProcessingOrchestrator {
    let holding_repository = Arc::new(InMemoryHoldingRepository::new());
    let portfolio_repository = Arc::new(InMemoryPortfolioRepository::new());
    let auditor = Arc::new(CalculationAuditor::new());

    ProcessingOrchestrator::new(
        config.pipeline.clone(),
        holding_repository,
        portfolio_repository,
    )
    .with_recorder(auditor)
}

pub async fn run(cli: &Cli, config: &Config) -> anyhow::Result<ProcessingResult> {
    let content = tokio::fs::read(&cli.file)
        .await
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let source_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    let orchestrator = build_orchestrator(config);
    let result = orchestrator.process_source(&source_name, &content).await?;
    Ok(result)
}

pub fn render(result: &ProcessingResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Summary => {
            let mut output = report_summary(&result.report);
            if let Some(scores) = &result.portfolio.aggregate_scores {
                output.push_str(&format!(
                    "\nPortfolio {} ({}): composite {:.2}, coverage {:.1}%, {} holdings\n",
                    result.portfolio.name,
                    result.portfolio.id,
                    scores.composite,
                    scores.coverage_percentage,
                    scores.holding_count
                ));
            }
            if !result.skipped_rows.is_empty() {
                output.push_str(&format!("Skipped rows: {}\n", result.skipped_rows.len()));
            }
            output.push_str(&format!(
                "Quality gate: {}\n",
                if result.passed_quality_gate {
                    "passed"
                } else {
                    "failed"
                }
            ));
            Ok(output)
        }
    }
}
