//! Sequences ingestion, validation, scoring, persistence and aggregation.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

use super::pipeline_model::ProcessingResult;
use crate::audit::CalculationRecorder;
use crate::config::PipelineConfig;
use crate::errors::Result;
use crate::holdings::{Holding, HoldingRepositoryTrait};
use crate::ingestion::{extract_from_csv, SkippedRow};
use crate::portfolio::{Portfolio, PortfolioAggregator, PortfolioRepositoryTrait};
use crate::scoring::{normalize_scores, ScoreCalculator};
use crate::validation::{
    build_report, calculate_quality_score, ProcessingMetrics, ValidationRuleEngine,
};

/// Elapsed milliseconds per named phase.
#[derive(Default)]
struct PhaseTimings(BTreeMap<String, u64>);

impl PhaseTimings {
    fn record(&mut self, phase: &str, started: Instant) {
        self.0
            .insert(phase.to_string(), started.elapsed().as_millis() as u64);
    }
}

/// Runs one source through the pipeline.
///
/// Stages run strictly in order and never call back into an earlier one.
/// All scoring finishes before the first write, so a failed write leaves the
/// returned in-memory state complete.
pub struct ProcessingOrchestrator {
    config: PipelineConfig,
    rule_engine: ValidationRuleEngine,
    calculator: ScoreCalculator,
    aggregator: PortfolioAggregator,
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
}

impl ProcessingOrchestrator {
    pub fn new(
        config: PipelineConfig,
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    ) -> Self {
        Self {
            rule_engine: ValidationRuleEngine::new(config.score_bounds),
            calculator: ScoreCalculator::new(config.weights, config.score_bounds),
            aggregator: PortfolioAggregator::new(config.score_bounds),
            config,
            holding_repository,
            portfolio_repository,
        }
    }

    /// Sends every composite and portfolio figure to `recorder`.
    pub fn with_recorder(mut self, recorder: Arc<dyn CalculationRecorder>) -> Self {
        self.calculator = self.calculator.with_recorder(recorder.clone());
        self.aggregator = self.aggregator.with_recorder(recorder);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Calculator in use, e.g. to update weights between runs.
    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }

    /// Parses CSV `content` and runs the extracted holdings through the pipeline.
    ///
    /// Fails without writing anything if the header is rejected.
    pub async fn process_source(
        &self,
        source_name: &str,
        content: &[u8],
    ) -> Result<ProcessingResult> {
        let started = Instant::now();
        let mut timings = PhaseTimings::default();

        let phase = Instant::now();
        let extraction = extract_from_csv(content, source_name)?;
        timings.record("extraction", phase);

        self.run(
            source_name,
            extraction.holdings,
            extraction.skipped_rows,
            timings,
            started,
        )
        .await
    }

    /// Runs already-extracted holdings through the pipeline.
    pub async fn process_holdings(
        &self,
        source_name: &str,
        holdings: Vec<Holding>,
    ) -> Result<ProcessingResult> {
        self.run(
            source_name,
            holdings,
            Vec::new(),
            PhaseTimings::default(),
            Instant::now(),
        )
        .await
    }

    pub fn get_all_holdings(&self) -> Result<Vec<Holding>> {
        self.holding_repository.find_all()
    }

    pub fn get_portfolio(&self, portfolio_id: &str) -> Result<Option<Portfolio>> {
        self.portfolio_repository.get_portfolio(portfolio_id)
    }

    /// Empties both stores.
    pub async fn clear_data(&self) -> Result<()> {
        self.holding_repository.clear().await?;
        self.portfolio_repository.clear().await?;
        info!("Cleared stored holdings and portfolios");
        Ok(())
    }

    async fn run(
        &self,
        source_name: &str,
        mut holdings: Vec<Holding>,
        skipped_rows: Vec<SkippedRow>,
        mut timings: PhaseTimings,
        started: Instant,
    ) -> Result<ProcessingResult> {
        let portfolio_id = self.config.portfolio_id.as_str();

        let phase = Instant::now();
        let errors = self.rule_engine.validate(&holdings);
        let quality_score = calculate_quality_score(holdings.len(), &errors);
        timings.record("validation", phase);

        if self.config.normalize_before_scoring {
            let phase = Instant::now();
            normalize_scores(&mut holdings, &self.config.score_bounds);
            timings.record("normalization", phase);
        }

        let phase = Instant::now();
        let scored = self.calculator.calculate_composite_scores(&mut holdings);
        timings.record("scoring", phase);

        let phase = Instant::now();
        self.persist_holdings(portfolio_id, &holdings).await?;
        timings.record("persistence", phase);

        let phase = Instant::now();
        let mut portfolio = Portfolio::new(
            portfolio_id,
            self.config.portfolio_name.as_str(),
            holdings.clone(),
        );
        let scores = self.aggregator.aggregate(&portfolio);
        portfolio.set_aggregate_scores(scores);
        self.config
            .retry
            .execute("save portfolio", || {
                self.portfolio_repository.save_portfolio(portfolio.clone())
            })
            .await?;
        timings.record("aggregation", phase);

        let metrics = processing_metrics(holdings.len(), started, timings);
        let report = build_report(
            source_name,
            portfolio_id,
            holdings.len(),
            errors,
            quality_score,
            Some(metrics),
        );
        let passed_quality_gate = self.config.passes_quality_gate(report.quality_score);

        info!(
            "Processed {}: {} holdings ({} scored, {} rows skipped), {} errors, quality {:.2}% ({})",
            source_name,
            holdings.len(),
            scored,
            skipped_rows.len(),
            report.error_records,
            report.quality_score,
            if passed_quality_gate {
                "passed"
            } else {
                "below threshold"
            }
        );

        Ok(ProcessingResult {
            holdings,
            report,
            skipped_rows,
            portfolio,
            passed_quality_gate,
        })
    }

    async fn persist_holdings(&self, portfolio_id: &str, holdings: &[Holding]) -> Result<()> {
        let batch_size = self.config.batch_size.max(1);
        for (index, batch) in holdings.chunks(batch_size).enumerate() {
            for holding in batch {
                self.config
                    .retry
                    .execute("save holding", || {
                        self.holding_repository.save(portfolio_id, holding.clone())
                    })
                    .await?;
            }
            debug!("Persisted batch {} ({} holdings)", index + 1, batch.len());
        }
        Ok(())
    }
}

fn processing_metrics(
    records: usize,
    started: Instant,
    timings: PhaseTimings,
) -> ProcessingMetrics {
    let elapsed = started.elapsed();
    let seconds = elapsed.as_secs_f64();
    let records_per_second = if seconds > 0.0 {
        (records as f64 / seconds) as u64
    } else {
        0
    };

    ProcessingMetrics {
        processing_time_ms: elapsed.as_millis() as u64,
        records_per_second,
        phase_timings_ms: timings.0,
    }
}
