//! Portfolio-level roll-up of holding scores.

use std::sync::Arc;

use log::debug;

use super::portfolio_model::{EsgScores, Portfolio};
use crate::audit::{CalculationKind, CalculationRecorder};
use crate::holdings::{Holding, ScoreBounds};

/// Rolls holding scores up into [`EsgScores`].
///
/// A portfolio with zero total market value is averaged with equal weights
/// over its valid holdings. Otherwise each valid holding with a market value
/// is weighted by its share of the total.
#[derive(Clone, Default)]
pub struct PortfolioAggregator {
    bounds: ScoreBounds,
    recorder: Option<Arc<dyn CalculationRecorder>>,
}

impl PortfolioAggregator {
    pub fn new(bounds: ScoreBounds) -> Self {
        Self {
            bounds,
            recorder: None,
        }
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn CalculationRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn has_valid_scores(&self, holding: &Holding) -> bool {
        holding.has_valid_scores(&self.bounds)
    }

    /// Aggregates without touching `portfolio`.
    pub fn aggregate(&self, portfolio: &Portfolio) -> EsgScores {
        let holdings = &portfolio.holdings;
        if holdings.is_empty() {
            return EsgScores::default();
        }

        let total_value = portfolio.market_value_sum();
        let scores = if total_value == 0.0 {
            self.equal_weighted(holdings)
        } else {
            self.value_weighted(holdings, total_value)
        };

        debug!(
            "Aggregated portfolio {}: composite {:.2}, {} holdings, coverage {:.1}%",
            portfolio.id, scores.composite, scores.holding_count, scores.coverage_percentage
        );

        if let Some(recorder) = &self.recorder {
            recorder.record_portfolio_calculation(
                &portfolio.id,
                CalculationKind::Composite,
                scores.composite,
                scores.holding_count,
            );
            recorder.record_portfolio_calculation(
                &portfolio.id,
                CalculationKind::Coverage,
                scores.coverage_percentage,
                scores.holding_count,
            );
        }

        scores
    }

    fn equal_weighted(&self, holdings: &[Holding]) -> EsgScores {
        let valid: Vec<(f64, f64, f64, f64)> = holdings
            .iter()
            .filter(|holding| self.has_valid_scores(holding))
            .filter_map(|holding| {
                let (env, soc, gov) = holding.sub_scores()?;
                Some((env, soc, gov, holding.composite.unwrap_or(0.0)))
            })
            .collect();

        if valid.is_empty() {
            return EsgScores::default();
        }

        let count = valid.len() as f64;
        let (env, soc, gov, composite) = valid.iter().fold(
            (0.0, 0.0, 0.0, 0.0),
            |(e, s, g, c), (env, soc, gov, comp)| (e + env, s + soc, g + gov, c + comp),
        );

        EsgScores {
            environmental: env / count,
            social: soc / count,
            governance: gov / count,
            composite: composite / count,
            holding_count: valid.len(),
            coverage_percentage: count / holdings.len() as f64 * 100.0,
        }
    }

    fn value_weighted(&self, holdings: &[Holding], total_value: f64) -> EsgScores {
        let mut scores = EsgScores {
            // every holding is counted in this branch, scored or not
            holding_count: holdings.len(),
            ..EsgScores::default()
        };
        let mut valid_value = 0.0;

        for holding in holdings {
            if !self.has_valid_scores(holding) {
                continue;
            }
            let (Some((env, soc, gov)), Some(market_value)) =
                (holding.sub_scores(), holding.market_value)
            else {
                continue;
            };

            let weight = market_value / total_value;
            scores.environmental += env * weight;
            scores.social += soc * weight;
            scores.governance += gov * weight;
            scores.composite += holding.composite.unwrap_or(0.0) * weight;
            valid_value += market_value;
        }

        scores.coverage_percentage = valid_value / total_value * 100.0;
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::CalculationAuditor;

    fn holding(id: &str, scores: (f64, f64, f64), composite: f64) -> Holding {
        let mut holding = Holding::new(id, id, format!("{id} Co"), "Tech")
            .with_scores(scores.0, scores.1, scores.2);
        holding.composite = Some(composite);
        holding
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_portfolio_is_zero() {
        let scores = PortfolioAggregator::default().aggregate(&Portfolio::new("P", "P", vec![]));
        assert_eq!(scores, EsgScores::default());
    }

    #[test]
    fn test_equal_weighted_without_market_values() {
        let portfolio = Portfolio::new(
            "P",
            "P",
            vec![
                holding("A", (80.0, 60.0, 40.0), 62.0),
                holding("B", (60.0, 40.0, 20.0), 42.0),
                Holding::new("C", "C", "C Co", "Tech"),
            ],
        );

        let scores = PortfolioAggregator::default().aggregate(&portfolio);

        assert_close(scores.environmental, 70.0);
        assert_close(scores.social, 50.0);
        assert_close(scores.governance, 30.0);
        assert_close(scores.composite, 52.0);
        assert_eq!(scores.holding_count, 2);
        assert_close(scores.coverage_percentage, 200.0 / 3.0);
    }

    #[test]
    fn test_equal_weighted_missing_composite_counts_as_zero() {
        let mut unscored = holding("B", (50.0, 50.0, 50.0), 0.0);
        unscored.composite = None;
        let scored = holding("A", (50.0, 50.0, 50.0), 50.0);
        let portfolio = Portfolio::new("P", "P", vec![scored, unscored]);

        let scores = PortfolioAggregator::default().aggregate(&portfolio);

        assert_close(scores.composite, 25.0);
    }

    #[test]
    fn test_equal_weighted_no_valid_holdings() {
        let portfolio = Portfolio::new("P", "P", vec![holding("A", (-5.0, 50.0, 50.0), 0.0)]);
        assert_eq!(
            PortfolioAggregator::default().aggregate(&portfolio),
            EsgScores::default()
        );
    }

    #[test]
    fn test_value_weighted() {
        let portfolio = Portfolio::new(
            "P",
            "P",
            vec![
                holding("A", (80.0, 80.0, 80.0), 80.0).with_market_value(300.0),
                holding("B", (40.0, 40.0, 40.0), 40.0).with_market_value(100.0),
            ],
        );

        let scores = PortfolioAggregator::default().aggregate(&portfolio);

        assert_close(scores.environmental, 70.0);
        assert_close(scores.composite, 70.0);
        assert_eq!(scores.holding_count, 2);
        assert_close(scores.coverage_percentage, 100.0);
    }

    #[test]
    fn test_value_weighted_counts_every_holding() {
        let portfolio = Portfolio::new(
            "P",
            "P",
            vec![
                holding("A", (80.0, 80.0, 80.0), 80.0).with_market_value(250.0),
                holding("B", (150.0, 80.0, 80.0), 0.0).with_market_value(750.0),
                Holding::new("C", "C", "C Co", "Tech"),
            ],
        );

        let scores = PortfolioAggregator::default().aggregate(&portfolio);

        // only A contributes, but all three are counted
        assert_close(scores.composite, 20.0);
        assert_eq!(scores.holding_count, 3);
        assert_close(scores.coverage_percentage, 25.0);
    }

    #[test]
    fn test_aggregate_does_not_mutate_portfolio() {
        let portfolio = Portfolio::new(
            "P",
            "P",
            vec![holding("A", (10.0, 20.0, 30.0), 19.0).with_market_value(10.0)],
        );
        let before = portfolio.clone();
        PortfolioAggregator::default().aggregate(&portfolio);
        assert_eq!(portfolio, before);
    }

    #[test]
    fn test_records_portfolio_calculations() {
        let auditor = Arc::new(CalculationAuditor::new());
        let aggregator = PortfolioAggregator::default().with_recorder(auditor.clone());
        let portfolio = Portfolio::new(
            "P1",
            "P",
            vec![holding("A", (10.0, 20.0, 30.0), 19.0).with_market_value(10.0)],
        );

        aggregator.aggregate(&portfolio);

        let entries = auditor.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].calculation_type, "PORTFOLIO_COMPOSITE");
        assert_eq!(entries[0].metadata["holdingCount"], 1);
    }
}
