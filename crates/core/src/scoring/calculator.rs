//! Weighted composite-score calculation.

use std::sync::Arc;

use log::debug;

use super::weights::{EsgWeights, WeightingManager};
use crate::audit::{CalculationKind, CalculationRecorder};
use crate::holdings::{Holding, ScoreBounds};

/// Weighted sum of the three sub-scores, or `0.0` if any of them is missing.
pub fn calculate_composite(
    environmental: Option<f64>,
    social: Option<f64>,
    governance: Option<f64>,
    weights: &EsgWeights,
) -> f64 {
    match (environmental, social, governance) {
        (Some(env), Some(soc), Some(gov)) => {
            env * weights.environmental() + soc * weights.social() + gov * weights.governance()
        }
        _ => 0.0,
    }
}

/// Composite for `holding`, or `None` when its sub-scores are incomplete or
/// fall outside the default 0-100 bounds.
pub fn score_holding(holding: &Holding, weights: &EsgWeights) -> Option<f64> {
    score_within(holding, weights, &ScoreBounds::default())
}

fn score_within(holding: &Holding, weights: &EsgWeights, bounds: &ScoreBounds) -> Option<f64> {
    if !holding.has_valid_scores(bounds) {
        return None;
    }
    Some(calculate_composite(
        holding.environmental,
        holding.social,
        holding.governance,
        weights,
    ))
}

/// Applies the active weights to holdings.
///
/// The calculator owns a [`WeightingManager`], so weight updates made through
/// [`ScoreCalculator::weighting`] take effect on the next call.
pub struct ScoreCalculator {
    weighting: WeightingManager,
    bounds: ScoreBounds,
    recorder: Option<Arc<dyn CalculationRecorder>>,
}

impl ScoreCalculator {
    pub fn new(weights: EsgWeights, bounds: ScoreBounds) -> Self {
        Self {
            weighting: WeightingManager::new(weights),
            bounds,
            recorder: None,
        }
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn CalculationRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn weighting(&self) -> &WeightingManager {
        &self.weighting
    }

    pub fn bounds(&self) -> &ScoreBounds {
        &self.bounds
    }

    pub fn score_holding(&self, holding: &Holding) -> Option<f64> {
        score_within(holding, &self.weighting.weights(), &self.bounds)
    }

    /// Sets `composite` on every holding in place and returns how many were scored.
    ///
    /// Holdings without a valid set of sub-scores get `composite = None`.
    pub fn calculate_composite_scores(&self, holdings: &mut [Holding]) -> usize {
        let weights = self.weighting.weights();
        let mut scored = 0;

        for holding in holdings.iter_mut() {
            holding.composite = score_within(holding, &weights, &self.bounds);
            if let Some(composite) = holding.composite {
                scored += 1;
                if let Some(recorder) = &self.recorder {
                    recorder.record_calculation(&holding.id, CalculationKind::Composite, composite);
                }
            }
        }

        debug!(
            "Scored {} of {} holdings with {}",
            scored,
            holdings.len(),
            weights
        );
        scored
    }

    /// Returns scored copies of `holdings`, leaving the input untouched.
    pub fn scored(&self, holdings: &[Holding]) -> Vec<Holding> {
        let mut copies = holdings.to_vec();
        self.calculate_composite_scores(&mut copies);
        copies
    }
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new(EsgWeights::default(), ScoreBounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::CalculationAuditor;

    fn apple() -> Holding {
        Holding::new("H001", "AAPL", "Apple Inc", "Technology")
            .with_scores(85.5, 78.2, 92.1)
            .with_market_value(150_000_000.0)
    }

    #[test]
    fn test_composite_with_default_weights() {
        let composite = score_holding(&apple(), &EsgWeights::default()).unwrap();
        assert!((composite - 85.29).abs() < 1e-9);
    }

    #[test]
    fn test_composite_missing_score_is_zero() {
        let weights = EsgWeights::default();
        assert_eq!(calculate_composite(Some(80.0), None, Some(90.0), &weights), 0.0);
    }

    #[test]
    fn test_score_holding_undefined_for_incomplete_or_out_of_range() {
        let weights = EsgWeights::default();
        let mut incomplete = apple();
        incomplete.social = None;
        assert_eq!(score_holding(&incomplete, &weights), None);

        let negative = Holding::new("H2", "X", "X Co", "Energy").with_scores(-5.0, 50.0, 50.0);
        assert_eq!(score_holding(&negative, &weights), None);
    }

    #[test]
    fn test_calculate_composite_scores_in_place() {
        let calculator = ScoreCalculator::default();
        let mut holdings = vec![
            apple(),
            Holding::new("H002", "MSFT", "Microsoft Corp", "Technology"),
        ];

        let scored = calculator.calculate_composite_scores(&mut holdings);

        assert_eq!(scored, 1);
        assert!((holdings[0].composite.unwrap() - 85.29).abs() < 1e-9);
        assert!(holdings[1].composite.is_none());
    }

    #[test]
    fn test_weight_update_changes_subsequent_scores() {
        let calculator = ScoreCalculator::default();
        calculator.weighting().update_weights(1.0, 0.0, 0.0).unwrap();
        assert_eq!(calculator.score_holding(&apple()), Some(85.5));
    }

    #[test]
    fn test_scored_leaves_input_untouched() {
        let calculator = ScoreCalculator::default();
        let holdings = vec![apple()];
        let scored = calculator.scored(&holdings);
        assert!(holdings[0].composite.is_none());
        assert!(scored[0].composite.is_some());
    }

    #[test]
    fn test_composite_recorded_in_audit() {
        let auditor = Arc::new(CalculationAuditor::new());
        let calculator = ScoreCalculator::default().with_recorder(auditor.clone());
        let mut holdings = vec![apple()];
        calculator.calculate_composite_scores(&mut holdings);

        let history = auditor.history("H001").unwrap();
        assert!((history.latest(CalculationKind::Composite).unwrap() - 85.29).abs() < 1e-9);
    }
}
