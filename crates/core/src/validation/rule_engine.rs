//! Rule-based validation of extracted holdings.

use std::collections::HashSet;

use log::debug;

use super::validation_model::{ValidationError, ValidationErrorKind};
use crate::holdings::{Holding, ScoreBounds, ScoreDimension};

/// Applies per-holding field rules and the batch-wide duplicate-id rule.
///
/// Validation never fails: every violation becomes a [`ValidationError`] with
/// `ERROR` severity.
#[derive(Debug, Clone, Default)]
pub struct ValidationRuleEngine {
    bounds: ScoreBounds,
}

impl ValidationRuleEngine {
    pub fn new(bounds: ScoreBounds) -> Self {
        Self { bounds }
    }

    /// Validates a batch.
    ///
    /// Errors come back per holding in input order, followed by one `DUPLICATE`
    /// error for every repeated id in the order the repeats were met.
    pub fn validate(&self, holdings: &[Holding]) -> Vec<ValidationError> {
        let mut errors: Vec<ValidationError> = holdings
            .iter()
            .flat_map(|holding| self.validate_holding(holding))
            .collect();

        errors.extend(self.find_duplicates(holdings));

        debug!(
            "Validated {} holdings, {} errors",
            holdings.len(),
            errors.len()
        );
        errors
    }

    /// Checks one holding without looking at the rest of the batch.
    pub fn validate_holding(&self, holding: &Holding) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let record_id = holding.id.as_str();

        let required = [
            ("holdingId", holding.id.as_str(), "Holding ID is required"),
            ("symbol", holding.symbol.as_str(), "Symbol is required"),
            ("companyName", holding.company_name.as_str(), "Company name is required"),
            ("sector", holding.sector.as_str(), "Sector is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.push(ValidationError::new(
                    record_id,
                    field,
                    ValidationErrorKind::Missing,
                    message,
                ));
            }
        }

        for dimension in ScoreDimension::ALL {
            if let Some(score) = holding.score(dimension) {
                if !self.bounds.contains(score) {
                    errors.push(
                        ValidationError::new(
                            record_id,
                            dimension.field_name(),
                            ValidationErrorKind::OutOfRange,
                            format!(
                                "{} score must be between {} and {}",
                                dimension, self.bounds.min, self.bounds.max
                            ),
                        )
                        .with_actual_value(score)
                        .with_expected(format!("{}..={}", self.bounds.min, self.bounds.max)),
                    );
                }
            }
        }

        if let Some(market_value) = holding.market_value {
            if market_value.is_nan() || market_value <= 0.0 {
                errors.push(
                    ValidationError::new(
                        record_id,
                        "marketValue",
                        ValidationErrorKind::Invalid,
                        "Market value must be greater than 0",
                    )
                    .with_actual_value(market_value)
                    .with_expected("> 0"),
                );
            }
        }

        errors
    }

    fn find_duplicates(&self, holdings: &[Holding]) -> Vec<ValidationError> {
        let mut seen: HashSet<&str> = HashSet::new();
        holdings
            .iter()
            .filter(|holding| !seen.insert(holding.id.as_str()))
            .map(|holding| {
                ValidationError::new(
                    holding.id.as_str(),
                    "holdingId",
                    ValidationErrorKind::Duplicate,
                    "Duplicate holding ID found",
                )
                .with_actual_value(&holding.id)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Severity;

    fn valid(id: &str) -> Holding {
        Holding::new(id, "AAPL", "Apple Inc", "Technology")
            .with_scores(85.5, 78.2, 92.1)
            .with_market_value(150_000_000.0)
    }

    #[test]
    fn test_clean_batch_has_no_errors() {
        let engine = ValidationRuleEngine::default();
        let holdings: Vec<Holding> = (1..=10).map(|i| valid(&format!("H{:03}", i))).collect();
        assert!(engine.validate(&holdings).is_empty());
    }

    #[test]
    fn test_missing_fields_in_check_order() {
        let engine = ValidationRuleEngine::default();
        let holding = Holding::new("", " ", "Meta Platforms", "").with_scores(74.2, 76.8, 82.1);

        let errors = engine.validate(&[holding]);

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["holdingId", "symbol", "sector"]);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::Missing));
        assert!(errors.iter().all(|e| e.record_id.is_empty()));
        assert!(errors.iter().all(|e| e.severity == Severity::Error));
    }

    #[test]
    fn test_negative_environmental_score_out_of_range() {
        let engine = ValidationRuleEngine::default();
        let mut holding = valid("H001");
        holding.environmental = Some(-5.0);

        let errors = engine.validate(&[holding]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::OutOfRange);
        assert_eq!(errors[0].field, "environmentalScore");
        assert_eq!(errors[0].record_id, "H001");
        assert_eq!(errors[0].actual_value.as_deref(), Some("-5"));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let engine = ValidationRuleEngine::default();
        let holding = valid("H001").with_scores(0.0, 100.0, 100.0);
        assert!(engine.validate_holding(&holding).is_empty());
    }

    #[test]
    fn test_absent_scores_are_not_range_checked() {
        let engine = ValidationRuleEngine::default();
        let mut holding = valid("H001");
        holding.social = None;
        holding.market_value = None;
        assert!(engine.validate_holding(&holding).is_empty());
    }

    #[test]
    fn test_non_positive_market_value_invalid() {
        let engine = ValidationRuleEngine::default();
        let zero = valid("H1").with_market_value(0.0);
        let negative = valid("H2").with_market_value(-50_000.0);

        let errors = engine.validate(&[zero, negative]);

        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::Invalid && e.field == "marketValue"));
    }

    #[test]
    fn test_duplicate_reported_once_on_second_occurrence() {
        let engine = ValidationRuleEngine::default();
        let errors = engine.validate(&[valid("H1"), valid("H1")]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::Duplicate);
        assert_eq!(errors[0].record_id, "H1");
    }

    #[test]
    fn test_duplicates_follow_field_errors() {
        let engine = ValidationRuleEngine::default();
        let mut bad = valid("H2");
        bad.governance = Some(150.0);
        let holdings = vec![valid("H1"), valid("H1"), bad, valid("H1")];

        let errors = engine.validate(&holdings);

        let kinds: Vec<ValidationErrorKind> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::OutOfRange,
                ValidationErrorKind::Duplicate,
                ValidationErrorKind::Duplicate,
            ]
        );
    }

    #[test]
    fn test_custom_bounds() {
        let engine = ValidationRuleEngine::new(ScoreBounds::new(0.0, 10.0));
        let errors = engine.validate(&[valid("H1").with_scores(5.0, 11.0, 5.0)]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "socialScore");
    }
}
