//! Property-based integration tests for scoring, quality and aggregation.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use esgfolio_core::portfolio::{Portfolio, PortfolioAggregator};
use esgfolio_core::scoring::{normalize_scores, normalized, EsgWeights, ScoreCalculator};
use esgfolio_core::validation::{
    calculate_quality_score, Severity, ValidationError, ValidationErrorKind, ValidationRuleEngine,
};
use esgfolio_core::{Holding, ScoreBounds};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Error),
        Just(Severity::Warning),
        Just(Severity::Info),
    ]
}

fn arb_errors(max_count: usize) -> impl Strategy<Value = Vec<ValidationError>> {
    proptest::collection::vec(arb_severity(), 0..=max_count).prop_map(|severities| {
        severities
            .into_iter()
            .enumerate()
            .map(|(i, severity)| {
                ValidationError::new(
                    format!("H{i}"),
                    "symbol",
                    ValidationErrorKind::Missing,
                    "Symbol is required",
                )
                .with_severity(severity)
            })
            .collect()
    })
}

/// Weights whose sum is 1.0 up to rounding.
fn arb_weights() -> impl Strategy<Value = EsgWeights> {
    (0.0f64..=1.0, 0.0f64..=1.0).prop_map(|(a, b)| {
        let environmental = a;
        let social = (1.0 - a) * b;
        let governance = 1.0 - environmental - social;
        EsgWeights::new(environmental, social, governance).unwrap()
    })
}

fn arb_score() -> impl Strategy<Value = f64> {
    0.0f64..=100.0
}

/// A holding with in-range scores and a positive market value.
fn arb_holding() -> impl Strategy<Value = Holding> {
    (
        "[A-Z]{3,5}",
        arb_score(),
        arb_score(),
        arb_score(),
        1.0f64..1_000_000_000.0,
    )
        .prop_map(|(symbol, env, soc, gov, market_value)| {
            Holding::new(symbol.clone(), symbol, "Company", "Sector")
                .with_scores(env, soc, gov)
                .with_market_value(market_value)
        })
}

/// Mostly in-range, with a share of scores below 0 or above 100.
fn arb_raw_score() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => 0.0f64..=100.0,
        1 => -50.0f64..-0.001,
        1 => 100.001f64..200.0,
    ]
}

fn arb_raw_holding() -> impl Strategy<Value = Holding> {
    (
        "[A-Z]{3,5}",
        arb_raw_score(),
        arb_raw_score(),
        arb_raw_score(),
        1.0f64..1_000_000_000.0,
    )
        .prop_map(|(symbol, env, soc, gov, market_value)| {
            Holding::new(symbol.clone(), symbol, "Company", "Sector")
                .with_scores(env, soc, gov)
                .with_market_value(market_value)
        })
}

fn arb_holdings(max_count: usize) -> impl Strategy<Value = Vec<Holding>> {
    proptest::collection::vec(arb_holding(), 1..=max_count)
}

const EPSILON: f64 = 1e-6;

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Quality score always lies in [0, 100].
    #[test]
    fn prop_quality_score_is_bounded(
        total in 0usize..200,
        errors in arb_errors(50)
    ) {
        let score = calculate_quality_score(total, &errors);
        prop_assert!((0.0..=100.0).contains(&score), "score {} out of range", score);
    }

    /// Adding an ERROR never raises the quality score.
    #[test]
    fn prop_quality_score_non_increasing_with_errors(
        total in 1usize..200,
        errors in arb_errors(50)
    ) {
        let before = calculate_quality_score(total, &errors);

        let mut more = errors.clone();
        more.push(ValidationError::new(
            "X",
            "sector",
            ValidationErrorKind::Missing,
            "Sector is required",
        ));
        let after = calculate_quality_score(total, &more);

        prop_assert!(after <= before, "{} > {}", after, before);
    }

    /// Composite equals the weighted sum of in-range sub-scores.
    #[test]
    fn prop_composite_is_weighted_sum(
        weights in arb_weights(),
        holding in arb_holding()
    ) {
        let calculator = ScoreCalculator::new(weights, ScoreBounds::default());
        let (env, soc, gov) = holding.sub_scores().unwrap();

        let composite = calculator.score_holding(&holding).unwrap();
        let expected = env * weights.environmental()
            + soc * weights.social()
            + gov * weights.governance();

        prop_assert!((composite - expected).abs() < EPSILON);
    }

    /// Without market values the aggregate is the plain mean.
    #[test]
    fn prop_equal_weighted_is_mean(holdings in arb_holdings(20)) {
        let mut holdings: Vec<Holding> = holdings
            .into_iter()
            .map(|mut h| {
                h.market_value = None;
                h
            })
            .collect();
        ScoreCalculator::default().calculate_composite_scores(&mut holdings);

        let count = holdings.len() as f64;
        let mean_env = holdings.iter().filter_map(|h| h.environmental).sum::<f64>() / count;
        let mean_composite = holdings.iter().filter_map(|h| h.composite).sum::<f64>() / count;

        let portfolio = Portfolio::new("P", "P", holdings.clone());
        let scores = PortfolioAggregator::default().aggregate(&portfolio);

        prop_assert!((scores.environmental - mean_env).abs() < EPSILON);
        prop_assert!((scores.composite - mean_composite).abs() < EPSILON);
        prop_assert_eq!(scores.holding_count, holdings.len());
        prop_assert!((scores.coverage_percentage - 100.0).abs() < EPSILON);
    }

    /// Value-weighted composite lies between the smallest and largest composite.
    #[test]
    fn prop_value_weighted_composite_within_range(holdings in arb_holdings(20)) {
        let holdings = ScoreCalculator::default().scored(&holdings);
        let composites: Vec<f64> = holdings.iter().filter_map(|h| h.composite).collect();
        let min = composites.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = composites.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let portfolio = Portfolio::new("P", "P", holdings);
        let scores = PortfolioAggregator::default().aggregate(&portfolio);

        prop_assert!(scores.composite >= min - EPSILON, "{} < {}", scores.composite, min);
        prop_assert!(scores.composite <= max + EPSILON, "{} > {}", scores.composite, max);
    }

    /// A single holding always normalizes to 50 in every dimension.
    #[test]
    fn prop_single_holding_normalizes_to_midpoint(holding in arb_holding()) {
        let result = normalized(&[holding], &ScoreBounds::default());
        prop_assert_eq!(result[0].sub_scores(), Some((50.0, 50.0, 50.0)));
    }

    /// Normalized scores stay within [0, 100].
    #[test]
    fn prop_normalized_scores_are_bounded(holdings in arb_holdings(20)) {
        for holding in normalized(&holdings, &ScoreBounds::default()) {
            let (env, soc, gov) = holding.sub_scores().unwrap();
            for score in [env, soc, gov] {
                prop_assert!((-EPSILON..=100.0 + EPSILON).contains(&score));
            }
        }
    }

    /// Validation, normalization and scoring in pipeline order never give a
    /// holding flagged OUT_OF_RANGE a composite.
    #[test]
    fn prop_out_of_range_holdings_stay_unscored_after_normalization(
        holdings in proptest::collection::vec(arb_raw_holding(), 1..=20)
    ) {
        let bounds = ScoreBounds::default();
        let mut holdings: Vec<Holding> = holdings
            .into_iter()
            .enumerate()
            .map(|(i, mut h)| {
                h.id = format!("H{i}");
                h
            })
            .collect();

        let errors = ValidationRuleEngine::new(bounds).validate(&holdings);
        normalize_scores(&mut holdings, &bounds);
        let calculator = ScoreCalculator::new(EsgWeights::default(), bounds);
        calculator.calculate_composite_scores(&mut holdings);

        for error in errors.iter().filter(|e| e.kind == ValidationErrorKind::OutOfRange) {
            let holding = holdings.iter().find(|h| h.id == error.record_id).unwrap();
            prop_assert!(
                holding.composite.is_none(),
                "{} scored {:?} despite an out-of-range {}",
                holding.id,
                holding.composite,
                error.field
            );
        }
        for holding in holdings.iter().filter(|h| h.composite.is_some()) {
            let (env, soc, gov) = holding.sub_scores().unwrap();
            for score in [env, soc, gov] {
                prop_assert!(bounds.contains(score));
            }
        }
    }
}
