//! Descriptive statistics used for ad-hoc score reporting.

use serde::{Deserialize, Serialize};

use crate::constants::DEGENERATE_NORMALIZED_SCORE;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation
    pub standard_deviation: f64,
    pub sum: f64,
    pub count: usize,
}

/// Summarizes `scores`. An empty slice yields an all-zero summary.
pub fn calculate_statistics(scores: &[f64]) -> StatisticalSummary {
    if scores.is_empty() {
        return StatisticalSummary::default();
    }

    let count = scores.len();
    let sum: f64 = scores.iter().sum();
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = sum / count as f64;

    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count as f64;

    StatisticalSummary {
        mean,
        min,
        max,
        standard_deviation: variance.sqrt(),
        sum,
        count,
    }
}

/// Percentage of `all_scores` that are less than or equal to `score`.
pub fn percentile_rank(score: f64, all_scores: &[f64]) -> f64 {
    if all_scores.is_empty() {
        return 0.0;
    }
    let at_or_below = all_scores.iter().filter(|s| **s <= score).count();
    at_or_below as f64 / all_scores.len() as f64 * 100.0
}

/// Min-max rescales `raw` onto 0-100, or 50 when the range is empty.
pub fn normalized_score(raw: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return DEGENERATE_NORMALIZED_SCORE;
    }
    (raw - min) / (max - min) * 100.0
}
