//! Scoring module - weights, composite calculation, statistics and normalization.

mod calculator;
mod normalization;
mod scoring_errors;
mod statistics;
mod weights;

pub use calculator::{calculate_composite, score_holding, ScoreCalculator};
pub use normalization::{normalize_scores, normalize_to_range, normalized, ScoreRange};
pub use scoring_errors::ScoringError;
pub use statistics::{calculate_statistics, normalized_score, percentile_rank, StatisticalSummary};
pub use weights::{EsgWeights, WeightingManager};
