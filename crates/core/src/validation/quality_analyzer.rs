//! Data-quality scoring from a batch's validation errors.

use serde::{Deserialize, Serialize};

use super::validation_model::{Severity, ValidationError};
use crate::constants::{ERROR_PENALTY, INFO_PENALTY, WARNING_PENALTY};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub total_records: usize,
    pub valid_records: i64,
    pub error_records: usize,
    pub quality_score: f64,
    pub coverage_percentage: f64,
}

/// Quality percentage for a batch of `total_records` holdings.
///
/// The base score is the share of records not matched by an error; each error
/// then costs a severity-dependent penalty scaled by batch size. The result is
/// floored at zero, which matters once a batch has more errors than records.
pub fn calculate_quality_score(total_records: usize, errors: &[ValidationError]) -> f64 {
    if total_records == 0 {
        return 0.0;
    }

    let penalty: f64 = errors
        .iter()
        .map(|error| match error.severity {
            Severity::Error => ERROR_PENALTY,
            Severity::Warning => WARNING_PENALTY,
            Severity::Info => INFO_PENALTY,
        })
        .sum();

    let total = total_records as f64;
    let base_score = (total - errors.len() as f64) / total * 100.0;

    (base_score - penalty / total * 100.0).max(0.0)
}

/// Record count not covered by an error. Not clamped: negative when errors
/// outnumber records.
pub fn valid_record_count(total_records: usize, errors: &[ValidationError]) -> i64 {
    total_records as i64 - errors.len() as i64
}

pub fn analyze_quality(total_records: usize, errors: &[ValidationError]) -> QualityMetrics {
    let valid_records = valid_record_count(total_records, errors);
    let coverage_percentage = if total_records > 0 {
        valid_records as f64 / total_records as f64 * 100.0
    } else {
        0.0
    };

    QualityMetrics {
        total_records,
        valid_records,
        error_records: errors.len(),
        quality_score: calculate_quality_score(total_records, errors),
        coverage_percentage,
    }
}
