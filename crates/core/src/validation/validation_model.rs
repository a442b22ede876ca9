use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of business-rule violation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    Missing,
    OutOfRange,
    Invalid,
    Duplicate,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::Missing => "MISSING",
            ValidationErrorKind::OutOfRange => "OUT_OF_RANGE",
            ValidationErrorKind::Invalid => "INVALID",
            ValidationErrorKind::Duplicate => "DUPLICATE",
        }
    }
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a validation error.
///
/// Each severity carries a different quality penalty.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single business-rule violation found in a batch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub id: String,
    /// Holding id the error concerns; empty when the id itself is missing
    pub record_id: String,
    pub field: String,
    pub kind: ValidationErrorKind,
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
    /// Offending value rendered as text, when there is one
    pub actual_value: Option<String>,
    /// What the rule expected, e.g. "0..=100"
    pub expected: Option<String>,
}

impl ValidationError {
    pub fn new(
        record_id: impl Into<String>,
        field: impl Into<String>,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            record_id: record_id.into(),
            field: field.into(),
            kind,
            message: message.into(),
            severity: Severity::default(),
            actual_value: None,
            expected: None,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_actual_value(mut self, value: impl ToString) -> Self {
        self.actual_value = Some(value.to_string());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

/// Timing figures for one ingestion run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingMetrics {
    pub processing_time_ms: u64,
    pub records_per_second: u64,
    /// Elapsed milliseconds per pipeline phase, keyed by phase name
    pub phase_timings_ms: BTreeMap<String, u64>,
}

/// Outcome of validating one ingestion run.
///
/// `valid_records` is `total_records - errors.len()` and goes negative when a
/// batch has more errors than holdings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityReport {
    pub id: String,
    pub source_name: String,
    pub portfolio_id: String,
    pub total_records: usize,
    pub valid_records: i64,
    pub error_records: usize,
    pub errors: Vec<ValidationError>,
    pub quality_score: f64,
    pub generated_at: DateTime<Utc>,
    pub metrics: Option<ProcessingMetrics>,
}
