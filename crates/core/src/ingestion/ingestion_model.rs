use serde::{Deserialize, Serialize};

use crate::holdings::Holding;

/// Why a data row was dropped by the extractor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    TooFewColumns { expected: usize, actual: usize },
    #[serde(rename_all = "camelCase")]
    InvalidNumber { field: String, value: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TooFewColumns { expected, actual } => {
                write!(f, "expected {} columns, found {}", expected, actual)
            }
            SkipReason::InvalidNumber { field, value } => {
                write!(f, "'{}' is not a number in {}", value, field)
            }
        }
    }
}

/// A row dropped during extraction. Diagnostics only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRow {
    /// 1-based position of the row in the source, header included
    pub row_number: usize,
    pub reason: SkipReason,
}

/// Holdings read from one source, in source order.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub holdings: Vec<Holding>,
    pub skipped_rows: Vec<SkippedRow>,
}

impl ExtractionResult {
    pub fn skipped_count(&self) -> usize {
        self.skipped_rows.len()
    }
}
