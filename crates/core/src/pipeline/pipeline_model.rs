use serde::{Deserialize, Serialize};

use crate::holdings::Holding;
use crate::ingestion::SkippedRow;
use crate::portfolio::Portfolio;
use crate::validation::DataQualityReport;

/// Everything one pipeline run produced.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    /// Holdings after scoring, in source order
    pub holdings: Vec<Holding>,
    pub report: DataQualityReport,
    pub skipped_rows: Vec<SkippedRow>,
    pub portfolio: Portfolio,
    /// Whether the report met the configured quality threshold. Informational:
    /// the run is persisted either way.
    pub passed_quality_gate: bool,
}

impl ProcessingResult {
    pub fn scored_count(&self) -> usize {
        self.holdings
            .iter()
            .filter(|holding| holding.composite.is_some())
            .count()
    }
}
