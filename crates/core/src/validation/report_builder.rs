//! Assembly and text rendering of data-quality reports.

use std::fmt::Write as _;

use chrono::Utc;
use uuid::Uuid;

use super::quality_analyzer::valid_record_count;
use super::validation_model::{DataQualityReport, ProcessingMetrics, ValidationError};
use crate::constants::REPORT_SUMMARY_ERROR_LIMIT;

/// Builds a report for one ingestion run.
///
/// `quality_score` is taken as computed by the caller so the report reflects
/// exactly what the quality gate saw.
pub fn build_report(
    source_name: &str,
    portfolio_id: &str,
    total_records: usize,
    errors: Vec<ValidationError>,
    quality_score: f64,
    metrics: Option<ProcessingMetrics>,
) -> DataQualityReport {
    DataQualityReport {
        id: Uuid::new_v4().to_string(),
        source_name: source_name.to_string(),
        portfolio_id: portfolio_id.to_string(),
        total_records,
        valid_records: valid_record_count(total_records, &errors),
        error_records: errors.len(),
        errors,
        quality_score,
        generated_at: Utc::now(),
        metrics,
    }
}

/// Plain-text summary listing the first few error messages.
pub fn report_summary(report: &DataQualityReport) -> String {
    let mut summary = String::new();
    let _ = writeln!(summary, "Data Quality Report Summary");
    let _ = writeln!(summary, "==========================");
    let _ = writeln!(summary, "Source: {}", report.source_name);
    let _ = writeln!(summary, "Portfolio: {}", report.portfolio_id);
    let _ = writeln!(summary, "Total Records: {}", report.total_records);
    let _ = writeln!(summary, "Valid Records: {}", report.valid_records);
    let _ = writeln!(summary, "Error Records: {}", report.error_records);
    let _ = writeln!(summary, "Quality Score: {:.2}%", report.quality_score);

    if !report.errors.is_empty() {
        let _ = writeln!(summary);
        let _ = writeln!(summary, "Top Errors:");
        for error in report.errors.iter().take(REPORT_SUMMARY_ERROR_LIMIT) {
            let _ = writeln!(
                summary,
                "- [{}] {} ({}): {}",
                error.kind, error.record_id, error.field, error.message
            );
        }
    }

    summary
}
