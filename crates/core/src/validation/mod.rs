//! Validation module - business rules, quality scoring and reports.

mod quality_analyzer;
mod report_builder;
mod rule_engine;
mod validation_model;

pub use quality_analyzer::{
    analyze_quality, calculate_quality_score, valid_record_count, QualityMetrics,
};
pub use report_builder::{build_report, report_summary};
pub use rule_engine::ValidationRuleEngine;
pub use validation_model::{
    DataQualityReport, ProcessingMetrics, Severity, ValidationError, ValidationErrorKind,
};
