//! Ingestion module - turns delimited source files into holdings.

mod csv_parser;
mod extractor;
mod ingestion_errors;
mod ingestion_model;

pub use csv_parser::parse_rows;
pub use extractor::{extract_from_csv, extract_holdings};
pub use ingestion_errors::IngestionError;
pub use ingestion_model::{ExtractionResult, SkipReason, SkippedRow};
