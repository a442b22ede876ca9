use thiserror::Error;

/// Errors that abort ingestion of a whole source.
///
/// Problems confined to a single data row never surface here; the row is
/// skipped and reported through [`super::SkippedRow`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestionError {
    /// The header row failed the structural check.
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// The source contained no header row at all.
    #[error("Source contains no rows")]
    EmptySource,
}
