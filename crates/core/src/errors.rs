//! Core error types for the ESG scoring pipeline.
//!
//! This module defines storage-agnostic error types. Repository implementations
//! convert their own failures into [`DatabaseError`] before returning them.

use thiserror::Error;

use crate::ingestion::IngestionError;
use crate::scoring::ScoringError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the scoring pipeline.
///
/// Business-rule violations are never represented here: they are collected as
/// [`crate::validation::ValidationError`] records and travel inside the
/// quality report. Only failures that abort an operation become an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Ingestion failed: {0}")]
    Ingestion(#[from] IngestionError),

    #[error("Scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Storage-agnostic error type for repository operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A write kept failing until the retry budget ran out.
    #[error("Transaction failed after {attempts} attempts: {message}")]
    TransactionFailed { attempts: u32, message: String },
}
