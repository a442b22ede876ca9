//! Esgfolio Core - ESG ingestion, validation, scoring and aggregation.
//!
//! This crate contains the scoring pipeline and its domain types. It is
//! storage-agnostic and defines repository traits that are implemented
//! by the `storage-memory` crate.

pub mod audit;
pub mod config;
pub mod constants;
pub mod errors;
pub mod holdings;
pub mod ingestion;
pub mod pipeline;
pub mod portfolio;
pub mod scoring;
pub mod transaction;
pub mod validation;

pub use holdings::*;
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
