//! In-memory storage implementation for Esgfolio.
//!
//! This crate implements the repository traits defined in `esgfolio-core`
//! with process-local, last-write-wins stores keyed by id:
//! - `InMemoryHoldingRepository` for scored holdings
//! - `InMemoryPortfolioRepository` for aggregated portfolios
//!
//! Iteration order is the order in which ids were first saved.

pub mod errors;

// Repository implementations
pub mod holdings;
pub mod portfolio;

pub use errors::StorageError;
pub use holdings::InMemoryHoldingRepository;
pub use portfolio::InMemoryPortfolioRepository;

// Re-export from esgfolio-core for convenience
pub use esgfolio_core::errors::{DatabaseError, Error, Result};
