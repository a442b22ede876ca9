//! Storage-specific error types for the in-memory stores.

use esgfolio_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Errors internal to the storage layer, converted to
/// `esgfolio_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A writer panicked while holding the store lock.
    #[error("Store lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::LockPoisoned(store) => {
                Error::Database(DatabaseError::Unavailable(format!("{} lock poisoned", store)))
            }
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for StorageError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        StorageError::LockPoisoned(err.to_string())
    }
}
