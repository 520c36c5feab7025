//! Persistence errors
//!
//! Setup-time failures (connect, schema init) get their own error type;
//! everything flowing through the store traits is mapped onto
//! `kredit_core::StoreError` so the business layer never sees sqlx.

use kredit_core::StoreError;
use thiserror::Error;

/// Errors from store setup and maintenance operations.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid row: {0}")]
    InvalidRow(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Map a sqlx error onto the store contract's taxonomy.
///
/// Unique-constraint violations are picked out because the engine
/// retries them with a fresh contract number; everything else is an
/// opaque backend failure.
pub(crate) fn map_store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db) = err {
        if db.is_unique_violation() {
            let constraint = db.constraint().unwrap_or("unique constraint").to_string();
            return StoreError::UniqueViolation(constraint);
        }
    }
    StoreError::backend(err)
}
