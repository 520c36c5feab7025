//! Storage capability contracts
//!
//! The engine depends on these narrow traits, never on a concrete
//! database handle. `kredit-persistence` provides two implementations:
//! PostgreSQL (system of record) and an in-memory store used by the
//! concurrency property tests.
//!
//! # Unit-of-work semantics
//!
//! `Store::begin` opens an atomic unit of work. All reads and the final
//! append inside one creation request share that unit; `commit` makes
//! the append durable, `rollback` discards it. Dropping a `UnitOfWork`
//! without committing must behave like `rollback` - that is what makes
//! request cancellation safe.

use crate::consumer::Consumer;
use crate::error::DomainError;
use crate::limit::CreditLimit;
use crate::transaction::Transaction;
use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors surfaced by a storage backend.
///
/// `UniqueViolation` is the one variant the engine treats specially: a
/// duplicate contract number is retryable with a fresh number. Anything
/// else is an infrastructure failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Wrap an arbitrary backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(what) => DomainError::Conflict(what),
            StoreError::Backend(source) => DomainError::Internal {
                message: "storage backend error".to_string(),
                source: Some(source),
            },
        }
    }
}

/// An open atomic unit of work against the ledger store.
///
/// All methods observe the same consistent snapshot. The row lock taken
/// by `find_and_lock_consumer` is held until `commit`, `rollback`, or
/// drop.
#[async_trait]
pub trait UnitOfWork: Send {
    /// Exclusive locking read of a consumer row.
    ///
    /// Blocks (does not fail) while another unit of work holds the lock
    /// on the same row; this is the serialization point for concurrent
    /// creation requests against one consumer. Requests for different
    /// consumers do not contend.
    async fn find_and_lock_consumer(&mut self, nik: &str) -> StoreResult<Option<Consumer>>;

    /// The provisioned limit for `(nik, tenor)`, if any.
    async fn find_limit(&mut self, nik: &str, tenor: i32) -> StoreResult<Option<CreditLimit>>;

    /// Sum of OTR over the consumer's ACTIVE transactions.
    ///
    /// Zero when there are none - absence of exposure is not an error.
    async fn sum_active_otr(&mut self, nik: &str) -> StoreResult<Decimal>;

    /// Append one transaction to the ledger.
    ///
    /// Returns `UniqueViolation` on a duplicate contract number.
    async fn insert_transaction(&mut self, transaction: &Transaction) -> StoreResult<()>;

    /// Make the unit of work durable.
    async fn commit(self: Box<Self>) -> StoreResult<()>;

    /// Discard the unit of work. Equivalent to dropping it, but explicit
    /// at the call sites that decide to refuse.
    async fn rollback(self: Box<Self>) -> StoreResult<()>;
}

/// Entry point into a storage backend.
#[async_trait]
pub trait Store: Send + Sync {
    /// Open an atomic unit of work.
    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork + '_>>;

    /// Plain (non-locking) read of a consumer by NIK.
    async fn find_consumer_by_nik(&self, nik: &str) -> StoreResult<Option<Consumer>>;

    /// Plain read of a consumer by phone number (the login handle).
    async fn find_consumer_by_phone(&self, phone_number: &str) -> StoreResult<Option<Consumer>>;

    /// All provisioned limits for a consumer, tenor ascending.
    async fn list_limits(&self, nik: &str) -> StoreResult<Vec<CreditLimit>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let err: DomainError = StoreError::UniqueViolation("nomor_kontrak".into()).into();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_backend_error_maps_to_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err: DomainError = StoreError::backend(io).into();
        assert_eq!(err.kind(), ErrorKind::InternalFailure);
        assert!(std::error::Error::source(&err).is_some());
    }
}
