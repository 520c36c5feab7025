//! Kredit Core - consumer financing domain
//!
//! The heart of the workspace: domain entities, the error taxonomy, the
//! storage capability contracts, and the two pieces of pure business
//! machinery (contract number generation and fee rates) that the
//! transaction engine composes.
//!
//! # Key Types
//! - `Consumer`: identity + profile, keyed by NIK
//! - `CreditLimit`: exposure ceiling per (consumer, tenor)
//! - `Transaction`: one financing contract, append-only
//! - `Store` / `UnitOfWork`: narrow capability traits over the ledger store
//! - `DomainError`: tagged error variants callers can branch on

pub mod consumer;
pub mod contract;
pub mod error;
pub mod limit;
pub mod rates;
pub mod store;
pub mod transaction;

pub use consumer::{Consumer, ConsumerProfile};
pub use contract::ContractNumberGenerator;
pub use error::{DomainError, DomainResult, ErrorKind};
pub use limit::{CreditLimit, LimitView};
pub use rates::RatePolicy;
pub use store::{Store, StoreError, StoreResult, UnitOfWork};
pub use transaction::{Transaction, TransactionRequest, TransactionResponse, TransactionStatus};
