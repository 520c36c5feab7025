//! Kredit Persistence - ledger store backends
//!
//! Two implementations of the `kredit-core` store contracts:
//!
//! - [`postgres::PgStore`] - the system of record. Row locking via
//!   `SELECT ... FOR UPDATE`, exposure sums and appends inside one sqlx
//!   transaction.
//! - [`memory::MemoryStore`] - an in-process store with the same
//!   locking semantics (a per-consumer async mutex), used by the
//!   engine's concurrency and property tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kredit_persistence::postgres::PgStore;
//!
//! let store = PgStore::connect("postgres://localhost/kredit").await?;
//! store.init_schema().await?;
//! ```

pub mod error;
pub mod memory;
pub mod postgres;

pub use error::{PersistenceError, PersistenceResult};
pub use memory::MemoryStore;
pub use postgres::PgStore;
