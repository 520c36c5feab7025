//! Kredit Business - use-cases over the store contracts
//!
//! The crate that owns decisions. `TransactionEngine` is the core: it
//! is the only writer of the transaction ledger and the only place the
//! credit-limit admission rule lives. The remaining use-cases (limit
//! listing, profile, login) are thin reads and collaborator
//! orchestration.

pub mod auth;
pub mod consumer;
pub mod engine;
pub mod limits;

pub use auth::{AuthUsecase, PasswordVerifier, TokenIssuer, TokenPair};
pub use consumer::ConsumerUsecase;
pub use engine::TransactionEngine;
pub use limits::LimitUsecase;
