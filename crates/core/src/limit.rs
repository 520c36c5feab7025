//! Credit limits - per (consumer, tenor) exposure ceilings
//!
//! A limit row caps the cumulative OTR a consumer may carry in ACTIVE
//! contracts at one tenor. Limits are provisioned by underwriting and
//! are read-only here; at most one row exists per (consumer, tenor).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A provisioned credit limit for one (consumer, tenor) pair.
///
/// Tenors are plan selectors: a limit at tenor 12 says nothing about
/// what the consumer may borrow at tenor 24.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditLimit {
    pub consumer_nik: String,
    pub tenor: i32,
    pub limit_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response shape for limit listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitView {
    pub tenor: i32,
    pub limit_amount: Decimal,
}

impl From<&CreditLimit> for LimitView {
    fn from(limit: &CreditLimit) -> Self {
        Self {
            tenor: limit.tenor,
            limit_amount: limit.limit_amount,
        }
    }
}
