//! Financing transactions (contracts)
//!
//! A `Transaction` is one financing contract: principal (OTR), derived
//! fees, tenor and asset. The ledger is append-only - financial fields
//! are immutable once written, corrections become new entries. The
//! engine in `kredit-business` is the only writer and only ever writes
//! `Active`.

use crate::error::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a contract.
///
/// `Completed` and `Defaulted` are reached by servicing flows outside
/// this workspace; the engine never writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Active,
    Completed,
    Defaulted,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Defaulted => "DEFAULTED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "COMPLETED" => Ok(Self::Completed),
            "DEFAULTED" => Ok(Self::Defaulted),
            other => Err(DomainError::InvalidRequest(format!(
                "unknown transaction status: {other}"
            ))),
        }
    }
}

/// One financing contract in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub contract_number: String,
    pub consumer_nik: String,
    pub otr: Decimal,
    pub admin_fee: Decimal,
    pub tenor: i32,
    pub interest: Decimal,
    pub asset_name: String,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inbound creation request.
///
/// `consumer_nik` is re-asserted by the caller and must match the
/// authenticated identity; the engine checks this before touching
/// storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub consumer_nik: String,
    pub otr: Decimal,
    pub tenor: i32,
    pub asset_name: String,
}

impl TransactionRequest {
    /// Structural validation, run before any unit of work is opened.
    pub fn validate(&self) -> DomainResult<()> {
        if self.consumer_nik.trim().is_empty() {
            return Err(DomainError::InvalidRequest(
                "consumer NIK must not be empty".to_string(),
            ));
        }
        if self.otr <= Decimal::ZERO {
            return Err(DomainError::InvalidRequest(format!(
                "OTR must be positive, got {}",
                self.otr
            )));
        }
        if self.tenor <= 0 {
            return Err(DomainError::InvalidRequest(format!(
                "tenor must be positive, got {}",
                self.tenor
            )));
        }
        Ok(())
    }
}

/// Public echo of a persisted contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub contract_number: String,
    pub consumer_nik: String,
    pub otr: Decimal,
    pub admin_fee: Decimal,
    pub tenor: i32,
    pub interest: Decimal,
    pub asset_name: String,
    pub status: TransactionStatus,
}

impl From<&Transaction> for TransactionResponse {
    fn from(tx: &Transaction) -> Self {
        Self {
            contract_number: tx.contract_number.clone(),
            consumer_nik: tx.consumer_nik.clone(),
            otr: tx.otr,
            admin_fee: tx.admin_fee,
            tenor: tx.tenor,
            interest: tx.interest,
            asset_name: tx.asset_name.clone(),
            status: tx.status,
        }
    }
}
