//! Database schema definitions
//!
//! Row types for sqlx mapping plus the DDL run by `init_schema`.
//! Money columns are NUMERIC and map to `rust_decimal::Decimal`.

use chrono::{DateTime, NaiveDate, Utc};
use kredit_core::{Consumer, CreditLimit, DomainError, Transaction, TransactionStatus};
use serde::{Deserialize, Serialize};
use rust_decimal::Decimal;

/// DDL for the three core tables.
///
/// `consumer_limits` enforces at most one row per (consumer, tenor);
/// `transactions.contract_number` is the uniqueness backstop behind the
/// probabilistic contract number generator.
pub const SCHEMA_SQL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS consumers (
        nik               TEXT PRIMARY KEY,
        phone_number      TEXT NOT NULL UNIQUE,
        password_hash     TEXT NOT NULL,
        full_name         TEXT NOT NULL,
        legal_name        TEXT NOT NULL,
        birth_place       TEXT NOT NULL,
        birth_date        DATE NOT NULL,
        salary            NUMERIC NOT NULL,
        ktp_photo_path    TEXT NOT NULL,
        selfie_photo_path TEXT NOT NULL,
        created_at        TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at        TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS consumer_limits (
        consumer_nik TEXT NOT NULL REFERENCES consumers (nik),
        tenor        INTEGER NOT NULL CHECK (tenor > 0),
        limit_amount NUMERIC NOT NULL CHECK (limit_amount >= 0),
        created_at   TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at   TIMESTAMPTZ NOT NULL DEFAULT now(),
        PRIMARY KEY (consumer_nik, tenor)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS transactions (
        contract_number TEXT PRIMARY KEY,
        consumer_nik    TEXT NOT NULL REFERENCES consumers (nik),
        otr             NUMERIC NOT NULL CHECK (otr > 0),
        admin_fee       NUMERIC NOT NULL,
        tenor           INTEGER NOT NULL CHECK (tenor > 0),
        interest        NUMERIC NOT NULL,
        asset_name      TEXT NOT NULL,
        status          TEXT NOT NULL,
        created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at      TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_transactions_consumer_status
        ON transactions (consumer_nik, status)
    "#,
];

/// Row type for the `consumers` table.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ConsumerRow {
    pub nik: String,
    pub phone_number: String,
    pub password_hash: String,
    pub full_name: String,
    pub legal_name: String,
    pub birth_place: String,
    pub birth_date: NaiveDate,
    pub salary: Decimal,
    pub ktp_photo_path: String,
    pub selfie_photo_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row type for the `consumer_limits` table.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CreditLimitRow {
    pub consumer_nik: String,
    pub tenor: i32,
    pub limit_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row type for the `transactions` table.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TransactionRow {
    pub contract_number: String,
    pub consumer_nik: String,
    pub otr: Decimal,
    pub admin_fee: Decimal,
    pub tenor: i32,
    pub interest: Decimal,
    pub asset_name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// === Conversion implementations ===

impl From<ConsumerRow> for Consumer {
    fn from(row: ConsumerRow) -> Self {
        Consumer {
            nik: row.nik,
            phone_number: row.phone_number,
            password_hash: row.password_hash,
            full_name: row.full_name,
            legal_name: row.legal_name,
            birth_place: row.birth_place,
            birth_date: row.birth_date,
            salary: row.salary,
            ktp_photo_path: row.ktp_photo_path,
            selfie_photo_path: row.selfie_photo_path,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<CreditLimitRow> for CreditLimit {
    fn from(row: CreditLimitRow) -> Self {
        CreditLimit {
            consumer_nik: row.consumer_nik,
            tenor: row.tenor,
            limit_amount: row.limit_amount,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = DomainError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let status: TransactionStatus = row.status.parse()?;
        Ok(Transaction {
            contract_number: row.contract_number,
            consumer_nik: row.consumer_nik,
            otr: row.otr,
            admin_fee: row.admin_fee,
            tenor: row.tenor,
            interest: row.interest,
            asset_name: row.asset_name,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
