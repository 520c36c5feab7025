//! PostgreSQL ledger store
//!
//! `PgStore` owns a connection pool and implements the core store
//! contracts. The locking read maps to `SELECT ... FOR UPDATE`, so
//! contention on one consumer blocks on the database's row lock while
//! other consumers proceed in parallel.

pub mod schema;
mod store;

use crate::error::{PersistenceError, PersistenceResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

pub use schema::{ConsumerRow, CreditLimitRow, TransactionRow, SCHEMA_SQL};
pub use store::PgUnitOfWork;

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to the database.
    pub async fn connect(database_url: &str) -> PersistenceResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the tables and indexes if they do not exist.
    pub async fn init_schema(&self) -> PersistenceResult<()> {
        for statement in SCHEMA_SQL {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("database schema initialized");
        Ok(())
    }

    /// Insert a consumer record.
    ///
    /// Onboarding lives outside the financing core; this exists for
    /// operational seeding (CLI `seed`) and integration tests.
    pub async fn insert_consumer(&self, consumer: &kredit_core::Consumer) -> PersistenceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO consumers
                (nik, phone_number, password_hash, full_name, legal_name,
                 birth_place, birth_date, salary, ktp_photo_path, selfie_photo_path,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(&consumer.nik)
        .bind(&consumer.phone_number)
        .bind(&consumer.password_hash)
        .bind(&consumer.full_name)
        .bind(&consumer.legal_name)
        .bind(&consumer.birth_place)
        .bind(consumer.birth_date)
        .bind(consumer.salary)
        .bind(&consumer.ktp_photo_path)
        .bind(&consumer.selfie_photo_path)
        .bind(consumer.created_at)
        .bind(consumer.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All of a consumer's contracts, newest first.
    pub async fn list_transactions(
        &self,
        nik: &str,
    ) -> PersistenceResult<Vec<kredit_core::Transaction>> {
        let rows = sqlx::query_as::<_, schema::TransactionRow>(
            "SELECT contract_number, consumer_nik, otr, admin_fee, tenor, interest, \
                    asset_name, status, created_at, updated_at \
             FROM transactions WHERE consumer_nik = $1 ORDER BY created_at DESC",
        )
        .bind(nik)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|row| {
                kredit_core::Transaction::try_from(row)
                    .map_err(|err| PersistenceError::InvalidRow(err.to_string()))
            })
            .collect()
    }

    /// Provision a credit limit. Same caveat as `insert_consumer`.
    pub async fn insert_limit(&self, limit: &kredit_core::CreditLimit) -> PersistenceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO consumer_limits
                (consumer_nik, tenor, limit_amount, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&limit.consumer_nik)
        .bind(limit.tenor)
        .bind(limit.limit_amount)
        .bind(limit.created_at)
        .bind(limit.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
