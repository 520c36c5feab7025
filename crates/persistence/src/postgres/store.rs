//! Store contract implementation over PostgreSQL

use super::schema::{ConsumerRow, CreditLimitRow};
use super::PgStore;
use crate::error::map_store_error;
use async_trait::async_trait;
use kredit_core::{Consumer, CreditLimit, Store, StoreResult, Transaction, UnitOfWork};
use rust_decimal::Decimal;
use sqlx::Postgres;

const CONSUMER_COLUMNS: &str = "nik, phone_number, password_hash, full_name, legal_name, \
     birth_place, birth_date, salary, ktp_photo_path, selfie_photo_path, created_at, updated_at";

/// One open sqlx transaction.
///
/// Dropping this without committing rolls the transaction back - sqlx
/// guarantees that - which is what makes cancellation of a pending
/// creation request safe.
pub struct PgUnitOfWork {
    tx: sqlx::Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn find_and_lock_consumer(&mut self, nik: &str) -> StoreResult<Option<Consumer>> {
        let query = format!(
            "SELECT {CONSUMER_COLUMNS} FROM consumers WHERE nik = $1 FOR UPDATE"
        );
        let row = sqlx::query_as::<_, ConsumerRow>(&query)
            .bind(nik)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_store_error)?;
        Ok(row.map(Consumer::from))
    }

    async fn find_limit(&mut self, nik: &str, tenor: i32) -> StoreResult<Option<CreditLimit>> {
        let row = sqlx::query_as::<_, CreditLimitRow>(
            "SELECT consumer_nik, tenor, limit_amount, created_at, updated_at \
             FROM consumer_limits WHERE consumer_nik = $1 AND tenor = $2",
        )
        .bind(nik)
        .bind(tenor)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_store_error)?;
        Ok(row.map(CreditLimit::from))
    }

    async fn sum_active_otr(&mut self, nik: &str) -> StoreResult<Decimal> {
        // COALESCE so a consumer with no active contracts sums to zero
        // instead of NULL.
        let (sum,): (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(otr), 0) FROM transactions \
             WHERE consumer_nik = $1 AND status = 'ACTIVE'",
        )
        .bind(nik)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_store_error)?;
        Ok(sum)
    }

    async fn insert_transaction(&mut self, transaction: &Transaction) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions
                (contract_number, consumer_nik, otr, admin_fee, tenor,
                 interest, asset_name, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&transaction.contract_number)
        .bind(&transaction.consumer_nik)
        .bind(transaction.otr)
        .bind(transaction.admin_fee)
        .bind(transaction.tenor)
        .bind(transaction.interest)
        .bind(&transaction.asset_name)
        .bind(transaction.status.as_str())
        .bind(transaction.created_at)
        .bind(transaction.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_store_error)?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await.map_err(map_store_error)
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        self.tx.rollback().await.map_err(map_store_error)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork + '_>> {
        let tx = self.pool().begin().await.map_err(map_store_error)?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }

    async fn find_consumer_by_nik(&self, nik: &str) -> StoreResult<Option<Consumer>> {
        let query = format!("SELECT {CONSUMER_COLUMNS} FROM consumers WHERE nik = $1");
        let row = sqlx::query_as::<_, ConsumerRow>(&query)
            .bind(nik)
            .fetch_optional(self.pool())
            .await
            .map_err(map_store_error)?;
        Ok(row.map(Consumer::from))
    }

    async fn find_consumer_by_phone(&self, phone_number: &str) -> StoreResult<Option<Consumer>> {
        let query = format!("SELECT {CONSUMER_COLUMNS} FROM consumers WHERE phone_number = $1");
        let row = sqlx::query_as::<_, ConsumerRow>(&query)
            .bind(phone_number)
            .fetch_optional(self.pool())
            .await
            .map_err(map_store_error)?;
        Ok(row.map(Consumer::from))
    }

    async fn list_limits(&self, nik: &str) -> StoreResult<Vec<CreditLimit>> {
        let rows = sqlx::query_as::<_, CreditLimitRow>(
            "SELECT consumer_nik, tenor, limit_amount, created_at, updated_at \
             FROM consumer_limits WHERE consumer_nik = $1 ORDER BY tenor ASC",
        )
        .bind(nik)
        .fetch_all(self.pool())
        .await
        .map_err(map_store_error)?;
        Ok(rows.into_iter().map(CreditLimit::from).collect())
    }
}
