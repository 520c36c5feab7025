//! In-memory ledger store
//!
//! Implements the same contracts as the PostgreSQL backend with the
//! same observable semantics: a unit of work buffers its append until
//! commit, the locking read holds a per-consumer async mutex until the
//! unit of work ends, and duplicate contract numbers surface as
//! `UniqueViolation`. The engine's property and race tests run against
//! this store.

use async_trait::async_trait;
use kredit_core::{
    Consumer, CreditLimit, Store, StoreError, StoreResult, Transaction, TransactionStatus,
    UnitOfWork,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

struct ConsumerSlot {
    consumer: Consumer,
    // One mutex per consumer row: the in-memory stand-in for FOR UPDATE.
    lock: Arc<Mutex<()>>,
}

#[derive(Default)]
struct State {
    consumers: HashMap<String, ConsumerSlot>,
    limits: HashMap<(String, i32), CreditLimit>,
    transactions: Vec<Transaction>,
}

/// In-process store with row-lock semantics.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a consumer record (test/demo setup).
    pub async fn seed_consumer(&self, consumer: Consumer) {
        let mut state = self.state.write().await;
        state.consumers.insert(
            consumer.nik.clone(),
            ConsumerSlot {
                consumer,
                lock: Arc::new(Mutex::new(())),
            },
        );
    }

    /// Seed a credit limit (test/demo setup).
    pub async fn seed_limit(&self, limit: CreditLimit) {
        let mut state = self.state.write().await;
        state
            .limits
            .insert((limit.consumer_nik.clone(), limit.tenor), limit);
    }

    /// Snapshot of all committed transactions.
    pub async fn transactions(&self) -> Vec<Transaction> {
        self.state.read().await.transactions.clone()
    }

    /// Committed ACTIVE exposure for a consumer.
    pub async fn active_exposure(&self, nik: &str) -> Decimal {
        let state = self.state.read().await;
        sum_active(&state.transactions, nik)
    }
}

fn sum_active(transactions: &[Transaction], nik: &str) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.consumer_nik == nik && t.status == TransactionStatus::Active)
        .map(|t| t.otr)
        .sum()
}

/// A buffered unit of work over `MemoryStore`.
///
/// Dropping it releases all held consumer locks and discards the
/// buffered appends, matching a database rollback.
pub struct MemoryUnitOfWork {
    state: Arc<RwLock<State>>,
    guards: Vec<OwnedMutexGuard<()>>,
    pending: Vec<Transaction>,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn find_and_lock_consumer(&mut self, nik: &str) -> StoreResult<Option<Consumer>> {
        // Resolve the row's mutex without holding the state lock across
        // the (potentially long) wait for it.
        let lock = {
            let state = self.state.read().await;
            match state.consumers.get(nik) {
                Some(slot) => slot.lock.clone(),
                None => return Ok(None),
            }
        };
        let guard = lock.lock_owned().await;
        self.guards.push(guard);

        let state = self.state.read().await;
        Ok(state.consumers.get(nik).map(|slot| slot.consumer.clone()))
    }

    async fn find_limit(&mut self, nik: &str, tenor: i32) -> StoreResult<Option<CreditLimit>> {
        let state = self.state.read().await;
        Ok(state.limits.get(&(nik.to_string(), tenor)).cloned())
    }

    async fn sum_active_otr(&mut self, nik: &str) -> StoreResult<Decimal> {
        // Like a database transaction, this sees its own uncommitted
        // appends on top of the committed state.
        let state = self.state.read().await;
        Ok(sum_active(&state.transactions, nik) + sum_active(&self.pending, nik))
    }

    async fn insert_transaction(&mut self, transaction: &Transaction) -> StoreResult<()> {
        let state = self.state.read().await;
        let duplicate = state
            .transactions
            .iter()
            .chain(self.pending.iter())
            .any(|t| t.contract_number == transaction.contract_number);
        if duplicate {
            return Err(StoreError::UniqueViolation(format!(
                "transactions.contract_number = {}",
                transaction.contract_number
            )));
        }
        drop(state);
        self.pending.push(transaction.clone());
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> StoreResult<()> {
        let mut state = self.state.write().await;
        // Re-check uniqueness: another consumer's unit of work may have
        // committed the same number while this one was open.
        for pending in &self.pending {
            if state
                .transactions
                .iter()
                .any(|t| t.contract_number == pending.contract_number)
            {
                return Err(StoreError::UniqueViolation(format!(
                    "transactions.contract_number = {}",
                    pending.contract_number
                )));
            }
        }
        state.transactions.append(&mut self.pending);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        // Dropping releases the guards and the buffered rows.
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork + '_>> {
        Ok(Box::new(MemoryUnitOfWork {
            state: self.state.clone(),
            guards: Vec::new(),
            pending: Vec::new(),
        }))
    }

    async fn find_consumer_by_nik(&self, nik: &str) -> StoreResult<Option<Consumer>> {
        let state = self.state.read().await;
        Ok(state.consumers.get(nik).map(|slot| slot.consumer.clone()))
    }

    async fn find_consumer_by_phone(&self, phone_number: &str) -> StoreResult<Option<Consumer>> {
        let state = self.state.read().await;
        Ok(state
            .consumers
            .values()
            .find(|slot| slot.consumer.phone_number == phone_number)
            .map(|slot| slot.consumer.clone()))
    }

    async fn list_limits(&self, nik: &str) -> StoreResult<Vec<CreditLimit>> {
        let state = self.state.read().await;
        let mut limits: Vec<CreditLimit> = state
            .limits
            .values()
            .filter(|l| l.consumer_nik == nik)
            .cloned()
            .collect();
        limits.sort_by_key(|l| l.tenor);
        Ok(limits)
    }
}
