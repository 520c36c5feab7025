//! Limit enforcement engine
//!
//! `create_transaction` is the one place in the system where multiple
//! reads and a write coordinate against shared financial state. The
//! whole protocol runs inside a single unit of work:
//!
//! 1. lock the consumer row (serializes concurrent requests per consumer)
//! 2. fetch the credit limit for the requested tenor
//! 3. sum the consumer's ACTIVE exposure under that lock
//! 4. admit or refuse; on admission append exactly one ledger row
//! 5. commit
//!
//! Identity and input validation happen before any unit of work opens,
//! so a malformed request never touches storage. A contract-number
//! collision rolls the unit of work back and the whole protocol is
//! retried with a fresh number, a bounded number of times.

use chrono::Utc;
use kredit_core::{
    ContractNumberGenerator, DomainError, DomainResult, RatePolicy, Store, Transaction,
    TransactionRequest, TransactionResponse, TransactionStatus, UnitOfWork,
};
use tracing::{error, info, warn};

/// Attempts at generating a non-colliding contract number before the
/// failure is surfaced as an internal fault.
const MAX_CONTRACT_ATTEMPTS: u32 = 3;

/// The transaction creation engine.
///
/// Generic over the store contract so the property tests run against
/// the in-memory backend with identical semantics.
pub struct TransactionEngine<S> {
    store: S,
    contract_numbers: ContractNumberGenerator,
    rates: RatePolicy,
}

impl<S: Store> TransactionEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            contract_numbers: ContractNumberGenerator::new(),
            rates: RatePolicy::default(),
        }
    }

    /// Replace the fee rate policy.
    pub fn with_rates(mut self, rates: RatePolicy) -> Self {
        self.rates = rates;
        self
    }

    /// Replace the contract number generator (seeded in tests).
    pub fn with_contract_numbers(mut self, generator: ContractNumberGenerator) -> Self {
        self.contract_numbers = generator;
        self
    }

    /// Create a financing transaction for the authenticated consumer.
    ///
    /// `caller_nik` is the identity established by authentication; it
    /// must match the NIK asserted in the request body. On success
    /// exactly one ledger row exists; on any failure none do.
    pub async fn create_transaction(
        &self,
        caller_nik: &str,
        request: &TransactionRequest,
    ) -> DomainResult<TransactionResponse> {
        if caller_nik != request.consumer_nik {
            return Err(DomainError::InvalidRequest(
                "NIK does not match the authenticated consumer".to_string(),
            ));
        }
        request.validate()?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_create(request).await {
                Err(DomainError::Conflict(constraint)) if attempt < MAX_CONTRACT_ATTEMPTS => {
                    warn!(
                        %constraint,
                        attempt,
                        "contract number collision, retrying with a fresh number"
                    );
                }
                Err(DomainError::Conflict(constraint)) => {
                    error!(%constraint, attempt, "contract number collisions exhausted");
                    return Err(DomainError::internal(format!(
                        "could not allocate a unique contract number after {attempt} attempts"
                    )));
                }
                other => return other,
            }
        }
    }

    /// One full pass of the protocol inside a fresh unit of work.
    async fn try_create(&self, request: &TransactionRequest) -> DomainResult<TransactionResponse> {
        let mut uow = self.store.begin().await?;

        let transaction = match self.admit(&mut uow, request).await {
            Ok(transaction) => transaction,
            Err(err) => {
                // Nothing to persist on any refusal path, policy or
                // technical. Roll back before surfacing.
                if let Err(rollback_err) = uow.rollback().await {
                    error!(error = %rollback_err, "rollback failed");
                }
                return Err(err);
            }
        };

        uow.commit().await?;
        info!(
            contract_number = %transaction.contract_number,
            consumer_nik = %transaction.consumer_nik,
            otr = %transaction.otr,
            tenor = transaction.tenor,
            "transaction admitted"
        );
        Ok(TransactionResponse::from(&transaction))
    }

    /// Steps 1-5: lock, look up, sum, decide, append.
    async fn admit(
        &self,
        uow: &mut Box<dyn UnitOfWork + '_>,
        request: &TransactionRequest,
    ) -> DomainResult<Transaction> {
        let consumer = uow
            .find_and_lock_consumer(&request.consumer_nik)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("consumer {}", request.consumer_nik))
            })?;

        let limit = uow
            .find_limit(&consumer.nik, request.tenor)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "credit limit for consumer {} at tenor {}",
                    consumer.nik, request.tenor
                ))
            })?;

        let exposure = uow.sum_active_otr(&consumer.nik).await?;

        // Inclusive boundary: a request that lands exactly on the limit
        // is admitted.
        if exposure + request.otr > limit.limit_amount {
            warn!(
                consumer_nik = %consumer.nik,
                %exposure,
                otr = %request.otr,
                limit = %limit.limit_amount,
                "transaction refused: would exceed credit limit"
            );
            return Err(DomainError::LimitExceeded {
                exposure,
                requested: request.otr,
                limit: limit.limit_amount,
            });
        }

        let now = Utc::now();
        let transaction = Transaction {
            contract_number: self.contract_numbers.generate(),
            consumer_nik: consumer.nik,
            otr: request.otr,
            admin_fee: self.rates.admin_fee(request.otr),
            tenor: request.tenor,
            interest: self.rates.interest(request.otr),
            asset_name: request.asset_name.clone(),
            status: TransactionStatus::Active,
            created_at: now,
            updated_at: now,
        };
        uow.insert_transaction(&transaction).await?;
        Ok(transaction)
    }
}
