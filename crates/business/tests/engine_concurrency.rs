//! Concurrency properties of the transaction engine.
//!
//! The serialization point is the consumer row lock: concurrent
//! requests for one consumer are totally ordered, requests for
//! different consumers run in parallel.

use chrono::{NaiveDate, Utc};
use kredit_business::TransactionEngine;
use kredit_core::{Consumer, CreditLimit, ErrorKind, Store, TransactionRequest, UnitOfWork};
use kredit_persistence::MemoryStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Barrier;

fn consumer(nik: &str, phone: &str) -> Consumer {
    Consumer {
        nik: nik.to_string(),
        phone_number: phone.to_string(),
        password_hash: "hash".to_string(),
        full_name: "Race Tester".to_string(),
        legal_name: "Race Tester".to_string(),
        birth_place: "Semarang".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1991, 7, 21).unwrap(),
        salary: dec!(11000000),
        ktp_photo_path: "/docs/ktp.jpg".to_string(),
        selfie_photo_path: "/docs/selfie.jpg".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn limit(nik: &str, tenor: i32, amount: Decimal) -> CreditLimit {
    CreditLimit {
        consumer_nik: nik.to_string(),
        tenor,
        limit_amount: amount,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn request(nik: &str, otr: Decimal) -> TransactionRequest {
    TransactionRequest {
        consumer_nik: nik.to_string(),
        otr,
        tenor: 12,
        asset_name: "Toyota Avanza".to_string(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_race_admits_exactly_one_when_only_one_fits() {
    let store = MemoryStore::new();
    store.seed_consumer(consumer("C1", "0811")).await;
    store.seed_limit(limit("C1", 12, dec!(10000000))).await;

    let engine = Arc::new(TransactionEngine::new(store.clone()));
    let barrier = Arc::new(Barrier::new(2));

    let mut handles = Vec::new();
    for _ in 0..2 {
        let engine = engine.clone();
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            engine
                .create_transaction("C1", &request("C1", dec!(6000000)))
                .await
        }));
    }

    let mut admitted = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => admitted += 1,
            Err(err) => {
                assert_eq!(err.kind(), ErrorKind::LimitExceeded);
                rejected += 1;
            }
        }
    }

    assert_eq!(admitted, 1);
    assert_eq!(rejected, 1);
    assert_eq!(store.active_exposure("C1").await, dec!(6000000));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_exposure_never_exceeds_limit_under_load() {
    let store = MemoryStore::new();
    store.seed_consumer(consumer("C1", "0811")).await;
    store.seed_limit(limit("C1", 12, dec!(10000000))).await;

    let engine = Arc::new(TransactionEngine::new(store.clone()));
    let barrier = Arc::new(Barrier::new(8));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = engine.clone();
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            engine
                .create_transaction("C1", &request("C1", dec!(3000000)))
                .await
        }));
    }

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            admitted += 1;
        }
    }

    // 3 x 3,000,000 fits under 10,000,000; a fourth would not.
    assert_eq!(admitted, 3);
    assert_eq!(store.active_exposure("C1").await, dec!(9000000));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_different_consumers_proceed_in_parallel() {
    let store = MemoryStore::new();
    store.seed_consumer(consumer("C1", "0811")).await;
    store.seed_consumer(consumer("C2", "0822")).await;
    store.seed_limit(limit("C1", 12, dec!(10000000))).await;
    store.seed_limit(limit("C2", 12, dec!(10000000))).await;

    // Hold C1's row lock open.
    let mut blocker = store.begin().await.unwrap();
    blocker.find_and_lock_consumer("C1").await.unwrap().unwrap();

    // C2 is unaffected by C1's lock.
    let engine = TransactionEngine::new(store.clone());
    let c2 = tokio::time::timeout(
        Duration::from_millis(200),
        engine.create_transaction("C2", &request("C2", dec!(5000000))),
    )
    .await
    .expect("request for an unlocked consumer must not block")
    .unwrap();
    assert_eq!(c2.consumer_nik, "C2");

    // C1 blocks until the lock holder finishes.
    let c1_attempt = tokio::time::timeout(
        Duration::from_millis(100),
        engine.create_transaction("C1", &request("C1", dec!(5000000))),
    )
    .await;
    assert!(c1_attempt.is_err(), "locked consumer must wait");

    blocker.rollback().await.unwrap();
    engine
        .create_transaction("C1", &request("C1", dec!(5000000)))
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cancelled_request_rolls_back() {
    let store = MemoryStore::new();
    store.seed_consumer(consumer("C1", "0811")).await;
    store.seed_limit(limit("C1", 12, dec!(10000000))).await;

    // Hold the lock so a creation request parks on it, then cancel the
    // request by dropping its future.
    let mut blocker = store.begin().await.unwrap();
    blocker.find_and_lock_consumer("C1").await.unwrap().unwrap();

    let engine = TransactionEngine::new(store.clone());
    let cancelled = tokio::time::timeout(
        Duration::from_millis(100),
        engine.create_transaction("C1", &request("C1", dec!(5000000))),
    )
    .await;
    assert!(cancelled.is_err());

    blocker.rollback().await.unwrap();

    // The cancelled request left no residue: no rows, no held lock.
    assert!(store.transactions().await.is_empty());
    engine
        .create_transaction("C1", &request("C1", dec!(5000000)))
        .await
        .unwrap();
}
