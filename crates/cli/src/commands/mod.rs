//! Command handlers

pub mod consumer;
pub mod transaction;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use kredit_core::{Consumer, CreditLimit};
use kredit_persistence::PgStore;
use rust_decimal_macros::dec;

pub async fn connect(database_url: &str) -> Result<PgStore> {
    PgStore::connect(database_url)
        .await
        .context("failed to connect to database")
}

/// Create the schema, optionally with demo data.
pub async fn init(database_url: &str, seed: bool) -> Result<()> {
    let store = connect(database_url).await?;
    store.init_schema().await.context("schema init failed")?;
    println!("schema ready");

    if seed {
        seed_demo_data(&store).await?;
        println!("demo data seeded");
    }
    Ok(())
}

/// Show row counts per table.
pub async fn status(database_url: &str) -> Result<()> {
    let store = connect(database_url).await?;

    for table in ["consumers", "consumer_limits", "transactions"] {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(store.pool())
            .await
            .unwrap_or((0,));
        println!("{table:16} {count}");
    }
    Ok(())
}

async fn seed_demo_data(store: &PgStore) -> Result<()> {
    let now = Utc::now();
    let demo_consumers = [
        Consumer {
            nik: "3175031234560001".to_string(),
            phone_number: "081234567890".to_string(),
            password_hash: "$argon2id$demo-only".to_string(),
            full_name: "Budi Santoso".to_string(),
            legal_name: "Budi Santoso".to_string(),
            birth_place: "Jakarta".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).context("demo birth date")?,
            salary: dec!(12000000),
            ktp_photo_path: "/docs/ktp/budi.jpg".to_string(),
            selfie_photo_path: "/docs/selfie/budi.jpg".to_string(),
            created_at: now,
            updated_at: now,
        },
        Consumer {
            nik: "3275094567890002".to_string(),
            phone_number: "081298765432".to_string(),
            password_hash: "$argon2id$demo-only".to_string(),
            full_name: "Annisa Putri".to_string(),
            legal_name: "Annisa Putri".to_string(),
            birth_place: "Bandung".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1993, 9, 4).context("demo birth date")?,
            salary: dec!(9000000),
            ktp_photo_path: "/docs/ktp/annisa.jpg".to_string(),
            selfie_photo_path: "/docs/selfie/annisa.jpg".to_string(),
            created_at: now,
            updated_at: now,
        },
    ];

    for consumer in &demo_consumers {
        store
            .insert_consumer(consumer)
            .await
            .with_context(|| format!("seeding consumer {}", consumer.nik))?;
    }

    let demo_limits = [
        ("3175031234560001", 6, dec!(5000000)),
        ("3175031234560001", 12, dec!(10000000)),
        ("3175031234560001", 24, dec!(20000000)),
        ("3275094567890002", 6, dec!(3000000)),
        ("3275094567890002", 12, dec!(7000000)),
    ];

    for (nik, tenor, amount) in demo_limits {
        store
            .insert_limit(&CreditLimit {
                consumer_nik: nik.to_string(),
                tenor,
                limit_amount: amount,
                created_at: now,
                updated_at: now,
            })
            .await
            .with_context(|| format!("seeding limit {nik}/{tenor}"))?;
    }

    Ok(())
}
