//! Transaction creation

use super::connect;
use anyhow::Result;
use kredit_business::TransactionEngine;
use kredit_core::{DomainError, TransactionRequest};
use rust_decimal::Decimal;

/// Create a financing transaction as the consumer identified by `nik`.
pub async fn create(
    database_url: &str,
    nik: &str,
    otr: Decimal,
    tenor: i32,
    asset: &str,
) -> Result<()> {
    let store = connect(database_url).await?;
    let engine = TransactionEngine::new(store);

    let request = TransactionRequest {
        consumer_nik: nik.to_string(),
        otr,
        tenor,
        asset_name: asset.to_string(),
    };

    match engine.create_transaction(nik, &request).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(err @ DomainError::LimitExceeded { .. }) => {
            // Policy refusal, not a fault: report and exit non-zero.
            eprintln!("refused: {err}");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

/// List a consumer's contracts, newest first.
pub async fn list(database_url: &str, nik: &str) -> Result<()> {
    let store = connect(database_url).await?;
    let transactions = store.list_transactions(nik).await?;

    if transactions.is_empty() {
        println!("no transactions for {nik}");
        return Ok(());
    }
    println!(
        "{:<14} {:>14} {:>6} {:>10}  {}",
        "contract", "otr", "tenor", "status", "created"
    );
    for tx in transactions {
        println!(
            "{:<14} {:>14} {:>6} {:>10}  {}",
            tx.contract_number,
            tx.otr,
            tx.tenor,
            tx.status,
            tx.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
