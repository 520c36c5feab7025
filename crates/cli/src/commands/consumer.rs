//! Consumer and limit lookups

use super::connect;
use anyhow::Result;
use kredit_business::{ConsumerUsecase, LimitUsecase};

/// Show a consumer profile by NIK.
pub async fn show(database_url: &str, nik: &str) -> Result<()> {
    let store = connect(database_url).await?;
    let profile = ConsumerUsecase::new(store).profile_by_nik(nik).await?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

/// List a consumer's provisioned limits.
pub async fn limits(database_url: &str, phone: &str, nik: &str) -> Result<()> {
    let store = connect(database_url).await?;
    let limits = LimitUsecase::new(store)
        .limits_for_consumer(phone, nik)
        .await?;

    if limits.is_empty() {
        println!("no limits provisioned for {nik}");
        return Ok(());
    }
    println!("{:>6}  {:>16}", "tenor", "limit");
    for limit in limits {
        println!("{:>6}  {:>16}", limit.tenor, limit.limit_amount);
    }
    Ok(())
}
