//! Kredit CLI - financing operations from the command line
//!
//! Usage:
//! ```bash
//! kredit init --seed
//! kredit status
//! kredit consumer show 3175031234560001
//! kredit limits --phone 081234567890 --nik 3175031234560001
//! kredit transact --nik 3175031234560001 --otr 5000000 --tenor 12 --asset "Honda Vario 160"
//! ```
//!
//! The CLI is an operational tool: the `--nik` passed to `transact`
//! plays the role of the authenticated caller identity that the HTTP
//! layer would normally establish.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;
mod config;

use commands::{consumer, transaction};
use config::AppConfig;

/// Kredit - consumer financing core over PostgreSQL
#[derive(Parser)]
#[command(name = "kredit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database URL (falls back to DATABASE_URL / DB_* env vars)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the schema (and optionally demo data)
    Init {
        /// Also seed demo consumers and limits
        #[arg(long)]
        seed: bool,
    },

    /// Show row counts per table
    Status,

    /// Consumer lookups
    Consumer {
        #[command(subcommand)]
        action: ConsumerAction,
    },

    /// List a consumer's credit limits
    Limits {
        /// Phone number of the authenticated consumer
        #[arg(long)]
        phone: String,
        /// NIK whose limits to list
        #[arg(long)]
        nik: String,
    },

    /// List a consumer's contracts, newest first
    Transactions {
        /// NIK of the consumer
        #[arg(long)]
        nik: String,
    },

    /// Create a financing transaction
    Transact {
        /// NIK of the acting consumer
        #[arg(long)]
        nik: String,
        /// OTR (principal) amount
        #[arg(long)]
        otr: Decimal,
        /// Installment count
        #[arg(long)]
        tenor: i32,
        /// Financed asset name
        #[arg(long)]
        asset: String,
    },
}

#[derive(Subcommand)]
pub enum ConsumerAction {
    /// Show a consumer profile by NIK
    Show { nik: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let database_url = cli.database_url.unwrap_or(config.database_url);

    match cli.command {
        Commands::Init { seed } => commands::init(&database_url, seed).await?,
        Commands::Status => commands::status(&database_url).await?,
        Commands::Consumer { action } => match action {
            ConsumerAction::Show { nik } => consumer::show(&database_url, &nik).await?,
        },
        Commands::Limits { phone, nik } => consumer::limits(&database_url, &phone, &nik).await?,
        Commands::Transactions { nik } => transaction::list(&database_url, &nik).await?,
        Commands::Transact {
            nik,
            otr,
            tenor,
            asset,
        } => transaction::create(&database_url, &nik, otr, tenor, &asset).await?,
    }

    Ok(())
}
