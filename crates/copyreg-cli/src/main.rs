//! copyreg: inspect registry records and publish them on chain.
//!
//! Set COPYREG_API_TOKEN (or JWT_TOKEN) and COPYREG_API_URL (or API_URL).
//! Publishing and wallet commands also need COPYREG_RPC_URL.

use anyhow::Context;
use clap::{Parser, Subcommand};
use copyreg_api_client::ApiClient;
use copyreg_cli::{build_flow, failure_summary, init_tracing, relay_progress};
use copyreg_core::models::{RecordKind, RecordStatus};
use copyreg_core::PublishConfig;
use copyreg_publish::StageTracker;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "copyreg", about = "Copyright registry publishing CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List system settings
    Settings,
    /// Resolve the registry contract address from system settings
    Contract,
    /// Connect the wallet and show address, balance and network
    Wallet,
    /// List records of one kind
    Records {
        /// copyright, license or transfer
        #[arg(long)]
        kind: RecordKind,
        /// Filter by status: pending, approved, paid, published, rejected
        #[arg(long)]
        status: Option<RecordStatus>,
    },
    /// Get a single record by ID
    Show {
        #[arg(long)]
        kind: RecordKind,
        id: String,
    },
    /// Publish a record on chain and mark it published
    Publish {
        #[arg(long)]
        kind: RecordKind,
        id: String,
        /// Stop waiting for confirmation after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Record an already confirmed transaction hash against a record
    Notify {
        #[arg(long)]
        kind: RecordKind,
        id: String,
        #[arg(long)]
        tx_hash: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = PublishConfig::from_env().context(
        "Failed to load configuration. Set COPYREG_API_TOKEN (or JWT_TOKEN) and COPYREG_API_URL (or API_URL)",
    )?;
    let client = Arc::new(ApiClient::from_config(&config).context("Failed to create API client")?);

    match cli.command {
        Commands::Settings => {
            let settings = client.list_settings().await?;
            print_json(&settings)?;
        }
        Commands::Contract => {
            let flow = build_flow(&config, client)?;
            let address = flow.settings().resolve_contract_address().await?;
            print_json(&serde_json::json!({
                "key": flow.settings().contract_key(),
                "address": address,
            }))?;
        }
        Commands::Wallet => {
            let flow = build_flow(&config, client)?;
            let session = flow.wallet().connect().await?;
            print_json(&session)?;
        }
        Commands::Records { kind, status } => {
            let records = client.list_records(kind, status).await?;
            print_json(&records)?;
        }
        Commands::Show { kind, id } => {
            let record = client.get_record(kind, &id).await?;
            print_json(&record)?;
        }
        Commands::Publish {
            kind,
            id,
            timeout_secs,
        } => {
            if timeout_secs.is_some() {
                config.confirmation_timeout_secs = timeout_secs;
            }
            let flow = build_flow(&config, client.clone())?;
            let mut record = client
                .get_record(kind, &id)
                .await
                .with_context(|| format!("Failed to load {} {}", kind, id))?;

            let mut tracker = StageTracker::new();
            let stages = tracker.subscribe();
            let transactions = tracker.subscribe_transaction();
            let printer = tokio::spawn(relay_progress(stages, transactions, |line| {
                eprintln!("{}", line)
            }));

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("Interrupted; a sent transaction is not cancelled on chain");
                    on_interrupt.cancel();
                }
            });

            let result = flow.publish(&mut record, &mut tracker, &cancel).await;
            drop(tracker);
            let _ = printer.await;

            match result {
                Ok(report) => print_json(&report)?,
                Err(failure) => {
                    print_json(&failure_summary(&failure))?;
                    return Err(failure.into());
                }
            }
        }
        Commands::Notify { kind, id, tx_hash } => {
            let flow = build_flow(&config, client)?;
            let record = flow
                .notifier()
                .notify_published(kind, &id, &tx_hash)
                .await?;
            print_json(&record)?;
        }
    }

    Ok(())
}
