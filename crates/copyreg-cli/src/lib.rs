use anyhow::Context;
use copyreg_api_client::ApiClient;
use copyreg_chain::{JsonRpcWallet, WalletProvider};
use copyreg_core::models::{StageUpdate, TransactionRecord};
use copyreg_core::{ErrorMetadata, PublishConfig};
use copyreg_publish::{
    BackendNotifier, PublishFailure, PublishFlow, SettingsResolver, TransactionSubmitter,
    WalletConnector,
};
use std::sync::Arc;
use tokio::sync::watch;

/// Shorten a transaction hash or address to its first and last characters.
pub fn short_hash(hash: &str) -> String {
    if hash.len() <= 14 || !hash.is_ascii() {
        hash.to_string()
    } else {
        format!("{}...{}", &hash[..8], &hash[hash.len() - 4..])
    }
}

/// One-line rendering of a stage update, e.g. `[#####-----]  50% signing`.
pub fn format_stage(update: StageUpdate) -> String {
    const WIDTH: usize = 10;
    let filled = usize::from(update.progress.min(100)) * WIDTH / 100;
    format!(
        "[{}{}] {:>3}% {}",
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        update.progress,
        update.stage
    )
}

/// Emit a line for every stage and transaction update until both channels close.
///
/// Stage updates are taken first, so the final stage is reported even when
/// both senders are dropped at once.
pub async fn relay_progress(
    mut stages: watch::Receiver<StageUpdate>,
    mut transactions: watch::Receiver<Option<TransactionRecord>>,
    mut emit: impl FnMut(String),
) {
    let mut stages_open = true;
    let mut transactions_open = true;

    while stages_open || transactions_open {
        tokio::select! {
            biased;
            changed = stages.changed(), if stages_open => match changed {
                Ok(()) => emit(format_stage(*stages.borrow_and_update())),
                Err(_) => stages_open = false,
            },
            changed = transactions.changed(), if transactions_open => match changed {
                Ok(()) => {
                    if let Some(tx) = transactions.borrow_and_update().as_ref() {
                        emit(format!("    tx {} {}", short_hash(&tx.hash), tx.status));
                    }
                }
                Err(_) => transactions_open = false,
            },
        }
    }
}

/// JSON summary of a failed publish for the operator.
pub fn failure_summary(failure: &PublishFailure) -> serde_json::Value {
    serde_json::json!({
        "stage": failure.stage,
        "code": failure.error.error_code(),
        "message": failure.error.client_message(),
        "detail": failure.error.to_string(),
        "recoverable": failure.error.is_recoverable(),
        "suggestedAction": failure.error.suggested_action(),
        "transaction": failure.transaction,
    })
}

/// Wire the publish flow to the REST client and, when configured, the RPC wallet.
pub fn build_flow(config: &PublishConfig, client: Arc<ApiClient>) -> anyhow::Result<PublishFlow> {
    let provider: Option<Arc<dyn WalletProvider>> = match &config.rpc_url {
        Some(url) => Some(Arc::new(
            JsonRpcWallet::new(url.clone(), config.http_timeout())
                .context("Failed to create wallet RPC client")?,
        )),
        None => None,
    };

    Ok(PublishFlow::new(
        WalletConnector::new(provider),
        SettingsResolver::new(client.clone(), config.contract_setting_key.clone()),
        TransactionSubmitter::from_config(config),
        BackendNotifier::new(client),
    ))
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
