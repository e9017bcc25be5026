//! Transaction sending and confirmation wait.

use copyreg_chain::{ChainError, TxReceipt, TxRequest, WalletProvider};
use copyreg_core::models::TransactionRecord;
use copyreg_core::{PublishConfig, PublishError};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::builder::CallArgs;

/// Gas ceiling sent with every publish transaction; no estimation is done.
pub const DEFAULT_GAS_LIMIT: u64 = 500_000;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct TransactionSubmitter {
    gas_limit: u64,
    poll_interval: Duration,
    confirmation_timeout: Option<Duration>,
}

impl Default for TransactionSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_GAS_LIMIT, DEFAULT_POLL_INTERVAL)
    }
}

impl TransactionSubmitter {
    /// Submitter without a confirmation bound.
    pub fn new(gas_limit: u64, poll_interval: Duration) -> Self {
        Self {
            gas_limit,
            poll_interval,
            confirmation_timeout: None,
        }
    }

    pub fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    pub fn from_config(config: &PublishConfig) -> Self {
        Self::new(config.gas_limit, config.receipt_poll_interval())
            .with_confirmation_timeout(config.confirmation_timeout())
    }

    /// Encode the call, have the wallet sign and send it, and return the
    /// pending record as soon as the hash is known.
    pub async fn send(
        &self,
        provider: &dyn WalletProvider,
        from: &str,
        contract: &str,
        args: &CallArgs,
        attempt_id: Uuid,
    ) -> Result<TransactionRecord, PublishError> {
        let data = args
            .call
            .encode()
            .map_err(|e| PublishError::ChainSubmission(e.to_string()))?;

        let request = TxRequest {
            from: from.to_string(),
            to: contract.to_string(),
            data,
            gas: self.gas_limit,
        };

        let hash = provider
            .send_transaction(&request)
            .await
            .map_err(|e| match e {
                ChainError::UserRejected(msg) => PublishError::UserRejectedSignature(msg),
                other => PublishError::ChainSubmission(other.to_string()),
            })?;

        tracing::info!(
            tx_hash = %hash,
            method = %args.call.method,
            contract = %contract,
            gas_limit = self.gas_limit,
            "Transaction sent"
        );
        Ok(TransactionRecord::pending(attempt_id, hash))
    }

    /// Wait for the receipt and record the outcome on `transaction`.
    ///
    /// Without a configured timeout this waits until the receipt appears or
    /// `cancel` fires. Neither timeout nor cancellation affects the transaction
    /// on chain; the record stays pending.
    pub async fn wait(
        &self,
        provider: &dyn WalletProvider,
        transaction: &mut TransactionRecord,
        cancel: &CancellationToken,
    ) -> Result<(), PublishError> {
        let start = Instant::now();
        let polling = self.poll_receipt(provider, &transaction.hash, cancel);

        let receipt = match self.confirmation_timeout {
            Some(limit) => tokio::time::timeout(limit, polling).await.map_err(|_| {
                tracing::warn!(tx_hash = %transaction.hash, "Confirmation wait timed out");
                PublishError::ConfirmationTimeout {
                    tx_hash: transaction.hash.clone(),
                    waited_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                }
            })??,
            None => polling.await?,
        };

        if !receipt.success {
            transaction.fail();
            return Err(PublishError::ChainSubmission(format!(
                "transaction {} reverted",
                transaction.hash
            )));
        }

        transaction.confirm(
            receipt.block_number,
            receipt.gas_used,
            receipt.effective_gas_price,
        );
        tracing::info!(
            tx_hash = %transaction.hash,
            block_number = ?transaction.block_number,
            gas_used = receipt.gas_used,
            fee = ?transaction.fee,
            duration_ms = start.elapsed().as_millis() as u64,
            "Transaction confirmed"
        );
        Ok(())
    }

    async fn poll_receipt(
        &self,
        provider: &dyn WalletProvider,
        tx_hash: &str,
        cancel: &CancellationToken,
    ) -> Result<TxReceipt, PublishError> {
        let cancelled = || PublishError::Cancelled(format!("stopped waiting for {}", tx_hash));

        loop {
            let receipt = tokio::select! {
                _ = cancel.cancelled() => return Err(cancelled()),
                result = provider.get_transaction_receipt(tx_hash) => {
                    result.map_err(|e| PublishError::ChainSubmission(e.to_string()))?
                }
            };

            if let Some(receipt) = receipt {
                return Ok(receipt);
            }

            tracing::trace!(tx_hash = %tx_hash, "Receipt not available yet");
            tokio::select! {
                _ = cancel.cancelled() => return Err(cancelled()),
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }
}
