//! Wallet provider over HTTP JSON-RPC.
//!
//! Talks to a node or signer that holds the operator's account (a local dev node,
//! a Clef/Frame-style signer). Signing prompts, if any, happen on that side; a
//! declined prompt comes back as error code 4001.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::provider::{TxReceipt, TxRequest, WalletProvider};
use crate::quantity::{parse_quantity, parse_quantity_u64, to_data, to_quantity};
use crate::ChainError;

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: String,
    #[serde(default)]
    block_number: Option<String>,
    gas_used: String,
    #[serde(default)]
    effective_gas_price: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl TryFrom<RawReceipt> for TxReceipt {
    type Error = ChainError;

    fn try_from(raw: RawReceipt) -> Result<Self, Self::Error> {
        Ok(TxReceipt {
            transaction_hash: raw.transaction_hash,
            block_number: raw.block_number.as_deref().map(parse_quantity_u64).transpose()?,
            gas_used: parse_quantity_u64(&raw.gas_used)?,
            effective_gas_price: raw
                .effective_gas_price
                .as_deref()
                .map(parse_quantity)
                .transpose()?,
            // Pre-Byzantium receipts carry no status; treat them as successful.
            success: match raw.status.as_deref() {
                Some(s) => parse_quantity(s)? == 1,
                None => true,
            },
        })
    }
}

/// JSON-RPC wallet provider reached over HTTP.
pub struct JsonRpcWallet {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl fmt::Debug for JsonRpcWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonRpcWallet").field("url", &self.url).finish()
    }
}

impl JsonRpcWallet {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ChainError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        tracing::trace!(method = %method, id = id, "JSON-RPC request");

        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ChainError::Transport(format!(
                "{} returned HTTP {}: {}",
                method, status, text
            )));
        }

        let rpc: RpcResponse = response
            .json()
            .await
            .map_err(|e| ChainError::InvalidResponse(format!("{}: {}", method, e)))?;

        if let Some(err) = rpc.error {
            return Err(ChainError::from_rpc(err.code, err.message));
        }

        serde_json::from_value(rpc.result.unwrap_or(Value::Null))
            .map_err(|e| ChainError::InvalidResponse(format!("{}: {}", method, e)))
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, ChainError> {
        match self.call("eth_requestAccounts", json!([])).await {
            Err(e) if e.is_method_not_found() => {
                tracing::debug!("eth_requestAccounts unsupported, falling back to eth_accounts");
                self.call("eth_accounts", json!([])).await
            }
            other => other,
        }
    }

    async fn get_balance(&self, address: &str) -> Result<u128, ChainError> {
        let raw: String = self.call("eth_getBalance", json!([address, "latest"])).await?;
        parse_quantity(&raw)
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        let raw: String = self.call("eth_chainId", json!([])).await?;
        parse_quantity_u64(&raw)
    }

    async fn send_transaction(&self, tx: &TxRequest) -> Result<String, ChainError> {
        let params = json!([{
            "from": tx.from,
            "to": tx.to,
            "data": to_data(&tx.data),
            "gas": to_quantity(tx.gas),
        }]);
        self.call("eth_sendTransaction", params).await
    }

    async fn get_transaction_receipt(&self, tx_hash: &str) -> Result<Option<TxReceipt>, ChainError> {
        let raw: Option<RawReceipt> = self
            .call("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;
        raw.map(TxReceipt::try_from).transpose()
    }
}
