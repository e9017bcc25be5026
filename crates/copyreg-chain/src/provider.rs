use async_trait::async_trait;

use crate::ChainError;

/// Transaction to be signed and sent by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRequest {
    pub from: String,
    pub to: String,
    pub data: Vec<u8>,
    /// Fixed gas ceiling; no estimation is performed.
    pub gas: u64,
}

/// Receipt of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub transaction_hash: String,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    /// Absent on nodes that predate EIP-1559 receipts.
    pub effective_gas_price: Option<u128>,
    /// False when the transaction reverted.
    pub success: bool,
}

/// Account access and signing, following the Ethereum JSON-RPC provider pattern.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet for account access (`eth_requestAccounts`).
    async fn request_accounts(&self) -> Result<Vec<String>, ChainError>;

    /// Balance of an address in wei.
    async fn get_balance(&self, address: &str) -> Result<u128, ChainError>;

    async fn chain_id(&self) -> Result<u64, ChainError>;

    /// Sign and broadcast; returns the transaction hash as soon as it is known.
    async fn send_transaction(&self, tx: &TxRequest) -> Result<String, ChainError>;

    /// `None` while the transaction is not yet mined.
    async fn get_transaction_receipt(&self, tx_hash: &str) -> Result<Option<TxReceipt>, ChainError>;
}
