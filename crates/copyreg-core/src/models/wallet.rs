use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// In-memory wallet connection state. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSession {
    pub address: String,
    /// Balance in ether.
    pub balance: Decimal,
    pub chain_id: u64,
    pub network: String,
    pub connected: bool,
}
