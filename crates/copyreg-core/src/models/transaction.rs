use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

use crate::units::{fee_wei, wei_to_ether};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

impl Display for TxStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TxStatus::Pending => write!(f, "pending"),
            TxStatus::Confirmed => write!(f, "confirmed"),
            TxStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Tracking of one submitted publish transaction. Discarded with the attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub attempt_id: Uuid,
    pub hash: String,
    pub status: TxStatus,
    pub submitted_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub block_number: Option<u64>,
    pub gas_used: Option<u64>,
    pub effective_gas_price: Option<u128>,
    /// Fee in wei (gas used x effective gas price).
    pub fee_wei: Option<u128>,
    /// Fee in ether, when representable.
    pub fee: Option<Decimal>,
}

impl TransactionRecord {
    /// A freshly submitted transaction, known only by its hash.
    pub fn pending(attempt_id: Uuid, hash: impl Into<String>) -> Self {
        Self {
            attempt_id,
            hash: hash.into(),
            status: TxStatus::Pending,
            submitted_at: Utc::now(),
            confirmed_at: None,
            block_number: None,
            gas_used: None,
            effective_gas_price: None,
            fee_wei: None,
            fee: None,
        }
    }

    /// Attach receipt data and mark the transaction confirmed.
    ///
    /// The fee is only computed when the receipt reports an effective gas price.
    pub fn confirm(
        &mut self,
        block_number: Option<u64>,
        gas_used: u64,
        effective_gas_price: Option<u128>,
    ) {
        let fee = effective_gas_price.map(|price| fee_wei(gas_used, price));
        self.status = TxStatus::Confirmed;
        self.confirmed_at = Some(Utc::now());
        self.block_number = block_number;
        self.gas_used = Some(gas_used);
        self.effective_gas_price = effective_gas_price;
        self.fee_wei = fee;
        self.fee = fee.and_then(wei_to_ether);
    }

    pub fn fail(&mut self) {
        self.status = TxStatus::Failed;
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == TxStatus::Confirmed
    }
}
