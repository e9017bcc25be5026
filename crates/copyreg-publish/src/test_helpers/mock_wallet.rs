//! Mock wallet provider

use async_trait::async_trait;
use copyreg_chain::{ChainError, TxReceipt, TxRequest, WalletProvider};
use std::sync::{Arc, Mutex};

use super::fixtures::{OPERATOR, TX_HASH};

#[derive(Debug, Clone)]
struct WalletBehaviour {
    accounts: Vec<String>,
    balance_wei: u128,
    chain_id: u64,
    reject_connection: bool,
    reject_signature: bool,
    revert: bool,
    /// Receipt polls answered with `None` before the receipt appears; `None` never mines.
    receipt_after_polls: Option<usize>,
}

/// Wallet double that records every provider call.
///
/// Clones share state, so a test can hand one clone to the code under test and
/// inspect the call log through another.
#[derive(Debug, Clone)]
pub struct MockWallet {
    behaviour: Arc<Mutex<WalletBehaviour>>,
    calls: Arc<Mutex<Vec<String>>>,
    sent: Arc<Mutex<Vec<TxRequest>>>,
    polls: Arc<Mutex<usize>>,
}

impl MockWallet {
    /// Sepolia wallet holding 1.5 ether whose transactions mine on the first poll.
    pub fn new() -> Self {
        Self {
            behaviour: Arc::new(Mutex::new(WalletBehaviour {
                accounts: vec![OPERATOR.to_string()],
                balance_wei: 1_500_000_000_000_000_000,
                chain_id: 11_155_111,
                reject_connection: false,
                reject_signature: false,
                revert: false,
                receipt_after_polls: Some(0),
            })),
            calls: Arc::new(Mutex::new(Vec::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            polls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn rejecting_connection(self) -> Self {
        self.behaviour.lock().unwrap().reject_connection = true;
        self
    }

    pub fn without_accounts(self) -> Self {
        self.behaviour.lock().unwrap().accounts.clear();
        self
    }

    pub fn rejecting_signature(self) -> Self {
        self.behaviour.lock().unwrap().reject_signature = true;
        self
    }

    pub fn reverting(self) -> Self {
        self.behaviour.lock().unwrap().revert = true;
        self
    }

    pub fn mined_after(self, polls: usize) -> Self {
        self.behaviour.lock().unwrap().receipt_after_polls = Some(polls);
        self
    }

    pub fn never_mined(self) -> Self {
        self.behaviour.lock().unwrap().receipt_after_polls = None;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<TxRequest> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, ChainError> {
        self.record("request_accounts");
        let behaviour = self.behaviour.lock().unwrap();
        if behaviour.reject_connection {
            return Err(ChainError::UserRejected("User rejected the request.".to_string()));
        }
        Ok(behaviour.accounts.clone())
    }

    async fn get_balance(&self, _address: &str) -> Result<u128, ChainError> {
        self.record("get_balance");
        Ok(self.behaviour.lock().unwrap().balance_wei)
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        self.record("chain_id");
        Ok(self.behaviour.lock().unwrap().chain_id)
    }

    async fn send_transaction(&self, tx: &TxRequest) -> Result<String, ChainError> {
        self.record("send_transaction");
        if self.behaviour.lock().unwrap().reject_signature {
            return Err(ChainError::UserRejected(
                "User denied transaction signature.".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(tx.clone());
        Ok(TX_HASH.to_string())
    }

    async fn get_transaction_receipt(&self, tx_hash: &str) -> Result<Option<TxReceipt>, ChainError> {
        self.record("get_transaction_receipt");
        let behaviour = self.behaviour.lock().unwrap().clone();
        let mut polls = self.polls.lock().unwrap();
        let seen = *polls;
        *polls += 1;

        match behaviour.receipt_after_polls {
            Some(after) if seen >= after => Ok(Some(TxReceipt {
                transaction_hash: tx_hash.to_string(),
                block_number: Some(4_200_000),
                gas_used: 84_000,
                effective_gas_price: Some(2_000_000_000),
                success: !behaviour.revert,
            })),
            _ => Ok(None),
        }
    }
}
