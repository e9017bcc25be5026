//! Wallet connection and session state.

use copyreg_chain::{network_name, ChainError, WalletProvider};
use copyreg_core::models::WalletSession;
use copyreg_core::{wei_to_ether, PublishError};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Connects to the operator's wallet and keeps the session for reuse.
///
/// The session only lives as long as the connector; nothing is persisted.
pub struct WalletConnector {
    provider: Option<Arc<dyn WalletProvider>>,
    session: RwLock<Option<WalletSession>>,
}

impl WalletConnector {
    /// `None` means no wallet is available; every connect attempt then fails.
    pub fn new(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self {
            provider,
            session: RwLock::new(None),
        }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    /// The underlying provider, for signing and receipt lookups.
    pub fn provider(&self) -> Result<&Arc<dyn WalletProvider>, PublishError> {
        self.provider.as_ref().ok_or_else(|| {
            PublishError::WalletUnavailable("no wallet provider is configured".to_string())
        })
    }

    /// Request account access and read balance and network.
    ///
    /// A single attempt; a refusal must be retried by the operator.
    pub async fn connect(&self) -> Result<WalletSession, PublishError> {
        let provider = self.provider()?;

        let accounts = provider.request_accounts().await.map_err(|e| match e {
            ChainError::UserRejected(msg) => PublishError::WalletConnectionRejected(msg),
            other => PublishError::WalletUnavailable(other.to_string()),
        })?;
        let address = accounts.into_iter().next().ok_or_else(|| {
            PublishError::WalletConnectionRejected("wallet returned no accounts".to_string())
        })?;

        let balance_wei = provider
            .get_balance(&address)
            .await
            .map_err(|e| PublishError::WalletUnavailable(e.to_string()))?;
        let balance = wei_to_ether(balance_wei).ok_or_else(|| {
            PublishError::WalletUnavailable(format!("balance {} wei is out of range", balance_wei))
        })?;
        let chain_id = provider
            .chain_id()
            .await
            .map_err(|e| PublishError::WalletUnavailable(e.to_string()))?;

        let session = WalletSession {
            address,
            balance,
            chain_id,
            network: network_name(chain_id),
            connected: true,
        };
        tracing::info!(
            address = %session.address,
            network = %session.network,
            balance = %session.balance,
            "Wallet connected"
        );

        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    /// Reuse the current session or connect if there is none.
    pub async fn ensure_connected(&self) -> Result<WalletSession, PublishError> {
        if let Some(session) = self.session().await {
            return Ok(session);
        }
        self.connect().await
    }

    pub async fn session(&self) -> Option<WalletSession> {
        self.session
            .read()
            .await
            .as_ref()
            .filter(|s| s.connected)
            .cloned()
    }

    pub async fn disconnect(&self) {
        if self.session.write().await.take().is_some() {
            tracing::info!("Wallet disconnected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MockWallet, OPERATOR};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn connector(wallet: &MockWallet) -> WalletConnector {
        WalletConnector::new(Some(Arc::new(wallet.clone())))
    }

    #[tokio::test]
    async fn no_provider_is_wallet_unavailable() {
        let connector = WalletConnector::new(None);
        let err = connector.connect().await.unwrap_err();
        assert!(matches!(err, PublishError::WalletUnavailable(_)));
        assert!(!connector.is_available());
        assert!(connector.session().await.is_none());
    }

    #[tokio::test]
    async fn connect_reports_address_balance_and_network() {
        let wallet = MockWallet::new();
        let session = connector(&wallet).connect().await.unwrap();
        assert_eq!(session.address, OPERATOR);
        assert_eq!(session.balance, Decimal::from_str("1.5").unwrap());
        assert_eq!(session.chain_id, 11_155_111);
        assert_eq!(session.network, "Sepolia");
        assert!(session.connected);
    }

    #[tokio::test]
    async fn refused_access_is_connection_rejected() {
        let wallet = MockWallet::new().rejecting_connection();
        let connector = connector(&wallet);
        let err = connector.connect().await.unwrap_err();
        assert!(matches!(err, PublishError::WalletConnectionRejected(_)));
        assert!(connector.session().await.is_none());
        assert_eq!(wallet.calls(), vec!["request_accounts"]);
    }

    #[tokio::test]
    async fn empty_account_list_is_connection_rejected() {
        let wallet = MockWallet::new().without_accounts();
        let err = connector(&wallet).connect().await.unwrap_err();
        assert_eq!(
            err,
            PublishError::WalletConnectionRejected("wallet returned no accounts".to_string())
        );
    }

    #[tokio::test]
    async fn ensure_connected_reuses_session() {
        let wallet = MockWallet::new();
        let connector = connector(&wallet);
        connector.ensure_connected().await.unwrap();
        connector.ensure_connected().await.unwrap();
        let requests = wallet
            .calls()
            .iter()
            .filter(|c| c.as_str() == "request_accounts")
            .count();
        assert_eq!(requests, 1);

        connector.disconnect().await;
        assert!(connector.session().await.is_none());
        connector.ensure_connected().await.unwrap();
        assert!(connector.session().await.is_some());
    }
}
