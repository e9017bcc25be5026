//! Contract address lookup in the backend's system settings.

use copyreg_chain::parse_address;
use copyreg_core::models::find_setting;
use copyreg_core::{PublishError, SettingsStore};
use std::sync::Arc;

pub struct SettingsResolver {
    store: Arc<dyn SettingsStore>,
    contract_key: String,
}

impl SettingsResolver {
    pub fn new(store: Arc<dyn SettingsStore>, contract_key: impl Into<String>) -> Self {
        Self {
            store,
            contract_key: contract_key.into(),
        }
    }

    pub fn contract_key(&self) -> &str {
        &self.contract_key
    }

    /// Fetch the settings and return the registry contract address.
    ///
    /// Settings are read on every call and never cached. A missing, blank or
    /// malformed value is `ConfigurationMissing` naming the key.
    pub async fn resolve_contract_address(&self) -> Result<String, PublishError> {
        let settings = self
            .store
            .fetch_settings()
            .await
            .map_err(|e| PublishError::SettingsUnavailable(e.to_string()))?;

        let Some(address) = find_setting(&settings, &self.contract_key) else {
            tracing::warn!(key = %self.contract_key, "Contract address setting is missing");
            return Err(PublishError::ConfigurationMissing(self.contract_key.clone()));
        };

        if parse_address(address).is_err() {
            tracing::warn!(
                key = %self.contract_key,
                value = %address,
                "Contract address setting is not a valid address"
            );
            return Err(PublishError::ConfigurationMissing(self.contract_key.clone()));
        }

        Ok(address.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{setting, MockSettingsStore, CONTRACT, CONTRACT_KEY};
    use copyreg_core::BackendError;

    fn resolver(store: &MockSettingsStore) -> SettingsResolver {
        SettingsResolver::new(Arc::new(store.clone()), CONTRACT_KEY)
    }

    #[tokio::test]
    async fn resolves_configured_address() {
        let store = MockSettingsStore::with_contract();
        assert_eq!(resolver(&store).resolve_contract_address().await.unwrap(), CONTRACT);
    }

    #[tokio::test]
    async fn missing_key_is_configuration_missing() {
        let store = MockSettingsStore::new(vec![setting("platform_fee_percent", "5")]);
        let err = resolver(&store).resolve_contract_address().await.unwrap_err();
        assert_eq!(err, PublishError::ConfigurationMissing(CONTRACT_KEY.to_string()));
    }

    #[tokio::test]
    async fn malformed_address_is_configuration_missing() {
        let store = MockSettingsStore::new(vec![setting(CONTRACT_KEY, "not-deployed-yet")]);
        let err = resolver(&store).resolve_contract_address().await.unwrap_err();
        assert_eq!(err, PublishError::ConfigurationMissing(CONTRACT_KEY.to_string()));
    }

    #[tokio::test]
    async fn settings_are_fetched_on_every_call() {
        let store = MockSettingsStore::with_contract();
        let resolver = resolver(&store);
        resolver.resolve_contract_address().await.unwrap();

        store.set(Vec::new());
        assert!(resolver.resolve_contract_address().await.is_err());
        assert_eq!(store.fetches(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_is_settings_unavailable() {
        let store = MockSettingsStore::failing(BackendError::Network("connection refused".to_string()));
        let err = resolver(&store).resolve_contract_address().await.unwrap_err();
        assert!(matches!(err, PublishError::SettingsUnavailable(_)));
    }
}
