//! Mock settings store and publish notifier

use async_trait::async_trait;
use copyreg_core::models::{PublishableRecord, RecordKind, SystemSetting};
use copyreg_core::{BackendError, PublishNotifier, SettingsStore};
use std::sync::{Arc, Mutex};

use super::fixtures::{published_copy, setting, CONTRACT, CONTRACT_KEY};

#[derive(Debug, Clone)]
pub struct MockSettingsStore {
    settings: Arc<Mutex<Vec<SystemSetting>>>,
    failure: Option<BackendError>,
    fetches: Arc<Mutex<usize>>,
}

impl MockSettingsStore {
    pub fn new(settings: Vec<SystemSetting>) -> Self {
        Self {
            settings: Arc::new(Mutex::new(settings)),
            failure: None,
            fetches: Arc::new(Mutex::new(0)),
        }
    }

    /// Settings holding the default contract address.
    pub fn with_contract() -> Self {
        Self::new(vec![
            setting("platform_fee_percent", "5"),
            setting(CONTRACT_KEY, CONTRACT),
        ])
    }

    pub fn failing(failure: BackendError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(Vec::new())
        }
    }

    pub fn set(&self, settings: Vec<SystemSetting>) {
        *self.settings.lock().unwrap() = settings;
    }

    pub fn fetches(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl SettingsStore for MockSettingsStore {
    async fn fetch_settings(&self) -> Result<Vec<SystemSetting>, BackendError> {
        *self.fetches.lock().unwrap() += 1;
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.settings.lock().unwrap().clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
#[allow(clippy::type_complexity)]
pub struct MockNotifier {
    failure: Option<BackendError>,
    calls: Arc<Mutex<Vec<(RecordKind, String, String)>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: BackendError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(RecordKind, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PublishNotifier for MockNotifier {
    async fn notify_published(
        &self,
        kind: RecordKind,
        record_id: &str,
        tx_hash: &str,
    ) -> Result<PublishableRecord, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push((kind, record_id.to_string(), tx_hash.to_string()));
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(published_copy(kind, record_id, tx_hash)),
        }
    }
}
