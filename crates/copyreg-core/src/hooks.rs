//! Hooks for the backend seams of the publish flow
//!
//! The publish flow reads system settings and reports confirmed transactions
//! through these traits, so it never depends on the HTTP client directly. The
//! REST client implements both; tests substitute in-memory doubles.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{PublishableRecord, RecordKind, SystemSetting};

/// Source of the backend's system settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Fetch every system setting. Called once per publish attempt; never cached.
    async fn fetch_settings(&self) -> Result<Vec<SystemSetting>, BackendError>;
}

/// Receiver of confirmed publish transactions.
#[async_trait]
pub trait PublishNotifier: Send + Sync {
    /// Persist `tx_hash` against the record and return the backend's updated copy.
    async fn notify_published(
        &self,
        kind: RecordKind,
        record_id: &str,
        tx_hash: &str,
    ) -> Result<PublishableRecord, BackendError>;
}
