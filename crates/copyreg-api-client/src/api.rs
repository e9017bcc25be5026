//! Domain methods for the registry API client.
//!
//! Also implements the core hook traits so the publish flow can use the client
//! as its settings store and publish notifier.

use async_trait::async_trait;
use copyreg_core::models::{PublishableRecord, RecordKind, RecordStatus, SystemSetting};
use copyreg_core::{BackendError, PublishNotifier, SettingsStore};
use serde::Serialize;

use crate::dto::parse_record;
use crate::{ApiClient, ApiError};

/// Body of the publish endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub transaction_hash: String,
}

fn record_path(kind: RecordKind, id: &str) -> String {
    format!("/{}/{}", kind.collection(), urlencoding::encode(id))
}

impl ApiClient {
    /// List every system setting.
    pub async fn list_settings(&self) -> Result<Vec<SystemSetting>, ApiError> {
        self.get("/system-settings", &[]).await
    }

    /// List records of one kind, optionally filtered by status.
    pub async fn list_records(
        &self,
        kind: RecordKind,
        status: Option<RecordStatus>,
    ) -> Result<Vec<PublishableRecord>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(s) = status {
            query.push(("status", s.to_string()));
        }

        let raw: Vec<serde_json::Value> = self
            .get(&format!("/{}", kind.collection()), &query)
            .await?;
        raw.into_iter().map(|v| parse_record(kind, v)).collect()
    }

    /// Get a single record by ID.
    pub async fn get_record(&self, kind: RecordKind, id: &str) -> Result<PublishableRecord, ApiError> {
        let raw: serde_json::Value = self.get(&record_path(kind, id), &[]).await?;
        parse_record(kind, raw)
    }

    /// Persist a confirmed transaction hash against a record, marking it published.
    pub async fn mark_published(
        &self,
        kind: RecordKind,
        id: &str,
        tx_hash: &str,
    ) -> Result<PublishableRecord, ApiError> {
        let body = PublishRequest {
            transaction_hash: tx_hash.to_string(),
        };
        let raw: serde_json::Value = self
            .put_json(&format!("{}/publish", record_path(kind, id)), &body)
            .await?;
        parse_record(kind, raw)
    }
}

#[async_trait]
impl SettingsStore for ApiClient {
    async fn fetch_settings(&self) -> Result<Vec<SystemSetting>, BackendError> {
        self.list_settings().await.map_err(BackendError::from)
    }
}

#[async_trait]
impl PublishNotifier for ApiClient {
    async fn notify_published(
        &self,
        kind: RecordKind,
        record_id: &str,
        tx_hash: &str,
    ) -> Result<PublishableRecord, BackendError> {
        tracing::info!(kind = %kind, record_id = %record_id, tx_hash = %tx_hash, "Marking record published");
        self.mark_published(kind, record_id, tx_hash)
            .await
            .map_err(BackendError::from)
    }
}
