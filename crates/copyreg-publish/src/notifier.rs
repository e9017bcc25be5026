//! Reporting confirmed transactions to the backend.

use copyreg_core::models::{PublishableRecord, RecordKind};
use copyreg_core::{PublishError, PublishNotifier};
use std::sync::Arc;

pub struct BackendNotifier {
    inner: Arc<dyn PublishNotifier>,
}

impl BackendNotifier {
    pub fn new(inner: Arc<dyn PublishNotifier>) -> Self {
        Self { inner }
    }

    /// Persist `tx_hash` against the record and return the backend's copy.
    ///
    /// One call, no retry. A failure after confirmation leaves the chain write
    /// unrecorded in the backend until the hash is sent again.
    pub async fn notify_published(
        &self,
        kind: RecordKind,
        record_id: &str,
        tx_hash: &str,
    ) -> Result<PublishableRecord, PublishError> {
        self.inner
            .notify_published(kind, record_id, tx_hash)
            .await
            .map_err(|e| {
                tracing::error!(
                    kind = %kind,
                    record_id = %record_id,
                    tx_hash = %tx_hash,
                    error = %e,
                    "Backend did not record the published transaction"
                );
                PublishError::from(e)
            })
    }
}
