//! End-to-end publish of one record.

use copyreg_core::models::{
    PublishableRecord, RecordKind, Stage, TransactionRecord, WalletSession,
};
use copyreg_core::{ErrorMetadata, LogLevel, PublishError};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::builder::{build_call_args, FieldSource};
use crate::notifier::BackendNotifier;
use crate::settings::SettingsResolver;
use crate::stage::StageTracker;
use crate::submitter::TransactionSubmitter;
use crate::wallet::WalletConnector;

/// Outcome of a successful publish.
#[derive(Debug, Clone, Serialize)]
pub struct PublishReport {
    pub record: PublishableRecord,
    pub transaction: TransactionRecord,
    pub session: WalletSession,
}

/// A publish attempt that stopped before the backend recorded it.
///
/// `stage` is where the attempt was when it failed. `transaction` is present
/// once a hash exists; after a notification failure it is confirmed even
/// though the record is not marked published.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Publish failed at stage {stage}: {error}")]
pub struct PublishFailure {
    pub stage: Stage,
    #[source]
    pub error: PublishError,
    pub transaction: Option<TransactionRecord>,
}

type InFlightSet = Mutex<HashSet<(RecordKind, String)>>;

/// Marks a record as being published until dropped.
struct InFlightGuard<'a> {
    active: &'a InFlightSet,
    key: (RecordKind, String),
}

impl<'a> InFlightGuard<'a> {
    fn claim(active: &'a InFlightSet, kind: RecordKind, record_id: &str) -> Option<Self> {
        let key = (kind, record_id.to_string());
        let inserted = active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone());
        inserted.then_some(Self { active, key })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Sequences settings lookup, wallet connection, call building, submission,
/// confirmation and backend notification for one record at a time.
pub struct PublishFlow {
    wallet: WalletConnector,
    settings: SettingsResolver,
    submitter: TransactionSubmitter,
    notifier: BackendNotifier,
    in_flight: InFlightSet,
}

impl PublishFlow {
    pub fn new(
        wallet: WalletConnector,
        settings: SettingsResolver,
        submitter: TransactionSubmitter,
        notifier: BackendNotifier,
    ) -> Self {
        Self {
            wallet,
            settings,
            submitter,
            notifier,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn wallet(&self) -> &WalletConnector {
        &self.wallet
    }

    pub fn settings(&self) -> &SettingsResolver {
        &self.settings
    }

    pub fn notifier(&self) -> &BackendNotifier {
        &self.notifier
    }

    pub fn is_in_flight(&self, kind: RecordKind, record_id: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(kind, record_id.to_string()))
    }

    /// Publish `record` and patch the local copy once the backend has recorded it.
    ///
    /// The tracker is reset first, then moves `initializing → creating → signing
    /// → submitting → confirmed`, or to `failed` at the step that errored. The
    /// record is left untouched unless the whole flow succeeds. Cancelling only
    /// stops the confirmation wait; a sent transaction stays on chain.
    pub async fn publish(
        &self,
        record: &mut PublishableRecord,
        tracker: &mut StageTracker,
        cancel: &CancellationToken,
    ) -> Result<PublishReport, PublishFailure> {
        let attempt_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "publish",
            attempt_id = %attempt_id,
            kind = %record.kind,
            record_id = %record.id
        );
        self.run(attempt_id, record, tracker, cancel)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        attempt_id: Uuid,
        record: &mut PublishableRecord,
        tracker: &mut StageTracker,
        cancel: &CancellationToken,
    ) -> Result<PublishReport, PublishFailure> {
        tracker.reset();

        if let Err(error) = record.ensure_publishable() {
            return Err(fail(tracker, error, None));
        }

        let Some(_guard) = InFlightGuard::claim(&self.in_flight, record.kind, &record.id) else {
            let error = PublishError::AlreadyInFlight(record.id.clone());
            return Err(fail(tracker, error, None));
        };

        let mut transaction = None;
        match self
            .execute(attempt_id, record, tracker, cancel, &mut transaction)
            .await
        {
            Ok((transaction, session)) => {
                tracing::info!(tx_hash = %transaction.hash, "Record published");
                Ok(PublishReport {
                    record: record.clone(),
                    transaction,
                    session,
                })
            }
            Err(error) => Err(fail(tracker, error, transaction)),
        }
    }

    async fn execute(
        &self,
        attempt_id: Uuid,
        record: &mut PublishableRecord,
        tracker: &mut StageTracker,
        cancel: &CancellationToken,
        transaction: &mut Option<TransactionRecord>,
    ) -> Result<(TransactionRecord, WalletSession), PublishError> {
        tracker.enter(Stage::Initializing);
        // Settings first: a missing contract address must not cause a wallet prompt.
        let contract = self.settings.resolve_contract_address().await?;
        let session = self.wallet.ensure_connected().await?;
        let provider = self.wallet.provider()?;

        tracker.enter(Stage::Creating);
        let args = build_call_args(record);
        if args.fingerprint_source == FieldSource::Fallback {
            tracing::debug!(track_id = %record.track_id, "No track fingerprint, using track id");
        }
        if args.counterparty_source == FieldSource::Fallback {
            tracing::warn!(
                counterparty_id = %record.counterparty_id,
                "Counterparty has no wallet address, using raw user id"
            );
        }

        tracker.enter(Stage::Signing);
        let pending = self
            .submitter
            .send(provider.as_ref(), &session.address, &contract, &args, attempt_id)
            .await?;

        tracker.enter(Stage::Submitting);
        tracker.set_transaction(Some(pending.clone()));
        let tx = transaction.insert(pending);

        let waited = self.submitter.wait(provider.as_ref(), tx, cancel).await;
        tracker.set_transaction(Some(tx.clone()));
        waited?;

        tracker.enter(Stage::Confirmed);
        let updated = self
            .notifier
            .notify_published(record.kind, &record.id, &tx.hash)
            .await?;
        record.apply_published(&updated, &tx.hash);

        Ok((tx.clone(), session))
    }
}

fn fail(
    tracker: &mut StageTracker,
    error: PublishError,
    transaction: Option<TransactionRecord>,
) -> PublishFailure {
    let stage = tracker.current().stage;
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(stage = %stage, code, error = %error, "Publish stopped"),
        LogLevel::Warn => tracing::warn!(stage = %stage, code, error = %error, "Publish failed"),
        LogLevel::Error => tracing::error!(stage = %stage, code, error = %error, "Publish failed"),
    }
    tracker.fail();
    PublishFailure {
        stage,
        error,
        transaction,
    }
}
