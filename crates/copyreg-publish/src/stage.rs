//! Progress reporting for a publish attempt.
//!
//! The tracker is a projection for display: it records whatever it is told.
//! Observers subscribe to a `watch` channel and always see the latest update.

use copyreg_core::models::{Stage, StageUpdate, TransactionRecord};
use tokio::sync::watch;

#[derive(Debug)]
pub struct StageTracker {
    stage_tx: watch::Sender<StageUpdate>,
    transaction_tx: watch::Sender<Option<TransactionRecord>>,
    history: Vec<StageUpdate>,
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StageTracker {
    pub fn new() -> Self {
        let (stage_tx, _) = watch::channel(StageUpdate::default());
        let (transaction_tx, _) = watch::channel(None);
        Self {
            stage_tx,
            transaction_tx,
            history: Vec::new(),
        }
    }

    /// Set the current stage and progress. No ordering is enforced.
    pub fn advance(&mut self, stage: Stage, progress: u8) {
        let update = StageUpdate {
            stage,
            progress: progress.min(100),
        };
        tracing::debug!(stage = %stage, progress = update.progress, "Stage update");
        self.history.push(update);
        self.stage_tx.send_replace(update);
    }

    /// Advance to a stage using its nominal progress value.
    pub fn enter(&mut self, stage: Stage) {
        self.advance(stage, stage.nominal_progress());
    }

    /// Move to `Failed`, keeping the progress reached so far.
    pub fn fail(&mut self) {
        let progress = self.current().progress;
        self.advance(Stage::Failed, progress);
    }

    pub fn current(&self) -> StageUpdate {
        *self.stage_tx.borrow()
    }

    /// Whether the publish action may be triggered again.
    pub fn is_idle(&self) -> bool {
        self.current().stage.is_terminal()
    }

    /// Every update since creation or the last reset, oldest first.
    pub fn history(&self) -> &[StageUpdate] {
        &self.history
    }

    pub fn subscribe(&self) -> watch::Receiver<StageUpdate> {
        self.stage_tx.subscribe()
    }

    pub fn set_transaction(&mut self, transaction: Option<TransactionRecord>) {
        self.transaction_tx.send_replace(transaction);
    }

    pub fn transaction(&self) -> Option<TransactionRecord> {
        self.transaction_tx.borrow().clone()
    }

    pub fn subscribe_transaction(&self) -> watch::Receiver<Option<TransactionRecord>> {
        self.transaction_tx.subscribe()
    }

    /// Back to `Init` with no transaction, as when the publish dialog is closed.
    pub fn reset(&mut self) {
        self.history.clear();
        self.stage_tx.send_replace(StageUpdate::default());
        self.transaction_tx.send_replace(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn starts_idle_at_init() {
        let tracker = StageTracker::new();
        assert_eq!(tracker.current(), StageUpdate::default());
        assert_eq!(tracker.current().stage, Stage::Init);
        assert!(tracker.is_idle());
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn advance_does_not_validate_order() {
        let mut tracker = StageTracker::new();
        tracker.advance(Stage::Submitting, 75);
        tracker.advance(Stage::Creating, 30);
        assert_eq!(
            tracker.current(),
            StageUpdate {
                stage: Stage::Creating,
                progress: 30
            }
        );
        assert_eq!(tracker.history().len(), 2);
        assert!(!tracker.is_idle());
    }

    #[test]
    fn progress_is_capped() {
        let mut tracker = StageTracker::new();
        tracker.advance(Stage::Confirmed, 250);
        assert_eq!(tracker.current().progress, 100);
    }

    #[test]
    fn fail_keeps_progress() {
        let mut tracker = StageTracker::new();
        tracker.enter(Stage::Signing);
        tracker.fail();
        assert_eq!(
            tracker.current(),
            StageUpdate {
                stage: Stage::Failed,
                progress: 50
            }
        );
        assert!(tracker.is_idle());
    }

    #[tokio::test]
    async fn subscribers_see_latest_update() {
        let mut tracker = StageTracker::new();
        let mut rx = tracker.subscribe();
        tracker.enter(Stage::Initializing);
        tracker.enter(Stage::Creating);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().stage, Stage::Creating);
    }

    #[test]
    fn reset_clears_transaction_and_history() {
        let mut tracker = StageTracker::new();
        let tx_rx = tracker.subscribe_transaction();
        tracker.enter(Stage::Submitting);
        tracker.set_transaction(Some(TransactionRecord::pending(Uuid::new_v4(), "0xabc")));
        assert_eq!(tx_rx.borrow().as_ref().map(|t| t.hash.as_str()), Some("0xabc"));

        tracker.reset();
        assert!(tracker.transaction().is_none());
        assert!(tracker.history().is_empty());
        assert_eq!(tracker.current().stage, Stage::Init);
    }
}
