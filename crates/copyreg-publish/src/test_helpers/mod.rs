//! Test helpers for publish flow unit tests
//!
//! In-memory doubles for the wallet provider and the backend hooks, plus record
//! fixtures. No node or backend is needed.

pub mod fixtures;
pub mod mock_backend;
pub mod mock_wallet;

pub use fixtures::*;
pub use mock_backend::{MockNotifier, MockSettingsStore};
pub use mock_wallet::MockWallet;
