//! Blockchain publish flow.
//!
//! Takes an approved or paid record (copyright, license or transfer) and writes
//! it to the registry contract through the operator's wallet, then reports the
//! confirmed transaction hash to the backend:
//!
//! 1. [`SettingsResolver`] reads the contract address from system settings
//! 2. [`WalletConnector`] makes sure a signer is connected
//! 3. [`build_call_args`] derives the contract call from the record
//! 4. [`TransactionSubmitter`] sends the transaction and waits for its receipt
//! 5. [`BackendNotifier`] persists the hash, after which the local copy is patched
//!
//! [`StageTracker`] reports progress throughout. [`PublishFlow`] sequences the
//! steps; any failure halts the attempt at the failing stage without retry.

pub mod builder;
pub mod flow;
pub mod notifier;
pub mod settings;
pub mod stage;
pub mod submitter;
pub mod wallet;

#[cfg(test)]
mod test_helpers;

pub use builder::{build_call_args, CallArgs, FieldSource};
pub use flow::{PublishFailure, PublishFlow, PublishReport};
pub use notifier::BackendNotifier;
pub use settings::SettingsResolver;
pub use stage::StageTracker;
pub use submitter::TransactionSubmitter;
pub use wallet::WalletConnector;
