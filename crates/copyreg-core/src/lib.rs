//! copyreg Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration and
//! backend hook traits shared by every copyreg component: the REST client, the
//! chain adapter, the publish flow and the CLI.

pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod units;

// Re-export commonly used types
pub use config::PublishConfig;
pub use error::{BackendError, ErrorMetadata, LogLevel, PublishError};
pub use hooks::{PublishNotifier, SettingsStore};
pub use units::{fee_wei, months_to_seconds, wei_to_ether, SECONDS_PER_MONTH};
