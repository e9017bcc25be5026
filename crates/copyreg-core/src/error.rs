//! Error types module
//!
//! `PublishError` is the taxonomy surfaced by the publish flow. Every variant is
//! terminal for the current attempt: nothing here is retried automatically, and
//! `is_recoverable` only tells the operator whether trying again by hand makes
//! sense.
//!
//! `BackendError` is the narrower error returned by the backend hook traits so the
//! flow can tell a network failure from a rejection without depending on the
//! HTTP client crate.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected outcomes such as an operator declining a prompt
    Debug,
    /// Warning level - for configuration and eligibility problems
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the operator
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "WALLET_UNAVAILABLE")
    fn error_code(&self) -> &'static str;

    /// Whether a manual retry by the operator can succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the operator
    fn suggested_action(&self) -> Option<&'static str>;

    /// Operator-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PublishError {
    #[error("Wallet unavailable: {0}")]
    WalletUnavailable(String),

    #[error("Wallet connection rejected: {0}")]
    WalletConnectionRejected(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("System settings unavailable: {0}")]
    SettingsUnavailable(String),

    #[error("Signature rejected: {0}")]
    UserRejectedSignature(String),

    #[error("Chain submission error: {0}")]
    ChainSubmission(String),

    #[error("Backend notification error: {0}")]
    BackendNotification(String),

    #[error("Record {record_id} is not publishable: {reason}")]
    NotPublishable { record_id: String, reason: String },

    #[error("A publish is already in flight for record {0}")]
    AlreadyInFlight(String),

    #[error("Transaction {tx_hash} not confirmed after {waited_ms}ms")]
    ConfirmationTimeout { tx_hash: String, waited_ms: u64 },

    #[error("Publish cancelled: {0}")]
    Cancelled(String),
}

/// Error returned by the backend hook traits.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status or an unusable body.
    #[error("Backend rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn publish_error_static_metadata(
    err: &PublishError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        PublishError::WalletUnavailable(_) => (
            "WALLET_UNAVAILABLE",
            false,
            Some("Configure a wallet provider endpoint and try again"),
            LogLevel::Warn,
        ),
        PublishError::WalletConnectionRejected(_) => (
            "WALLET_CONNECTION_REJECTED",
            true,
            Some("Approve the connection request in the wallet"),
            LogLevel::Debug,
        ),
        PublishError::ConfigurationMissing(_) => (
            "CONFIGURATION_MISSING",
            false,
            Some("Set the contract address in the system settings"),
            LogLevel::Warn,
        ),
        PublishError::SettingsUnavailable(_) => (
            "SETTINGS_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
        PublishError::UserRejectedSignature(_) => (
            "USER_REJECTED_SIGNATURE",
            true,
            Some("Approve the transaction in the wallet to publish"),
            LogLevel::Debug,
        ),
        PublishError::ChainSubmission(_) => (
            "CHAIN_SUBMISSION_ERROR",
            true,
            Some("Check the wallet network and contract, then retry"),
            LogLevel::Error,
        ),
        PublishError::BackendNotification(_) => (
            "BACKEND_NOTIFICATION_ERROR",
            true,
            Some("Re-send the confirmed transaction hash to the backend"),
            LogLevel::Error,
        ),
        PublishError::NotPublishable { .. } => (
            "NOT_PUBLISHABLE",
            false,
            Some("Only approved or paid records without a transaction can be published"),
            LogLevel::Debug,
        ),
        PublishError::AlreadyInFlight(_) => (
            "ALREADY_IN_FLIGHT",
            true,
            Some("Wait for the running publish to finish"),
            LogLevel::Debug,
        ),
        PublishError::ConfirmationTimeout { .. } => (
            "CONFIRMATION_TIMEOUT",
            true,
            Some("Check the transaction on a block explorer before publishing again"),
            LogLevel::Warn,
        ),
        PublishError::Cancelled(_) => (
            "CANCELLED",
            true,
            Some("Check the transaction on a block explorer before publishing again"),
            LogLevel::Debug,
        ),
    }
}

impl ErrorMetadata for PublishError {
    fn error_code(&self) -> &'static str {
        publish_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        publish_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        publish_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            PublishError::WalletUnavailable(_) => "No wallet provider is available".to_string(),
            PublishError::WalletConnectionRejected(_) => {
                "The wallet refused the connection request".to_string()
            }
            PublishError::ConfigurationMissing(key) => {
                format!("Contract address is not configured (setting '{}')", key)
            }
            PublishError::SettingsUnavailable(_) => {
                "System settings could not be loaded".to_string()
            }
            PublishError::UserRejectedSignature(_) => {
                "The transaction was rejected in the wallet".to_string()
            }
            PublishError::ChainSubmission(msg) => format!("Transaction failed: {}", msg),
            PublishError::BackendNotification(_) => {
                "Transaction confirmed on-chain but the record could not be updated".to_string()
            }
            PublishError::NotPublishable { reason, .. } => reason.clone(),
            PublishError::AlreadyInFlight(id) => {
                format!("Record {} is already being published", id)
            }
            PublishError::ConfirmationTimeout { tx_hash, .. } => {
                format!("Transaction {} is still pending", tx_hash)
            }
            PublishError::Cancelled(_) => "Publish was cancelled".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        publish_error_static_metadata(self).3
    }
}

impl From<BackendError> for PublishError {
    fn from(err: BackendError) -> Self {
        PublishError::BackendNotification(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_wallet_unavailable() {
        let err = PublishError::WalletUnavailable("no provider".to_string());
        assert_eq!(err.error_code(), "WALLET_UNAVAILABLE");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "No wallet provider is available");
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_error_metadata_configuration_missing_names_key() {
        let err = PublishError::ConfigurationMissing("blockchain_contract_address".to_string());
        assert_eq!(err.error_code(), "CONFIGURATION_MISSING");
        assert!(err.client_message().contains("blockchain_contract_address"));
        assert_eq!(
            err.suggested_action(),
            Some("Set the contract address in the system settings")
        );
    }

    #[test]
    fn test_error_metadata_backend_notification() {
        let err = PublishError::from(BackendError::Rejected {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(err.error_code(), "BACKEND_NOTIFICATION_ERROR");
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("500"));
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_user_rejection_is_quiet() {
        let err = PublishError::UserRejectedSignature("User denied".to_string());
        assert_eq!(err.error_code(), "USER_REJECTED_SIGNATURE");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_timeout_message_includes_hash() {
        let err = PublishError::ConfirmationTimeout {
            tx_hash: "0xabc".to_string(),
            waited_ms: 30_000,
        };
        assert!(err.to_string().contains("0xabc"));
        assert!(err.to_string().contains("30000ms"));
        assert!(err.client_message().contains("0xabc"));
    }
}
