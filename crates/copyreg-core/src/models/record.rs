use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::PublishError;

/// Kind of record that can be written to the ledger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Copyright,
    License,
    Transfer,
}

impl RecordKind {
    /// Backend collection path segment for this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            RecordKind::Copyright => "copyrights",
            RecordKind::License => "licenses",
            RecordKind::Transfer => "transfers",
        }
    }

    /// Contract method that records this kind on-chain.
    pub fn contract_method(&self) -> &'static str {
        match self {
            RecordKind::Copyright => "registerCopyright",
            RecordKind::License => "issueLicense",
            RecordKind::Transfer => "transferOwnership",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RecordKind::Copyright => write!(f, "copyright"),
            RecordKind::License => write!(f, "license"),
            RecordKind::Transfer => write!(f, "transfer"),
        }
    }
}

impl FromStr for RecordKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "copyright" | "copyrights" => Ok(RecordKind::Copyright),
            "license" | "licenses" => Ok(RecordKind::License),
            "transfer" | "transfers" => Ok(RecordKind::Transfer),
            _ => Err(anyhow::anyhow!("Invalid record kind: {}", s)),
        }
    }
}

/// Lifecycle status as reported by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Pending,
    Approved,
    Paid,
    Published,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl RecordStatus {
    /// Whether a record in this status may be written to the ledger.
    pub fn is_publishable(&self) -> bool {
        matches!(self, RecordStatus::Approved | RecordStatus::Paid)
    }
}

impl Display for RecordStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RecordStatus::Pending => write!(f, "pending"),
            RecordStatus::Approved => write!(f, "approved"),
            RecordStatus::Paid => write!(f, "paid"),
            RecordStatus::Published => write!(f, "published"),
            RecordStatus::Rejected => write!(f, "rejected"),
            RecordStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for RecordStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RecordStatus::Pending),
            "approved" => Ok(RecordStatus::Approved),
            "paid" => Ok(RecordStatus::Paid),
            "published" => Ok(RecordStatus::Published),
            "rejected" => Ok(RecordStatus::Rejected),
            "unknown" => Ok(RecordStatus::Unknown),
            _ => Err(anyhow::anyhow!("Invalid record status: {}", s)),
        }
    }
}

/// Track embedded in a record, when the backend expands it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRef {
    pub id: Option<String>,
    pub title: Option<String>,
    pub fingerprint: Option<String>,
}

/// Counterparty (owner, licensee or requester) embedded in a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: Option<String>,
    pub name: Option<String>,
    pub wallet_address: Option<String>,
}

/// Client-side copy of a copyright, license or transfer eligible for publication.
///
/// The backend owns the record; this copy may be stale and is only patched
/// locally once a publish has been confirmed and acknowledged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishableRecord {
    pub id: String,
    pub kind: RecordKind,
    pub status: RecordStatus,
    pub track_id: String,
    pub track: Option<TrackRef>,
    /// Raw user id of the owner, licensee or requester.
    pub counterparty_id: String,
    pub counterparty: Option<UserRef>,
    pub terms: Option<String>,
    pub duration_months: Option<u32>,
    pub transaction_hash: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl PublishableRecord {
    /// Fingerprint of the embedded track, if the backend supplied one.
    pub fn track_fingerprint(&self) -> Option<&str> {
        self.track
            .as_ref()
            .and_then(|t| t.fingerprint.as_deref())
            .filter(|f| !f.trim().is_empty())
    }

    /// Wallet address of the embedded counterparty, if the backend supplied one.
    pub fn counterparty_wallet(&self) -> Option<&str> {
        self.counterparty
            .as_ref()
            .and_then(|u| u.wallet_address.as_deref())
            .filter(|a| !a.trim().is_empty())
    }

    /// Fail unless the record is approved or paid and has no transaction yet.
    pub fn ensure_publishable(&self) -> Result<(), PublishError> {
        if let Some(hash) = &self.transaction_hash {
            return Err(PublishError::NotPublishable {
                record_id: self.id.clone(),
                reason: format!("{} {} already has transaction {}", self.kind, self.id, hash),
            });
        }
        if !self.status.is_publishable() {
            return Err(PublishError::NotPublishable {
                record_id: self.id.clone(),
                reason: format!(
                    "{} {} is {}, expected approved or paid",
                    self.kind, self.id, self.status
                ),
            });
        }
        Ok(())
    }

    /// Merge the backend's acknowledgement of a publish into this copy.
    ///
    /// Only the publish fields are taken; the rest of the local copy is kept.
    pub fn apply_published(&mut self, updated: &PublishableRecord, tx_hash: &str) {
        self.status = RecordStatus::Published;
        self.transaction_hash = Some(
            updated
                .transaction_hash
                .clone()
                .unwrap_or_else(|| tx_hash.to_string()),
        );
        self.published_at = updated.published_at.or_else(|| Some(Utc::now()));
    }
}
