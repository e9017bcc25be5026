use chrono::{TimeZone, Utc};
use copyreg_core::models::{
    PublishableRecord, RecordKind, RecordStatus, SystemSetting, TrackRef, UserRef,
};

pub const OPERATOR: &str = "0x1111111111111111111111111111111111111111";
pub const CONTRACT: &str = "0x00000000000000000000000000000000000000c0";
pub const LICENSEE_WALLET: &str = "0x00000000000000000000000000000000000000aa";
pub const TX_HASH: &str = "0x5e1f0000000000000000000000000000000000000000000000000000000000ab";
pub const CONTRACT_KEY: &str = "blockchain_contract_address";

/// A paid license with embedded track and licensee.
pub fn license_record() -> PublishableRecord {
    PublishableRecord {
        id: "lic-1".to_string(),
        kind: RecordKind::License,
        status: RecordStatus::Paid,
        track_id: "trk-1".to_string(),
        track: Some(TrackRef {
            id: Some("trk-1".to_string()),
            title: Some("Night Drive".to_string()),
            fingerprint: Some("fp-0001".to_string()),
        }),
        counterparty_id: "usr-2".to_string(),
        counterparty: Some(UserRef {
            id: Some("usr-2".to_string()),
            name: Some("Licensee".to_string()),
            wallet_address: Some(LICENSEE_WALLET.to_string()),
        }),
        terms: Some("worldwide streaming".to_string()),
        duration_months: Some(12),
        transaction_hash: None,
        published_at: None,
    }
}

pub fn setting(key: &str, value: &str) -> SystemSetting {
    SystemSetting {
        key: key.to_string(),
        value: Some(value.to_string()),
        description: None,
        updated_at: None,
    }
}

/// Record as the backend returns it after a successful publish.
pub fn published_copy(kind: RecordKind, record_id: &str, tx_hash: &str) -> PublishableRecord {
    let mut record = license_record();
    record.id = record_id.to_string();
    record.kind = kind;
    record.status = RecordStatus::Published;
    record.transaction_hash = Some(tx_hash.to_string());
    record.published_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single();
    record
}
