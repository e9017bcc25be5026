//! Contract call arguments derived from a record.

use copyreg_chain::ContractCall;
use copyreg_core::models::PublishableRecord;
use copyreg_core::months_to_seconds;
use serde::Serialize;

/// Where a call argument came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// The embedded track or user object.
    Nested,
    /// The record's raw identifier.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallArgs {
    pub call: ContractCall,
    pub fingerprint_source: FieldSource,
    pub counterparty_source: FieldSource,
}

/// Derive the contract call for a record. Pure: no I/O, same output for the same input.
///
/// The fingerprint falls back to the raw track id and the counterparty to the raw
/// user id. A user id is not a chain address, so a call built from the fallback
/// fails when it is encoded; `counterparty_source` lets callers flag it first.
pub fn build_call_args(record: &PublishableRecord) -> CallArgs {
    let (fingerprint, fingerprint_source) = match record.track_fingerprint() {
        Some(fp) => (fp.to_string(), FieldSource::Nested),
        None => (record.track_id.clone(), FieldSource::Fallback),
    };

    let (counterparty, counterparty_source) = match record.counterparty_wallet() {
        Some(address) => (address.to_string(), FieldSource::Nested),
        None => (record.counterparty_id.clone(), FieldSource::Fallback),
    };

    CallArgs {
        call: ContractCall {
            method: record.kind.contract_method().to_string(),
            fingerprint,
            counterparty,
            terms: record.terms.clone().unwrap_or_default(),
            duration_seconds: months_to_seconds(record.duration_months.unwrap_or(0)),
        },
        fingerprint_source,
        counterparty_source,
    }
}
