//! Wire types for the registry API.
//!
//! The backend embeds optional `track` and counterparty objects and uses either
//! strings or numbers for identifiers. Each record kind has its own wire shape;
//! all of them are validated here and converted into a
//! [`PublishableRecord`] so the rest of the code works with typed optionals.

use chrono::{DateTime, Utc};
use copyreg_core::models::{PublishableRecord, RecordKind, RecordStatus, TrackRef, UserRef};
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::ApiError;

/// Accept `"abc"` or `42` for an identifier.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "id_string")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDto {
    #[serde(default, deserialize_with = "opt_id_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub fingerprint: Option<String>,
}

impl From<TrackDto> for TrackRef {
    fn from(dto: TrackDto) -> Self {
        TrackRef {
            id: dto.id,
            title: dto.title,
            fingerprint: dto.fingerprint,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(default, deserialize_with = "opt_id_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub wallet_address: Option<String>,
}

impl From<UserDto> for UserRef {
    fn from(dto: UserDto) -> Self {
        UserRef {
            id: dto.id,
            name: dto.name,
            wallet_address: dto.wallet_address,
        }
    }
}

/// Copyright registration; the counterparty is the owning user.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CopyrightDto {
    #[serde(deserialize_with = "id_string")]
    #[validate(length(min = 1))]
    pub id: String,
    pub status: RecordStatus,
    #[serde(deserialize_with = "id_string")]
    #[validate(length(min = 1))]
    pub track_id: String,
    #[serde(default)]
    pub track: Option<TrackDto>,
    #[serde(deserialize_with = "id_string")]
    #[validate(length(min = 1))]
    pub user_id: String,
    #[serde(default)]
    pub user: Option<UserDto>,
    #[serde(default)]
    pub terms: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// License issued to a licensee for a duration in months.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LicenseDto {
    #[serde(deserialize_with = "id_string")]
    #[validate(length(min = 1))]
    pub id: String,
    pub status: RecordStatus,
    #[serde(deserialize_with = "id_string")]
    #[validate(length(min = 1))]
    pub track_id: String,
    #[serde(default)]
    pub track: Option<TrackDto>,
    #[serde(deserialize_with = "id_string")]
    #[validate(length(min = 1))]
    pub licensee_id: String,
    #[serde(default)]
    pub licensee: Option<UserDto>,
    #[serde(default)]
    pub terms: Option<String>,
    /// Months.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Ownership transfer requested by the future owner.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransferDto {
    #[serde(deserialize_with = "id_string")]
    #[validate(length(min = 1))]
    pub id: String,
    pub status: RecordStatus,
    #[serde(deserialize_with = "id_string")]
    #[validate(length(min = 1))]
    pub track_id: String,
    #[serde(default)]
    pub track: Option<TrackDto>,
    #[serde(deserialize_with = "id_string")]
    #[validate(length(min = 1))]
    pub requester_id: String,
    #[serde(default)]
    pub requester: Option<UserDto>,
    #[serde(default)]
    pub terms: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

fn validated<T: Validate>(dto: T) -> Result<T, ApiError> {
    dto.validate()
        .map_err(|e| ApiError::Invalid(format!("Validation error: {}", e)))?;
    Ok(dto)
}

impl TryFrom<CopyrightDto> for PublishableRecord {
    type Error = ApiError;

    fn try_from(dto: CopyrightDto) -> Result<Self, Self::Error> {
        let dto = validated(dto)?;
        Ok(PublishableRecord {
            id: dto.id,
            kind: RecordKind::Copyright,
            status: dto.status,
            track_id: dto.track_id,
            track: dto.track.map(Into::into),
            counterparty_id: dto.user_id,
            counterparty: dto.user.map(Into::into),
            terms: dto.terms,
            duration_months: None,
            transaction_hash: dto.transaction_hash,
            published_at: dto.published_at,
        })
    }
}

impl TryFrom<LicenseDto> for PublishableRecord {
    type Error = ApiError;

    fn try_from(dto: LicenseDto) -> Result<Self, Self::Error> {
        let dto = validated(dto)?;
        Ok(PublishableRecord {
            id: dto.id,
            kind: RecordKind::License,
            status: dto.status,
            track_id: dto.track_id,
            track: dto.track.map(Into::into),
            counterparty_id: dto.licensee_id,
            counterparty: dto.licensee.map(Into::into),
            terms: dto.terms,
            duration_months: dto.duration,
            transaction_hash: dto.transaction_hash,
            published_at: dto.published_at,
        })
    }
}

impl TryFrom<TransferDto> for PublishableRecord {
    type Error = ApiError;

    fn try_from(dto: TransferDto) -> Result<Self, Self::Error> {
        let dto = validated(dto)?;
        Ok(PublishableRecord {
            id: dto.id,
            kind: RecordKind::Transfer,
            status: dto.status,
            track_id: dto.track_id,
            track: dto.track.map(Into::into),
            counterparty_id: dto.requester_id,
            counterparty: dto.requester.map(Into::into),
            terms: dto.terms,
            duration_months: None,
            transaction_hash: dto.transaction_hash,
            published_at: dto.published_at,
        })
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Parse one backend record of the given kind.
pub fn parse_record(kind: RecordKind, value: serde_json::Value) -> Result<PublishableRecord, ApiError> {
    match kind {
        RecordKind::Copyright => decode::<CopyrightDto>(value)?.try_into(),
        RecordKind::License => decode::<LicenseDto>(value)?.try_into(),
        RecordKind::Transfer => decode::<TransferDto>(value)?.try_into(),
    }
}
