//! ABI encoding for the registry contract.
//!
//! Every registry method shares one signature:
//! `method(string fingerprint, address counterparty, string terms, uint256 durationSeconds)`.

use sha3::{Digest, Keccak256};

use crate::ChainError;

const WORD: usize = 32;

/// Parameter list shared by the registry methods.
const PARAMS: &str = "(string,address,string,uint256)";

/// First four bytes of the Keccak-256 hash of a canonical function signature.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Parse a `0x`-prefixed 20-byte hex address.
pub fn parse_address(raw: &str) -> Result<[u8; 20], ChainError> {
    let digits = raw
        .trim()
        .strip_prefix("0x")
        .or_else(|| raw.trim().strip_prefix("0X"))
        .ok_or_else(|| ChainError::InvalidAddress(raw.to_string()))?;
    if digits.len() != 40 {
        return Err(ChainError::InvalidAddress(raw.to_string()));
    }
    let bytes = hex::decode(digits).map_err(|_| ChainError::InvalidAddress(raw.to_string()))?;
    let mut out = [0u8; 20];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// A registry contract call, ready to be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub method: String,
    pub fingerprint: String,
    pub counterparty: String,
    pub terms: String,
    pub duration_seconds: u64,
}

impl ContractCall {
    pub fn signature(&self) -> String {
        format!("{}{}", self.method, PARAMS)
    }

    /// Encode selector and arguments as transaction calldata.
    ///
    /// Fails with `InvalidAddress` when the counterparty is not a hex address.
    pub fn encode(&self) -> Result<Vec<u8>, ChainError> {
        let address = parse_address(&self.counterparty)?;

        let fingerprint = encode_bytes(self.fingerprint.as_bytes());
        let terms = encode_bytes(self.terms.as_bytes());

        let head_len = 4 * WORD;
        let mut out = Vec::with_capacity(4 + head_len + fingerprint.len() + terms.len());
        out.extend_from_slice(&function_selector(&self.signature()));
        out.extend_from_slice(&uint_word(head_len as u128));
        out.extend_from_slice(&address_word(&address));
        out.extend_from_slice(&uint_word((head_len + fingerprint.len()) as u128));
        out.extend_from_slice(&uint_word(u128::from(self.duration_seconds)));
        out.extend_from_slice(&fingerprint);
        out.extend_from_slice(&terms);
        Ok(out)
    }
}

fn uint_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn address_word(address: &[u8; 20]) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(address);
    word
}

/// Length word followed by the data, right-padded to a word boundary.
fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let padded = data.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(WORD + padded);
    out.extend_from_slice(&uint_word(data.len() as u128));
    out.extend_from_slice(data);
    out.resize(WORD + padded, 0);
    out
}
