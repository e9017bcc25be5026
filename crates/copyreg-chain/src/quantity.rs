//! Hex quantity helpers for JSON-RPC values ("0x1a").

use crate::ChainError;

/// Parse a `0x`-prefixed hex quantity.
pub fn parse_quantity(raw: &str) -> Result<u128, ChainError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| ChainError::InvalidResponse(format!("quantity without 0x prefix: {}", raw)))?;
    if digits.is_empty() {
        return Err(ChainError::InvalidResponse("empty quantity".to_string()));
    }
    u128::from_str_radix(digits, 16)
        .map_err(|e| ChainError::InvalidResponse(format!("bad quantity {}: {}", raw, e)))
}

/// Parse a quantity that must fit in 64 bits (block numbers, gas, chain ids).
pub fn parse_quantity_u64(raw: &str) -> Result<u64, ChainError> {
    let value = parse_quantity(raw)?;
    u64::try_from(value)
        .map_err(|_| ChainError::InvalidResponse(format!("quantity out of range: {}", raw)))
}

pub fn to_quantity(value: u64) -> String {
    format!("{:#x}", value)
}

pub fn to_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
