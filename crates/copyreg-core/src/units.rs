//! Unit conversions shared by the chain adapter and the publish flow.

use rust_decimal::Decimal;

/// Seconds in the fixed 30-day month used for on-chain durations.
pub const SECONDS_PER_MONTH: u64 = 30 * 24 * 60 * 60;

/// Decimal places between wei and ether.
const ETHER_DECIMALS: u32 = 18;

/// Convert a duration in months to seconds using a 30-day month.
pub fn months_to_seconds(months: u32) -> u64 {
    u64::from(months) * SECONDS_PER_MONTH
}

/// Convert a wei amount to a decimal ether value.
///
/// Returns `None` when the amount exceeds the 96-bit mantissa of `Decimal`
/// (roughly 79 billion ether).
pub fn wei_to_ether(wei: u128) -> Option<Decimal> {
    let wei = i128::try_from(wei).ok()?;
    Decimal::try_from_i128_with_scale(wei, ETHER_DECIMALS)
        .ok()
        .map(|d| d.normalize())
}

/// Transaction fee in wei: gas used times the effective gas price.
pub fn fee_wei(gas_used: u64, effective_gas_price: u128) -> u128 {
    u128::from(gas_used).saturating_mul(effective_gas_price)
}
