//! Conversions between integer token quantities and decimal text.

use alloy::primitives::utils::{self, ParseUnits};
use alloy::primitives::U256;

use crate::Error;

/// Formats `raw` scaled down by `decimals`, the way wallet UIs print balances:
/// trailing zeros are trimmed but at least one fractional digit is kept.
///
/// ```
/// use tokenkit_ethereum::units::format_units;
/// use alloy::primitives::U256;
///
/// let raw = U256::from(1_500_000_000_000_000_000u128);
/// assert_eq!(format_units(raw, 18), "1.5");
/// assert_eq!(format_units(U256::from(1000u64), 0), "1000.0");
/// ```
pub fn format_units(raw: U256, decimals: u8) -> String {
    let full = match utils::format_units(raw, decimals) {
        Ok(full) => full,
        Err(e) => {
            tracing::debug!(%raw, decimals, error = %e, "cannot scale amount, printing raw value");
            return raw.to_string();
        }
    };

    match full.split_once('.') {
        Some((integer, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            let fraction = if fraction.is_empty() { "0" } else { fraction };
            format!("{integer}.{fraction}")
        }
        None => format!("{full}.0"),
    }
}

/// Parses decimal text into an integer quantity scaled up by `decimals`.
///
/// Signs, exponents and more fractional digits than `decimals` are rejected.
pub fn parse_units(text: &str, decimals: u8) -> Result<U256, Error> {
    let text = text.trim();
    let invalid = |reason: &str| Error::InvalidAmount {
        value: text.to_string(),
        reason: reason.to_string(),
    };

    if text.is_empty() {
        return Err(invalid("empty amount"));
    }

    let (integer, fraction) = text.split_once('.').unwrap_or((text, ""));
    if integer.is_empty() && fraction.is_empty() {
        return Err(invalid("no digits"));
    }
    if !integer.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid("only digits and a single decimal point are allowed"));
    }
    if fraction.len() > decimals as usize {
        return Err(invalid(&format!("more than {decimals} fractional digits")));
    }

    let normalized = match (integer.is_empty(), fraction.is_empty()) {
        (true, _) => format!("0.{fraction}"),
        (false, true) => integer.to_string(),
        (false, false) => format!("{integer}.{fraction}"),
    };

    match utils::parse_units(&normalized, decimals) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => Err(invalid("amount must not be negative")),
        Err(e) => Err(invalid(&e.to_string())),
    }
}
