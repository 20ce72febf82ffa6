//! Well-formedness checks for user supplied addresses.

use std::str::FromStr;

use alloy::primitives::Address;
use tokenkit_error::{Result, TokenkitError};

/// Parses `value` as an Ethereum address supplied through parameter `name`.
///
/// The value must be 40 hex digits, optionally prefixed with `0x`.
/// All-lowercase and all-uppercase input is accepted as is; mixed-case input
/// must carry a valid EIP-55 checksum.
pub fn parse_address(name: &str, value: &str) -> Result<Address> {
    let value = value.trim();
    let invalid = |reason: &str| TokenkitError::InvalidAddress {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let hex_part = value.strip_prefix("0x").unwrap_or(value);
    if hex_part.len() != 40 {
        return Err(invalid("expected 40 hex digits"));
    }
    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid("address contains non-hex characters"));
    }

    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
    let prefixed = format!("0x{hex_part}");
    if has_lower && has_upper {
        Address::parse_checksummed(&prefixed, None).map_err(|_| invalid("bad address checksum"))
    } else {
        Address::from_str(&prefixed).map_err(|e| invalid(&e.to_string()))
    }
}

/// Parses an optional parameter; `None` and blank values mean "not supplied".
pub fn parse_optional_address(name: &str, value: Option<&str>) -> Result<Option<Address>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => parse_address(name, value).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const CHECKSUMMED: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_accepts_checksummed() {
        let parsed = parse_address("ADDRESS", CHECKSUMMED).unwrap();
        assert_eq!(parsed, address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"));
    }

    #[test]
    fn test_accepts_single_case() {
        let lower = CHECKSUMMED.to_lowercase();
        let upper = format!("0x{}", CHECKSUMMED[2..].to_uppercase());
        assert_eq!(parse_address("ADDRESS", &lower).unwrap(), parse_address("ADDRESS", &upper).unwrap());
    }

    #[test]
    fn test_rejects_bad_checksum() {
        let flipped = "0xf39fd6e51aad88F6F4ce6aB8827279cffFb92266";
        let err = parse_address("TOKEN_ADDRESS", flipped).unwrap_err();
        assert!(err.to_string().contains("checksum"));
        assert!(err.to_string().contains("TOKEN_ADDRESS"));
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in [
            "",
            "0x",
            "0xGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGG",
            "0x742d35Cc6634C0532925a3b844Bc9e7595f5",
            "742d35Cc6634C0532925a3b844Bc9e7595f5",
            "not-an-address",
        ] {
            assert!(parse_address("RECIPIENT_ADDRESS", bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_accepts_missing_prefix() {
        let expected = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
        for text in [
            "70997970C51812dc3A010C7d01b50e0d17dc79C8",
            "70997970c51812dc3a010c7d01b50e0d17dc79c8",
            "70997970C51812DC3A010C7D01B50E0D17DC79C8",
        ] {
            assert_eq!(parse_address("RECIPIENT_ADDRESS", text).unwrap(), expected);
        }
        assert!(parse_address("RECIPIENT_ADDRESS", "70997970c51812dc3A010C7d01b50e0d17dc79C8").is_err());
    }

    #[test]
    fn test_optional_address() {
        assert_eq!(parse_optional_address("ADDRESS", None).unwrap(), None);
        assert_eq!(parse_optional_address("ADDRESS", Some("  ")).unwrap(), None);
        assert!(parse_optional_address("ADDRESS", Some(CHECKSUMMED)).unwrap().is_some());
        assert!(parse_optional_address("ADDRESS", Some("0x1234")).is_err());
    }
}
