//! Edge case tests for address validation, amounts and signer resolution
//!
//! Tests cover:
//! - Malformed and mis-checksummed addresses
//! - Boundary amounts and decimal precision
//! - Key handling

use tokenkit_ethereum::units::{format_units, parse_units};
use tokenkit_ethereum::{
    parse_address, resolve_signer, signer_from_key, EthereumAmount, DEV_ACCOUNT_ADDRESS,
};
use alloy::primitives::U256;
use tokenkit_error::{ErrorKind, TokenkitError};

// ============================================================================
// Address Edge Cases
// ============================================================================

mod address_tests {
    use super::*;

    #[test]
    fn test_zero_address_is_well_formed() {
        let parsed = parse_address("ADDRESS", "0x0000000000000000000000000000000000000000").unwrap();
        assert!(parsed.is_zero());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let parsed = parse_address("ADDRESS", "  0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266\n").unwrap();
        assert_eq!(parsed, DEV_ACCOUNT_ADDRESS);
    }

    #[test]
    fn test_uppercase_prefix_rejected() {
        assert!(parse_address("ADDRESS", "0Xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").is_err());
    }

    #[test]
    fn test_too_long() {
        assert!(parse_address("ADDRESS", "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb9226600").is_err());
    }

    #[test]
    fn test_error_is_validation_kind() {
        let err = parse_address("RECIPIENT_ADDRESS", "0x123").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err, TokenkitError::InvalidAddress { ref name, .. } if name == "RECIPIENT_ADDRESS"));
    }
}

// ============================================================================
// Amount Edge Cases
// ============================================================================

mod amount_tests {
    use super::*;

    #[test]
    fn test_zero_decimals_token() {
        assert_eq!(parse_units("42", 0).unwrap(), U256::from(42u64));
        assert_eq!(format_units(U256::from(42u64), 0), "42.0");
    }

    #[test]
    fn test_smallest_unit() {
        let wei = EthereumAmount::parse_ether("0.000000000000000001").unwrap();
        assert_eq!(wei.wei, U256::from(1u64));
        assert!(EthereumAmount::parse_ether("0.0000000000000000001").is_err());
    }

    #[test]
    fn test_large_supply() {
        let supply = parse_units("1000000", 18).unwrap();
        assert_eq!(format_units(supply, 18), "1000000.0");
    }

    #[test]
    fn test_overflowing_amount() {
        let huge = "9".repeat(90);
        assert!(parse_units(&huge, 18).is_err());
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(parse_units("007.50", 2).unwrap(), U256::from(750u64));
    }
}

// ============================================================================
// Key Edge Cases
// ============================================================================

mod key_tests {
    use super::*;

    #[test]
    fn test_key_with_whitespace() {
        let key = " 0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80 ";
        assert_eq!(signer_from_key(key).unwrap().address(), DEV_ACCOUNT_ADDRESS);
    }

    #[test]
    fn test_malformed_configured_key_is_not_replaced_by_dev_account() {
        assert!(resolve_signer(Some("0xnothex"), true).is_err());
    }
}
