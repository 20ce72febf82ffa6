//! # tokenkit Testing Infrastructure
//!
//! Testing utilities for the tokenkit tools:
//! - [`MockChain`], an in-memory chain and token contract
//! - Edge case address and amount tables
//! - Property-based testing strategies
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tokenkit_testing::*;
//!
//! let chain = MockChain::new()
//!     .with_native_balance(DEV_ACCOUNT_ADDRESS, EthereumAmount::parse_ether("1").unwrap());
//! let report = tokenkit_cli::balance::inspect(&chain, &chain, &request).await?;
//! assert_eq!(chain.submissions(), 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use alloy::primitives::U256;
use proptest::prelude::*;

mod mock;
pub use mock::{Call, MockChain, MockToken, DEPLOYMENT_GAS, MOCK_CHAIN_ID, TRANSFER_GAS};

// ============================================================================
// Edge Case Addresses
// ============================================================================

/// Edge case addresses for testing
pub struct EdgeCaseAddresses;

impl EdgeCaseAddresses {
    /// First development account, checksummed
    pub const DEV_ACCOUNT: &'static str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    /// Second development account, checksummed
    pub const SECOND_DEV_ACCOUNT: &'static str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    /// Address of the first contract the first development account deploys
    pub const FIRST_CONTRACT: &'static str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    /// Ethereum zero address
    pub const ZERO: &'static str = "0x0000000000000000000000000000000000000000";

    /// Second development account without the `0x` prefix
    pub const UNPREFIXED: &'static str = "70997970C51812dc3A010C7d01b50e0d17dc79C8";

    /// Development account with one letter's case flipped
    pub const BAD_CHECKSUM: &'static str = "0xf39fd6e51aad88F6F4ce6aB8827279cffFb92266";

    /// Inputs that must fail the well-formedness check
    pub fn invalid() -> Vec<&'static str> {
        vec![
            "",
            "0x",
            "not-an-address",
            "0xGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGG", // Invalid hex
            "0x742d35Cc6634C0532925a3b844Bc9e7595f5",     // Too short
            "742d35Cc6634C0532925a3b844Bc9e7595f5",       // Too short, no prefix
            Self::BAD_CHECKSUM,
        ]
    }
}

// ============================================================================
// Edge Case Amounts
// ============================================================================

/// Edge case amount texts for testing parsing and scaling
pub struct EdgeCaseAmounts;

impl EdgeCaseAmounts {
    /// Default transfer amount
    pub const DEFAULT_TRANSFER: &'static str = "1000";

    /// Texts that must be rejected for any token
    pub fn invalid() -> Vec<&'static str> {
        vec!["", "abc", "-5", "+5", "1e18", "1.2.3", "1,000"]
    }

    /// Texts that parse to a zero quantity
    pub fn zero() -> Vec<&'static str> {
        vec!["0", "0.0", "000", ".0"]
    }
}

// ============================================================================
// Property-Based Testing Strategies
// ============================================================================

/// Generates token decimals in the range real tokens use
pub fn token_decimals() -> impl Strategy<Value = u8> {
    0u8..=18
}

/// Generates a sender balance and a transfer amount, either of which may be larger
pub fn balance_and_amount() -> impl Strategy<Value = (U256, U256)> {
    (0u128..=u64::MAX as u128, 1u128..=u64::MAX as u128)
        .prop_map(|(balance, amount)| (U256::from(balance), U256::from(amount)))
}

/// Generates decimal amount text with at most `decimals` fractional digits
pub fn amount_text(decimals: u8) -> impl Strategy<Value = String> {
    let fraction_len = decimals as usize;
    (1u64..1_000_000, proptest::collection::vec(0u8..10, 0..=fraction_len)).prop_map(|(whole, digits)| {
        if digits.is_empty() {
            whole.to_string()
        } else {
            let fraction: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
            format!("{whole}.{fraction}")
        }
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokenkit_ethereum::{parse_address, units::parse_units, DEV_ACCOUNT_ADDRESS};

    #[test]
    fn test_edge_case_addresses() {
        assert_eq!(parse_address("ADDRESS", EdgeCaseAddresses::DEV_ACCOUNT).unwrap(), DEV_ACCOUNT_ADDRESS);
        assert!(parse_address("ADDRESS", EdgeCaseAddresses::SECOND_DEV_ACCOUNT).is_ok());
        assert_eq!(
            parse_address("ADDRESS", EdgeCaseAddresses::UNPREFIXED).unwrap(),
            parse_address("ADDRESS", EdgeCaseAddresses::SECOND_DEV_ACCOUNT).unwrap()
        );
        for bad in EdgeCaseAddresses::invalid() {
            assert!(parse_address("ADDRESS", bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_first_contract_address() {
        let expected = parse_address("TOKEN_ADDRESS", EdgeCaseAddresses::FIRST_CONTRACT).unwrap();
        assert_eq!(DEV_ACCOUNT_ADDRESS.create(0), expected);
    }

    #[test]
    fn test_edge_case_amounts() {
        for bad in EdgeCaseAmounts::invalid() {
            assert!(parse_units(bad, 18).is_err(), "accepted {bad:?}");
        }
        for zero in EdgeCaseAmounts::zero() {
            assert!(parse_units(zero, 18).unwrap().is_zero());
        }
    }

    proptest! {
        #[test]
        fn generated_amounts_fit_their_decimals(decimals in token_decimals(), text in amount_text(18)) {
            let fraction_len = text.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
            prop_assert_eq!(parse_units(&text, decimals).is_ok(), fraction_len <= decimals as usize);
        }
    }
}
