//! Generic ERC-20 adapter trait and types

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use std::fmt;
use tokenkit_error::{Result, TokenkitError};

/// Error type for ERC-20 operations
#[derive(Debug)]
pub enum Erc20Error {
    /// Contract call failed
    ContractError(String),
    /// Return data could not be decoded
    DecodeError(String),
    /// Contract artifact missing or malformed
    ArtifactError(String),
}

impl fmt::Display for Erc20Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Erc20Error::ContractError(e) => write!(f, "Contract error: {}", e),
            Erc20Error::DecodeError(e) => write!(f, "Decode error: {}", e),
            Erc20Error::ArtifactError(e) => write!(f, "Artifact error: {}", e),
        }
    }
}

impl std::error::Error for Erc20Error {}

impl From<Erc20Error> for TokenkitError {
    fn from(err: Erc20Error) -> Self {
        match err {
            Erc20Error::ArtifactError(e) => TokenkitError::Config(format!("contract artifact: {e}")),
            other => TokenkitError::Contract(other.to_string()),
        }
    }
}

/// Descriptive token metadata, read fresh from the contract on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Number of decimals of the smallest unit
    pub decimals: u8,
}

/// Trait for ERC-20 token adapters
#[async_trait]
pub trait Erc20Adapter: Send + Sync {
    /// Returns the contract address for this token
    fn contract_address(&self) -> Address;

    /// Returns the token name
    async fn name(&self) -> Result<String>;

    /// Returns the token symbol
    async fn symbol(&self) -> Result<String>;

    /// Returns the number of decimals
    async fn decimals(&self) -> Result<u8>;

    /// Returns the total supply
    async fn total_supply(&self) -> Result<U256>;

    /// Returns the balance of the given address
    async fn balance_of(&self, owner: Address) -> Result<U256>;

    /// Submits `transfer(to, amount)` from the signing account and returns the
    /// transaction hash. Does not wait for inclusion.
    async fn transfer(&self, to: Address, amount: U256) -> Result<B256>;

    /// Reads name, symbol and decimals.
    async fn metadata(&self) -> Result<TokenMetadata> {
        Ok(TokenMetadata {
            name: self.name().await?,
            symbol: self.symbol().await?,
            decimals: self.decimals().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erc20_error_display_contract_error() {
        let error = Erc20Error::ContractError("call failed".to_string());
        assert_eq!(format!("{}", error), "Contract error: call failed");
    }

    #[test]
    fn test_erc20_error_display_decode_error() {
        let error = Erc20Error::DecodeError("buffer overrun".to_string());
        assert_eq!(format!("{}", error), "Decode error: buffer overrun");
    }

    #[test]
    fn test_erc20_error_into_tokenkit_error() {
        let err: TokenkitError = Erc20Error::ContractError("execution reverted".into()).into();
        assert!(matches!(err, TokenkitError::Contract(ref msg) if msg.contains("execution reverted")));

        let err: TokenkitError = Erc20Error::ArtifactError("no bytecode".into()).into();
        assert!(matches!(err, TokenkitError::Config(_)));
    }

    struct FixedToken;

    #[async_trait]
    impl Erc20Adapter for FixedToken {
        fn contract_address(&self) -> Address {
            Address::ZERO
        }
        async fn name(&self) -> Result<String> {
            Ok("My Simple Token".into())
        }
        async fn symbol(&self) -> Result<String> {
            Ok("MST".into())
        }
        async fn decimals(&self) -> Result<u8> {
            Ok(18)
        }
        async fn total_supply(&self) -> Result<U256> {
            Ok(U256::ZERO)
        }
        async fn balance_of(&self, _owner: Address) -> Result<U256> {
            Ok(U256::ZERO)
        }
        async fn transfer(&self, _to: Address, _amount: U256) -> Result<B256> {
            Err(TokenkitError::Contract("read-only".into()))
        }
    }

    #[tokio::test]
    async fn test_metadata_collects_fields() {
        let metadata = FixedToken.metadata().await.unwrap();
        assert_eq!(
            metadata,
            TokenMetadata {
                name: "My Simple Token".into(),
                symbol: "MST".into(),
                decimals: 18,
            }
        );
    }
}
