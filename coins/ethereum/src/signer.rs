//! Signer resolution.
//!
//! A configured private key always wins. Profiles pointing at a local
//! development node may fall back to that node's first pre-funded account.

use alloy::primitives::{address, Address};
use alloy::signers::local::PrivateKeySigner;

use crate::Error;

/// Private key of the first pre-funded account on Hardhat and Anvil dev nodes
pub const DEV_ACCOUNT_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Address of [`DEV_ACCOUNT_PRIVATE_KEY`]
pub const DEV_ACCOUNT_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// Builds a signer from a hex private key, with or without `0x`.
pub fn signer_from_key(private_key: &str) -> Result<PrivateKeySigner, Error> {
    let key = private_key.trim();
    let key = key.strip_prefix("0x").unwrap_or(key);
    let bytes = hex::decode(key).map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;
    if bytes.len() != 32 {
        return Err(Error::InvalidPrivateKey(format!(
            "expected 32 bytes, got {}",
            bytes.len()
        )));
    }
    PrivateKeySigner::from_slice(&bytes).map_err(|e| Error::InvalidPrivateKey(e.to_string()))
}

/// Resolves the account that signs for this run.
///
/// Returns `Ok(None)` when no key is configured and the profile has no
/// development accounts; callers decide whether that is fatal.
pub fn resolve_signer(
    configured_key: Option<&str>,
    dev_accounts: bool,
) -> Result<Option<PrivateKeySigner>, Error> {
    match configured_key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => signer_from_key(key).map(Some),
        None if dev_accounts => {
            tracing::debug!("no private key configured, using the first development account");
            signer_from_key(DEV_ACCOUNT_PRIVATE_KEY).map(Some)
        }
        None => Ok(None),
    }
}
