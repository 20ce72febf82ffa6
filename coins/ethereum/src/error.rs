use alloy::primitives::B256;
use thiserror::Error;
use tokenkit_error::{TokenkitError, TxDiagnostics};

/// Errors raised while talking to an Ethereum endpoint.
#[derive(Error, Debug)]
pub enum Error {
    /// RPC URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Private key is not 32 bytes of hex or not a valid secp256k1 scalar
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Amount text could not be converted to an integer quantity
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount {
        /// The rejected text
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Arithmetic overflow on a U256 quantity
    #[error("Overflow: {0}")]
    Overflow(String),

    /// RPC call returned an error
    #[error("RPC request failed: {method} - {reason}")]
    Rpc {
        /// JSON-RPC method
        method: &'static str,
        /// Error text from the transport
        reason: String,
    },

    /// Transaction was included but reverted
    #[error("Transaction {0} reverted")]
    Reverted(B256),
}

impl Error {
    pub(crate) fn rpc(method: &'static str, reason: impl std::fmt::Display) -> Self {
        Error::Rpc {
            method,
            reason: reason.to_string(),
        }
    }
}

impl From<Error> for TokenkitError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidUrl(reason) => TokenkitError::Config(format!("invalid RPC URL: {reason}")),
            Error::InvalidPrivateKey(reason) => {
                TokenkitError::Config(format!("invalid private key: {reason}"))
            }
            Error::InvalidAmount { value, reason } => TokenkitError::InvalidAmount { value, reason },
            Error::Overflow(reason) => TokenkitError::InvalidAmount {
                value: String::new(),
                reason,
            },
            Error::Rpc { method, reason } => TokenkitError::Rpc {
                method: method.to_string(),
                reason,
            },
            Error::Reverted(hash) => TokenkitError::TransactionFailed {
                reason: "execution reverted".to_string(),
                diagnostics: Some(TxDiagnostics {
                    tx_hash: Some(hash.to_string()),
                    ..TxDiagnostics::default()
                }),
            },
        }
    }
}
