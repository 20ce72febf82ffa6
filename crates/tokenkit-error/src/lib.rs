//! # tokenkit Error
//!
//! Unified error types for the tokenkit deploy, balance and transfer tools.
//!
//! Every failure a tool can hit falls into one of three kinds:
//!
//! - [`ErrorKind::Validation`] - missing or malformed input, caught before any
//!   network call is made
//! - [`ErrorKind::InsufficientFunds`] - a freshly read balance does not cover
//!   the requested operation; nothing is submitted
//! - [`ErrorKind::Remote`] - the RPC endpoint or the contract rejected a call
//!
//! All of them end the process with exit status 1.
//!
//! ## Example
//!
//! ```
//! use tokenkit_error::{ErrorKind, TokenkitError, Result};
//!
//! fn require(name: &str, value: Option<&str>) -> Result<String> {
//!     value
//!         .map(str::to_string)
//!         .ok_or_else(|| TokenkitError::MissingParameter { name: name.to_string() })
//! }
//!
//! let err = require("RECIPIENT_ADDRESS", None).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! assert_eq!(err.exit_code(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::fmt;

use thiserror::Error;

/// The main error type for tokenkit operations.
#[derive(Error, Debug)]
pub enum TokenkitError {
    // ============ Validation Errors ============
    /// A required parameter was not supplied
    #[error("Missing required parameter: {name}")]
    MissingParameter {
        /// Parameter (environment variable) name
        name: String,
    },

    /// Address failed the well-formedness check
    #[error("Invalid address in {name} '{value}': {reason}")]
    InvalidAddress {
        /// Parameter the address came from
        name: String,
        /// The rejected value
        value: String,
        /// Reason for rejection
        reason: String,
    },

    /// Amount could not be parsed or scaled
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount {
        /// The rejected value
        value: String,
        /// Reason for rejection
        reason: String,
    },

    /// Configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    // ============ Balance Errors ============
    /// Native balance below the deployment threshold
    #[error("Insufficient native balance: have {have}, need at least {need}")]
    InsufficientNativeBalance {
        /// Available balance, human readable
        have: String,
        /// Required balance, human readable
        need: String,
    },

    /// Token balance below the requested transfer amount
    #[error("Insufficient balance. You have {have} {symbol} but trying to send {need} {symbol}")]
    InsufficientTokenBalance {
        /// Available balance, human readable
        have: String,
        /// Requested amount, human readable
        need: String,
        /// Token symbol
        symbol: String,
    },

    // ============ Remote Errors ============
    /// RPC request failed
    #[error("RPC request failed: {method} - {reason}")]
    Rpc {
        /// RPC method or operation name
        method: String,
        /// Error reason
        reason: String,
    },

    /// Contract call failed
    #[error("Contract call failed: {0}")]
    Contract(String),

    /// A submitted transaction failed or could not be submitted
    #[error("Transaction failed: {reason}")]
    TransactionFailed {
        /// Error reason
        reason: String,
        /// Whatever is known about the transaction
        diagnostics: Option<TxDiagnostics>,
    },

    /// Deployment confirmation did not arrive within the retry budget
    #[error("Deployment incomplete after {attempts} attempts (transaction {tx_hash})")]
    DeploymentIncomplete {
        /// Confirmation attempts made
        attempts: u32,
        /// Hash of the creation transaction
        tx_hash: String,
    },

    /// Endpoint reports a different chain than the selected profile
    #[error("Invalid chain ID: expected {expected}, got {got}")]
    ChainIdMismatch {
        /// Chain ID of the selected profile
        expected: u64,
        /// Chain ID reported by the endpoint
        got: u64,
    },

    /// Deployed contract reports metadata that differs from its constructor arguments
    #[error("Deployed contract reports {field} '{got}', expected '{expected}'")]
    DeploymentMismatch {
        /// Metadata field
        field: String,
        /// Constructor value
        expected: String,
        /// Value read back from the contract
        got: String,
    },

    /// File IO error
    #[error("IO error: {0}")]
    Io(String),
}

/// Convenient Result type using TokenkitError
pub type Result<T> = std::result::Result<T, TokenkitError>;

/// Broad classification of a [`TokenkitError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Missing or malformed input
    Validation,
    /// Balance does not cover the operation
    InsufficientFunds,
    /// Network or contract failure
    Remote,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::InsufficientFunds => write!(f, "insufficient funds"),
            ErrorKind::Remote => write!(f, "remote failure"),
        }
    }
}

impl TokenkitError {
    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenkitError::MissingParameter { .. }
            | TokenkitError::InvalidAddress { .. }
            | TokenkitError::InvalidAmount { .. }
            | TokenkitError::Config(_) => ErrorKind::Validation,
            TokenkitError::InsufficientNativeBalance { .. }
            | TokenkitError::InsufficientTokenBalance { .. } => ErrorKind::InsufficientFunds,
            TokenkitError::Rpc { .. }
            | TokenkitError::Contract(_)
            | TokenkitError::TransactionFailed { .. }
            | TokenkitError::DeploymentIncomplete { .. }
            | TokenkitError::ChainIdMismatch { .. }
            | TokenkitError::DeploymentMismatch { .. }
            | TokenkitError::Io(_) => ErrorKind::Remote,
        }
    }

    /// Process exit status for this error. Every caught failure is fatal.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Transaction details attached to the error, if any
    pub fn diagnostics(&self) -> Option<&TxDiagnostics> {
        match self {
            TokenkitError::TransactionFailed { diagnostics, .. } => diagnostics.as_ref(),
            _ => None,
        }
    }

    /// Shorthand for an [`TokenkitError::Rpc`] error
    pub fn rpc(method: impl Into<String>, reason: impl fmt::Display) -> Self {
        TokenkitError::Rpc {
            method: method.into(),
            reason: reason.to_string(),
        }
    }
}

// ============ Transaction Diagnostics ============

/// What is known about a transaction when it fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TxDiagnostics {
    /// Transaction hash, once submitted
    pub tx_hash: Option<String>,
    /// Sender address
    pub from: Option<String>,
    /// Recipient; `None` for contract creation
    pub to: Option<String>,
    /// Gas limit, if set explicitly
    pub gas_limit: Option<u64>,
    /// Gas price in gwei, if set explicitly
    pub gas_price_gwei: Option<String>,
}

impl fmt::Display for TxDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(hash) = &self.tx_hash {
            writeln!(f, "Transaction hash: {hash}")?;
        }
        if let Some(from) = &self.from {
            writeln!(f, "From: {from}")?;
        }
        writeln!(f, "To: {}", self.to.as_deref().unwrap_or("contract creation"))?;
        if let Some(gas_limit) = self.gas_limit {
            writeln!(f, "Gas limit: {gas_limit}")?;
        }
        if let Some(gas_price) = &self.gas_price_gwei {
            writeln!(f, "Gas price: {gas_price} gwei")?;
        }
        Ok(())
    }
}

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Wraps the error as an RPC failure of `method`
    fn rpc_context(self, method: &str) -> Result<T>;
}

impl<T, E: fmt::Display> ErrorContext<T> for std::result::Result<T, E> {
    fn rpc_context(self, method: &str) -> Result<T> {
        self.map_err(|e| TokenkitError::rpc(method, e))
    }
}

// ============ From implementations for common error types ============

impl From<std::io::Error> for TokenkitError {
    fn from(err: std::io::Error) -> Self {
        TokenkitError::Io(err.to_string())
    }
}
