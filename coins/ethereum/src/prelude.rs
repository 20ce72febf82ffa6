//! This prelude module simplifies importing many useful items from the tokenkit_ethereum crate using a glob import.
//!
//! To use this prelude, add the following to your code:
//! ```
//! use tokenkit_ethereum::prelude::*;
//! ```

pub use crate::{
    parse_address, resolve_signer, ChainClient, Confirmation, EthClient, EthereumAmount,
    GasSettings,
};

pub use alloy::primitives::{Address, B256, U256};
pub use alloy::signers::local::PrivateKeySigner;
