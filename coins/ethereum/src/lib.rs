//! # tokenkit Ethereum Library
//!
//! Chain access for the tokenkit tools, built on the
//! [alloy](https://github.com/alloy-rs/alloy) framework.
//!
//! ### Reading balances with EthClient
//! ```no_run
//! # use tokenkit_ethereum::prelude::*;
//! # async fn ethereum() -> tokenkit_error::Result<()> {
//! let client = EthClient::connect("http://127.0.0.1:8545")?;
//! let address = parse_address("ADDRESS", "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")?;
//! let balance = client.native_balance(address).await?;
//! println!("{address}: {balance}");
//! # Ok(())
//! # }
//! ```
//!
//! ### Signing
//! [`resolve_signer`] picks the configured key, or the first development
//! account on local networks. A signing client applies its [`GasSettings`] to
//! every submitted transaction.
//! ```no_run
//! # use tokenkit_ethereum::prelude::*;
//! # fn ethereum() -> Result<(), tokenkit_ethereum::Error> {
//! if let Some(signer) = resolve_signer(None, true)? {
//!     let client = EthClient::connect_with_signer("http://127.0.0.1:8545", signer)?
//!         .with_gas(GasSettings { gas_limit: Some(5_000_000), gas_price: None });
//!     assert!(client.signer_address().is_some());
//! }
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub use address::{parse_address, parse_optional_address};
mod chain;
pub use chain::{ChainClient, Confirmation};
mod ethclient;
pub use ethclient::{EthClient, GasSettings, DEFAULT_POLL_INTERVAL};
mod ethereum_amount;
pub use ethereum_amount::{EthereumAmount, ETHER_DECIMALS};
mod error;
pub use error::Error;
pub mod signer;
pub use signer::{resolve_signer, signer_from_key, DEV_ACCOUNT_ADDRESS, DEV_ACCOUNT_PRIVATE_KEY};
pub mod units;
pub use alloy;
pub mod prelude;
