//! tokenkit command-line tools
//!
//! Four binaries share this library:
//!
//! - `deploy-token` deploys `SimpleToken` and writes `<network>-deployment.json`
//! - `check-balance` prints the native and, optionally, token balance of an address
//! - `transfer-tokens` sends tokens from the signing account
//! - `check-funds` tells whether the signing account can pay for a deployment
//!
//! Each takes `--network <name>` and reads everything else from the
//! environment (see [`config::ToolEnv`]). The runners are generic over
//! [`tokenkit_ethereum::ChainClient`] and the token traits of
//! [`tokenkit_erc20`] so they can be driven by an in-memory chain in tests.

#![forbid(unsafe_code)]

pub mod balance;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod funds;
pub mod logging;
pub mod record;
pub mod report;
pub mod transfer;
