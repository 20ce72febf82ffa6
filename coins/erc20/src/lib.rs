//! tokenkit ERC-20 module
//!
//! Access to the `SimpleToken` contract: reads and transfers through the
//! [`Erc20Adapter`] trait, handles to deployed tokens through
//! [`TokenResolver`] and deployment through [`TokenFactory`]. For the live
//! contract these are [`SimpleTokenAdapter`], `TokenResolver for EthClient`
//! and [`SimpleTokenFactory`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]

pub mod adapter;
pub mod amount;
pub mod artifact;
pub mod factory;
pub mod simple_token;

pub use adapter::{Erc20Adapter, Erc20Error, TokenMetadata};
pub use amount::TokenAmount;
pub use artifact::{ContractArtifact, DEFAULT_ARTIFACT_PATH};
pub use factory::{ConstructorArgs, PendingDeployment, TokenFactory, TokenResolver};
pub use simple_token::{SimpleTokenAdapter, SimpleTokenFactory};

/// Exposes commonly used types when working with ERC-20 tokens.
pub mod prelude {
    pub use super::adapter::{Erc20Adapter, TokenMetadata};
    pub use super::amount::TokenAmount;
    pub use super::factory::{ConstructorArgs, TokenFactory, TokenResolver};
    pub use super::simple_token::{SimpleTokenAdapter, SimpleTokenFactory};
}
