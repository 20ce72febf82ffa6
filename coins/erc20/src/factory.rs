//! Deploying a token and attaching to an existing one.

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use tokenkit_error::{Result, TxDiagnostics};

use crate::adapter::Erc20Adapter;

/// Parameters of the token contract's constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorArgs {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Number of decimals
    pub decimals: u8,
    /// Supply in whole tokens; the contract scales it by `decimals`
    pub initial_supply: U256,
    /// Receiver of the initial supply and owner of the contract
    pub initial_holder: Address,
}

/// A creation transaction that has been broadcast but not yet confirmed.
#[derive(Debug, Clone)]
pub struct PendingDeployment {
    /// Hash of the creation transaction
    pub tx_hash: B256,
    /// Transaction details for failure reports
    pub diagnostics: TxDiagnostics,
}

/// Hands out handles to deployed tokens.
pub trait TokenResolver: Send + Sync {
    /// Handle type for a deployed token
    type Token: Erc20Adapter;

    /// Handle to the token at `address`. No network call is made.
    fn attach(&self, address: Address) -> Self::Token;
}

/// Deploys new token contracts.
#[async_trait]
pub trait TokenFactory: TokenResolver {
    /// Broadcasts the creation transaction.
    async fn submit_deployment(&self, args: &ConstructorArgs) -> Result<PendingDeployment>;
}
