//! The chain operations the token tools rely on, behind a trait so that the
//! tools can run against an in-memory chain in tests.

use alloy::primitives::{Address, B256};
use async_trait::async_trait;
use tokenkit_error::Result;

use crate::EthereumAmount;

/// Facts about an included transaction, taken from its receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Hash of the confirmed transaction
    pub tx_hash: B256,
    /// Block the transaction was included in
    pub block_number: u64,
    /// Gas consumed by the transaction
    pub gas_used: u64,
    /// Address of the created contract, for contract-creation transactions
    pub contract_address: Option<Address>,
}

/// Read access to a chain plus confirmation of submitted transactions.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Chain id reported by the endpoint
    async fn chain_id(&self) -> Result<u64>;

    /// Latest block number
    async fn block_number(&self) -> Result<u64>;

    /// Native currency balance of `address`
    async fn native_balance(&self, address: Address) -> Result<EthereumAmount>;

    /// Waits until `tx_hash` is included.
    ///
    /// Resolves with an error if the transaction reverted. Does not time out
    /// on its own; callers bound the wait.
    async fn wait_for_confirmation(&self, tx_hash: B256) -> Result<Confirmation>;
}
