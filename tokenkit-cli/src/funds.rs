//! Checks whether the signing account can pay for a deployment.

use tokenkit_error::Result;
use tokenkit_ethereum::alloy::primitives::Address;
use tokenkit_ethereum::{ChainClient, EthereumAmount};

/// Balance recommended before deploying to a public test network, in ETH
pub const RECOMMENDED_DEPLOY_BALANCE: &str = "0.1";

/// Where to get Sepolia ETH
pub const SEPOLIA_FAUCETS: [&str; 3] = [
    "https://sepoliafaucet.com/",
    "https://www.infura.io/faucet/sepolia",
    "https://www.alchemy.com/faucets/ethereum-sepolia",
];

/// Result of a funds check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundsReport {
    pub network: String,
    pub address: Address,
    pub balance: EthereumAmount,
    pub recommended: EthereumAmount,
}

impl FundsReport {
    /// Whether the balance meets the recommendation
    pub fn sufficient(&self) -> bool {
        self.balance >= self.recommended
    }
}

/// Reads the balance of `address` and compares it with `recommended`.
pub async fn check<C: ChainClient>(
    chain: &C,
    network: &str,
    address: Address,
    recommended: EthereumAmount,
) -> Result<FundsReport> {
    let balance = chain.native_balance(address).await?;
    Ok(FundsReport {
        network: network.to_string(),
        address,
        balance,
        recommended,
    })
}
