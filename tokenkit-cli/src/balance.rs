//! Native and token balance inspection.

use tokenkit_erc20::{Erc20Adapter, TokenAmount, TokenMetadata, TokenResolver};
use tokenkit_error::{Result, TokenkitError};
use tokenkit_ethereum::alloy::primitives::Address;
use tokenkit_ethereum::{parse_optional_address, ChainClient, EthereumAmount};

use crate::config::ToolEnv;

/// What to inspect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceRequest {
    pub address: Address,
    pub token: Option<Address>,
}

impl BalanceRequest {
    /// Validates `ADDRESS` and `TOKEN_ADDRESS`. The address defaults to the
    /// signer. Makes no network call.
    pub fn from_env(env: &ToolEnv, signer: Option<Address>) -> Result<Self> {
        let address = parse_optional_address("ADDRESS", env.address.as_deref())?;
        let token = parse_optional_address("TOKEN_ADDRESS", env.token_address.as_deref())?;
        let address = address.or(signer).ok_or_else(|| TokenkitError::MissingParameter {
            name: "ADDRESS".to_string(),
        })?;
        Ok(Self { address, token })
    }
}

/// Token balance of the inspected address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalance {
    pub token: Address,
    pub metadata: TokenMetadata,
    pub balance: TokenAmount,
}

/// Outcome of the token part of an inspection
#[derive(Debug)]
pub enum TokenLookup {
    /// No token address was supplied; no token call was made
    NotRequested,
    /// Metadata and balance were read
    Found(TokenBalance),
    /// Reading from the token contract failed
    Failed {
        token: Address,
        error: TokenkitError,
    },
}

/// Everything the inspector found
#[derive(Debug)]
pub struct BalanceReport {
    pub address: Address,
    pub native: EthereumAmount,
    pub token: TokenLookup,
}

impl BalanceReport {
    /// Turns a failed token lookup into the run's error.
    pub fn into_result(self) -> Result<Self> {
        match self.token {
            TokenLookup::Failed { error, .. } => Err(error),
            _ => Ok(self),
        }
    }
}

/// Validates the inputs, then inspects. See [`inspect`].
pub async fn run<C, R>(chain: &C, tokens: &R, env: &ToolEnv, signer: Option<Address>) -> Result<BalanceReport>
where
    C: ChainClient,
    R: TokenResolver,
{
    let request = BalanceRequest::from_env(env, signer)?;
    inspect(chain, tokens, &request).await
}

/// Reads the native balance and, if a token was requested, the token's
/// metadata and balance. A native balance failure is an error; a token
/// failure is reported inside the returned report, after the native balance.
pub async fn inspect<C, R>(chain: &C, tokens: &R, request: &BalanceRequest) -> Result<BalanceReport>
where
    C: ChainClient,
    R: TokenResolver,
{
    let native = chain.native_balance(request.address).await?;

    let token = match request.token {
        None => TokenLookup::NotRequested,
        Some(address) => match token_balance(&tokens.attach(address), request.address).await {
            Ok(found) => TokenLookup::Found(found),
            Err(error) => {
                tracing::error!(token = %address, %error, "error checking token balance");
                TokenLookup::Failed { token: address, error }
            }
        },
    };

    Ok(BalanceReport {
        address: request.address,
        native,
        token,
    })
}

async fn token_balance<T: Erc20Adapter>(token: &T, owner: Address) -> Result<TokenBalance> {
    let metadata = token.metadata().await?;
    let raw = token.balance_of(owner).await?;
    Ok(TokenBalance {
        token: token.contract_address(),
        balance: TokenAmount::new(raw, metadata.decimals),
        metadata,
    })
}
