//! Token transfers from the signing account.

use tokenkit_erc20::{Erc20Adapter, TokenAmount, TokenMetadata, TokenResolver};
use tokenkit_error::{Result, TokenkitError};
use tokenkit_ethereum::alloy::primitives::{Address, B256};
use tokenkit_ethereum::{parse_address, ChainClient, Confirmation};

use crate::config::ToolEnv;

/// Amount sent when `AMOUNT` is not set, in whole tokens
pub const DEFAULT_AMOUNT: &str = "1000";

/// A validated transfer, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub token: Address,
    pub recipient: Address,
    /// Amount as decimal text; scaled once the token's decimals are known
    pub amount: String,
}

impl TransferRequest {
    /// Validates `RECIPIENT_ADDRESS`, `TOKEN_ADDRESS` and `AMOUNT`. Makes no
    /// network call.
    pub fn from_env(env: &ToolEnv) -> Result<Self> {
        let recipient = required_address("RECIPIENT_ADDRESS", env.recipient_address.as_deref())?;
        let token = required_address("TOKEN_ADDRESS", env.token_address.as_deref())?;
        let amount = env.amount.clone().unwrap_or_else(|| DEFAULT_AMOUNT.to_string());
        TokenAmount::check_text(&amount)?;
        Ok(Self {
            token,
            recipient,
            amount,
        })
    }
}

fn required_address(name: &str, value: Option<&str>) -> Result<Address> {
    let value = value.ok_or_else(|| TokenkitError::MissingParameter { name: name.to_string() })?;
    parse_address(name, value)
}

/// Balances around a confirmed transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReport {
    pub token: Address,
    pub metadata: TokenMetadata,
    pub sender: Address,
    pub recipient: Address,
    pub amount: TokenAmount,
    pub tx_hash: B256,
    pub confirmation: Confirmation,
    pub sender_before: TokenAmount,
    pub recipient_before: TokenAmount,
    pub sender_after: TokenAmount,
    pub recipient_after: TokenAmount,
}

/// Validates the inputs, then transfers. See [`transfer`].
pub async fn run<C, R>(chain: &C, tokens: &R, env: &ToolEnv, sender: Option<Address>) -> Result<TransferReport>
where
    C: ChainClient,
    R: TokenResolver,
{
    let request = TransferRequest::from_env(env)?;
    let sender = sender.ok_or_else(|| {
        TokenkitError::Config("no signing account configured for this network".to_string())
    })?;
    transfer(chain, tokens, &request, sender).await
}

/// Checks the sender's balance, submits the transfer, waits for it once and
/// re-reads both balances.
pub async fn transfer<C, R>(chain: &C, tokens: &R, request: &TransferRequest, sender: Address) -> Result<TransferReport>
where
    C: ChainClient,
    R: TokenResolver,
{
    tracing::info!(%sender, "sender account");
    tracing::info!(recipient = %request.recipient, "recipient account");
    tracing::info!(token = %request.token, "token contract address");

    let token = tokens.attach(request.token);
    let metadata = token.metadata().await?;
    let amount = TokenAmount::parse(&request.amount, metadata.decimals)?;
    let decimals = metadata.decimals;

    let sender_before = TokenAmount::new(token.balance_of(sender).await?, decimals);
    tracing::info!("sender balance before transfer: {sender_before} {}", metadata.symbol);
    if sender_before.raw < amount.raw {
        return Err(TokenkitError::InsufficientTokenBalance {
            have: sender_before.to_string(),
            need: request.amount.trim().to_string(),
            symbol: metadata.symbol,
        });
    }
    let recipient_before = TokenAmount::new(token.balance_of(request.recipient).await?, decimals);

    tracing::info!("transferring {} {} to {}", request.amount.trim(), metadata.symbol, request.recipient);
    let tx_hash = token.transfer(request.recipient, amount.raw).await?;
    tracing::info!(%tx_hash, "waiting for transaction confirmation");
    let confirmation = chain.wait_for_confirmation(tx_hash).await?;

    let sender_after = TokenAmount::new(token.balance_of(sender).await?, decimals);
    let recipient_after = TokenAmount::new(token.balance_of(request.recipient).await?, decimals);

    Ok(TransferReport {
        token: request.token,
        metadata,
        sender,
        recipient: request.recipient,
        amount,
        tx_hash,
        confirmation,
        sender_before,
        recipient_before,
        sender_after,
        recipient_after,
    })
}
