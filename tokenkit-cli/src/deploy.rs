//! Deploys the token contract and records where it went.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use tokenkit_erc20::{ConstructorArgs, Erc20Adapter, TokenFactory, TokenMetadata};
use tokenkit_error::{Result, TokenkitError};
use tokenkit_ethereum::alloy::primitives::{Address, U256};
use tokenkit_ethereum::{parse_optional_address, ChainClient, Confirmation, EthereumAmount};
use tokenkit_resilience::{with_retry, FixedDelayRetry};

use crate::config::Settings;
use crate::record::DeploymentRecord;

/// Token name used unless `TOKEN_NAME` is set
pub const DEFAULT_TOKEN_NAME: &str = "My Simple Token";
/// Token symbol used unless `TOKEN_SYMBOL` is set
pub const DEFAULT_TOKEN_SYMBOL: &str = "MST";
/// Decimals used unless `TOKEN_DECIMALS` is set
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;
/// Supply in whole tokens used unless `INITIAL_SUPPLY` is set
pub const DEFAULT_INITIAL_SUPPLY: u64 = 1_000_000;

/// A validated deployment, ready to run.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub network: String,
    pub deployer: Address,
    pub args: ConstructorArgs,
    pub min_balance: EthereumAmount,
    pub expected_chain_id: Option<u64>,
    pub confirmation: FixedDelayRetry,
    pub attempt_timeout: Duration,
    pub deployments_dir: PathBuf,
}

impl DeployRequest {
    /// Validates the deployment inputs. Makes no network call.
    pub fn from_settings(settings: &Settings, deployer: Address) -> Result<Self> {
        let env = &settings.env;
        let initial_holder =
            parse_optional_address("RECIPIENT_ADDRESS", env.recipient_address.as_deref())?.unwrap_or(deployer);

        let decimals = match env.token_decimals.as_deref() {
            Some(text) => text.parse::<u8>().map_err(|e| TokenkitError::InvalidAmount {
                value: text.to_string(),
                reason: format!("TOKEN_DECIMALS: {e}"),
            })?,
            None => DEFAULT_TOKEN_DECIMALS,
        };
        let initial_supply = match env.initial_supply.as_deref() {
            Some(text) => text.parse::<U256>().map_err(|e| TokenkitError::InvalidAmount {
                value: text.to_string(),
                reason: format!("INITIAL_SUPPLY must be a whole number of tokens: {e}"),
            })?,
            None => U256::from(DEFAULT_INITIAL_SUPPLY),
        };

        Ok(Self {
            network: settings.profile.name.clone(),
            deployer,
            args: ConstructorArgs {
                name: env.token_name.clone().unwrap_or_else(|| DEFAULT_TOKEN_NAME.to_string()),
                symbol: env.token_symbol.clone().unwrap_or_else(|| DEFAULT_TOKEN_SYMBOL.to_string()),
                decimals,
                initial_supply,
                initial_holder,
            },
            min_balance: settings.profile.min_deploy_balance()?,
            expected_chain_id: settings.profile.chain_id,
            confirmation: FixedDelayRetry::deployment_confirmation(),
            attempt_timeout: settings.profile.timeout(),
            deployments_dir: settings.deployments_dir(),
        })
    }
}

/// A confirmed, verified deployment.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub record: DeploymentRecord,
    pub record_path: PathBuf,
    pub confirmation: Confirmation,
    pub balance: EthereumAmount,
}

/// Validates the inputs, then deploys. See [`deploy`].
pub async fn run<C, F>(chain: &C, factory: &F, settings: &Settings, deployer: Address) -> Result<DeployOutcome>
where
    C: ChainClient,
    F: TokenFactory,
{
    let request = DeployRequest::from_settings(settings, deployer)?;
    deploy(chain, factory, &request).await
}

/// Deploys the token, waits for the creation transaction under the
/// request's retry policy, checks the deployed metadata and writes the
/// deployment record.
pub async fn deploy<C, F>(chain: &C, factory: &F, request: &DeployRequest) -> Result<DeployOutcome>
where
    C: ChainClient,
    F: TokenFactory,
{
    let args = &request.args;
    tracing::info!(deployer = %request.deployer, "deploying with address");
    tracing::info!(holder = %args.initial_holder, "initial token holder");

    let balance = chain.native_balance(request.deployer).await?;
    tracing::info!(%balance, "account balance");
    if balance < request.min_balance {
        tracing::warn!("get test ETH from a faucet before deploying");
        return Err(TokenkitError::InsufficientNativeBalance {
            have: balance.to_string(),
            need: request.min_balance.to_string(),
        });
    }

    let chain_id = chain.chain_id().await?;
    if let Some(expected) = request.expected_chain_id {
        if chain_id != expected {
            return Err(TokenkitError::ChainIdMismatch { expected, got: chain_id });
        }
    }
    let block_number = chain.block_number().await?;
    tracing::info!(network = %request.network, chain_id, block_number, "network");

    tracing::info!(name = %args.name, symbol = %args.symbol, "deploying token contract");
    let pending = factory.submit_deployment(args).await?;
    tracing::info!(tx_hash = %pending.tx_hash, "transaction sent, waiting for deployment");

    let tx_hash = pending.tx_hash;
    let timeout = request.attempt_timeout;
    let confirmation = with_retry(&request.confirmation, "deployment", |_| async move {
        match tokio::time::timeout(timeout, chain.wait_for_confirmation(tx_hash)).await {
            Ok(result) => result,
            Err(_) => Err(TokenkitError::rpc(
                "eth_getTransactionReceipt",
                format!("no receipt within {} ms", timeout.as_millis()),
            )),
        }
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "failed to deploy after multiple attempts");
        TokenkitError::DeploymentIncomplete {
            attempts: e.attempts,
            tx_hash: tx_hash.to_string(),
        }
    })?;

    let address = confirmation.contract_address.ok_or_else(|| TokenkitError::TransactionFailed {
        reason: "receipt carries no contract address".to_string(),
        diagnostics: Some(pending.diagnostics.clone()),
    })?;
    tracing::info!(%address, block = confirmation.block_number, "token deployed");

    let token = factory.attach(address);
    verify_metadata(&token.metadata().await?, args)?;

    let record = DeploymentRecord::new(
        &request.network,
        chain_id,
        address,
        args,
        request.deployer,
        tx_hash,
        confirmation.block_number,
        Utc::now(),
    );
    let record_path = record.write_to(&request.deployments_dir)?;

    Ok(DeployOutcome {
        record,
        record_path,
        confirmation,
        balance,
    })
}

fn verify_metadata(reported: &TokenMetadata, args: &ConstructorArgs) -> Result<()> {
    let mismatch = |field: &str, expected: String, got: String| TokenkitError::DeploymentMismatch {
        field: field.to_string(),
        expected,
        got,
    };
    if reported.name != args.name {
        return Err(mismatch("name", args.name.clone(), reported.name.clone()));
    }
    if reported.symbol != args.symbol {
        return Err(mismatch("symbol", args.symbol.clone(), reported.symbol.clone()));
    }
    if reported.decimals != args.decimals {
        return Err(mismatch("decimals", args.decimals.to_string(), reported.decimals.to_string()));
    }
    Ok(())
}
