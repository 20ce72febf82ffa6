//! Pieces shared by the binaries.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tokenkit_error::TokenkitError;
use tokenkit_ethereum::alloy::primitives::Address;
use tokenkit_ethereum::{resolve_signer, EthClient};

use crate::config::{Settings, DEFAULT_NETWORK};
use crate::report;

/// Every tool takes only the network to run against; everything else comes
/// from the environment.
#[derive(Debug, Parser)]
pub struct NetworkArgs {
    /// Network profile: sepolia, sepolia-fork, localhost, or one from tokenkit.json
    #[arg(long, default_value = DEFAULT_NETWORK)]
    pub network: String,
}

/// A client for the selected network, signing when a key is available.
pub struct Connection {
    pub settings: Settings,
    pub client: EthClient,
    pub signer: Option<Address>,
}

impl Connection {
    /// Loads settings for `args.network` and connects.
    pub fn open(args: &NetworkArgs) -> anyhow::Result<Self> {
        let settings = Settings::load(&args.network)
            .map_err(TokenkitError::from)
            .with_context(|| format!("loading configuration for network '{}'", args.network))?;
        let profile = &settings.profile;

        let signer = resolve_signer(settings.env.private_key.as_deref(), profile.dev_accounts)
            .map_err(TokenkitError::from)?;
        let signer_address = signer.as_ref().map(|s| s.address());
        let client = match signer {
            Some(signer) => EthClient::connect_with_signer(&profile.rpc_url, signer),
            None => EthClient::connect(&profile.rpc_url),
        }
        .map_err(TokenkitError::from)?
        .with_gas(profile.gas_settings());

        tracing::debug!(network = %profile.name, signer = ?signer_address, "connected");
        Ok(Self {
            settings,
            client,
            signer: signer_address,
        })
    }

    /// The signing account, or an error naming the variable that should hold its key
    pub fn require_signer(&self) -> Result<Address, TokenkitError> {
        self.signer.ok_or_else(|| match &self.settings.profile.accounts_env {
            Some(name) => TokenkitError::Config(format!("{name} is not set")),
            None => TokenkitError::Config(format!(
                "no signing account configured for network '{}'",
                self.settings.profile.name
            )),
        })
    }
}

/// Maps a tool's result to the process exit status, printing failures.
pub fn finish(context: &str, result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report::print_failure(context, &err);
            let code = err.downcast_ref::<TokenkitError>().map_or(1, TokenkitError::exit_code);
            ExitCode::from(code)
        }
    }
}
