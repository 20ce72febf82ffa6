//! Deploys SimpleToken to the selected network.
//!
//! ```text
//! [RECIPIENT_ADDRESS=0x...] deploy-token --network <network>
//! ```

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tokenkit_cli::cli::{finish, Connection, NetworkArgs};
use tokenkit_cli::report::DeployReport;
use tokenkit_cli::{deploy, logging};
use tokenkit_erc20::{ContractArtifact, SimpleTokenFactory, DEFAULT_ARTIFACT_PATH};
use tokenkit_error::TokenkitError;

async fn run(args: NetworkArgs) -> anyhow::Result<()> {
    let connection = Connection::open(&args)?;
    let deployer = connection.require_signer()?;
    let settings = &connection.settings;

    let artifact_path = settings.env.artifact_path.as_deref().unwrap_or(DEFAULT_ARTIFACT_PATH);
    let artifact = ContractArtifact::load(artifact_path)
        .map_err(TokenkitError::from)
        .context("compile the contract first (npx hardhat compile) or set ARTIFACT_PATH")?;
    let factory = SimpleTokenFactory::new(connection.client.clone(), artifact);

    let outcome = deploy::run(&connection.client, &factory, settings, deployer).await?;
    println!(
        "{}",
        DeployReport {
            outcome: &outcome,
            etherscan_api_key: settings.env.etherscan_api_key.is_some(),
            explorer_url: settings.profile.explorer_url.as_deref(),
        }
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = NetworkArgs::parse();
    logging::init();
    finish("Error during deployment", run(args).await)
}
