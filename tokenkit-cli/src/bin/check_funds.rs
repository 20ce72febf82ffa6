//! Tells whether the signing account holds enough ETH to deploy.
//!
//! ```text
//! check-funds --network <network>
//! ```

use std::process::ExitCode;

use clap::Parser;
use tokenkit_cli::cli::{finish, Connection, NetworkArgs};
use tokenkit_cli::funds::{self, RECOMMENDED_DEPLOY_BALANCE};
use tokenkit_cli::logging;
use tokenkit_error::TokenkitError;
use tokenkit_ethereum::EthereumAmount;

async fn run(args: NetworkArgs) -> anyhow::Result<()> {
    let connection = Connection::open(&args)?;
    let address = connection.require_signer()?;
    let recommended = EthereumAmount::parse_ether(RECOMMENDED_DEPLOY_BALANCE).map_err(TokenkitError::from)?;

    let report = funds::check(&connection.client, &connection.settings.profile.name, address, recommended).await?;
    println!("{report}");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = NetworkArgs::parse();
    logging::init();
    finish("Error checking balance", run(args).await)
}
