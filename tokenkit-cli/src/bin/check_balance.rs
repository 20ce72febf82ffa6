//! Prints the native balance of an address and, with `TOKEN_ADDRESS`, its token balance.
//!
//! ```text
//! [ADDRESS=0x...] [TOKEN_ADDRESS=0x...] check-balance --network <network>
//! ```

use std::process::ExitCode;

use clap::Parser;
use tokenkit_cli::cli::{finish, Connection, NetworkArgs};
use tokenkit_cli::{balance, logging};

async fn run(args: NetworkArgs) -> anyhow::Result<()> {
    let connection = Connection::open(&args)?;
    let client = &connection.client;

    let report = balance::run(client, client, &connection.settings.env, connection.signer).await?;
    println!("{report}");
    report.into_result()?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = NetworkArgs::parse();
    logging::init();
    finish("Error checking balance", run(args).await)
}
