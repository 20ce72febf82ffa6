//! Transfers tokens from the signing account.
//!
//! ```text
//! TOKEN_ADDRESS=0x... RECIPIENT_ADDRESS=0x... [AMOUNT=1000] transfer-tokens --network <network>
//! ```

use std::process::ExitCode;

use clap::Parser;
use tokenkit_cli::cli::{finish, Connection, NetworkArgs};
use tokenkit_cli::{logging, transfer};

async fn run(args: NetworkArgs) -> anyhow::Result<()> {
    let connection = Connection::open(&args)?;
    let sender = connection.require_signer()?;
    let client = &connection.client;

    let report = transfer::run(client, client, &connection.settings.env, Some(sender)).await?;
    println!("{report}");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = NetworkArgs::parse();
    logging::init();
    finish("Error transferring tokens", run(args).await)
}
