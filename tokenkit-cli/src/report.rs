//! Human-readable output of each tool.

use std::fmt;

use tokenkit_error::TokenkitError;

use crate::balance::{BalanceReport, TokenLookup};
use crate::deploy::DeployOutcome;
use crate::funds::{FundsReport, SEPOLIA_FAUCETS};
use crate::transfer::TransferReport;

const RULE: &str = "--------------------------";

fn wallet_import(f: &mut fmt::Formatter<'_>, address: &str, symbol: &str, decimals: u8) -> fmt::Result {
    writeln!(f, "MetaMask Import Instructions:")?;
    writeln!(f, "{RULE}")?;
    writeln!(f, "1. Open MetaMask")?;
    writeln!(f, "2. Click 'Import tokens'")?;
    writeln!(f, "3. Enter the contract address: {address}")?;
    writeln!(f, "4. Token Symbol: {symbol}")?;
    writeln!(f, "5. Decimals: {decimals}")?;
    writeln!(f, "6. Click 'Import'")
}

/// Deployment summary with follow-up steps
pub struct DeployReport<'a> {
    pub outcome: &'a DeployOutcome,
    /// Set when contract verification is configured
    pub etherscan_api_key: bool,
    /// Block explorer of the network, if it has one
    pub explorer_url: Option<&'a str>,
}

impl fmt::Display for DeployReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = &self.outcome.record;
        writeln!(f, "Token deployed to: {}", record.contract_address)?;
        writeln!(f, "Token Name: {}", record.token_name)?;
        writeln!(f, "Token Symbol: {}", record.token_symbol)?;
        writeln!(f, "Token Decimals: {}", record.token_decimals)?;
        writeln!(f, "Initial Supply: {} {}", record.initial_supply, record.token_symbol)?;
        writeln!(f, "Initial Holder: {}", record.initial_holder)?;
        writeln!(f, "Deployment information saved to {}", self.outcome.record_path.display())?;
        if let Some(explorer) = self.explorer_url {
            writeln!(f, "View on explorer: {}/address/{}", explorer.trim_end_matches('/'), record.contract_address)?;
        }
        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "NEXT STEPS:")?;
        writeln!(f, "{RULE}")?;
        if self.etherscan_api_key {
            writeln!(f, "Verify your contract:")?;
            writeln!(
                f,
                "   npx hardhat verify --network {} {} \"{}\" \"{}\" {} {} {}",
                record.network,
                record.contract_address,
                record.token_name,
                record.token_symbol,
                record.token_decimals,
                record.initial_supply,
                record.initial_holder
            )?;
            writeln!(f)?;
        }
        wallet_import(f, &record.contract_address, &record.token_symbol, record.token_decimals)?;
        write!(f, "{RULE}")
    }
}

impl fmt::Display for BalanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Account: {}", self.address)?;
        write!(f, "ETH Balance: {}", self.native)?;
        match &self.token {
            TokenLookup::NotRequested => {
                writeln!(f)?;
                writeln!(f, "No token address provided. To check token balance:")?;
                write!(f, "TOKEN_ADDRESS=0x... [ADDRESS=0x...] check-balance --network <network>")
            }
            TokenLookup::Found(found) => {
                writeln!(f)?;
                writeln!(f, "Token: {} ({})", found.metadata.name, found.metadata.symbol)?;
                writeln!(f, "Token Address: {}", found.token)?;
                write!(f, "Token Balance: {} {}", found.balance, found.metadata.symbol)
            }
            // the error itself goes to stderr
            TokenLookup::Failed { .. } => Ok(()),
        }
    }
}

impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = &self.metadata.symbol;
        writeln!(f, "Transaction hash: {}", self.tx_hash)?;
        writeln!(f, "Transfer complete! (block {})", self.confirmation.block_number)?;
        writeln!(f, "Sender balance after transfer: {} {symbol}", self.sender_after)?;
        writeln!(f, "Recipient balance after transfer: {} {symbol}", self.recipient_after)?;
        writeln!(f)?;
        wallet_import(f, &self.token.to_string(), symbol, self.metadata.decimals)
    }
}

impl fmt::Display for FundsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wallet address: {}", self.address)?;
        writeln!(f, "{} ETH Balance: {}", self.network, self.balance)?;
        writeln!(f)?;
        if self.sufficient() {
            return write!(f, "Wallet has sufficient funds for contract deployment.");
        }
        writeln!(f, "WARNING: Wallet has insufficient funds for contract deployment.")?;
        writeln!(f, "You need at least {} to deploy the contract.", self.recommended)?;
        writeln!(f)?;
        write!(f, "Please visit one of these faucets to get Sepolia ETH:")?;
        for faucet in SEPOLIA_FAUCETS {
            write!(f, "\n- {faucet}")?;
        }
        Ok(())
    }
}

/// Prints a fatal error with whatever transaction details it carries to stderr.
pub fn print_failure(context: &str, err: &anyhow::Error) {
    eprintln!("{context}: {err:#}");
    if let Some(details) = err.downcast_ref::<TokenkitError>().and_then(TokenkitError::diagnostics) {
        eprint!("{details}");
    }
}
