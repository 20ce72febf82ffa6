//! The deployment record written after a successful deployment.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokenkit_erc20::ConstructorArgs;
use tokenkit_error::{Result, TokenkitError};
use tokenkit_ethereum::alloy::primitives::{Address, B256};

/// Facts about one deployment, persisted as `<network>-deployment.json`.
///
/// Integer fields that can exceed JavaScript's safe range are stored as
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub network: String,
    pub chain_id: String,
    pub contract_address: String,
    pub token_name: String,
    pub token_symbol: String,
    pub token_decimals: u8,
    pub initial_supply: String,
    pub initial_holder: String,
    pub deployer_address: String,
    pub transaction_hash: String,
    pub deployment_time: DateTime<Utc>,
    pub block_number: String,
}

impl DeploymentRecord {
    /// Builds the record for a confirmed deployment.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        network: &str,
        chain_id: u64,
        contract_address: Address,
        args: &ConstructorArgs,
        deployer: Address,
        tx_hash: B256,
        block_number: u64,
        deployment_time: DateTime<Utc>,
    ) -> Self {
        Self {
            network: network.to_string(),
            chain_id: chain_id.to_string(),
            contract_address: contract_address.to_checksum(None),
            token_name: args.name.clone(),
            token_symbol: args.symbol.clone(),
            token_decimals: args.decimals,
            initial_supply: args.initial_supply.to_string(),
            initial_holder: args.initial_holder.to_checksum(None),
            deployer_address: deployer.to_checksum(None),
            transaction_hash: tx_hash.to_string(),
            deployment_time,
            block_number: block_number.to_string(),
        }
    }

    /// File name for `network`
    pub fn file_name(network: &str) -> String {
        format!("{network}-deployment.json")
    }

    /// Writes the record into `dir` as pretty JSON, replacing any earlier
    /// record for the same network. Returns the written path.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(Self::file_name(&self.network));
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| TokenkitError::Io(format!("cannot serialise deployment record: {e}")))?;
        std::fs::write(&path, json)?;
        tracing::info!(path = %path.display(), "deployment information saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tokenkit_ethereum::alloy::primitives::{address, U256};

    fn record() -> DeploymentRecord {
        let holder = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let args = ConstructorArgs {
            name: "My Simple Token".into(),
            symbol: "MST".into(),
            decimals: 18,
            initial_supply: U256::from(1_000_000u64),
            initial_holder: holder,
        };
        DeploymentRecord::new(
            "localhost",
            31337,
            address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            &args,
            holder,
            B256::with_last_byte(1),
            1,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_field_names_and_types() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(value["network"], "localhost");
        assert_eq!(value["chainId"], "31337");
        assert_eq!(value["contractAddress"], "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(value["tokenName"], "My Simple Token");
        assert_eq!(value["tokenSymbol"], "MST");
        assert_eq!(value["tokenDecimals"], 18);
        assert_eq!(value["initialSupply"], "1000000");
        assert_eq!(value["deployerAddress"], "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(value["deploymentTime"], "2024-05-01T12:00:00Z");
        assert_eq!(value["blockNumber"], "1");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = record();
        let path = first.write_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("localhost-deployment.json"));

        let mut second = record();
        second.token_symbol = "TKN".into();
        second.write_to(dir.path()).unwrap();

        let stored: DeploymentRecord =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored, second);
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deployments");
        let path = record().write_to(&nested).unwrap();
        assert!(path.starts_with(&nested));
    }
}
