//! Compiled contract artifacts in the Hardhat JSON layout.

use std::path::Path;
use std::str::FromStr;

use alloy::primitives::Bytes;
use serde::Deserialize;

use crate::adapter::Erc20Error;

/// Where Hardhat writes the compiled token contract, relative to the project root
pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/contracts/SimpleToken.sol/SimpleToken.json";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    #[serde(default)]
    contract_name: Option<String>,
    bytecode: String,
}

/// The creation bytecode of a compiled contract.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// Contract name recorded in the artifact
    pub contract_name: Option<String>,
    /// Creation bytecode, without constructor arguments
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Reads the artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Erc20Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Erc20Error::ArtifactError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
            .map_err(|e| Erc20Error::ArtifactError(format!("{}: {e}", path.display())))
    }

    /// Parses artifact JSON.
    pub fn from_json(content: &str) -> Result<Self, String> {
        let artifact: HardhatArtifact = serde_json::from_str(content).map_err(|e| e.to_string())?;
        let bytecode = Bytes::from_str(artifact.bytecode.trim()).map_err(|e| format!("bad bytecode: {e}"))?;
        if bytecode.is_empty() {
            return Err("bytecode is empty; the contract may be abstract".to_string());
        }
        Ok(Self {
            contract_name: artifact.contract_name,
            bytecode,
        })
    }
}
