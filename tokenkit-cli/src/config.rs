//! Network profiles and the environment-variable surface
//!
//! Configuration is resolved in priority order:
//!
//! 1. Environment variables (after loading `.env` with `dotenvy`)
//! 2. Per-network overrides from `tokenkit.json` in the working directory
//! 3. Built-in profiles: `sepolia`, `sepolia-fork`, `localhost`
//!
//! ```rust,no_run
//! use tokenkit_cli::config::Settings;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load("localhost")?;
//! println!("RPC URL: {}", settings.profile.rpc_url);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokenkit_error::TokenkitError;
use tokenkit_ethereum::{EthereumAmount, GasSettings};

/// File with per-network overrides, looked up in the working directory
pub const CONFIG_FILE: &str = "tokenkit.json";

/// Network used when `--network` is not given
pub const DEFAULT_NETWORK: &str = "localhost";

/// Sepolia chain id
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Chain id of Hardhat and Anvil development nodes
pub const LOCAL_CHAIN_ID: u64 = 31_337;

/// Endpoint of a node running on this machine
pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";

/// Minimum native balance for a deployment, in ETH
pub const DEFAULT_MIN_DEPLOY_BALANCE: &str = "0.01";

/// Request timeout when the profile does not set one
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unknown network '{0}'. Known networks: sepolia, sepolia-fork, localhost, or any defined in tokenkit.json")]
    UnknownNetwork(String),

    #[error("Missing required setting for network '{network}': {name}")]
    MissingSetting { network: String, name: String },

    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

impl From<ConfigError> for TokenkitError {
    fn from(err: ConfigError) -> Self {
        TokenkitError::Config(err.to_string())
    }
}

// ============================================================================
// Network Profiles
// ============================================================================

/// A named network the tools can run against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Profile name as passed to `--network`
    pub name: String,
    /// JSON-RPC endpoint
    pub rpc_url: String,
    /// Chain id the endpoint must report, if known
    pub chain_id: Option<u64>,
    /// Environment variable holding the signing key
    pub accounts_env: Option<String>,
    /// Whether the node exposes pre-funded development accounts
    pub dev_accounts: bool,
    /// Fixed gas limit for transactions
    pub gas_limit: Option<u64>,
    /// Fixed gas price in wei
    pub gas_price_wei: Option<u128>,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Native balance a deployment requires, in ETH
    pub min_deploy_balance: String,
    /// Block explorer base URL
    pub explorer_url: Option<String>,
}

impl NetworkProfile {
    /// Remote Sepolia test network. The endpoint comes from `SEPOLIA_RPC_URL`.
    pub fn sepolia(rpc_url: Option<String>) -> Self {
        Self {
            name: "sepolia".to_string(),
            rpc_url: rpc_url.unwrap_or_default(),
            chain_id: Some(SEPOLIA_CHAIN_ID),
            accounts_env: Some("SEPOLIA_PRIVATE_KEY".to_string()),
            dev_accounts: false,
            gas_limit: None,
            gas_price_wei: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            min_deploy_balance: DEFAULT_MIN_DEPLOY_BALANCE.to_string(),
            explorer_url: Some("https://sepolia.etherscan.io".to_string()),
        }
    }

    /// Local node forked from Sepolia
    pub fn sepolia_fork() -> Self {
        Self {
            name: "sepolia-fork".to_string(),
            rpc_url: LOCAL_RPC_URL.to_string(),
            chain_id: Some(SEPOLIA_CHAIN_ID),
            accounts_env: None,
            dev_accounts: true,
            gas_limit: None,
            gas_price_wei: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            min_deploy_balance: DEFAULT_MIN_DEPLOY_BALANCE.to_string(),
            explorer_url: None,
        }
    }

    /// Local development node
    pub fn localhost() -> Self {
        Self {
            name: "localhost".to_string(),
            rpc_url: LOCAL_RPC_URL.to_string(),
            chain_id: Some(LOCAL_CHAIN_ID),
            accounts_env: None,
            dev_accounts: true,
            gas_limit: Some(5_000_000),
            gas_price_wei: Some(8_000_000_000),
            timeout_ms: 60_000,
            min_deploy_balance: DEFAULT_MIN_DEPLOY_BALANCE.to_string(),
            explorer_url: None,
        }
    }

    /// Built-in profile called `name`
    pub fn builtin(name: &str, env: &Lookup<'_>) -> Option<Self> {
        match name {
            "sepolia" => Some(Self::sepolia(env.get("SEPOLIA_RPC_URL"))),
            "sepolia-fork" => Some(Self::sepolia_fork()),
            "localhost" => Some(Self::localhost()),
            _ => None,
        }
    }

    /// Gas overrides for submitted transactions
    pub fn gas_settings(&self) -> GasSettings {
        GasSettings {
            gas_limit: self.gas_limit,
            gas_price: self.gas_price_wei,
        }
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Minimum native balance for a deployment
    pub fn min_deploy_balance(&self) -> Result<EthereumAmount, ConfigError> {
        EthereumAmount::parse_ether(&self.min_deploy_balance).map_err(|e| ConfigError::InvalidValue {
            name: "min_deploy_balance".to_string(),
            reason: e.to_string(),
        })
    }

    /// Checks that the profile is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc_url.trim().is_empty() {
            let name = if self.name == "sepolia" { "SEPOLIA_RPC_URL" } else { "rpc_url" };
            return Err(ConfigError::MissingSetting {
                network: self.name.clone(),
                name: name.to_string(),
            });
        }
        validate_rpc_url(&self.rpc_url)?;
        self.min_deploy_balance()?;
        Ok(())
    }

    fn apply(&mut self, overrides: &ProfileOverride) {
        if let Some(url) = &overrides.rpc_url {
            self.rpc_url = url.clone();
        }
        if overrides.chain_id.is_some() {
            self.chain_id = overrides.chain_id;
        }
        if overrides.accounts_env.is_some() {
            self.accounts_env = overrides.accounts_env.clone();
        }
        if let Some(dev_accounts) = overrides.dev_accounts {
            self.dev_accounts = dev_accounts;
        }
        if overrides.gas_limit.is_some() {
            self.gas_limit = overrides.gas_limit;
        }
        if overrides.gas_price_wei.is_some() {
            self.gas_price_wei = overrides.gas_price_wei;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(min) = &overrides.min_deploy_balance {
            self.min_deploy_balance = min.clone();
        }
        if overrides.explorer_url.is_some() {
            self.explorer_url = overrides.explorer_url.clone();
        }
    }
}

fn validate_rpc_url(rpc_url: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(rpc_url).map_err(|e| ConfigError::InvalidRpcUrl {
        url: rpc_url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidRpcUrl {
            url: rpc_url.to_string(),
            reason: format!("unsupported scheme '{other}', expected http or https"),
        }),
    }
}

// ============================================================================
// tokenkit.json
// ============================================================================

/// Partial profile read from `tokenkit.json`. Unset fields keep the built-in value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts_env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_accounts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price_wei: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_deploy_balance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
}

/// Contents of `tokenkit.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Overrides keyed by network name; unknown names define new networks
    #[serde(default)]
    pub networks: BTreeMap<String, ProfileOverride>,
}

impl ConfigFile {
    /// Reads `path`; a missing file yields an empty configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the configuration as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves the profile called `name`.
    pub fn resolve(&self, name: &str, env: &Lookup<'_>) -> Result<NetworkProfile, ConfigError> {
        let overrides = self.networks.get(name);
        let mut profile = match (NetworkProfile::builtin(name, env), overrides) {
            (Some(profile), _) => profile,
            (None, Some(custom)) => NetworkProfile {
                name: name.to_string(),
                rpc_url: String::new(),
                chain_id: None,
                accounts_env: None,
                dev_accounts: false,
                gas_limit: None,
                gas_price_wei: None,
                timeout_ms: DEFAULT_TIMEOUT_MS,
                min_deploy_balance: DEFAULT_MIN_DEPLOY_BALANCE.to_string(),
                explorer_url: custom.explorer_url.clone(),
            },
            (None, None) => return Err(ConfigError::UnknownNetwork(name.to_string())),
        };
        if let Some(overrides) = overrides {
            profile.apply(overrides);
        }
        profile.validate()?;
        Ok(profile)
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Variable lookup that treats empty values as unset.
pub struct Lookup<'a> {
    inner: Box<dyn Fn(&str) -> Option<String> + 'a>,
}

impl<'a> Lookup<'a> {
    /// Wraps `lookup`.
    pub fn new(lookup: impl Fn(&str) -> Option<String> + 'a) -> Self {
        Self {
            inner: Box::new(lookup),
        }
    }

    /// The process environment
    pub fn process() -> Lookup<'static> {
        Lookup::new(|name| std::env::var(name).ok())
    }

    /// Fixed values, for tests and embedding
    pub fn from_pairs(pairs: &'a [(&'a str, &'a str)]) -> Self {
        Lookup::new(move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        })
    }

    /// Trimmed value of `name`, if set and not blank
    pub fn get(&self, name: &str) -> Option<String> {
        (self.inner)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Every variable the tools read, captured once at start-up.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ToolEnv {
    /// Signing key from the profile's `accounts_env` variable
    pub private_key: Option<String>,
    /// Contract-verification service key
    pub etherscan_api_key: Option<String>,
    /// Address to inspect
    pub address: Option<String>,
    /// Token contract address
    pub token_address: Option<String>,
    /// Transfer recipient, or initial holder for a deployment
    pub recipient_address: Option<String>,
    /// Transfer amount in whole tokens
    pub amount: Option<String>,
    /// Deployment override: token name
    pub token_name: Option<String>,
    /// Deployment override: token symbol
    pub token_symbol: Option<String>,
    /// Deployment override: token decimals
    pub token_decimals: Option<String>,
    /// Deployment override: initial supply in whole tokens
    pub initial_supply: Option<String>,
    /// Directory the deployment record is written to
    pub deployments_dir: Option<String>,
    /// Path of the compiled contract artifact
    pub artifact_path: Option<String>,
}

impl fmt::Debug for ToolEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolEnv")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("etherscan_api_key", &self.etherscan_api_key.as_ref().map(|_| "<redacted>"))
            .field("address", &self.address)
            .field("token_address", &self.token_address)
            .field("recipient_address", &self.recipient_address)
            .field("amount", &self.amount)
            .field("token_name", &self.token_name)
            .field("token_symbol", &self.token_symbol)
            .field("token_decimals", &self.token_decimals)
            .field("initial_supply", &self.initial_supply)
            .field("deployments_dir", &self.deployments_dir)
            .field("artifact_path", &self.artifact_path)
            .finish()
    }
}

impl ToolEnv {
    /// Reads the variables for `profile` through `env`.
    pub fn read(profile: &NetworkProfile, env: &Lookup<'_>) -> Self {
        Self {
            private_key: profile.accounts_env.as_deref().and_then(|name| env.get(name)),
            etherscan_api_key: env.get("ETHERSCAN_API_KEY"),
            address: env.get("ADDRESS"),
            token_address: env.get("TOKEN_ADDRESS"),
            recipient_address: env.get("RECIPIENT_ADDRESS"),
            amount: env.get("AMOUNT"),
            token_name: env.get("TOKEN_NAME"),
            token_symbol: env.get("TOKEN_SYMBOL"),
            token_decimals: env.get("TOKEN_DECIMALS"),
            initial_supply: env.get("INITIAL_SUPPLY"),
            deployments_dir: env.get("DEPLOYMENTS_DIR"),
            artifact_path: env.get("ARTIFACT_PATH"),
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// A resolved profile plus the environment it was resolved against.
#[derive(Debug, Clone)]
pub struct Settings {
    pub profile: NetworkProfile,
    pub env: ToolEnv,
}

impl Settings {
    /// Loads `.env`, `tokenkit.json` and the process environment for `network`.
    pub fn load(network: &str) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
        }
        let file = ConfigFile::load(CONFIG_FILE)?;
        Self::resolve(network, &file, &Lookup::process())
    }

    /// Resolves `network` from explicit sources.
    pub fn resolve(network: &str, file: &ConfigFile, env: &Lookup<'_>) -> Result<Self, ConfigError> {
        let profile = file.resolve(network, env)?;
        let env = ToolEnv::read(&profile, env);
        tracing::debug!(network = %profile.name, rpc_url = %profile.rpc_url, "network resolved");
        Ok(Self { profile, env })
    }

    /// Directory the deployment record goes to
    pub fn deployments_dir(&self) -> PathBuf {
        self.env
            .deployments_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> Lookup<'static> {
        Lookup::new(|_| None)
    }

    #[test]
    fn test_localhost_profile() {
        let profile = ConfigFile::default().resolve("localhost", &no_env()).unwrap();
        assert_eq!(profile.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(profile.chain_id, Some(31337));
        assert_eq!(profile.timeout(), Duration::from_secs(60));
        assert_eq!(profile.gas_settings().gas_limit, Some(5_000_000));
        assert_eq!(profile.gas_settings().gas_price, Some(8_000_000_000));
        assert!(profile.dev_accounts);
    }

    #[test]
    fn test_sepolia_requires_rpc_url() {
        let err = ConfigFile::default().resolve("sepolia", &no_env()).unwrap_err();
        assert!(err.to_string().contains("SEPOLIA_RPC_URL"));

        let pairs = [("SEPOLIA_RPC_URL", "https://sepolia.infura.io/v3/abc")];
        let profile = ConfigFile::default()
            .resolve("sepolia", &Lookup::from_pairs(&pairs))
            .unwrap();
        assert_eq!(profile.chain_id, Some(SEPOLIA_CHAIN_ID));
        assert!(!profile.dev_accounts);
    }

    #[test]
    fn test_sepolia_fork_profile() {
        let profile = ConfigFile::default().resolve("sepolia-fork", &no_env()).unwrap();
        assert_eq!(profile.chain_id, Some(SEPOLIA_CHAIN_ID));
        assert_eq!(profile.rpc_url, LOCAL_RPC_URL);
    }

    #[test]
    fn test_unknown_network() {
        let err = ConfigFile::default().resolve("mainnet", &no_env()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNetwork(_)));
    }

    #[test]
    fn test_file_overrides_builtin() {
        let mut file = ConfigFile::default();
        file.networks.insert(
            "localhost".to_string(),
            ProfileOverride {
                rpc_url: Some("http://127.0.0.1:9545".to_string()),
                gas_price_wei: Some(1),
                ..ProfileOverride::default()
            },
        );
        let profile = file.resolve("localhost", &no_env()).unwrap();
        assert_eq!(profile.rpc_url, "http://127.0.0.1:9545");
        assert_eq!(profile.gas_price_wei, Some(1));
        assert_eq!(profile.gas_limit, Some(5_000_000));
    }

    #[test]
    fn test_file_defines_custom_network() {
        let json = r#"{ "networks": { "holesky": { "rpc_url": "https://rpc.holesky.example", "chain_id": 17000 } } }"#;
        let file: ConfigFile = serde_json::from_str(json).unwrap();
        let profile = file.resolve("holesky", &no_env()).unwrap();
        assert_eq!(profile.chain_id, Some(17000));
        assert!(!profile.dev_accounts);
    }

    #[test]
    fn test_rejects_bad_rpc_url() {
        let mut file = ConfigFile::default();
        file.networks.insert(
            "localhost".to_string(),
            ProfileOverride {
                rpc_url: Some("ws://127.0.0.1:8545".to_string()),
                ..ProfileOverride::default()
            },
        );
        assert!(matches!(
            file.resolve("localhost", &no_env()),
            Err(ConfigError::InvalidRpcUrl { .. })
        ));
    }

    #[test]
    fn test_config_file_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        assert_eq!(ConfigFile::load(&path).unwrap(), ConfigFile::default());

        let mut file = ConfigFile::default();
        file.networks.insert(
            "sepolia".to_string(),
            ProfileOverride {
                timeout_ms: Some(90_000),
                ..ProfileOverride::default()
            },
        );
        file.save(&path).unwrap();
        assert_eq!(ConfigFile::load(&path).unwrap(), file);
    }

    #[test]
    fn test_tool_env_treats_blank_as_unset() {
        let pairs = [
            ("SEPOLIA_PRIVATE_KEY", "0xabc"),
            ("ADDRESS", "   "),
            ("AMOUNT", " 25 "),
        ];
        let env = Lookup::from_pairs(&pairs);
        let sepolia = NetworkProfile::sepolia(Some("https://rpc.sepolia.org".into()));
        let tool_env = ToolEnv::read(&sepolia, &env);
        assert_eq!(tool_env.private_key.as_deref(), Some("0xabc"));
        assert_eq!(tool_env.address, None);
        assert_eq!(tool_env.amount.as_deref(), Some("25"));

        let local = ToolEnv::read(&NetworkProfile::localhost(), &env);
        assert_eq!(local.private_key, None);
    }

    #[test]
    fn test_debug_redacts_keys() {
        let env = ToolEnv {
            private_key: Some("0xsecret".into()),
            ..ToolEnv::default()
        };
        assert!(!format!("{env:?}").contains("secret"));
    }
}
