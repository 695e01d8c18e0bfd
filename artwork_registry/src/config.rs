use std::{path::PathBuf, str::FromStr, time::Duration};

use tracing::warn;

pub const RPC_URL_ENV_VAR: &str = "WEB3_PROVIDER_URI";
pub const CONTRACT_ADDRESS_ENV_VAR: &str = "SMART_CONTRACT_ADDRESS";
pub const ABI_PATH_ENV_VAR: &str = "ARTWORK_ABI_PATH";
pub const GAS_LIMIT_ENV_VAR: &str = "REGISTER_GAS_LIMIT";
pub const CONFIRMATION_TIMEOUT_ENV_VAR: &str = "TX_CONFIRMATION_TIMEOUT_SECS";
pub const POLL_INTERVAL_ENV_VAR: &str = "TX_POLL_INTERVAL_MS";

pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";
pub const DEFAULT_ABI_PATH: &str = "./contracts/compiled/artwork_abi.json";
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

#[derive(Clone, Debug, PartialEq)]
pub struct RegistryConfig {
    pub rpc_url: String,
    /// Kept optional here: a missing address only matters once the contract is loaded.
    pub contract_address: Option<String>,
    pub abi_path: PathBuf,
    pub gas_limit: u64,
    pub confirmation_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            contract_address: None,
            abi_path: PathBuf::from(DEFAULT_ABI_PATH),
            gas_limit: DEFAULT_GAS_LIMIT,
            confirmation_timeout: Duration::from_secs(DEFAULT_CONFIRMATION_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl RegistryConfig {
    /// load from the process env, falling back to local defaults per variable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            rpc_url: non_empty(RPC_URL_ENV_VAR).unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            contract_address: non_empty(CONTRACT_ADDRESS_ENV_VAR),
            abi_path: non_empty(ABI_PATH_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ABI_PATH)),
            gas_limit: parse_or_default(
                GAS_LIMIT_ENV_VAR,
                non_empty(GAS_LIMIT_ENV_VAR),
                DEFAULT_GAS_LIMIT,
            ),
            confirmation_timeout: Duration::from_secs(parse_or_default(
                CONFIRMATION_TIMEOUT_ENV_VAR,
                non_empty(CONFIRMATION_TIMEOUT_ENV_VAR),
                DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            )),
            poll_interval: Duration::from_millis(parse_or_default(
                POLL_INTERVAL_ENV_VAR,
                non_empty(POLL_INTERVAL_ENV_VAR),
                DEFAULT_POLL_INTERVAL_MS,
            )),
        }
    }
}

fn parse_or_default<T: FromStr>(key: &str, value: Option<String>, default: T) -> T {
    let Some(value) = value else {
        return default;
    };
    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(key, value = %value, "ignoring malformed config value, using default");
            default
        }
    }
}
