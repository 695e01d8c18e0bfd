use std::{io, path::PathBuf, time::Duration};

use ethers::types::{TxHash, U256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid rpc url '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("contract interface not found at {path}")]
    InterfaceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read contract interface at {path}")]
    InterfaceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed contract interface at {path}")]
    InterfaceParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("SMART_CONTRACT_ADDRESS is not set")]
    MissingContractAddress,

    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    #[error("contract method '{method}' failed: {reason}")]
    Call { method: &'static str, reason: String },

    #[error("transaction {tx_hash:?} was not confirmed within {timeout:?}")]
    ConfirmationTimeout { tx_hash: TxHash, timeout: Duration },

    #[error("provider request failed: {0}")]
    Provider(String),

    #[error("total supply {0} is too large to list")]
    SupplyOverflow(U256),
}

impl RegistryError {
    /// True when the error came from user input rather than the node.
    pub fn is_bad_input(&self) -> bool {
        matches!(self, RegistryError::InvalidAddress(_))
    }
}
