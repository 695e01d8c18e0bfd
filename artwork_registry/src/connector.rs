use std::sync::Arc;

use ethers::{
    providers::{Http, Middleware, Provider},
    types::Address,
};
use tracing::{info, warn};
use url::Url;

use crate::{config::RegistryConfig, RegistryError};

pub type HttpProvider = Provider<Http>;

/// Outcome of the startup liveness probe.
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionStatus {
    Connected { client_version: String },
    Failed { reason: String },
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected { .. })
    }

    pub fn status_line(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected { .. } => "Connected to Web3 Provider",
            ConnectionStatus::Failed { .. } => "Connected to Web3 Provider failed",
        }
    }
}

pub struct ChainConnection {
    pub provider: Arc<HttpProvider>,
    pub status: ConnectionStatus,
}

/// Open an http client for the configured node and probe it once.
///
/// Only an unparseable url is an error. An unreachable node still yields a
/// provider, which will fail on first real use.
pub async fn connect(config: &RegistryConfig) -> Result<ChainConnection, RegistryError> {
    let url = Url::parse(&config.rpc_url).map_err(|e| RegistryError::InvalidRpcUrl {
        url: config.rpc_url.clone(),
        reason: e.to_string(),
    })?;

    let provider = Provider::new(Http::new(url)).interval(config.poll_interval);
    let status = probe_liveness(&provider).await;

    Ok(ChainConnection {
        provider: Arc::new(provider),
        status,
    })
}

pub async fn probe_liveness<M: Middleware>(client: &M) -> ConnectionStatus {
    let status = match client.client_version().await {
        Ok(client_version) => ConnectionStatus::Connected { client_version },
        Err(e) => ConnectionStatus::Failed {
            reason: e.to_string(),
        },
    };

    match &status {
        ConnectionStatus::Connected { client_version } => {
            info!(%client_version, "{}", status.status_line())
        }
        ConnectionStatus::Failed { reason } => warn!(%reason, "{}", status.status_line()),
    }
    status
}

/// Accounts the node manages (and can send transactions from).
pub async fn known_accounts<M: Middleware>(client: &M) -> Result<Vec<Address>, RegistryError> {
    client
        .get_accounts()
        .await
        .map_err(|e| RegistryError::Provider(e.to_string()))
}
