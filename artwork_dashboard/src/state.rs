//! Application context, built once at startup and handed to every handler.

use std::sync::Arc;

use anyhow::Context;
use artwork_registry::{
    connector::{self, probe_liveness, ConnectionStatus, HttpProvider},
    contracts::ContractCache,
    ArtworkRegistry,
};
use async_trait::async_trait;
use ethers::{providers::Middleware, types::Address};
use tracing::warn;

use crate::{config::DashboardConfig, status::StatusPanel};

/// Liveness check against the node, behind `/health`.
#[async_trait]
pub trait NodeProbe: Send + Sync {
    async fn probe(&self) -> ConnectionStatus;
}

#[async_trait]
impl<M> NodeProbe for M
where
    M: Middleware + 'static,
{
    async fn probe(&self) -> ConnectionStatus {
        probe_liveness(self).await
    }
}

pub struct AppContext {
    pub registry: Arc<dyn ArtworkRegistry>,
    pub contract_address: Address,
    pub node: Arc<dyn NodeProbe>,
    /// Snapshot of the node's accounts, taken once at startup.
    pub accounts: Vec<Address>,
    pub status: StatusPanel,
}

/// Connect to the node, snapshot its accounts and load the contract through
/// `cache`. A contract that cannot be loaded is an error, so no context exists
/// for the router to serve.
pub async fn build_context(
    config: &DashboardConfig,
    cache: &ContractCache<HttpProvider>,
    status: StatusPanel,
) -> anyhow::Result<Arc<AppContext>> {
    let connection = connector::connect(&config.registry).await?;
    status.push(connection.status.status_line()).await;

    let accounts = match connector::known_accounts(connection.provider.as_ref()).await {
        Ok(accounts) => accounts,
        Err(e) => {
            warn!(error = %e, "could not list node accounts");
            status.push("Fetching node accounts failed").await;
            Vec::new()
        }
    };

    let contract = cache
        .get_or_load(&config.registry, connection.provider.clone())
        .context("loading artwork registry contract")?;

    Ok(Arc::new(AppContext {
        contract_address: contract.address(),
        registry: contract,
        node: connection.provider,
        accounts,
        status,
    }))
}
