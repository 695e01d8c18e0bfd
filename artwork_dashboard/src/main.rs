mod config;
mod error;
mod handlers;
mod render;
mod router;
mod state;
mod status;

use artwork_registry::{connector::HttpProvider, contracts::ContractCache, env::load_env_file};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{config::DashboardConfig, state::build_context, status::StatusPanel};

static CONTRACT: ContractCache<HttpProvider> = ContractCache::new();

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let status = StatusPanel::default();

    let env_status = load_env_file();
    status.push(env_status.status_line()).await;

    let config = DashboardConfig::from_env();
    info!(rpc_url = %config.registry.rpc_url, "configuration loaded");

    // without a contract there is nothing to serve
    let ctx = build_context(&config, &CONTRACT, status).await?;
    let app = router::create(ctx);

    info!(address = %config.bind_address, "Listening");
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
