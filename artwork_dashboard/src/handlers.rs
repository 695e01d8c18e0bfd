//! One handler per form. Each submission is an independent request/response cycle.

use std::sync::Arc;

use artwork_registry::{
    connector::ConnectionStatus, queries, types::RegistrationReport, utils::parse_address,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Form, Json,
};
use ethers::types::U256;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::DashboardError,
    render::{self, OwnerQuery, PageView, Submission},
    state::AppContext,
};

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub owner: String,
    #[serde(default)]
    pub artwork_uri: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub token_id: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub contract_address: String,
    pub accounts: usize,
}

pub async fn index(State(ctx): State<Arc<AppContext>>) -> Html<String> {
    render_page(&ctx, Submission::default()).await
}

pub async fn register(
    State(ctx): State<Arc<AppContext>>,
    Form(form): Form<RegisterForm>,
) -> Result<Html<String>, DashboardError> {
    let owner = parse_address(&form.owner)?;
    info!(?owner, artwork_uri = %form.artwork_uri, "registering artwork");

    let report = queries::register(ctx.registry.as_ref(), owner, &form.artwork_uri).await;
    if let RegistrationReport::Registered { tx_hash } = &report {
        ctx.status
            .push(format!(
                "Artwork registered with Transaction Hash: {tx_hash:?}"
            ))
            .await;
    }

    let submission = Submission {
        register: Some(report),
        ..Default::default()
    };
    Ok(render_page(&ctx, submission).await)
}

pub async fn query(
    State(ctx): State<Arc<AppContext>>,
    Form(form): Form<QueryForm>,
) -> Result<Html<String>, DashboardError> {
    let owner = parse_address(&form.address)?;
    let tokens = queries::tokens_of_owner(ctx.registry.as_ref(), owner).await?;
    info!(?owner, count = tokens.len(), "fetched tokens for owner");

    let submission = Submission {
        query: Some(OwnerQuery {
            address: form.address,
            tokens,
        }),
        ..Default::default()
    };
    Ok(render_page(&ctx, submission).await)
}

pub async fn token(
    State(ctx): State<Arc<AppContext>>,
    Form(form): Form<TokenForm>,
) -> Result<Html<String>, DashboardError> {
    let token_id = U256::from_dec_str(form.token_id.trim())
        .map_err(|_| DashboardError::InvalidTokenId(form.token_id.clone()))?;
    let details = queries::token_details(ctx.registry.as_ref(), token_id).await?;

    let submission = Submission {
        token: Some(details),
        ..Default::default()
    };
    Ok(render_page(&ctx, submission).await)
}

pub async fn health(State(ctx): State<Arc<AppContext>>) -> impl IntoResponse {
    let (code, connected, client_version, error) = match ctx.node.probe().await {
        ConnectionStatus::Connected { client_version } => {
            (StatusCode::OK, true, Some(client_version), None)
        }
        ConnectionStatus::Failed { reason } => {
            (StatusCode::SERVICE_UNAVAILABLE, false, None, Some(reason))
        }
    };

    let body = HealthResponse {
        status: if connected { "ok" } else { "unavailable" },
        connected,
        client_version,
        error,
        contract_address: format!("{:?}", ctx.contract_address),
        accounts: ctx.accounts.len(),
    };
    (code, Json(body))
}

/// The inspector dropdown is re-read from `totalSupply` on every render.
async fn render_page(ctx: &AppContext, submission: Submission) -> Html<String> {
    let token_ids = queries::token_ids(ctx.registry.as_ref())
        .await
        .map_err(|e| {
            warn!(error = %e, "could not list tokens");
            e.to_string()
        });
    let status_lines = ctx.status.lines().await;

    Html(render::page(&PageView {
        accounts: &ctx.accounts,
        status_lines: &status_lines,
        token_ids,
        submission,
    }))
}
