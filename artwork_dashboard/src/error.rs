use artwork_registry::RegistryError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::render;

/// Ends the current interaction with an error page. The server keeps running.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("invalid token id '{0}'")]
    InvalidTokenId(String),
}

impl DashboardError {
    fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Registry(e) if e.is_bad_input() => StatusCode::BAD_REQUEST,
            DashboardError::Registry(_) => StatusCode::BAD_GATEWAY,
            DashboardError::InvalidTokenId(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        error!(error = %self, %status, "request failed");
        (status, Html(render::error_page(&self.to_string()))).into_response()
    }
}
