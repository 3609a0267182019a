//! API error taxonomy
//!
//! Client errors answer 400 before any upstream call; upstream failures
//! answer 500 with no retry and no partial result. Degenerate statistics
//! (empty window, zero variance) are not errors here: they ride along as
//! NaN in the payload and serialize as null.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced by the API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed query parameters
    #[error("Invalid request parameters")]
    InvalidParams,
    /// Upstream fetch failed while serving the average-price endpoint
    #[error("Failed to fetch stock data")]
    UpstreamFetch(anyhow::Error),
    /// Upstream fetch failed while serving the correlation endpoint
    #[error("Failed to calculate correlation")]
    CorrelationFailed(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidParams => StatusCode::BAD_REQUEST,
            ApiError::UpstreamFetch(_) | ApiError::CorrelationFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        match &self {
            ApiError::InvalidParams => warn!("rejected request: {}", self),
            ApiError::UpstreamFetch(cause) | ApiError::CorrelationFailed(cause) => {
                error!(cause = ?cause, "{}", self);
            }
        }

        let body = json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}
