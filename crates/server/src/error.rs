// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use outreach_stats_core::StatsError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Failure envelope: `{"success": false, "error": "..."}`.
#[derive(Debug, Serialize, ToSchema)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// API error types that map to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required parameter: {0}")]
    MissingParam(&'static str),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParam(_) => StatusCode::BAD_REQUEST,
            ApiError::Stats(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::Stats(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::MissingParam(name) => {
                tracing::warn!(param = %name, "Bad request");
                self.to_string()
            }
            ApiError::Stats(e) if e.is_validation() => {
                tracing::warn!(error = %e, "Bad request");
                e.to_string()
            }
            ApiError::Stats(e) => {
                tracing::error!(error = %e, "Failed to fetch statistics");
                e.to_string()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
