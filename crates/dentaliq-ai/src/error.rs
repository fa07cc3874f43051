//! Service error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::backend::ProviderError;

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Upstream(#[from] ProviderError),
}

impl ServiceError {
    /// HTTP status, machine-readable code and caller-facing message.
    ///
    /// Upstream response bodies never appear in the message.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ServiceError::InvalidRequest(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_REQUEST",
                msg.clone(),
            ),
            ServiceError::Upstream(ProviderError::Status { status, .. }) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                format!("AI provider returned {status}"),
            ),
            ServiceError::Upstream(ProviderError::Timeout) => (
                StatusCode::GATEWAY_TIMEOUT,
                "UPSTREAM_TIMEOUT",
                "AI service timed out".to_string(),
            ),
            ServiceError::Upstream(ProviderError::Connectivity(_)) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNREACHABLE",
                "Failed to reach AI provider".to_string(),
            ),
            ServiceError::Upstream(ProviderError::InvalidResponse(_)) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_INVALID_RESPONSE",
                "AI provider returned an unreadable response".to_string(),
            ),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
