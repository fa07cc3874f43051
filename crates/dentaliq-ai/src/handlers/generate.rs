//! Reply generation endpoint
//!
//! POST /generate - validate the request, then answer from the mock cycler
//! or from the live provider

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;
use tracing::{error, info};

use crate::backend::ProviderError;
use crate::error::{ServiceError, ServiceResult};
use crate::mock::MOCK_MODEL;
use crate::prompt::{build_messages, build_system_prompt};
use crate::state::AppState;
use crate::types::{GenerateRequest, GenerateResponse};

/// POST /generate
///
/// Invalid bodies are rejected before any provider call is made. Provider
/// failures map to 502 or 504 without exposing the upstream body.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ServiceResult<Json<GenerateResponse>> {
    let Json(req) = payload.map_err(|rejection| ServiceError::InvalidRequest(rejection.body_text()))?;
    req.validate()?;

    let preview = req.message_preview();

    if state.mock_mode() {
        let reply = state.cycler.next_reply().to_string();
        info!(message = %preview, "[MOCK] responding");
        return Ok(Json(GenerateResponse {
            reply,
            model: MOCK_MODEL.to_string(),
            mock: true,
        }));
    }

    let system_prompt = build_system_prompt(req.patient_context.as_deref());
    let messages = build_messages(&req.history, &req.message);

    let start = std::time::Instant::now();
    match state.provider.generate(&system_prompt, &messages).await {
        Ok(reply) => {
            let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            info!(
                message = %preview,
                reply_chars = reply.chars().count(),
                duration_ms,
                "generated reply"
            );
            Ok(Json(GenerateResponse {
                reply,
                model: state.provider.model().to_string(),
                mock: false,
            }))
        }
        Err(err) => {
            log_provider_failure(&err, &preview);
            Err(err.into())
        }
    }
}

fn log_provider_failure(err: &ProviderError, preview: &str) {
    match err {
        ProviderError::Status { status, body } => {
            error!(status = *status, body = %body, message = %preview, "provider returned an error status");
        }
        ProviderError::Timeout => {
            error!(message = %preview, "provider request timed out");
        }
        ProviderError::Connectivity(detail) => {
            error!(error = %detail, message = %preview, "network error calling provider");
        }
        ProviderError::InvalidResponse(detail) => {
            error!(error = %detail, message = %preview, "provider response could not be parsed");
        }
    }
}

/// Build the generate router sub-tree
pub fn generate_router() -> axum::Router<Arc<AppState>> {
    use axum::routing::post;
    axum::Router::new().route("/generate", post(generate))
}
