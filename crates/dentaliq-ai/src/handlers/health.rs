//! Liveness endpoint
//!
//! GET /health - reports the operating mode and configured model

use axum::{Json, extract::State};
use std::sync::Arc;

use crate::state::AppState;
use crate::types::HealthResponse;

/// GET /health - liveness probe
///
/// Always returns 200 OK while the process is alive.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        mock_mode: state.mock_mode(),
        model: state.config.model.clone(),
    })
}

/// Build the health router sub-tree
pub fn health_router() -> axum::Router<Arc<AppState>> {
    use axum::routing::get;
    axum::Router::new().route("/health", get(health))
}
