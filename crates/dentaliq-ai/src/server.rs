//! Axum-based HTTP server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Liveness check with mode and model. |
//! | `POST` | `/generate` | Generate one assistant reply. |

use crate::config::ServiceConfig;
use crate::handlers::{generate_router, health_router};
use crate::state::AppState;
use axum::{Router, http::Method};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the axum [`Router`] for `state`, with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .merge(health_router())
        .merge(generate_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Listener lifecycle around [`build_router`].
pub struct AiServer {
    state: AppState,
}

impl AiServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Build the production server from configuration.
    pub fn from_config(config: ServiceConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(AppState::from_config(config)?))
    }

    /// `MOCK` or `LIVE (<model>)`, as logged at startup.
    pub fn mode_label(&self) -> String {
        if self.state.mock_mode() {
            "MOCK".to_string()
        } else {
            format!("LIVE ({})", self.state.config.model)
        }
    }

    /// Bind to the configured address and serve until Ctrl-C or SIGTERM.
    pub async fn start(self) -> std::io::Result<()> {
        let addr = self.state.config.bind_addr();
        info!(addr = %addr, mode = %self.mode_label(), "DentalIQ AI service starting");

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, build_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("DentalIQ AI service shutting down");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_label_reflects_credential() {
        let mock = AiServer::from_config(ServiceConfig::new("")).unwrap();
        assert_eq!(mock.mode_label(), "MOCK");

        let live = AiServer::from_config(ServiceConfig::new("sk-ant-live").with_model("claude-x"))
            .unwrap();
        assert_eq!(live.mode_label(), "LIVE (claude-x)");
    }
}
