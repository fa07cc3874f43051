//! DentalIQ AI service — entry point.
//!
//! Loads `.env` if present, reads [`ServiceConfig`] from the environment and
//! starts the axum HTTP service. Invalid configuration aborts startup.

use anyhow::Context;
use dentaliq_ai::config::ServiceConfig;
use dentaliq_ai::server::AiServer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dentaliq_ai=info".parse()?))
        .init();

    let config = ServiceConfig::from_env().context("failed to load configuration")?;

    let timeout_ms = u64::try_from(config.timeout.as_millis()).unwrap_or(u64::MAX);
    info!(
        model = %config.model,
        max_tokens = config.max_tokens,
        timeout_ms,
        mock_mode = config.mock_mode(),
        "DentalIQ AI service configuration loaded"
    );

    AiServer::from_config(config)
        .context("failed to build provider client")?
        .start()
        .await
        .context("server error")?;

    Ok(())
}
