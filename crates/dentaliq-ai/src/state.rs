//! Shared application state for the HTTP server

use crate::backend::{AnthropicClient, ChatProvider};
use crate::config::ServiceConfig;
use crate::mock::MockReplyCycler;
use std::sync::Arc;

/// State shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only configuration snapshot taken at startup
    pub config: Arc<ServiceConfig>,
    /// Canned-reply source used in mock mode
    pub cycler: Arc<MockReplyCycler>,
    /// Live provider, consulted only when not in mock mode
    pub provider: Arc<dyn ChatProvider>,
}

impl AppState {
    /// Wire explicit components together.
    pub fn new(
        config: Arc<ServiceConfig>,
        cycler: Arc<MockReplyCycler>,
        provider: Arc<dyn ChatProvider>,
    ) -> Self {
        Self {
            config,
            cycler,
            provider,
        }
    }

    /// Build the production state: the default canned replies and an
    /// [`AnthropicClient`] configured from `config`.
    pub fn from_config(config: ServiceConfig) -> Result<Self, reqwest::Error> {
        let provider = AnthropicClient::new(&config)?;
        Ok(Self::new(
            Arc::new(config),
            Arc::new(MockReplyCycler::default()),
            Arc::new(provider),
        ))
    }

    pub fn mock_mode(&self) -> bool {
        self.config.mock_mode()
    }
}
