//! Provider backends.
//!
//! The request handler talks to the LLM provider through [`ChatProvider`];
//! [`AnthropicClient`] is the production implementation.

mod anthropic;

pub use anthropic::AnthropicClient;

use crate::prompt::ProviderMessage;
use async_trait::async_trait;
use thiserror::Error;

/// Failure outcomes of a single provider call. Success is the reply text.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-200 status.
    #[error("provider returned status {status}")]
    Status { status: u16, body: String },

    /// The call did not finish within the configured timeout.
    #[error("provider request timed out")]
    Timeout,

    /// DNS, connect, TLS or other transport failure.
    #[error("provider unreachable: {0}")]
    Connectivity(String),

    /// A 200 response whose body carried no text block.
    #[error("provider response could not be read: {0}")]
    InvalidResponse(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// One-shot chat generation against an LLM provider.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Model id the provider is configured with.
    fn model(&self) -> &str;

    /// Generate one reply. Implementations make at most one upstream attempt.
    async fn generate(&self, system: &str, messages: &[ProviderMessage]) -> ProviderResult<String>;
}
