//! `dentaliq-ai` — DentalIQ AI service.
//!
//! A single-endpoint HTTP relay: `POST /generate` validates a patient chat
//! message, builds a dental-assistant prompt and forwards it to the
//! Anthropic Messages API. When no usable credential is configured the
//! service runs in mock mode and cycles through canned replies instead.
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | [`config::ServiceConfig`], read once at startup |
//! | [`mock`] | [`mock::MockReplyCycler`] for offline replies |
//! | [`prompt`] | System prompt and bounded message history |
//! | [`backend`] | [`backend::ChatProvider`] and [`backend::AnthropicClient`] |
//! | [`handlers`] | `/health` and `/generate` |
//! | [`server`] | Router assembly and listener lifecycle |
//!
//! # Quick start
//!
//! ```rust,no_run
//! use dentaliq_ai::config::ServiceConfig;
//! use dentaliq_ai::server::AiServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServiceConfig::from_env()?;
//!     AiServer::from_config(config)?.start().await?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mock;
pub mod prompt;
pub mod server;
pub mod state;
pub mod types;
