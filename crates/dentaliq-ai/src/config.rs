//! Service configuration.
//!
//! [`ServiceConfig`] is read once at process start and shared read-only with
//! every component that needs it.
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ANTHROPIC_API_KEY` | *(empty)* | Provider credential. Empty or `sk-demo*` selects mock mode. |
//! | `AI_MODEL` | `claude-sonnet-4-20250514` | Model id sent to the provider. |
//! | `AI_MAX_TOKENS` | `800` | Maximum output tokens per reply. |
//! | `AI_TIMEOUT_SECONDS` | `20` | Hard timeout for one provider call. |
//! | `ANTHROPIC_BASE_URL` | `https://api.anthropic.com` | Provider base URL. |
//! | `ANTHROPIC_VERSION` | `2023-06-01` | `anthropic-version` header value. |
//! | `AI_SERVICE_HOST` | `0.0.0.0` | Address to bind. |
//! | `AI_SERVICE_PORT` | `8000` | TCP port to listen on. |
//!
//! Variables that are set but cannot be parsed are rejected rather than
//! replaced by their default.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 800;
pub const DEFAULT_TIMEOUT_SECS: f64 = 20.0;
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Credentials starting with this prefix are placeholders and never reach the provider.
pub const DEMO_KEY_PREFIX: &str = "sk-demo";

/// Startup configuration errors. Any of these prevents the server from binding.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Process-wide configuration snapshot.
#[derive(Clone)]
pub struct ServiceConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub base_url: String,
    pub api_version: String,
    pub host: String,
    pub port: u16,
    mock_mode: bool,
}

impl ServiceConfig {
    /// Build a config from a credential, taking defaults for everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            mock_mode: is_mock_key(&api_key),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::new(lookup("ANTHROPIC_API_KEY").unwrap_or_default());

        if let Some(model) = lookup("AI_MODEL") {
            cfg.model = model;
        }
        if let Some(raw) = lookup("AI_MAX_TOKENS") {
            let tokens: u32 = parse_var("AI_MAX_TOKENS", &raw)?;
            if tokens == 0 {
                return Err(invalid("AI_MAX_TOKENS", &raw, "must be greater than zero"));
            }
            cfg.max_tokens = tokens;
        }
        if let Some(raw) = lookup("AI_TIMEOUT_SECONDS") {
            let secs: f64 = parse_var("AI_TIMEOUT_SECONDS", &raw)?;
            if !secs.is_finite() || secs <= 0.0 {
                return Err(invalid(
                    "AI_TIMEOUT_SECONDS",
                    &raw,
                    "must be a finite number greater than zero",
                ));
            }
            cfg.timeout = Duration::try_from_secs_f64(secs)
                .map_err(|e| invalid("AI_TIMEOUT_SECONDS", &raw, &e.to_string()))?;
        }
        if let Some(base_url) = lookup("ANTHROPIC_BASE_URL") {
            cfg.base_url = base_url;
        }
        if let Some(version) = lookup("ANTHROPIC_VERSION") {
            cfg.api_version = version;
        }
        if let Some(host) = lookup("AI_SERVICE_HOST") {
            cfg.host = host;
        }
        if let Some(raw) = lookup("AI_SERVICE_PORT") {
            cfg.port = parse_var("AI_SERVICE_PORT", &raw)?;
        }

        Ok(cfg)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// `true` when no usable credential is configured and replies come from the mock cycler.
    pub fn mock_mode(&self) -> bool {
        self.mock_mode
    }

    /// `host:port` string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("mock_mode", &self.mock_mode)
            .finish()
    }
}

fn is_mock_key(api_key: &str) -> bool {
    api_key.is_empty() || api_key.starts_with(DEMO_KEY_PREFIX)
}

fn parse_var<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| invalid(var, raw, &e.to_string()))
}

fn invalid(var: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = ServiceConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.max_tokens, 800);
        assert_eq!(cfg.timeout, Duration::from_secs(20));
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.api_version, "2023-06-01");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8000");
        assert!(cfg.mock_mode());
    }

    #[test]
    fn demo_prefixed_key_selects_mock_mode() {
        let cfg =
            ServiceConfig::from_lookup(lookup_from(&[("ANTHROPIC_API_KEY", "sk-demo-123")]))
                .unwrap();
        assert!(cfg.mock_mode());
    }

    #[test]
    fn any_other_key_selects_live_mode() {
        let cfg = ServiceConfig::from_lookup(lookup_from(&[("ANTHROPIC_API_KEY", "not-a-real-key")]))
            .unwrap();
        assert!(!cfg.mock_mode());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg = ServiceConfig::from_lookup(lookup_from(&[
            ("AI_MODEL", "claude-haiku"),
            ("AI_MAX_TOKENS", "256"),
            ("AI_TIMEOUT_SECONDS", "2.5"),
            ("AI_SERVICE_PORT", "9090"),
        ]))
        .unwrap();
        assert_eq!(cfg.model, "claude-haiku");
        assert_eq!(cfg.max_tokens, 256);
        assert_eq!(cfg.timeout, Duration::from_millis(2500));
        assert_eq!(cfg.port, 9090);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = ServiceConfig::from_lookup(lookup_from(&[("AI_MAX_TOKENS", "lots")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "AI_MAX_TOKENS", .. }));

        let err = ServiceConfig::from_lookup(lookup_from(&[("AI_TIMEOUT_SECONDS", "")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "AI_TIMEOUT_SECONDS", .. }));
    }

    #[test]
    fn non_positive_numbers_are_rejected() {
        assert!(ServiceConfig::from_lookup(lookup_from(&[("AI_MAX_TOKENS", "0")])).is_err());
        assert!(ServiceConfig::from_lookup(lookup_from(&[("AI_TIMEOUT_SECONDS", "-1")])).is_err());
        assert!(ServiceConfig::from_lookup(lookup_from(&[("AI_TIMEOUT_SECONDS", "inf")])).is_err());
    }

    #[test]
    fn debug_output_hides_the_credential() {
        let cfg = ServiceConfig::new("sk-ant-secret");
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("sk-ant-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
