// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use storecap_core::{ENV_STORECAP_BASE_URL, ENV_STORECAP_TIMEOUT_MS};

use crate::error::{ClientError, ClientErrorCode};
use crate::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Client settings read from `config.toml`. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub retry_attempts: usize,
    pub retry_base_backoff_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry_attempts: retry.max_attempts,
            retry_base_backoff_ms: retry.base_backoff_ms,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_attempts,
            base_backoff_ms: self.retry_base_backoff_ms,
        }
    }
}

/// Reads the config file. `None` or a missing file yields the defaults.
pub fn load_client_config(path: Option<&Path>) -> Result<ClientConfig, ClientError> {
    let Some(path) = path else {
        return Ok(ClientConfig::default());
    };
    if !path.exists() {
        return Ok(ClientConfig::default());
    }
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ClientError::new(
            ClientErrorCode::Config,
            format!("read {}: {e}", path.display()),
        )
    })?;
    toml::from_str(&raw).map_err(|e| {
        ClientError::new(
            ClientErrorCode::Config,
            format!("parse {}: {e}", path.display()),
        )
    })
}

/// Applies `STORECAP_BASE_URL` and `STORECAP_TIMEOUT_MS` on top of `config`.
#[must_use]
pub fn apply_env_overrides(config: ClientConfig) -> ClientConfig {
    apply_overrides_from(config, |name| std::env::var(name).ok())
}

fn apply_overrides_from(
    mut config: ClientConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ClientConfig {
    if let Some(url) = lookup(ENV_STORECAP_BASE_URL).filter(|v| !v.trim().is_empty()) {
        config.base_url = url.trim().to_string();
    }
    if let Some(raw) = lookup(ENV_STORECAP_TIMEOUT_MS) {
        match raw.trim().parse::<u64>() {
            Ok(ms) => config.timeout_ms = ms,
            Err(_) => warn!(
                name = ENV_STORECAP_TIMEOUT_MS,
                value = %raw,
                "ignoring non-numeric timeout override"
            ),
        }
    }
    config
}

pub fn validate_client_config(config: &ClientConfig) -> Result<(), String> {
    let url = config.base_url.trim();
    if url.is_empty() {
        return Err("base_url must not be empty".to_string());
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(format!("base_url must start with http:// or https://, got `{url}`"));
    }
    if config.timeout_ms == 0 {
        return Err("timeout_ms must be > 0".to_string());
    }
    if config.retry_attempts == 0 {
        return Err("retry_attempts must be >= 1".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(validate_client_config(&config).is_ok());
        assert_eq!(config.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn overrides_replace_url_and_timeout() {
        let config = apply_overrides_from(ClientConfig::default(), |name| match name {
            ENV_STORECAP_BASE_URL => Some(" http://console.test:9000 ".to_string()),
            ENV_STORECAP_TIMEOUT_MS => Some("250".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://console.test:9000");
        assert_eq!(config.timeout_ms, 250);
    }

    #[test]
    fn bad_timeout_override_is_ignored() {
        let config = apply_overrides_from(ClientConfig::default(), |name| {
            (name == ENV_STORECAP_TIMEOUT_MS).then(|| "soon".to_string())
        });
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = ClientConfig {
            base_url: "ftp://x".to_string(),
            ..ClientConfig::default()
        };
        assert!(validate_client_config(&config).is_err());
        config.base_url = DEFAULT_BASE_URL.to_string();
        config.timeout_ms = 0;
        assert!(validate_client_config(&config).is_err());
        config.timeout_ms = 10;
        config.retry_attempts = 0;
        assert!(validate_client_config(&config).is_err());
    }
}
