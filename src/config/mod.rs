//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VERACITY_*` environment
//! variables. The engine itself never reads the environment at call time;
//! the caller builds a [`Config`] (from env or directly) and injects it,
//! which keeps the client testable.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::time::Duration;

use crate::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_EMBEDDING_MODEL, DEFAULT_MAX_RETRIES};

/// Default embeddings endpoint when `VERACITY_ENDPOINT_URL` is not set.
pub const DEFAULT_ENDPOINT_URL: &str = "https://api.openai.com/v1/embeddings";

/// Embedding provider configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider API key. Required for real network calls.
    pub api_key: Option<String>,

    /// Full embeddings endpoint URL. Default: the OpenAI endpoint.
    pub endpoint_url: String,

    /// Model requested from the provider. Default: `text-embedding-3-small`.
    pub model: String,

    /// TTL for cached embedding results. Default: 1 hour.
    pub cache_ttl: Duration,

    /// Provider attempts before giving up. Default: `3`.
    pub max_retries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl Config {
    const ENV_API_KEY: &'static str = "VERACITY_API_KEY";
    const ENV_ENDPOINT_URL: &'static str = "VERACITY_ENDPOINT_URL";
    const ENV_MODEL: &'static str = "VERACITY_EMBEDDING_MODEL";
    const ENV_CACHE_TTL_SECS: &'static str = "VERACITY_CACHE_TTL_SECS";
    const ENV_MAX_RETRIES: &'static str = "VERACITY_MAX_RETRIES";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_key = Self::parse_optional_string_from_env(Self::ENV_API_KEY);
        let endpoint_url =
            Self::parse_string_from_env(Self::ENV_ENDPOINT_URL, defaults.endpoint_url);
        let model = Self::parse_string_from_env(Self::ENV_MODEL, defaults.model);
        let cache_ttl_secs =
            Self::parse_u64_from_env(Self::ENV_CACHE_TTL_SECS, DEFAULT_CACHE_TTL_SECS)?;
        let max_retries =
            Self::parse_u64_from_env(Self::ENV_MAX_RETRIES, defaults.max_retries as u64)?;

        Ok(Self {
            api_key,
            endpoint_url,
            model,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            max_retries: max_retries as usize,
        })
    }

    /// Validates that the config can drive real provider calls.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            return Err(ConfigError::MissingApiKey {
                var: Self::ENV_API_KEY,
            });
        }

        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://") {
            return Err(ConfigError::InvalidEndpointUrl {
                value: self.endpoint_url.clone(),
            });
        }

        Ok(())
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_string_from_env(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                var: var_name,
                value,
            }),
            Err(_) => Ok(default),
        }
    }
}
