//! Generator configuration

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_API_VERSION: &str = "2024-08-01-preview";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_CACHE_DIR: &str = ".cache/docsynth";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Missing or malformed configuration. Always raised before any network call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("{name} has invalid value {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Chat-completion endpoint for an Azure OpenAI deployment
#[derive(Debug, Clone)]
pub struct ModelEndpoint {
    pub endpoint: Url,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

impl ModelEndpoint {
    /// Validate and build an endpoint config. `api_version` falls back to
    /// [`DEFAULT_API_VERSION`] when absent or blank.
    pub fn new(
        endpoint: &str,
        api_key: &str,
        deployment: &str,
        api_version: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let endpoint = required("endpoint", endpoint)?;
        let api_key = required("apiKey", api_key)?;
        let deployment = required("deploymentName", deployment)?;

        let endpoint = Url::parse(endpoint).map_err(|e| ConfigError::InvalidUrl {
            name: "endpoint",
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                name: "endpoint",
                reason: format!("unsupported scheme {}", endpoint.scheme()),
            });
        }

        let api_version = api_version
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_VERSION);

        Ok(Self {
            endpoint,
            api_key: api_key.to_string(),
            deployment: deployment.to_string(),
            api_version: api_version.to_string(),
        })
    }
}

/// Retry and request-size settings for the model invoker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSettings {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_tokens: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Result cache settings. When `enabled` is false every lookup misses and
/// every store is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub enabled: bool,
    pub directory: PathBuf,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from(DEFAULT_CACHE_DIR),
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Full generator configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: ModelEndpoint,
    pub model: ModelSettings,
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).unwrap_or_default();

        let endpoint = ModelEndpoint::new(
            &var("AZURE_OPENAI_ENDPOINT"),
            &var("AZURE_OPENAI_API_KEY"),
            &var("AZURE_OPENAI_DEPLOYMENT"),
            lookup("AZURE_OPENAI_API_VERSION").as_deref(),
        )?;

        let defaults = ModelSettings::default();
        let model = ModelSettings {
            max_attempts: parse_or("MODEL_MAX_ATTEMPTS", &lookup, defaults.max_attempts)?,
            base_delay: Duration::from_millis(parse_or(
                "MODEL_RETRY_DELAY_MS",
                &lookup,
                defaults.base_delay.as_millis() as u64,
            )?),
            max_tokens: parse_or("MODEL_MAX_TOKENS", &lookup, defaults.max_tokens)?,
        };
        if model.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MODEL_MAX_ATTEMPTS",
                value: "0".to_string(),
            });
        }

        let cache_defaults = CacheConfig::default();
        let cache = CacheConfig {
            enabled: parse_or("CACHE_ENABLED", &lookup, cache_defaults.enabled)?,
            directory: lookup("CACHE_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(cache_defaults.directory),
            ttl: Duration::from_millis(parse_or(
                "CACHE_TTL_MS",
                &lookup,
                cache_defaults.ttl.as_millis() as u64,
            )?),
        };

        Ok(Self {
            endpoint,
            model,
            cache,
        })
    }
}

fn required<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ConfigError::Missing(name))
    } else {
        Ok(value)
    }
}

fn parse_or<T, F>(name: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name, value: raw })
        }
        _ => Ok(default),
    }
}
