//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `PAWCART_IMAGE_URL` - Random image endpoint (default: `https://dog.ceo/api/breeds/image/random`)
//! - `PAWCART_ECHO_URL` - Endpoint new pets are echoed to (default: `https://jsonplaceholder.typicode.com/posts`)
//! - `PAWCART_HTTP_TIMEOUT_MS` - Request timeout in milliseconds (default: 30000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g., "production")

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default image-of-the-day endpoint.
pub const DEFAULT_IMAGE_URL: &str = "https://dog.ceo/api/breeds/image/random";

/// Default endpoint receiving the remote echo of new pets.
pub const DEFAULT_ECHO_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// PawCart client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Endpoint returning `{ "message": "<image url>" }`
    pub image_url: Url,
    /// Endpoint accepting the JSON of every newly added pet
    pub echo_url: Url,
    /// Timeout applied to every outgoing request
    pub http_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let image_url = get_url(&lookup, "PAWCART_IMAGE_URL", DEFAULT_IMAGE_URL)?;
        let echo_url = get_url(&lookup, "PAWCART_ECHO_URL", DEFAULT_ECHO_URL)?;
        let http_timeout = get_timeout(&lookup, "PAWCART_HTTP_TIMEOUT_MS")?;

        Ok(Self {
            image_url,
            echo_url,
            http_timeout,
            sentry_dsn: get_optional(&lookup, "SENTRY_DSN"),
            sentry_environment: get_optional(&lookup, "SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating empty values as unset.
fn get_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Get an `http`/`https` URL with a default value.
fn get_url<F>(lookup: &F, key: &str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = get_optional(lookup, key).unwrap_or_else(|| default.to_string());
    let url =
        Url::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{other}' (expected http or https)"),
        )),
    }
}

/// Get a positive millisecond timeout.
fn get_timeout<F>(lookup: &F, key: &str) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = get_optional(lookup, key) else {
        return Ok(Duration::from_millis(DEFAULT_TIMEOUT_MS));
    };

    let millis = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if millis == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than 0".to_string(),
        ));
    }

    Ok(Duration::from_millis(millis))
}
