//! Panel configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SANITY_PROJECT_ID` - Content Lake project id (e.g. `abc123xy`)
//! - `SANITY_DATASET` - Dataset holding the order documents
//! - `SANITY_API_TOKEN` - Token with read + write access to orders
//!
//! ## Optional
//! - `PANEL_HOST` - Bind address (default: 127.0.0.1)
//! - `PANEL_PORT` - Listen port (default: 3010)
//! - `SANITY_API_VERSION` - API version date (default: 2021-10-21)
//! - `ORDERS_WEBHOOK_URL` - Incoming-webhook URL for new-order alerts
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "enter-",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Panel application configuration.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Content Lake connection details
    pub sanity: SanityConfig,
    /// Incoming-webhook URL for new-order alerts (optional)
    pub webhook_url: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Content Lake connection configuration.
///
/// Implements `Debug` manually to redact the token, which can read and
/// write every order in the dataset.
#[derive(Clone)]
pub struct SanityConfig {
    /// Project id (the subdomain of the API host)
    pub project_id: String,
    /// Dataset name (e.g. "production")
    pub dataset: String,
    /// API version date string
    pub api_version: String,
    /// API token with read + write access
    pub token: SecretString,
}

impl std::fmt::Debug for SanityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityConfig")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl PanelConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is missing, a value does
    /// not parse, or the API token looks like an unreplaced placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = optional_env("PANEL_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidEnvVar("PANEL_HOST".into(), format!("{e}")))?;

        let port = optional_env("PANEL_PORT")
            .unwrap_or_else(|| "3010".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidEnvVar("PANEL_PORT".into(), format!("{e}")))?;

        let token = required_env("SANITY_API_TOKEN")?;
        validate_secret("SANITY_API_TOKEN", &token)?;

        let sanity = SanityConfig {
            project_id: required_env("SANITY_PROJECT_ID")?,
            dataset: required_env("SANITY_DATASET")?,
            api_version: optional_env("SANITY_API_VERSION")
                .unwrap_or_else(|| "2021-10-21".to_string()),
            token: SecretString::from(token),
        };

        Ok(Self {
            host,
            port,
            sanity,
            webhook_url: optional_env("ORDERS_WEBHOOK_URL"),
            sentry_dsn: optional_env("SENTRY_DSN"),
            sentry_environment: optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parse_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_rate(name: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = optional_env(name) else {
        return Ok(default);
    };
    let rate: f32 = raw
        .parse()
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), format!("{e}")))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            format!("{rate} is not in 0.0..=1.0"),
        ));
    }
    Ok(rate)
}

/// Reject secrets that still look like template placeholders.
fn validate_secret(name: &str, value: &str) -> Result<(), ConfigError> {
    let lowered = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lowered.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                name.to_string(),
                format!("contains placeholder pattern \"{pattern}\""),
            ));
        }
    }
    if value.len() < 20 {
        return Err(ConfigError::InsecureSecret(
            name.to_string(),
            "too short to be a real API token".to_string(),
        ));
    }
    Ok(())
}
