//! Client configuration.
//!
//! Configuration can be assembled in code, read from `APCA_*` environment
//! variables, or loaded from a YAML file with `${VAR}` / `${VAR:-default}`
//! interpolation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use alpaca_api::config::{ClientConfig, load_config};
//!
//! // From the environment (and a `.env` file when present)
//! let config = ClientConfig::from_env()?;
//!
//! // From a YAML file
//! let config = load_config(Some("alpaca.yaml"))?;
//! ```

mod credentials;
mod environment;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use credentials::Credentials;
pub use environment::Environment;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),

    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable has empty value.
    #[error("Environment variable {0} cannot be empty")]
    EmptyValue(String),
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: `pretty` or `compact`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "alpaca_api=info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials.
    pub credentials: Credentials,
    /// Trading environment.
    pub environment: Environment,
    /// Trading API base URL.
    pub trading_base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Create a configuration using the environment's default URL.
    #[must_use]
    pub fn new(
        key_id: impl Into<String>,
        secret_key: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            credentials: Credentials::new(key_id.into(), secret_key.into()),
            environment,
            trading_base_url: environment.trading_base_url().to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            logging: LoggingConfig::default(),
        }
    }

    /// Override the trading API base URL.
    #[must_use]
    pub fn with_trading_base_url(mut self, url: impl Into<String>) -> Self {
        self.trading_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY` (required),
    /// `APCA_ENV`, `APCA_API_BASE_URL` and `APCA_API_TIMEOUT_SECS`. A `.env`
    /// file in the working directory is loaded first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from `APCA_*` values supplied by `lookup`.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &str| match lookup(key) {
            None => Err(ConfigError::MissingEnvVar(key.to_string())),
            Some(value) if value.is_empty() => Err(ConfigError::EmptyValue(key.to_string())),
            Some(value) => Ok(value),
        };

        let key_id = required("APCA_API_KEY_ID")?;
        let secret_key = required("APCA_API_SECRET_KEY")?;

        let environment = lookup("APCA_ENV")
            .map(|s| Environment::from_str_case_insensitive(&s))
            .unwrap_or_default();

        let mut config = Self::new(key_id, secret_key, environment);

        if let Some(url) = lookup("APCA_API_BASE_URL").filter(|u| !u.is_empty()) {
            config = config.with_trading_base_url(url);
        }

        if let Some(raw) = lookup("APCA_API_TIMEOUT_SECS").filter(|v| !v.is_empty()) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::ValidationError(format!(
                    "APCA_API_TIMEOUT_SECS must be a whole number of seconds, got '{raw}': {e}"
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        validate(&config)?;
        Ok(config)
    }
}

// ============================================
// YAML Loading
// ============================================

/// On-disk layout of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileConfig {
    key_id: String,
    secret_key: String,
    #[serde(default)]
    environment: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    #[serde(default)]
    logging: LoggingConfig,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl From<FileConfig> for ClientConfig {
    fn from(file: FileConfig) -> Self {
        let environment = file
            .environment
            .as_deref()
            .map(Environment::from_str_case_insensitive)
            .unwrap_or_default();

        let mut config = Self::new(file.key_id, file.secret_key, environment)
            .with_timeout(Duration::from_secs(file.timeout_secs));
        if let Some(url) = file.base_url.filter(|u| !u.is_empty()) {
            config = config.with_trading_base_url(url);
        }
        config.logging = file.logging;
        config
    }
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "alpaca.yaml".
pub fn load_config(path: Option<&str>) -> Result<ClientConfig, ConfigError> {
    let path = path.unwrap_or("alpaca.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string.
pub fn load_config_from_string(yaml: &str) -> Result<ClientConfig, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let file: FileConfig = serde_yaml_bw::from_str(&interpolated)?;
    let config = ClientConfig::from(file);
    validate(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.credentials.key_id().is_empty() {
        return Err(ConfigError::ValidationError(
            "key_id must not be empty".to_string(),
        ));
    }

    if config.credentials.secret_key().is_empty() {
        return Err(ConfigError::ValidationError(
            "secret_key must not be empty".to_string(),
        ));
    }

    let url = &config.trading_base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "base_url must be an http(s) URL, got '{url}'"
        )));
    }

    if config.timeout.is_zero() {
        return Err(ConfigError::ValidationError(
            "timeout_secs must be positive".to_string(),
        ));
    }

    Ok(())
}
