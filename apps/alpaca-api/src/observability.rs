//! Logging setup.
//!
//! The library only emits `tracing` events; applications that want them
//! printed call [`init_logging`] once at startup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Logging setup errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured filter directive does not parse.
    #[error("Invalid log filter '{directive}': {reason}")]
    InvalidFilter {
        /// Directive as configured.
        directive: String,
        /// Parser message.
        reason: String,
    },

    /// The format is neither `pretty` nor `compact`.
    #[error("Unknown log format '{0}', expected 'pretty' or 'compact'")]
    UnknownFormat(String),

    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    Install(String),
}

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG`, when set, takes precedence over `config.level`.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match config.format.to_ascii_lowercase().as_str() {
        "pretty" => builder.pretty().try_init(),
        "compact" => builder.compact().try_init(),
        other => return Err(LoggingError::UnknownFormat(other.to_string())),
    };

    installed.map_err(|e| LoggingError::Install(e.to_string()))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| LoggingError::InvalidFilter {
        directive: config.level.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_rejected() {
        let config = LoggingConfig {
            level: "info".to_string(),
            format: "json".to_string(),
        };
        assert!(matches!(
            init_logging(&config),
            Err(LoggingError::UnknownFormat(_))
        ));
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(LoggingConfig::default().level).is_ok());
    }
}
