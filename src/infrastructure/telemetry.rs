//! # Telemetry
//!
//! Installs the global `tracing` subscriber.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies.
//! Analytics events are emitted under the `tour_catalog::analytics` target
//! and can be filtered on their own.

use crate::infrastructure::config::TelemetryConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Subscriber setup failure.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter does not parse.
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        /// Offending filter.
        value: String,
        /// Parse failure.
        #[source]
        source: ParseError,
    },

    /// A global subscriber is already installed.
    #[error("telemetry error: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Builds the filter: `RUST_LOG` if set, else `log_level`.
///
/// # Errors
///
/// Returns [`TelemetryError::EnvFilter`] if `log_level` does not parse.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| {
            TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            }
        }),
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if the filter does not parse or a subscriber is
/// already installed.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.compact().with_ansi(false).try_init()
    };
    installed.map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_level() {
        let config = TelemetryConfig {
            log_level: "debug".to_string(),
            json: false,
        };
        assert!(env_filter(&config).is_ok());
    }

    #[test]
    fn accepts_target_directives() {
        let config = TelemetryConfig {
            log_level: "info,tour_catalog::analytics=debug".to_string(),
            json: true,
        };
        assert!(env_filter(&config).is_ok());
    }

    #[test]
    fn second_init_fails() {
        let config = TelemetryConfig::default();
        let _ = init(&config);
        let err = init(&config).unwrap_err();
        assert!(matches!(err, TelemetryError::Subscriber(_)));
    }
}
