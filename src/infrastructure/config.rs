//! # Configuration
//!
//! Layered configuration for the catalog engine.
//!
//! Sources, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`tour_catalog.toml`, or an explicit path)
//! 3. environment variables prefixed `TOUR_CATALOG__`, with `__` between
//!    nested keys (`TOUR_CATALOG__CURRENCY__USD_TO_KZ=900`)
//!
//! A `.env` file is loaded into the environment first when present.
//!
//! # Examples
//!
//! ```
//! use tour_catalog::infrastructure::config::CatalogConfig;
//! use tour_catalog::domain::value_objects::Currency;
//!
//! let config = CatalogConfig::from_toml("[currency]\ndisplay = \"EUR\"\n").unwrap();
//! assert_eq!(config.currency.display, Currency::Eur);
//! assert_eq!(config.comparison.max_selected, 3);
//! ```

use crate::application::services::currency::{
    CurrencyConverter, CurrencyResult, DEFAULT_USD_TO_EUR, DEFAULT_USD_TO_KZ, ExchangeRateTable,
};
use crate::domain::entities::compare_selection::MAX_COMPARE_SELECTION;
use crate::domain::value_objects::Currency;
use config::{Config, Environment, File, FileFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TOUR_CATALOG";

/// Separator between the prefix and nested keys.
pub const ENV_SEPARATOR: &str = "__";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tour_catalog";

/// Configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Currency display and exchange rates.
    pub currency: CurrencySettings,
    /// Free-text search.
    pub search: SearchSettings,
    /// Compare selection.
    pub comparison: ComparisonSettings,
    /// Logging.
    pub telemetry: TelemetryConfig,
}

/// Currency display and exchange rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencySettings {
    /// Currency prices are shown in.
    pub display: Currency,
    /// Currency prices are compared in.
    pub reference: Currency,
    /// Kwanzas per US dollar.
    pub usd_to_kz: Decimal,
    /// Euros per US dollar.
    pub usd_to_eur: Decimal,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            display: Currency::Usd,
            reference: Currency::Usd,
            usd_to_kz: DEFAULT_USD_TO_KZ,
            usd_to_eur: DEFAULT_USD_TO_EUR,
        }
    }
}

impl CurrencySettings {
    /// Builds the exchange-rate table.
    ///
    /// # Errors
    ///
    /// Returns an error if a rate is not positive.
    pub fn exchange_rates(&self) -> CurrencyResult<ExchangeRateTable> {
        ExchangeRateTable::from_usd_rates(self.usd_to_kz, self.usd_to_eur)
    }

    /// Builds a converter over the configured rates.
    ///
    /// # Errors
    ///
    /// Returns an error if a rate is not positive.
    pub fn converter(&self) -> CurrencyResult<CurrencyConverter> {
        self.exchange_rates().map(CurrencyConverter::new)
    }
}

/// Free-text search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Quiet period before a typed query triggers a ranking pass. Read by
    /// `SearchDebouncer::from_settings`.
    pub debounce_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

impl SearchSettings {
    /// Returns the debounce period.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Compare selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonSettings {
    /// Maximum listings compared side by side. May only be lowered.
    pub max_selected: usize,
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self {
            max_selected: MAX_COMPARE_SELECTION,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit JSON lines instead of compact text.
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

impl CatalogConfig {
    /// Loads `.env`, the default file if present, and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let file = File::with_name(DEFAULT_CONFIG_FILE).required(false);
        Self::from_builder(Config::builder().add_source(file))
    }

    /// Loads `.env`, the given file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, or a value is
    /// out of range.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let file = File::from(path).required(true);
        Self::from_builder(Config::builder().add_source(file))
    }

    /// Parses a TOML document over the defaults, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or a value is out of
    /// range.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a selection cap outside
    /// `1..=3` or a non-positive exchange rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = self.comparison.max_selected;
        if max == 0 || max > MAX_COMPARE_SELECTION {
            return Err(ConfigError::invalid(format!(
                "comparison.max_selected must be between 1 and {MAX_COMPARE_SELECTION}, got {max}"
            )));
        }
        self.currency
            .exchange_rates()
            .map_err(|e| ConfigError::invalid(e.to_string()))?;
        Ok(())
    }
}
