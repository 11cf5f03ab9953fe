//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)          - invariant violations, unknown enum values
//! ├── Currency(CurrencyError)      - conversion or formatting failures
//! ├── Repository(RepositoryError)  - catalog provider / selection store failures
//! ├── Ingestion(IngestionError)    - unreadable backend payloads
//! ├── Config(ConfigError)          - invalid configuration
//! ├── Telemetry(TelemetryError)    - subscriber setup failures
//! └── Validation(String)           - request validation failures
//! ```
//!
//! # Examples
//!
//! ```
//! use tour_catalog::application::error::ApplicationError;
//! use tour_catalog::infrastructure::persistence::RepositoryError;
//!
//! let err: ApplicationError = RepositoryError::not_found("PartnerListing", "42").into();
//! assert!(err.is_not_found());
//!
//! let err = ApplicationError::validation("listing 7 is not in the current results");
//! assert!(err.is_validation());
//! ```

use crate::application::services::currency::CurrencyError;
use crate::domain::errors::DomainError;
use crate::infrastructure::backend::IngestionError;
use crate::infrastructure::config::ConfigError;
use crate::infrastructure::persistence::RepositoryError;
use crate::infrastructure::telemetry::TelemetryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Currency conversion error.
    #[error("currency error: {0}")]
    Currency(#[from] CurrencyError),

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Backend payload error.
    #[error("ingestion error: {0}")]
    Ingestion(#[from] IngestionError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Telemetry setup error.
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns true if a requested listing or selection does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(e) if e.is_not_found())
    }

    /// Returns true if the caller supplied invalid input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Domain(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Currency, ParseEnumError};

    #[test]
    fn validation_error() {
        let err = ApplicationError::validation("category is required");
        assert!(err.is_validation());
        assert!(err.to_string().contains("category is required"));
    }

    #[test]
    fn domain_errors_are_validation_errors() {
        let parse = ParseEnumError::InvalidValue("sort mode", "cheapest".to_string());
        let err: ApplicationError = DomainError::from(parse).into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("cheapest"));
    }

    #[test]
    fn repository_not_found_is_not_found() {
        let err: ApplicationError = RepositoryError::not_found("PartnerListing", "42").into();
        assert!(err.is_not_found());
        assert!(!err.is_validation());
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn duplicate_is_not_not_found() {
        let err: ApplicationError = RepositoryError::duplicate("PartnerListing", "42").into();
        assert!(!err.is_not_found());
    }

    #[test]
    fn currency_error() {
        let err: ApplicationError = CurrencyError::MissingUsdLeg(Currency::Eur).into();
        assert!(!err.is_not_found());
        assert!(!err.is_validation());
        assert!(err.to_string().contains("EUR"));
    }
}
