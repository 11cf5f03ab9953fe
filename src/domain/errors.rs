//! # Domain Errors
//!
//! Errors raised when domain invariants are violated.
//!
//! # Examples
//!
//! ```
//! use tour_catalog::domain::errors::DomainError;
//!
//! let err = DomainError::InvalidRating(5.5);
//! assert_eq!(err.to_string(), "invalid rating: 5.5 (expected 0.0 to 5.0)");
//! ```

use crate::domain::value_objects::ParseEnumError;
use thiserror::Error;

/// Domain invariant violation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Rating outside `0.0..=5.0` or not finite.
    #[error("invalid rating: {0} (expected 0.0 to 5.0)")]
    InvalidRating(f64),

    /// Negative price amount.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Discount outside `0..=100` or not finite.
    #[error("invalid discount: {0} (expected 0 to 100)")]
    InvalidDiscount(f64),

    /// A required field was empty.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// An enumeration value could not be parsed.
    #[error("{0}")]
    InvalidEnum(#[from] ParseEnumError),

    /// Generic validation failure.
    #[error("validation error: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
