//! # Value Score
//!
//! The derived best-value ranking number.
//!
//! A [`ValueScore`] is only meaningful relative to the comparison set it was
//! computed over. It is recomputed on every ranking pass and never cached
//! by listing id alone.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Upper bound of a value score.
pub const MAX_VALUE_SCORE: f64 = 100.0;

/// Best-value score in `[0, 100]`.
///
/// # Examples
///
/// ```
/// use tour_catalog::domain::value_objects::value_score::ValueScore;
///
/// let score = ValueScore::clamped(112.5);
/// assert_eq!(score.get(), 100.0);
/// assert_eq!(ValueScore::clamped(91.5).to_string(), "91.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueScore(f64);

impl ValueScore {
    /// Creates a score from a raw weighted sum, clamping only the upper bound.
    ///
    /// Every scoring term is non-negative, so no lower clamp is applied.
    #[must_use]
    pub fn clamped(raw: f64) -> Self {
        Self(raw.min(MAX_VALUE_SCORE))
    }

    /// Returns the score.
    #[inline]
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Total ordering used for sorting (ascending).
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for ValueScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}
