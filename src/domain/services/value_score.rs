//! # Value Scoring
//!
//! Best-value score of a listing relative to its comparison set.
//!
//! ```text
//! ratingScore   = rating / 5 * 100
//! priceScore    = 50                                              if max == min
//!               = 100 - (amount - min) / (max - min) * 100        otherwise
//! certBonus     = 10 if certified
//! availBonus    = high: 10, medium: 5, low: 0
//! discountBonus = discountPercent * 0.5
//!
//! score = min(ratingScore * 0.35 + priceScore * 0.40
//!             + certBonus + availBonus + discountBonus, 100)
//! ```
//!
//! Price (40%) and rating (35%) dominate; the bonuses are additive so they
//! separate near-ties without outweighing a large price gap. `min` and `max`
//! come from the currently filtered set, never the global catalog, and all
//! amounts must be expressed in one currency.

use crate::domain::entities::listing::{MAX_RATING, PartnerListing};
use crate::domain::value_objects::{Availability, ValueScore};
use serde::Serialize;

/// Weight of the normalized rating.
pub const RATING_WEIGHT: f64 = 0.35;

/// Weight of the normalized price.
pub const PRICE_WEIGHT: f64 = 0.40;

/// Bonus for verified partners.
pub const CERTIFIED_BONUS: f64 = 10.0;

/// Points per discount percent.
pub const DISCOUNT_FACTOR: f64 = 0.5;

/// Price score given to every listing when all prices are equal.
pub const EQUAL_PRICE_SCORE: f64 = 50.0;

/// Returns the availability bonus.
#[inline]
#[must_use]
pub const fn availability_bonus(availability: Availability) -> f64 {
    match availability {
        Availability::High => 10.0,
        Availability::Medium => 5.0,
        Availability::Low => 0.0,
    }
}

/// Cheapest and most expensive amount of a comparison set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    /// Builds the range of a set of amounts.
    ///
    /// Returns `None` for an empty set.
    #[must_use]
    pub fn from_amounts(amounts: impl IntoIterator<Item = f64>) -> Option<Self> {
        amounts.into_iter().fold(None, |range, amount| {
            Some(match range {
                None => Self {
                    min: amount,
                    max: amount,
                },
                Some(Self { min, max }) => Self {
                    min: min.min(amount),
                    max: max.max(amount),
                },
            })
        })
    }

    /// Returns the cheapest amount.
    #[inline]
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Returns the most expensive amount.
    #[inline]
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Returns true if every amount in the set is equal.
    #[inline]
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.max == self.min
    }

    /// Scores an amount: 100 for the cheapest, 0 for the most expensive.
    #[must_use]
    pub fn price_score(&self, amount: f64) -> f64 {
        if self.is_flat() {
            return EQUAL_PRICE_SCORE;
        }
        100.0 - ((amount - self.min) / (self.max - self.min)) * 100.0
    }
}

/// The individual terms of a value score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueScoreBreakdown {
    /// Rating normalized to `0..=100`.
    pub rating_score: f64,
    /// Relative price normalized to `0..=100`.
    pub price_score: f64,
    /// Certification bonus.
    pub certified_bonus: f64,
    /// Availability bonus.
    pub availability_bonus: f64,
    /// Discount bonus.
    pub discount_bonus: f64,
}

impl ValueScoreBreakdown {
    /// Returns the weighted sum before clamping.
    #[must_use]
    pub fn raw(&self) -> f64 {
        self.rating_score * RATING_WEIGHT
            + self.price_score * PRICE_WEIGHT
            + self.certified_bonus
            + self.availability_bonus
            + self.discount_bonus
    }

    /// Returns the clamped score.
    #[must_use]
    pub fn score(&self) -> ValueScore {
        ValueScore::clamped(self.raw())
    }
}

/// Scores listings against one comparison set.
///
/// # Examples
///
/// ```
/// use tour_catalog::domain::services::value_score::ValueScorer;
///
/// let scorer = ValueScorer::for_amounts([100.0, 200.0, 100.0]).unwrap();
/// assert_eq!(scorer.range().min(), 100.0);
/// assert_eq!(scorer.range().max(), 200.0);
/// assert_eq!(scorer.range().price_score(150.0), 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScorer {
    range: PriceRange,
}

impl ValueScorer {
    /// Creates a scorer for a comparison set given its comparable amounts.
    ///
    /// Returns `None` for an empty set.
    #[must_use]
    pub fn for_amounts(amounts: impl IntoIterator<Item = f64>) -> Option<Self> {
        PriceRange::from_amounts(amounts).map(|range| Self { range })
    }

    /// Returns the price range of the comparison set.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> &PriceRange {
        &self.range
    }

    /// Computes each term of the score.
    ///
    /// `comparable_amount` is the listing's price expressed in the same
    /// currency as the amounts the scorer was built from.
    #[must_use]
    pub fn breakdown(&self, listing: &PartnerListing, comparable_amount: f64) -> ValueScoreBreakdown {
        ValueScoreBreakdown {
            rating_score: (listing.rating() / MAX_RATING) * 100.0,
            price_score: self.range.price_score(comparable_amount),
            certified_bonus: if listing.is_certified() {
                CERTIFIED_BONUS
            } else {
                0.0
            },
            availability_bonus: availability_bonus(listing.availability()),
            discount_bonus: listing
                .pricing()
                .discount_percent()
                .map_or(0.0, |discount| discount * DISCOUNT_FACTOR),
        }
    }

    /// Computes the clamped score.
    #[must_use]
    pub fn score(&self, listing: &PartnerListing, comparable_amount: f64) -> ValueScore {
        self.breakdown(listing, comparable_amount).score()
    }
}
