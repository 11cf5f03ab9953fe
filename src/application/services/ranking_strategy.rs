//! # Ranking Strategy
//!
//! Strategies for ordering the filtered catalog.
//!
//! This module provides the [`RankingStrategy`] trait and one implementation
//! per [`SortMode`]. Every strategy sorts stably: listings with equal keys
//! keep their catalog order.

use crate::application::services::currency::PriceDisplay;
use crate::domain::entities::listing::PartnerListing;
use crate::domain::value_objects::{SortMode, ValueScore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown when a partner has not published a response time.
pub const RESPONSE_TIME_PLACEHOLDER: &str = "—";

/// A filtered listing with the values strategies sort on.
#[derive(Debug, Clone, Copy)]
pub struct ScoredListing<'c> {
    /// The listing.
    pub listing: &'c PartnerListing,
    /// Price in the engine's reference currency.
    pub comparable_amount: f64,
    /// Value score within the filtered set.
    pub score: ValueScore,
}

/// A listing with its ranking information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedListing {
    /// The listing being ranked.
    pub listing: PartnerListing,
    /// The rank (1 = first shown).
    pub rank: usize,
    /// Value score within the filtered set.
    pub score: ValueScore,
    /// True only for the first listing of a best-value pass.
    pub recommended: bool,
    /// Price in the display currency.
    pub price: PriceDisplay,
}

impl RankedListing {
    /// Returns true if this listing is shown first.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.rank == 1
    }

    /// Returns the features shown on the card.
    #[must_use]
    pub fn visible_features(&self) -> &[String] {
        self.listing.visible_features()
    }

    /// Returns how many features are hidden behind the overflow marker.
    #[must_use]
    pub fn hidden_feature_count(&self) -> usize {
        self.listing.hidden_feature_count()
    }

    /// Returns the response time, or a placeholder when absent.
    #[must_use]
    pub fn response_time_label(&self) -> &str {
        self.listing
            .response_time()
            .unwrap_or(RESPONSE_TIME_PLACEHOLDER)
    }

    /// Returns the availability label.
    #[must_use]
    pub fn availability_label(&self) -> &'static str {
        self.listing.availability().label()
    }
}

impl fmt::Display for RankedListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RankedListing(#{} score={} price={} listing={})",
            self.rank,
            self.score,
            self.price.label(),
            self.listing
        )
    }
}

/// Trait for ranking strategies.
///
/// Implementations define the sort key of a pass. Sorting must be stable.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Orders the scored listings in place, first shown first.
    fn sort(&self, listings: &mut [ScoredListing<'_>]);

    /// Returns true if the first listing is flagged as recommended.
    fn marks_recommended(&self) -> bool {
        false
    }

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;
}

/// Returns the strategy implementing a sort mode.
#[must_use]
pub fn strategy_for(mode: SortMode) -> &'static dyn RankingStrategy {
    match mode {
        SortMode::PriceAscending => &PriceStrategy { descending: false },
        SortMode::PriceDescending => &PriceStrategy { descending: true },
        SortMode::RatingDescending => &RatingStrategy,
        SortMode::BestValue => &BestValueStrategy,
    }
}

/// Orders by price in the reference currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceStrategy {
    /// Most expensive first when true.
    pub descending: bool,
}

impl RankingStrategy for PriceStrategy {
    fn sort(&self, listings: &mut [ScoredListing<'_>]) {
        if self.descending {
            listings.sort_by(|a, b| b.comparable_amount.total_cmp(&a.comparable_amount));
        } else {
            listings.sort_by(|a, b| a.comparable_amount.total_cmp(&b.comparable_amount));
        }
    }

    fn name(&self) -> &'static str {
        if self.descending {
            "PriceDescending"
        } else {
            "PriceAscending"
        }
    }
}

/// Orders by rating, highest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingStrategy;

impl RankingStrategy for RatingStrategy {
    fn sort(&self, listings: &mut [ScoredListing<'_>]) {
        listings.sort_by(|a, b| b.listing.rating().total_cmp(&a.listing.rating()));
    }

    fn name(&self) -> &'static str {
        "RatingDescending"
    }
}

/// Orders by value score, highest first, and flags the winner.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestValueStrategy;

impl RankingStrategy for BestValueStrategy {
    fn sort(&self, listings: &mut [ScoredListing<'_>]) {
        listings.sort_by(|a, b| b.score.total_cmp(&a.score));
    }

    fn marks_recommended(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "BestValue"
    }
}
