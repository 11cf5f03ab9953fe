//! # Ranking Engine
//!
//! Turns a catalog snapshot and a [`FilterState`] into the ordered listings
//! shown to the user.
//!
//! A pass runs in four steps:
//!
//! 1. keep the listings that satisfy every active filter predicate
//! 2. express each kept price in the reference currency
//! 3. score each kept listing against the kept set
//! 4. sort with the strategy of the requested [`SortMode`]
//!
//! The engine is pure: it holds no state between passes and may be re-run
//! on every filter change.
//!
//! # Examples
//!
//! ```
//! use tour_catalog::application::services::ranking_engine::RankingEngine;
//! use tour_catalog::domain::entities::filter::FilterState;
//! use tour_catalog::domain::entities::listing::{PartnerListing, Pricing};
//! use tour_catalog::domain::value_objects::{Availability, Category, Currency, PriceUnit};
//! use rust_decimal::Decimal;
//!
//! let listing = |id: &str, amount: i64, rating: f64| {
//!     PartnerListing::builder(
//!         id,
//!         id,
//!         Category::Tourism,
//!         "Luanda",
//!         Pricing::new(Currency::Usd, Decimal::new(amount, 0), PriceUnit::PerPerson),
//!     )
//!     .rating(rating)
//!     .availability(Availability::High)
//!     .build()
//!     .unwrap()
//! };
//! let catalog = vec![listing("a", 200, 4.0), listing("b", 100, 4.5)];
//!
//! let engine = RankingEngine::default();
//! let ranked = engine.rank(&catalog, &FilterState::new(Category::Tourism)).unwrap();
//! assert_eq!(ranked.recommended().unwrap().listing.id().as_str(), "b");
//! ```

use crate::application::error::ApplicationResult;
use crate::application::services::currency::CurrencyConverter;
use crate::application::services::ranking_strategy::{
    RankedListing, ScoredListing, strategy_for,
};
use crate::domain::entities::filter::{FilterQuery, FilterState};
use crate::domain::entities::listing::PartnerListing;
use crate::domain::services::catalog_filter::CatalogFilter;
use crate::domain::services::value_score::ValueScorer;
use crate::domain::value_objects::{Currency, ListingId, SortMode};
use serde::Serialize;

/// Result of one ranking pass.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCatalog {
    /// Listings in display order.
    pub items: Vec<RankedListing>,
    /// Sort mode of the pass.
    pub sort_mode: SortMode,
    /// Currency prices are shown in.
    pub display_currency: Currency,
    /// Currency prices were compared in.
    pub reference_currency: Currency,
}

impl RankedCatalog {
    fn empty(sort_mode: SortMode, display_currency: Currency, reference_currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            sort_mode,
            display_currency,
            reference_currency,
        }
    }

    /// Returns the recommended listing, if any.
    #[must_use]
    pub fn recommended(&self) -> Option<&RankedListing> {
        self.items.iter().find(|item| item.recommended)
    }

    /// Returns the number of listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing matched the filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the listings in display order.
    pub fn iter(&self) -> impl Iterator<Item = &RankedListing> {
        self.items.iter()
    }

    /// Returns the listing ids in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<&ListingId> {
        self.items.iter().map(|item| item.listing.id()).collect()
    }

    /// Finds a ranked listing by id.
    #[must_use]
    pub fn get(&self, id: &ListingId) -> Option<&RankedListing> {
        self.items.iter().find(|item| item.listing.id() == id)
    }
}

/// Filters, scores and sorts catalog snapshots.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    converter: CurrencyConverter,
    reference: Currency,
    display: Currency,
}

impl RankingEngine {
    /// Creates an engine comparing and showing prices in dollars.
    #[must_use]
    pub fn new(converter: CurrencyConverter) -> Self {
        Self {
            converter,
            reference: Currency::Usd,
            display: Currency::Usd,
        }
    }

    /// Sets the currency prices are compared in.
    #[must_use]
    pub fn with_reference_currency(mut self, currency: Currency) -> Self {
        self.reference = currency;
        self
    }

    /// Sets the default display currency.
    #[must_use]
    pub fn with_display_currency(mut self, currency: Currency) -> Self {
        self.display = currency;
        self
    }

    /// Returns the converter.
    #[must_use]
    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    /// Returns the currency prices are compared in.
    #[must_use]
    pub fn reference_currency(&self) -> Currency {
        self.reference
    }

    /// Returns the default display currency.
    #[must_use]
    pub fn display_currency(&self) -> Currency {
        self.display
    }

    /// Ranks a catalog, showing prices in the default display currency.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be converted.
    pub fn rank(
        &self,
        catalog: &[PartnerListing],
        filters: &FilterState,
    ) -> ApplicationResult<RankedCatalog> {
        self.rank_for_currency(catalog, filters, self.display)
    }

    /// Ranks a catalog, showing prices in `display`.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be converted.
    pub fn rank_for_currency(
        &self,
        catalog: &[PartnerListing],
        filters: &FilterState,
        display: Currency,
    ) -> ApplicationResult<RankedCatalog> {
        let kept = CatalogFilter::new(filters).apply(catalog);

        let amounts = kept
            .iter()
            .map(|listing| {
                let pricing = listing.pricing();
                self.converter
                    .comparable_amount(pricing.amount(), pricing.currency(), self.reference)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let Some(scorer) = ValueScorer::for_amounts(amounts.iter().copied()) else {
            tracing::debug!(
                category = %filters.category,
                sort = %filters.sort_mode,
                catalog = catalog.len(),
                "ranking pass matched nothing"
            );
            return Ok(RankedCatalog::empty(filters.sort_mode, display, self.reference));
        };

        let mut scored: Vec<ScoredListing<'_>> = kept
            .iter()
            .copied()
            .zip(&amounts)
            .map(|(listing, &amount)| ScoredListing {
                listing,
                comparable_amount: amount,
                score: scorer.score(listing, amount),
            })
            .collect();

        let strategy = strategy_for(filters.sort_mode);
        strategy.sort(&mut scored);

        let items = scored
            .into_iter()
            .enumerate()
            .map(|(index, scored)| -> ApplicationResult<RankedListing> {
                Ok(RankedListing {
                    listing: scored.listing.clone(),
                    rank: index + 1,
                    score: scored.score,
                    recommended: index == 0 && strategy.marks_recommended(),
                    price: self
                        .converter
                        .price_display(scored.listing.pricing(), display)?,
                })
            })
            .collect::<ApplicationResult<Vec<_>>>()?;

        tracing::debug!(
            category = %filters.category,
            sort = strategy.name(),
            catalog = catalog.len(),
            kept = items.len(),
            min_price = scorer.range().min(),
            max_price = scorer.range().max(),
            "ranking pass complete"
        );

        Ok(RankedCatalog {
            items,
            sort_mode: filters.sort_mode,
            display_currency: display,
            reference_currency: self.reference,
        })
    }

    /// Ranks a catalog from loosely-typed filter input.
    ///
    /// An unknown category or sort mode matches nothing and yields an empty
    /// result carrying the requested sort mode, or the default when the
    /// sort mode itself is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be converted.
    pub fn rank_query(
        &self,
        catalog: &[PartnerListing],
        query: &FilterQuery,
    ) -> ApplicationResult<RankedCatalog> {
        if let Some(filters) = query.resolve() {
            return self.rank(catalog, &filters);
        }
        tracing::debug!(
            category = %query.category,
            sort = query.sort.as_deref().unwrap_or_default(),
            "unknown category or sort mode, nothing to rank"
        );
        Ok(RankedCatalog::empty(
            query.sort_mode().unwrap_or_default(),
            self.display,
            self.reference,
        ))
    }
}
