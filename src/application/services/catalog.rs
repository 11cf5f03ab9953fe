//! # Catalog Service
//!
//! Fetches category snapshots, runs the [`RankingEngine`] over them and
//! reports user actions to the analytics tracker.
//!
//! Free-text search goes through a [`SearchDebouncer`] so a burst of
//! keystrokes ranks once, for the last input.

use crate::application::error::ApplicationResult;
use crate::application::services::ranking_engine::{RankedCatalog, RankingEngine};
use crate::domain::entities::filter::{FilterQuery, FilterState};
use crate::domain::entities::listing::PartnerListing;
use crate::domain::value_objects::{Category, Currency, ListingId};
use crate::infrastructure::config::SearchSettings;
use crate::infrastructure::persistence::CatalogProvider;
use crate::infrastructure::tracking::{ComparisonTracker, TrackingEvent};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Coalesces bursts of search input into one ranking pass.
///
/// Clones share the same input counter.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    period: Duration,
    latest: Arc<AtomicU64>,
}

impl SearchDebouncer {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a debouncer from the `search.debounce_ms` setting.
    #[must_use]
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self::new(settings.debounce())
    }

    /// Returns the quiet period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Registers new input and waits out the quiet period.
    ///
    /// Returns false if newer input arrived while waiting.
    pub async fn settle(&self) -> bool {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
        if !self.period.is_zero() {
            tokio::time::sleep(self.period).await;
        }
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

/// Entry point for browsing the partner catalog.
#[derive(Debug, Clone)]
pub struct CatalogService {
    provider: Arc<dyn CatalogProvider>,
    engine: RankingEngine,
    tracker: Arc<dyn ComparisonTracker>,
}

impl CatalogService {
    /// Creates a catalog service.
    #[must_use]
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        engine: RankingEngine,
        tracker: Arc<dyn ComparisonTracker>,
    ) -> Self {
        Self {
            provider,
            engine,
            tracker,
        }
    }

    /// Returns the ranking engine.
    #[must_use]
    pub fn engine(&self) -> &RankingEngine {
        &self.engine
    }

    /// Ranks the current snapshot of the filtered category.
    ///
    /// A non-empty search query emits a `search` event with the result
    /// count.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails or a price cannot be
    /// converted.
    pub async fn rank(&self, filters: &FilterState) -> ApplicationResult<RankedCatalog> {
        self.rank_for_currency(filters, self.engine.display_currency())
            .await
    }

    /// Ranks the current snapshot, showing prices in `display`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails or a price cannot be
    /// converted.
    pub async fn rank_for_currency(
        &self,
        filters: &FilterState,
        display: Currency,
    ) -> ApplicationResult<RankedCatalog> {
        let snapshot = self.provider.fetch_category(filters.category).await?;
        let ranked = self
            .engine
            .rank_for_currency(&snapshot, filters, display)?;

        if let Some(event) =
            TrackingEvent::search(filters.category, &filters.search_query, ranked.len())
        {
            self.tracker.record(event);
        }
        Ok(ranked)
    }

    /// Ranks once the search input has been quiet for the debounce period.
    ///
    /// Returns `None` when newer input superseded this pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails or a price cannot be
    /// converted.
    pub async fn search(
        &self,
        debouncer: &SearchDebouncer,
        filters: &FilterState,
    ) -> ApplicationResult<Option<RankedCatalog>> {
        if !debouncer.settle().await {
            tracing::trace!(query = %filters.search_query, "search superseded by newer input");
            return Ok(None);
        }
        self.rank(filters).await.map(Some)
    }

    /// Ranks from loosely-typed filter input.
    ///
    /// An unknown category or sort mode yields an empty result without
    /// touching the provider.
    ///
    /// # Errors
    ///
    /// Returns an error for a provider failure or a price that cannot be
    /// converted.
    pub async fn rank_query(&self, query: &FilterQuery) -> ApplicationResult<RankedCatalog> {
        match query.resolve() {
            Some(filters) => self.rank(&filters).await,
            None => self.engine.rank_query(&[], query),
        }
    }

    /// Opens the detail view of a listing.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the listing does not exist, or an error
    /// if the provider fails.
    pub async fn view_details(&self, id: &ListingId) -> ApplicationResult<PartnerListing> {
        let listing = self.provider.get(id).await?;

        self.tracker.record(TrackingEvent::ViewDetails {
            listing_id: listing.id().clone(),
            category: listing.category(),
        });
        Ok(listing)
    }

    /// Reports a filter control change.
    pub fn filter_changed(&self, category: Category, filter: &str, value: impl fmt::Display) {
        self.tracker
            .record(TrackingEvent::filter_change(category, filter, value));
    }

    /// Reports a display currency change. Reselecting the same currency is
    /// not reported.
    pub fn currency_changed(&self, from: Currency, to: Currency) {
        if from != to {
            self.tracker.record(TrackingEvent::CurrencyChange { from, to });
        }
    }
}
