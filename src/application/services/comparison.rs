//! # Comparison Service
//!
//! Compare-selection workflow and the side-by-side comparison table.
//!
//! Selections are persisted through a [`SelectionStore`] keyed by session,
//! so a selection survives navigation. Adding a fourth listing is silently
//! ignored; switching category clears the selection.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::ranking_engine::RankedCatalog;
use crate::application::services::ranking_strategy::RankedListing;
use crate::domain::entities::compare_selection::{
    CompareSelection, MAX_COMPARE_SELECTION, ToggleOutcome,
};
use crate::domain::value_objects::{Category, ListingId, SessionId};
use crate::infrastructure::persistence::SelectionStore;
use crate::infrastructure::tracking::{CompareAction, ComparisonTracker, TrackingEvent};
use serde::Serialize;
use std::sync::Arc;

/// One listing in a comparison table, with its "best" highlights.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonColumn {
    /// The compared listing.
    pub listing: RankedListing,
    /// Cheapest of the compared listings.
    pub best_price: bool,
    /// Highest rated of the compared listings.
    pub best_rating: bool,
    /// Most features of the compared listings.
    pub most_features: bool,
}

/// Side-by-side view of two or three listings.
///
/// Ties highlight every tied listing.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonTable {
    /// Columns in selection order.
    pub columns: Vec<ComparisonColumn>,
}

impl ComparisonTable {
    /// Builds the table for the selected listings of a ranking pass.
    ///
    /// Selected ids missing from `ranked` are skipped. Returns `None` when
    /// fewer than two listings remain.
    #[must_use]
    pub fn build(ranked: &RankedCatalog, selection: &CompareSelection) -> Option<Self> {
        let listings: Vec<&RankedListing> = selection
            .ids()
            .iter()
            .filter_map(|id| ranked.get(id))
            .collect();
        Self::from_listings(&listings)
    }

    /// Builds the table from already ranked listings.
    ///
    /// Returns `None` when fewer than two listings are given.
    #[must_use]
    pub fn from_listings(listings: &[&RankedListing]) -> Option<Self> {
        if listings.len() < 2 {
            return None;
        }

        let lowest_price = listings.iter().map(|item| item.price.amount).min()?;
        let highest_rating = listings
            .iter()
            .map(|item| item.listing.rating())
            .max_by(f64::total_cmp)?;
        let most_features = listings
            .iter()
            .map(|item| item.listing.features().len())
            .max()?;

        let columns = listings
            .iter()
            .map(|item| ComparisonColumn {
                listing: (*item).clone(),
                best_price: item.price.amount == lowest_price,
                best_rating: item.listing.rating() == highest_rating,
                most_features: item.listing.features().len() == most_features,
            })
            .collect();
        Some(Self { columns })
    }

    /// Returns the number of compared listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the table has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Drives compare selections for browsing sessions.
#[derive(Debug, Clone)]
pub struct ComparisonService {
    store: Arc<dyn SelectionStore>,
    tracker: Arc<dyn ComparisonTracker>,
    max_selected: usize,
}

impl ComparisonService {
    /// Creates a service with the default selection cap.
    #[must_use]
    pub fn new(store: Arc<dyn SelectionStore>, tracker: Arc<dyn ComparisonTracker>) -> Self {
        Self {
            store,
            tracker,
            max_selected: MAX_COMPARE_SELECTION,
        }
    }

    /// Lowers the selection cap. Values above the default are clamped.
    #[must_use]
    pub fn with_max_selected(mut self, max_selected: usize) -> Self {
        self.max_selected = max_selected.clamp(1, MAX_COMPARE_SELECTION);
        self
    }

    /// Returns the selection of a session within `category`.
    ///
    /// A stored selection for another category is cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn selection(
        &self,
        session: &SessionId,
        category: Category,
    ) -> ApplicationResult<CompareSelection> {
        let stored = self.store.load(session).await?;
        let Some(mut selection) = stored else {
            return Ok(CompareSelection::with_capacity(category, self.max_selected));
        };
        if selection.switch_category(category) {
            self.store.save(session, &selection).await?;
        }
        Ok(selection)
    }

    /// Adds the listing if absent, removes it if present.
    ///
    /// Only listings of `category` shown in `current` can be added. An
    /// already selected listing can always be removed. Adding to a full
    /// selection is a no-op and is not tracked.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the listing is not in `current`, or an
    /// error if the store fails.
    pub async fn toggle(
        &self,
        session: &SessionId,
        category: Category,
        current: &RankedCatalog,
        id: ListingId,
    ) -> ApplicationResult<ToggleOutcome> {
        let mut selection = self.selection(session, category).await?;
        if !selection.contains(&id)
            && current
                .get(&id)
                .is_none_or(|item| item.listing.category() != category)
        {
            return Err(ApplicationError::validation(format!(
                "listing {id} is not in the current {category} results"
            )));
        }
        let outcome = selection.toggle(id.clone());

        let Some(action) = CompareAction::from_outcome(outcome) else {
            tracing::debug!(%session, %id, "compare selection full, ignoring");
            return Ok(outcome);
        };
        self.store.save(session, &selection).await?;
        self.tracker.record(TrackingEvent::CompareSelect {
            category,
            listing_id: id,
            action,
        });
        Ok(outcome)
    }

    /// Moves a session to another category, clearing its selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn change_category(
        &self,
        session: &SessionId,
        from: Category,
        to: Category,
    ) -> ApplicationResult<CompareSelection> {
        let selection = self.selection(session, to).await?;
        if from != to {
            self.tracker
                .record(TrackingEvent::CategoryChange { from, to });
        }
        Ok(selection)
    }

    /// Removes every selected listing of a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn clear(&self, session: &SessionId) -> ApplicationResult<()> {
        self.store.delete(session).await?;
        Ok(())
    }

    /// Builds the comparison table of a session's selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn table(
        &self,
        session: &SessionId,
        category: Category,
        ranked: &RankedCatalog,
    ) -> ApplicationResult<Option<ComparisonTable>> {
        let selection = self.selection(session, category).await?;
        Ok(ComparisonTable::build(ranked, &selection))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::application::services::ranking_engine::RankingEngine;
    use crate::domain::entities::filter::FilterState;
    use crate::domain::entities::listing::{PartnerListing, Pricing};
    use crate::domain::value_objects::{Currency, PriceUnit};
    use crate::infrastructure::persistence::in_memory::InMemorySelectionStore;
    use crate::infrastructure::tracking::RecordingTracker;
    use rust_decimal::Decimal;

    fn listing(id: &str, amount: i64, rating: f64, features: &[&str]) -> PartnerListing {
        PartnerListing::builder(
            id,
            format!("Hotel {id}"),
            Category::Hotels,
            "Luanda",
            Pricing::new(Currency::Usd, Decimal::new(amount, 0), PriceUnit::PerNight),
        )
        .rating(rating)
        .features(features.iter().copied())
        .build()
        .unwrap()
    }

    fn ranked() -> RankedCatalog {
        let catalog = vec![
            listing("a", 100, 4.5, &["Wi-Fi"]),
            listing("b", 80, 4.5, &["Wi-Fi", "Piscina"]),
            listing("c", 80, 3.9, &["Wi-Fi", "Piscina"]),
            listing("d", 120, 3.5, &[]),
        ];
        RankingEngine::default()
            .rank(&catalog, &FilterState::new(Category::Hotels))
            .unwrap()
    }

    fn service() -> (ComparisonService, RecordingTracker) {
        let tracker = RecordingTracker::new();
        let service = ComparisonService::new(
            Arc::new(InMemorySelectionStore::new()),
            Arc::new(tracker.clone()),
        );
        (service, tracker)
    }

    mod table {
        use super::*;

        fn selection(ids: &[&str]) -> CompareSelection {
            let mut selection = CompareSelection::new(Category::Hotels);
            for id in ids {
                selection.toggle(ListingId::new(*id));
            }
            selection
        }

        #[test]
        fn highlights_ties() {
            let table = ComparisonTable::build(&ranked(), &selection(&["a", "b", "c"])).unwrap();
            let flags: Vec<(bool, bool, bool)> = table
                .columns
                .iter()
                .map(|c| (c.best_price, c.best_rating, c.most_features))
                .collect();
            assert_eq!(
                flags,
                [(false, true, false), (true, true, true), (true, false, true)]
            );
        }

        #[test]
        fn keeps_selection_order() {
            let table = ComparisonTable::build(&ranked(), &selection(&["c", "a"])).unwrap();
            let ids: Vec<&str> = table
                .columns
                .iter()
                .map(|c| c.listing.listing.id().as_str())
                .collect();
            assert_eq!(ids, ["c", "a"]);
        }

        #[test]
        fn fewer_than_two_is_not_comparable() {
            assert!(ComparisonTable::build(&ranked(), &selection(&["a"])).is_none());
            assert!(ComparisonTable::build(&ranked(), &selection(&["a", "zz"])).is_none());
        }
    }

    mod workflow {
        use super::*;

        #[tokio::test]
        async fn toggle_persists_and_tracks() {
            let (service, tracker) = service();
            let session = SessionId::new("s1");
            let current = ranked();

            let added = service
                .toggle(&session, Category::Hotels, &current, ListingId::new("a"))
                .await
                .unwrap();
            assert_eq!(added, ToggleOutcome::Added);
            let selection = service.selection(&session, Category::Hotels).await.unwrap();
            assert!(selection.contains(&ListingId::new("a")));

            let removed = service
                .toggle(&session, Category::Hotels, &current, ListingId::new("a"))
                .await
                .unwrap();
            assert_eq!(removed, ToggleOutcome::Removed);
            assert_eq!(tracker.names(), ["compare_select", "compare_select"]);
        }

        #[tokio::test]
        async fn fourth_add_is_ignored_and_untracked() {
            let (service, tracker) = service();
            let session = SessionId::new("s1");
            let current = ranked();
            for id in ["a", "b", "c"] {
                service
                    .toggle(&session, Category::Hotels, &current, ListingId::new(id))
                    .await
                    .unwrap();
            }
            let outcome = service
                .toggle(&session, Category::Hotels, &current, ListingId::new("d"))
                .await
                .unwrap();

            assert_eq!(outcome, ToggleOutcome::Ignored);
            let selection = service.selection(&session, Category::Hotels).await.unwrap();
            assert_eq!(
                selection.ids(),
                [ListingId::new("a"), ListingId::new("b"), ListingId::new("c")]
            );
            assert_eq!(tracker.len(), 3);
        }

        #[tokio::test]
        async fn category_change_clears_selection() {
            let (service, tracker) = service();
            let session = SessionId::new("s1");
            let current = ranked();
            service
                .toggle(&session, Category::Hotels, &current, ListingId::new("a"))
                .await
                .unwrap();

            let selection = service
                .change_category(&session, Category::Hotels, Category::Guides)
                .await
                .unwrap();
            assert!(selection.is_empty());
            assert_eq!(selection.category(), Category::Guides);
            assert_eq!(tracker.names().last(), Some(&"category_change"));

            let reloaded = service.selection(&session, Category::Hotels).await.unwrap();
            assert!(reloaded.is_empty());
        }

        #[tokio::test]
        async fn lowered_cap() {
            let (service, _) = service();
            let service = service.with_max_selected(2);
            let session = SessionId::new("s1");
            let current = ranked();
            for id in ["a", "b"] {
                service
                    .toggle(&session, Category::Hotels, &current, ListingId::new(id))
                    .await
                    .unwrap();
            }
            let outcome = service
                .toggle(&session, Category::Hotels, &current, ListingId::new("c"))
                .await
                .unwrap();
            assert_eq!(outcome, ToggleOutcome::Ignored);
        }

        #[tokio::test]
        async fn table_for_session() {
            let (service, _) = service();
            let session = SessionId::new("s1");
            let current = ranked();
            for id in ["a", "b"] {
                service
                    .toggle(&session, Category::Hotels, &current, ListingId::new(id))
                    .await
                    .unwrap();
            }
            let table = service
                .table(&session, Category::Hotels, &current)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(table.len(), 2);

            service.clear(&session).await.unwrap();
            assert!(
                service
                    .table(&session, Category::Hotels, &current)
                    .await
                    .unwrap()
                    .is_none()
            );
        }

        #[tokio::test]
        async fn listing_outside_current_results_is_rejected() {
            let (service, tracker) = service();
            let session = SessionId::new("s1");
            let current = ranked();

            let err = service
                .toggle(&session, Category::Hotels, &current, ListingId::new("zz"))
                .await
                .unwrap_err();
            assert!(err.is_validation());
            assert!(err.to_string().contains("zz"));

            let err = service
                .toggle(&session, Category::Guides, &current, ListingId::new("a"))
                .await
                .unwrap_err();
            assert!(err.is_validation());

            assert!(tracker.is_empty());
            let selection = service.selection(&session, Category::Hotels).await.unwrap();
            assert!(selection.is_empty());
        }

        #[tokio::test]
        async fn selected_listing_can_be_removed_after_it_drops_out() {
            let (service, tracker) = service();
            let session = SessionId::new("s1");
            service
                .toggle(&session, Category::Hotels, &ranked(), ListingId::new("b"))
                .await
                .unwrap();

            let narrowed = RankingEngine::default()
                .rank(
                    &[listing("a", 100, 4.5, &["Wi-Fi"])],
                    &FilterState::new(Category::Hotels),
                )
                .unwrap();
            let outcome = service
                .toggle(&session, Category::Hotels, &narrowed, ListingId::new("b"))
                .await
                .unwrap();
            assert_eq!(outcome, ToggleOutcome::Removed);
            assert_eq!(tracker.len(), 2);
        }
    }
}
