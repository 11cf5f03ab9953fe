//! # Comparison Tracking
//!
//! Analytics events emitted while a user browses and compares partners.
//!
//! | Event            | Emitted when                                  |
//! |------------------|-----------------------------------------------|
//! | `view_details`   | a listing's detail view is opened             |
//! | `category_change`| the category tab changes                      |
//! | `filter_change`  | province, certification or sort changes       |
//! | `search`         | a non-empty query is ranked                   |
//! | `compare_select` | a listing is added to or removed from compare |
//! | `currency_change`| the display currency changes                  |
//!
//! Every event carries a UTC timestamp. Delivery is fire-and-forget:
//! tracking never fails a user action.

use crate::domain::entities::compare_selection::ToggleOutcome;
use crate::domain::value_objects::{Category, Currency, ListingId};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Tracing target analytics events are logged under.
pub const ANALYTICS_TARGET: &str = "tour_catalog::analytics";

/// Direction of a compare selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareAction {
    /// Listing added.
    Add,
    /// Listing removed.
    Remove,
}

impl CompareAction {
    /// Maps a toggle outcome; an ignored toggle is not tracked.
    #[must_use]
    pub fn from_outcome(outcome: ToggleOutcome) -> Option<Self> {
        match outcome {
            ToggleOutcome::Added => Some(Self::Add),
            ToggleOutcome::Removed => Some(Self::Remove),
            ToggleOutcome::Ignored => None,
        }
    }
}

impl fmt::Display for CompareAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrackingEvent {
    /// Detail view opened.
    ViewDetails {
        /// Listing viewed.
        listing_id: ListingId,
        /// Its category.
        category: Category,
    },
    /// Category tab changed.
    CategoryChange {
        /// Previous category.
        from: Category,
        /// New category.
        to: Category,
    },
    /// A filter control changed.
    FilterChange {
        /// Active category.
        category: Category,
        /// Filter name (`province`, `certified_only`, `sort`).
        filter: String,
        /// New value.
        value: String,
    },
    /// A non-empty query was ranked.
    Search {
        /// Active category.
        category: Category,
        /// Query as typed.
        query: String,
        /// Number of matching listings.
        result_count: usize,
    },
    /// Compare selection changed.
    CompareSelect {
        /// Active category.
        category: Category,
        /// Listing toggled.
        listing_id: ListingId,
        /// Add or remove.
        action: CompareAction,
    },
    /// Display currency changed.
    CurrencyChange {
        /// Previous currency.
        from: Currency,
        /// New currency.
        to: Currency,
    },
}

impl TrackingEvent {
    /// Creates a search event, or `None` for a blank query.
    #[must_use]
    pub fn search(category: Category, query: &str, result_count: usize) -> Option<Self> {
        (!query.trim().is_empty()).then(|| Self::Search {
            category,
            query: query.to_string(),
            result_count,
        })
    }

    /// Creates a filter change event.
    #[must_use]
    pub fn filter_change(
        category: Category,
        filter: impl Into<String>,
        value: impl fmt::Display,
    ) -> Self {
        Self::FilterChange {
            category,
            filter: filter.into(),
            value: value.to_string(),
        }
    }

    /// Returns the event name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ViewDetails { .. } => "view_details",
            Self::CategoryChange { .. } => "category_change",
            Self::FilterChange { .. } => "filter_change",
            Self::Search { .. } => "search",
            Self::CompareSelect { .. } => "compare_select",
            Self::CurrencyChange { .. } => "currency_change",
        }
    }
}

/// An event with the time it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedEvent {
    /// What happened.
    #[serde(flatten)]
    pub event: TrackingEvent,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

impl TrackedEvent {
    /// Stamps an event with the current time.
    #[must_use]
    pub fn now(event: TrackingEvent) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
        }
    }

    /// Returns the event name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.event.name()
    }
}

/// Sink for analytics events.
pub trait ComparisonTracker: Send + Sync + fmt::Debug {
    /// Delivers a stamped event.
    fn track(&self, event: TrackedEvent);

    /// Stamps an event with the current time and delivers it.
    fn record(&self, event: TrackingEvent) {
        self.track(TrackedEvent::now(event));
    }
}

/// Logs events through `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTracker;

impl ComparisonTracker for TracingTracker {
    fn track(&self, event: TrackedEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => tracing::info!(
                target: ANALYTICS_TARGET,
                event = event.name(),
                timestamp = %event.timestamp,
                %payload,
                "analytics event"
            ),
            Err(e) => tracing::warn!(
                target: ANALYTICS_TARGET,
                event = event.name(),
                error = %e,
                "failed to serialize analytics event"
            ),
        }
    }
}

/// Keeps events in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingTracker {
    events: Arc<Mutex<Vec<TrackedEvent>>>,
}

impl RecordingTracker {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events.lock().clone()
    }

    /// Returns the recorded event names, oldest first.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(TrackedEvent::name).collect()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Forgets every recorded event.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl ComparisonTracker for RecordingTracker {
    fn track(&self, event: TrackedEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_not_an_event() {
        assert!(TrackingEvent::search(Category::Hotels, "   ", 0).is_none());
        let event = TrackingEvent::search(Category::Hotels, "Baía", 2).unwrap();
        assert_eq!(event.name(), "search");
    }

    #[test]
    fn ignored_toggle_is_not_tracked() {
        assert_eq!(CompareAction::from_outcome(ToggleOutcome::Added), Some(CompareAction::Add));
        assert_eq!(
            CompareAction::from_outcome(ToggleOutcome::Removed),
            Some(CompareAction::Remove)
        );
        assert_eq!(CompareAction::from_outcome(ToggleOutcome::Ignored), None);
    }

    #[test]
    fn serializes_with_event_tag_and_timestamp() {
        let event = TrackedEvent::now(TrackingEvent::CurrencyChange {
            from: Currency::Usd,
            to: Currency::Kz,
        });
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "currency_change");
        assert_eq!(json["from"], "USD");
        assert_eq!(json["to"], "KZ");
        assert!(json["timestamp"].is_string());

        let back: TrackedEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn recording_tracker_keeps_order() {
        let tracker = RecordingTracker::new();
        tracker.record(TrackingEvent::CategoryChange {
            from: Category::Tourism,
            to: Category::Hotels,
        });
        tracker.record(TrackingEvent::filter_change(Category::Hotels, "certified_only", true));
        assert_eq!(tracker.names(), ["category_change", "filter_change"]);

        let events = tracker.events();
        assert!(events[0].timestamp <= events[1].timestamp);
        tracker.clear();
        assert!(tracker.is_empty());
    }

    #[test]
    fn tracing_tracker_does_not_panic() {
        TracingTracker.record(TrackingEvent::ViewDetails {
            listing_id: ListingId::new("1"),
            category: Category::Culture,
        });
    }
}
