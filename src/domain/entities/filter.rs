//! # Filter State
//!
//! User-selected criteria for one ranking pass.
//!
//! [`FilterState`] is created fresh per interaction and passed by value
//! into the engine. [`FilterQuery`] is its loosely-typed boundary form, as
//! received from a UI or command line.
//!
//! # Examples
//!
//! ```
//! use tour_catalog::domain::entities::filter::FilterState;
//! use tour_catalog::domain::value_objects::{Category, ProvinceFilter, SortMode};
//!
//! let filters = FilterState::new(Category::Tourism)
//!     .with_province(ProvinceFilter::parse("Luanda"))
//!     .with_search("  Safari ")
//!     .with_sort_mode(SortMode::PriceAscending);
//!
//! assert_eq!(filters.search_needle().as_deref(), Some("  safari "));
//! ```

use crate::domain::value_objects::{Category, ProvinceFilter, SortMode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Criteria of one filter/sort pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterState {
    /// The single category being browsed.
    pub category: Category,
    /// Province restriction.
    #[serde(default)]
    pub province: ProvinceFilter,
    /// Free-text query, possibly empty.
    #[serde(default)]
    pub search_query: String,
    /// Keep only verified partners.
    #[serde(default)]
    pub certified_only: bool,
    /// Requested ordering.
    #[serde(default)]
    pub sort_mode: SortMode,
}

impl FilterState {
    /// Creates a filter for a category with every other criterion inactive
    /// and best-value ordering.
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            category,
            province: ProvinceFilter::All,
            search_query: String::new(),
            certified_only: false,
            sort_mode: SortMode::default(),
        }
    }

    /// Sets the province restriction.
    #[must_use]
    pub fn with_province(mut self, province: ProvinceFilter) -> Self {
        self.province = province;
        self
    }

    /// Sets the free-text query.
    #[must_use]
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    /// Restricts the pass to certified partners.
    #[must_use]
    pub fn certified_only(mut self, certified_only: bool) -> Self {
        self.certified_only = certified_only;
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub fn with_sort_mode(mut self, sort_mode: SortMode) -> Self {
        self.sort_mode = sort_mode;
        self
    }

    /// Returns true if the search predicate is active.
    #[inline]
    #[must_use]
    pub fn has_search(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    /// Returns the lowercased query to match against, if the search is active.
    ///
    /// Blank input disables the search; otherwise the query is matched as
    /// typed, surrounding whitespace included.
    #[must_use]
    pub fn search_needle(&self) -> Option<String> {
        self.has_search().then(|| self.search_query.to_lowercase())
    }
}

/// Loosely-typed filter input as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterQuery {
    /// Category identifier.
    pub category: String,
    /// Province label or the "all provinces" sentinel.
    #[serde(default)]
    pub province: Option<String>,
    /// Free-text query.
    #[serde(default)]
    pub search: Option<String>,
    /// Keep only verified partners.
    #[serde(default)]
    pub certified_only: bool,
    /// Sort identifier (`price-asc`, `price-desc`, `rating`, `value`, ...).
    #[serde(default)]
    pub sort: Option<String>,
}

impl FilterQuery {
    /// Returns the requested sort mode.
    ///
    /// A missing or blank identifier selects the default mode; an unknown
    /// one yields `None`.
    #[must_use]
    pub fn sort_mode(&self) -> Option<SortMode> {
        match self.sort.as_deref() {
            Some(sort) if !sort.trim().is_empty() => sort.parse().ok(),
            _ => Some(SortMode::default()),
        }
    }

    /// Resolves the query into a typed filter.
    ///
    /// Returns `None` when the category or the sort mode is unknown. Such a
    /// filter matches no listing.
    #[must_use]
    pub fn resolve(&self) -> Option<FilterState> {
        let category = self.category.parse::<Category>().ok()?;
        let sort_mode = self.sort_mode()?;
        Some(FilterState {
            category,
            province: self
                .province
                .as_deref()
                .map(ProvinceFilter::parse)
                .unwrap_or_default(),
            search_query: self.search.clone().unwrap_or_default(),
            certified_only: self.certified_only,
            sort_mode,
        })
    }
}
