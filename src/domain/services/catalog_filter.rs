//! # Catalog Filter
//!
//! The filter predicates of a ranking pass.
//!
//! A listing is kept when it satisfies every active predicate:
//!
//! 1. its category equals the filter category
//! 2. its province equals the selected province, unless all provinces are selected
//! 3. it is certified, when only certified partners are requested
//! 4. the lowercased query is a substring of its lowercased name, province,
//!    category, description or any feature, when a query is present
//!
//! Matching is plain substring search: no tokenization, no fuzzy matching
//! and no boost for exact matches.

use crate::domain::entities::filter::FilterState;
use crate::domain::entities::listing::PartnerListing;
use std::fmt;

/// One of the predicates a listing can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterPredicate {
    /// Category differs.
    Category,
    /// Province differs from the selected province.
    Province,
    /// Partner is not certified.
    Certification,
    /// No searchable field contains the query.
    Search,
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Province => write!(f, "province"),
            Self::Certification => write!(f, "certification"),
            Self::Search => write!(f, "search"),
        }
    }
}

/// Predicate conjunction built from a [`FilterState`].
///
/// # Examples
///
/// ```
/// use tour_catalog::domain::entities::filter::FilterState;
/// use tour_catalog::domain::entities::listing::{PartnerListing, Pricing};
/// use tour_catalog::domain::services::catalog_filter::{CatalogFilter, FilterPredicate};
/// use tour_catalog::domain::value_objects::{Category, Currency, PriceUnit};
/// use rust_decimal::Decimal;
///
/// let listing = PartnerListing::builder(
///     "3",
///     "Atlantic Safari Angola",
///     Category::Tourism,
///     "Benguela",
///     Pricing::new(Currency::Usd, Decimal::new(95, 0), PriceUnit::PerPerson),
/// )
/// .build()
/// .unwrap();
///
/// let filters = FilterState::new(Category::Tourism).with_search("SAFARI");
/// let filter = CatalogFilter::new(&filters);
/// assert!(filter.matches(&listing));
///
/// let certified = FilterState::new(Category::Tourism).certified_only(true);
/// assert_eq!(
///     CatalogFilter::new(&certified).first_violation(&listing),
///     Some(FilterPredicate::Certification)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CatalogFilter<'f> {
    filters: &'f FilterState,
    needle: Option<String>,
}

impl<'f> CatalogFilter<'f> {
    /// Prepares the predicates of `filters`.
    #[must_use]
    pub fn new(filters: &'f FilterState) -> Self {
        Self {
            filters,
            needle: filters.search_needle(),
        }
    }

    /// Returns true if the listing satisfies every active predicate.
    #[must_use]
    pub fn matches(&self, listing: &PartnerListing) -> bool {
        self.first_violation(listing).is_none()
    }

    /// Returns the first predicate the listing fails, in pipeline order.
    #[must_use]
    pub fn first_violation(&self, listing: &PartnerListing) -> Option<FilterPredicate> {
        if listing.category() != self.filters.category {
            return Some(FilterPredicate::Category);
        }
        if !self.filters.province.matches(listing.province()) {
            return Some(FilterPredicate::Province);
        }
        if self.filters.certified_only && !listing.is_certified() {
            return Some(FilterPredicate::Certification);
        }
        if let Some(needle) = &self.needle
            && !matches_search(listing, needle)
        {
            return Some(FilterPredicate::Search);
        }
        None
    }

    /// Keeps the listings that pass, preserving catalog order.
    #[must_use]
    pub fn apply<'c>(&self, catalog: &'c [PartnerListing]) -> Vec<&'c PartnerListing> {
        catalog
            .iter()
            .filter(|listing| self.matches(listing))
            .collect()
    }
}

fn matches_search(listing: &PartnerListing, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);
    contains(listing.name())
        || contains(listing.province())
        || contains(listing.category().as_str())
        || contains(listing.description())
        || listing.features().iter().any(|feature| contains(feature.as_str()))
}
