//! # Domain Services
//!
//! Pure catalog logic that doesn't naturally belong to a single entity.
//!
//! ## Services
//!
//! - [`catalog_filter::CatalogFilter`]: filter predicates of a ranking pass
//! - [`value_score::ValueScorer`]: best-value scoring over a comparison set

pub mod catalog_filter;
pub mod value_score;

pub use catalog_filter::{CatalogFilter, FilterPredicate};
pub use value_score::{PriceRange, ValueScoreBreakdown, ValueScorer};
