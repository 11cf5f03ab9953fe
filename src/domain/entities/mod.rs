//! # Domain Entities
//!
//! Records the engine reads and the state it helps the UI keep.
//!
//! ## Entities
//!
//! - [`PartnerListing`]: a partner service offering (read-only snapshot)
//! - [`FilterState`]: criteria of one ranking pass
//! - [`CompareSelection`]: capped side list for side-by-side comparison

pub mod compare_selection;
pub mod filter;
pub mod listing;

pub use compare_selection::{CompareSelection, MAX_COMPARE_SELECTION, ToggleOutcome};
pub use filter::{FilterQuery, FilterState};
pub use listing::{MAX_RATING, PartnerListing, PartnerListingBuilder, Pricing, VISIBLE_FEATURES};
