//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`ListingId`]: backend listing identifier
//! - [`SessionId`]: browsing session owning a compare selection
//!
//! ## Domain Enums
//!
//! - [`Category`], [`Availability`], [`PriceUnit`], [`CancellationPolicy`]
//! - [`SortMode`]: ordering of a ranking pass
//! - [`Currency`]: closed set of display currencies
//!
//! ## Filters and Scores
//!
//! - [`ProvinceFilter`]: all provinces or one exact province
//! - [`ValueScore`]: derived best-value score

pub mod currency;
pub mod enums;
pub mod ids;
pub mod province;
pub mod value_score;

pub use currency::{Currency, SymbolPosition};
pub use enums::{
    Availability, CancellationPolicy, Category, ParseEnumError, PriceUnit, SortMode,
};
pub use ids::{ListingId, SessionId};
pub use province::{ALL_PROVINCES, PROVINCES, ProvinceFilter};
pub use value_score::{MAX_VALUE_SCORE, ValueScore};
