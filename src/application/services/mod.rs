//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`RankingEngine`]: filter, score and sort one catalog snapshot
//! - [`RankingStrategy`]: one ordering per sort mode
//! - [`CurrencyConverter`]: exchange rates and locale formatting
//! - [`ComparisonService`]: compare selections and the comparison table
//! - [`CatalogService`]: provider, engine and tracker wired together

pub mod catalog;
pub mod comparison;
pub mod currency;
pub mod ranking_engine;
pub mod ranking_strategy;

pub use catalog::{CatalogService, SearchDebouncer};
pub use comparison::{ComparisonColumn, ComparisonService, ComparisonTable};
pub use currency::{
    CurrencyConverter, CurrencyError, CurrencyResult, ExchangeRateTable, PriceDisplay,
};
pub use ranking_engine::{RankedCatalog, RankingEngine};
pub use ranking_strategy::{
    BestValueStrategy, PriceStrategy, RankedListing, RankingStrategy, RatingStrategy,
    strategy_for,
};
