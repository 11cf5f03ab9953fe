//! # tour-catalog
//!
//! Partner catalog engine for a national tourism platform: filters a
//! category snapshot, scores each listing for best value against the
//! filtered set, sorts it, and renders prices in USD, Kz or EUR.
//!
//! # Architecture
//!
//! - [`domain`]: listings, filters, compare selection and the value scorer
//! - [`application`]: ranking engine, currency service, comparison workflow
//! - [`infrastructure`]: storage ports, backend ingestion, tracking,
//!   configuration and telemetry
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use tour_catalog::application::services::RankingEngine;
//! use tour_catalog::domain::entities::{FilterState, PartnerListing, Pricing};
//! use tour_catalog::domain::value_objects::{Category, Currency, PriceUnit, SortMode};
//!
//! let catalog = vec![
//!     PartnerListing::builder(
//!         "1",
//!         "Hotel Baía",
//!         Category::Hotels,
//!         "Luanda",
//!         Pricing::new(Currency::Usd, Decimal::new(120, 0), PriceUnit::PerNight),
//!     )
//!     .rating(4.6)
//!     .build()?,
//! ];
//!
//! let filters = FilterState::new(Category::Hotels).with_sort_mode(SortMode::BestValue);
//! let ranked = RankingEngine::default().rank(&catalog, &filters)?;
//! assert_eq!(ranked.len(), 1);
//! assert!(ranked.items[0].recommended);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
