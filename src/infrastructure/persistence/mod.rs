//! # Persistence Layer
//!
//! Ports for the catalog source and compare-selection storage.
//!
//! ## Ports
//!
//! - [`CatalogProvider`]: read-only catalog snapshots
//! - [`SelectionStore`]: compare selections keyed by session
//!
//! ## Implementations
//!
//! - `in_memory`: in-process adapters

pub mod in_memory;
pub mod traits;

pub use traits::{CatalogProvider, RepositoryError, RepositoryResult, SelectionStore};
