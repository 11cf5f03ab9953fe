//! # In-Memory Adapters
//!
//! In-memory implementations of the persistence ports, for tests, the
//! command-line tools and single-process deployments.
//!
//! - [`InMemoryCatalogProvider`]: catalog snapshot in insertion order
//! - [`InMemorySelectionStore`]: compare selections per session
//!
//! ## Thread Safety
//!
//! The catalog uses `Arc<RwLock<Vec>>`, the selection store a `DashMap`.

pub mod catalog_provider;
pub mod selection_store;

pub use catalog_provider::InMemoryCatalogProvider;
pub use selection_store::InMemorySelectionStore;
