//! # Repository Traits
//!
//! Port definitions for the data the engine reads and the state it keeps.
//!
//! # Available Ports
//!
//! - [`CatalogProvider`]: read-only catalog snapshots per category
//! - [`SelectionStore`]: compare selections keyed by session
//!
//! # Examples
//!
//! ```ignore
//! use tour_catalog::domain::value_objects::Category;
//! use tour_catalog::infrastructure::persistence::traits::CatalogProvider;
//!
//! async fn hotels(provider: &impl CatalogProvider) {
//!     let listings = provider.fetch_category(Category::Hotels).await.unwrap();
//!     println!("{} hotels", listings.len());
//! }
//! ```

use crate::domain::entities::compare_selection::CompareSelection;
use crate::domain::entities::listing::PartnerListing;
use crate::domain::value_objects::{Category, ListingId, SessionId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Duplicate entity.
    #[error("Duplicate entity: {entity_type} with id {id} already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            id: id.into(),
        }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a duplicate error.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Source of catalog snapshots.
///
/// Snapshots contain no duplicate ids but may be stale relative to
/// concurrent backend writes. The engine never writes back.
#[async_trait]
pub trait CatalogProvider: Send + Sync + fmt::Debug {
    /// Fetches every listing of a category, in backend order.
    async fn fetch_category(&self, category: Category) -> RepositoryResult<Vec<PartnerListing>>;

    /// Gets one listing by id.
    ///
    /// Returns [`RepositoryError::NotFound`] if the listing does not exist.
    async fn get(&self, id: &ListingId) -> RepositoryResult<PartnerListing>;
}

/// Storage for compare selections, so a selection survives navigation.
#[async_trait]
pub trait SelectionStore: Send + Sync + fmt::Debug {
    /// Loads the selection of a session.
    ///
    /// Returns `None` if the session has no selection yet.
    async fn load(&self, session: &SessionId) -> RepositoryResult<Option<CompareSelection>>;

    /// Saves the selection of a session, replacing any previous one.
    async fn save(&self, session: &SessionId, selection: &CompareSelection)
    -> RepositoryResult<()>;

    /// Deletes the selection of a session.
    ///
    /// Returns `Ok(true)` if a selection was deleted, `Ok(false)` if none existed.
    async fn delete(&self, session: &SessionId) -> RepositoryResult<bool>;
}
