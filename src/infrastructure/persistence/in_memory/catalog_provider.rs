//! # In-Memory Catalog Provider
//!
//! In-memory implementation of [`CatalogProvider`].
//!
//! Listings are kept in insertion order, which is the order the engine
//! preserves for ties.

use crate::domain::entities::listing::PartnerListing;
use crate::domain::value_objects::{Category, ListingId};
use crate::infrastructure::persistence::traits::{
    CatalogProvider, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`CatalogProvider`].
#[derive(Debug, Clone)]
pub struct InMemoryCatalogProvider {
    storage: Arc<RwLock<Vec<PartnerListing>>>,
}

impl InMemoryCatalogProvider {
    /// Creates a new empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a provider holding a snapshot.
    ///
    /// Listings whose id was already seen are skipped.
    #[must_use]
    pub fn from_listings(listings: impl IntoIterator<Item = PartnerListing>) -> Self {
        let mut unique: Vec<PartnerListing> = Vec::new();
        for listing in listings {
            if unique.iter().any(|kept| kept.id() == listing.id()) {
                tracing::warn!(id = %listing.id(), "skipping duplicate listing");
                continue;
            }
            unique.push(listing);
        }
        Self {
            storage: Arc::new(RwLock::new(unique)),
        }
    }

    /// Adds a listing at the end of the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Duplicate`] if the id is already present.
    pub async fn insert(&self, listing: PartnerListing) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        if storage.iter().any(|kept| kept.id() == listing.id()) {
            return Err(RepositoryError::duplicate(
                "PartnerListing",
                listing.id().as_str(),
            ));
        }
        storage.push(listing);
        Ok(())
    }

    /// Replaces the whole snapshot.
    pub async fn replace(&self, listings: Vec<PartnerListing>) {
        let mut storage = self.storage.write().await;
        *storage = listings;
    }

    /// Returns the number of listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if the provider is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all listings.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }
}

impl Default for InMemoryCatalogProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalogProvider {
    async fn fetch_category(&self, category: Category) -> RepositoryResult<Vec<PartnerListing>> {
        let storage = self.storage.read().await;
        Ok(storage
            .iter()
            .filter(|listing| listing.category() == category)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &ListingId) -> RepositoryResult<PartnerListing> {
        let storage = self.storage.read().await;
        storage
            .iter()
            .find(|listing| listing.id() == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("PartnerListing", id.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::listing::Pricing;
    use crate::domain::value_objects::{Currency, PriceUnit};
    use rust_decimal::Decimal;

    fn listing(id: &str, category: Category) -> PartnerListing {
        PartnerListing::builder(
            id,
            format!("Partner {id}"),
            category,
            "Luanda",
            Pricing::new(Currency::Usd, Decimal::new(50, 0), PriceUnit::PerPerson),
        )
        .build()
        .unwrap()
    }

    #[tokio::test]
    async fn new_provider_is_empty() {
        let provider = InMemoryCatalogProvider::new();
        assert!(provider.is_empty());
        assert!(provider.fetch_category(Category::Hotels).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_category_keeps_order() {
        let provider = InMemoryCatalogProvider::from_listings([
            listing("1", Category::Hotels),
            listing("2", Category::Tourism),
            listing("3", Category::Hotels),
        ]);
        let hotels = provider.fetch_category(Category::Hotels).await.unwrap();
        let ids: Vec<&str> = hotels.iter().map(|l| l.id().as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert!(provider.fetch_category(Category::Guides).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn from_listings_keeps_first_duplicate() {
        let provider = InMemoryCatalogProvider::from_listings([
            listing("1", Category::Hotels),
            listing("1", Category::Tourism),
        ]);
        assert_eq!(provider.len(), 1);
        let kept = provider.get(&ListingId::new("1")).await.unwrap();
        assert_eq!(kept.category(), Category::Hotels);
    }

    #[tokio::test]
    async fn insert_rejects_duplicates() {
        let provider = InMemoryCatalogProvider::new();
        provider.insert(listing("1", Category::Culture)).await.unwrap();
        let err = provider
            .insert(listing("1", Category::Culture))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let provider = InMemoryCatalogProvider::from_listings([listing("1", Category::Hotels)]);
        let err = provider.get(&ListingId::new("x")).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("x"));
    }

    #[tokio::test]
    async fn replace_and_clear() {
        let provider = InMemoryCatalogProvider::from_listings([listing("1", Category::Guides)]);
        provider
            .replace(vec![listing("2", Category::Guides), listing("3", Category::Guides)])
            .await;
        assert_eq!(provider.len(), 2);
        provider.clear().await;
        assert!(provider.is_empty());
    }
}
