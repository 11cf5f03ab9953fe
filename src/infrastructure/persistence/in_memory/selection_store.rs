//! # In-Memory Selection Store
//!
//! In-memory implementation of [`SelectionStore`] backed by a `DashMap`.

use crate::domain::entities::compare_selection::CompareSelection;
use crate::domain::value_objects::SessionId;
use crate::infrastructure::persistence::traits::{RepositoryResult, SelectionStore};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory implementation of [`SelectionStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySelectionStore {
    selections: Arc<DashMap<SessionId, CompareSelection>>,
}

impl InMemorySelectionStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of sessions with a stored selection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Returns true if no selection is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

#[async_trait]
impl SelectionStore for InMemorySelectionStore {
    async fn load(&self, session: &SessionId) -> RepositoryResult<Option<CompareSelection>> {
        Ok(self
            .selections
            .get(session)
            .map(|entry| entry.value().clone()))
    }

    async fn save(
        &self,
        session: &SessionId,
        selection: &CompareSelection,
    ) -> RepositoryResult<()> {
        self.selections.insert(session.clone(), selection.clone());
        Ok(())
    }

    async fn delete(&self, session: &SessionId) -> RepositoryResult<bool> {
        Ok(self.selections.remove(session).is_some())
    }
}
