//! # Compare Selection
//!
//! The side list of listings picked for side-by-side comparison.
//!
//! A selection belongs to one category and holds at most
//! [`MAX_COMPARE_SELECTION`] listing ids. Adding beyond the cap is a silent
//! no-op, and moving to another category clears it.
//!
//! # Examples
//!
//! ```
//! use tour_catalog::domain::entities::compare_selection::{CompareSelection, ToggleOutcome};
//! use tour_catalog::domain::value_objects::{Category, ListingId};
//!
//! let mut selection = CompareSelection::new(Category::Hotels);
//! for id in ["a", "b", "c"] {
//!     assert_eq!(selection.toggle(ListingId::new(id)), ToggleOutcome::Added);
//! }
//! assert_eq!(selection.toggle(ListingId::new("d")), ToggleOutcome::Ignored);
//! assert_eq!(selection.len(), 3);
//! ```

use crate::domain::value_objects::{Category, ListingId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of listings compared side by side.
pub const MAX_COMPARE_SELECTION: usize = 3;

/// Result of toggling a listing in a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    /// The listing was added.
    Added,
    /// The listing was already selected and has been removed.
    Removed,
    /// The selection was full; nothing changed.
    Ignored,
}

impl fmt::Display for ToggleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "add"),
            Self::Removed => write!(f, "remove"),
            Self::Ignored => write!(f, "ignored"),
        }
    }
}

/// Ordered, capped set of listing ids within one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectionRecord")]
pub struct CompareSelection {
    category: Category,
    ids: Vec<ListingId>,
    capacity: usize,
}

/// Stored form of a selection, normalized through [`CompareSelection::toggle`]
/// when loaded.
#[derive(Deserialize)]
struct SelectionRecord {
    category: Category,
    #[serde(default)]
    ids: Vec<ListingId>,
    #[serde(default = "default_capacity")]
    capacity: usize,
}

const fn default_capacity() -> usize {
    MAX_COMPARE_SELECTION
}

impl From<SelectionRecord> for CompareSelection {
    fn from(record: SelectionRecord) -> Self {
        let mut selection = Self::with_capacity(record.category, record.capacity);
        for id in record.ids {
            if !selection.contains(&id) {
                selection.toggle(id);
            }
        }
        selection
    }
}

impl CompareSelection {
    /// Creates an empty selection with the default cap.
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self::with_capacity(category, MAX_COMPARE_SELECTION)
    }

    /// Creates an empty selection with a lower cap.
    ///
    /// The cap never exceeds [`MAX_COMPARE_SELECTION`] and is at least 1.
    #[must_use]
    pub fn with_capacity(category: Category, capacity: usize) -> Self {
        Self {
            category,
            ids: Vec::new(),
            capacity: capacity.clamp(1, MAX_COMPARE_SELECTION),
        }
    }

    /// Adds the listing if absent, removes it if present.
    ///
    /// Adding to a full selection leaves it unchanged.
    pub fn toggle(&mut self, id: ListingId) -> ToggleOutcome {
        if let Some(position) = self.ids.iter().position(|selected| *selected == id) {
            self.ids.remove(position);
            return ToggleOutcome::Removed;
        }
        if self.is_full() {
            return ToggleOutcome::Ignored;
        }
        self.ids.push(id);
        ToggleOutcome::Added
    }

    /// Moves the selection to `category`, clearing it if the category changed.
    ///
    /// Returns true if the selection was cleared.
    pub fn switch_category(&mut self, category: Category) -> bool {
        if self.category == category {
            return false;
        }
        self.category = category;
        let had_items = !self.ids.is_empty();
        self.ids.clear();
        had_items
    }

    /// Removes every selected listing.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Returns the category the selection belongs to.
    #[inline]
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the selected ids in selection order.
    #[inline]
    #[must_use]
    pub fn ids(&self) -> &[ListingId] {
        &self.ids
    }

    /// Returns true if the listing is selected.
    #[must_use]
    pub fn contains(&self, id: &ListingId) -> bool {
        self.ids.contains(id)
    }

    /// Returns the number of selected listings.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if nothing is selected.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns true if the cap has been reached.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.capacity
    }

    /// Returns true if enough listings are selected to compare.
    #[inline]
    #[must_use]
    pub fn is_comparable(&self) -> bool {
        self.ids.len() >= 2
    }
}
