//! # Provinces
//!
//! The fixed province list and the province filter.
//!
//! Listings carry their province as the free-form label taken from
//! [`PROVINCES`]. Filters either select every province through the
//! [`ALL_PROVINCES`] sentinel or one province by exact, case-sensitive label.
//!
//! # Examples
//!
//! ```
//! use tour_catalog::domain::value_objects::province::{ProvinceFilter, ALL_PROVINCES};
//!
//! let all = ProvinceFilter::parse(ALL_PROVINCES);
//! assert!(all.matches("Namibe"));
//!
//! let luanda = ProvinceFilter::parse("Luanda");
//! assert!(luanda.matches("Luanda"));
//! assert!(!luanda.matches("luanda"));
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel label meaning "every province".
pub const ALL_PROVINCES: &str = "Todas as Províncias";

/// The eighteen provinces, in the order the directory lists them.
pub const PROVINCES: [&str; 18] = [
    "Luanda",
    "Bengo",
    "Benguela",
    "Huambo",
    "Huíla",
    "Malanje",
    "Uíge",
    "Cuanza Norte",
    "Cuanza Sul",
    "Cabinda",
    "Zaire",
    "Lunda Norte",
    "Lunda Sul",
    "Moxico",
    "Cuando Cubango",
    "Namibe",
    "Cunene",
    "Bié",
];

/// Returns true if `label` is one of [`PROVINCES`].
#[must_use]
pub fn is_known_province(label: &str) -> bool {
    PROVINCES.contains(&label)
}

/// Province selection of a filter pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "kind", content = "province")]
pub enum ProvinceFilter {
    /// No province restriction.
    #[default]
    All,
    /// Only listings whose province equals this label exactly.
    Only(String),
}

impl ProvinceFilter {
    /// Parses a filter from a UI value.
    ///
    /// The sentinel label, `all`, and blank input select every province;
    /// anything else is kept verbatim.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ALL_PROVINCES || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    /// Returns true if a listing in `province` passes this filter.
    #[inline]
    #[must_use]
    pub fn matches(&self, province: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == province,
        }
    }

    /// Returns true if no province restriction applies.
    #[inline]
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for ProvinceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_PROVINCES),
            Self::Only(province) => f.write_str(province),
        }
    }
}
