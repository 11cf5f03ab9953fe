//! # Domain Enums
//!
//! Enumeration types for catalog concepts.
//!
//! This module provides the closed enumerations used throughout the catalog:
//!
//! - [`Category`] - Partner service category (agencies, hotels, transport, ...)
//! - [`Availability`] - Booking availability tier of a listing
//! - [`PriceUnit`] - What a listed price is charged per
//! - [`CancellationPolicy`] - Partner cancellation terms
//! - [`SortMode`] - Ordering requested for a ranking pass
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits. Serialized forms match the
//! backend's lowercase/kebab identifiers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Partner service category.
///
/// The ranking engine operates over one category at a time.
///
/// # Examples
///
/// ```
/// use tour_catalog::domain::value_objects::enums::Category;
///
/// let hotels: Category = "hotels".parse().unwrap();
/// assert_eq!(hotels, Category::Hotels);
/// assert_eq!(hotels.to_string(), "hotels");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Category {
    /// Tourism agencies and tour operators.
    Tourism = 0,
    /// Hotels, lodges and other accommodation.
    Hotels = 1,
    /// Transport operators.
    Transport = 2,
    /// Cultural experiences.
    Culture = 3,
    /// Tour guides, including digital guides.
    Guides = 4,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [
        Self::Tourism,
        Self::Hotels,
        Self::Transport,
        Self::Culture,
        Self::Guides,
    ];

    /// Returns the backend identifier of this category.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tourism => "tourism",
            Self::Hotels => "hotels",
            Self::Transport => "transport",
            Self::Culture => "culture",
            Self::Guides => "guides",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tourism" | "agencies" => Ok(Self::Tourism),
            "hotels" => Ok(Self::Hotels),
            "transport" => Ok(Self::Transport),
            "culture" => Ok(Self::Culture),
            "guides" => Ok(Self::Guides),
            _ => Err(ParseEnumError::InvalidValue("Category", s.to_string())),
        }
    }
}

/// Availability tier of a listing.
///
/// Feeds the availability bonus of the value score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Availability {
    /// Plenty of open slots.
    High = 0,
    /// Limited slots.
    Medium = 1,
    /// Almost fully booked.
    Low = 2,
}

impl Availability {
    /// Returns true if the partner has plenty of open slots.
    #[inline]
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// Returns the display label.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Availability {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseEnumError::InvalidValue("Availability", s.to_string())),
        }
    }
}

/// What a listed price is charged per.
///
/// # Examples
///
/// ```
/// use tour_catalog::domain::value_objects::enums::PriceUnit;
///
/// assert_eq!(PriceUnit::PerNight.suffix(), "/night");
/// assert_eq!(PriceUnit::Fixed.suffix(), "");
/// assert_eq!("per-person".parse::<PriceUnit>().unwrap(), PriceUnit::PerPerson);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PriceUnit {
    /// Charged per night of stay.
    PerNight = 0,
    /// Charged per person.
    PerPerson = 1,
    /// Charged per trip.
    PerTrip = 2,
    /// Charged per hour.
    PerHour = 3,
    /// Flat price.
    Fixed = 4,
}

impl PriceUnit {
    /// Returns the suffix appended to a displayed price.
    #[inline]
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::PerNight => "/night",
            Self::PerPerson => "/person",
            Self::PerTrip => "/trip",
            Self::PerHour => "/hour",
            Self::Fixed => "",
        }
    }
}

impl fmt::Display for PriceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerNight => write!(f, "per_night"),
            Self::PerPerson => write!(f, "per_person"),
            Self::PerTrip => write!(f, "per_trip"),
            Self::PerHour => write!(f, "per_hour"),
            Self::Fixed => write!(f, "fixed"),
        }
    }
}

impl FromStr for PriceUnit {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "per_night" => Ok(Self::PerNight),
            "per_person" => Ok(Self::PerPerson),
            "per_trip" => Ok(Self::PerTrip),
            "per_hour" => Ok(Self::PerHour),
            "fixed" => Ok(Self::Fixed),
            _ => Err(ParseEnumError::InvalidValue("PriceUnit", s.to_string())),
        }
    }
}

/// Partner cancellation terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CancellationPolicy {
    /// Free cancellation up to short notice.
    Flexible,
    /// Partial refund.
    Moderate,
    /// No refund.
    Strict,
}

impl fmt::Display for CancellationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flexible => write!(f, "flexible"),
            Self::Moderate => write!(f, "moderate"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for CancellationPolicy {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flexible" => Ok(Self::Flexible),
            "moderate" => Ok(Self::Moderate),
            "strict" => Ok(Self::Strict),
            _ => Err(ParseEnumError::InvalidValue(
                "CancellationPolicy",
                s.to_string(),
            )),
        }
    }
}

/// Ordering requested for a ranking pass.
///
/// # Examples
///
/// ```
/// use tour_catalog::domain::value_objects::enums::SortMode;
///
/// assert_eq!(SortMode::default(), SortMode::BestValue);
/// assert_eq!("price-asc".parse::<SortMode>().unwrap(), SortMode::PriceAscending);
/// assert!(SortMode::BestValue.marks_recommended());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Cheapest first.
    PriceAscending,
    /// Most expensive first.
    PriceDescending,
    /// Highest rated first.
    RatingDescending,
    /// Highest value score first.
    #[default]
    BestValue,
}

impl SortMode {
    /// Returns true if the top item of a pass in this mode is flagged as recommended.
    #[inline]
    #[must_use]
    pub const fn marks_recommended(self) -> bool {
        matches!(self, Self::BestValue)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PriceAscending => write!(f, "price-ascending"),
            Self::PriceDescending => write!(f, "price-descending"),
            Self::RatingDescending => write!(f, "rating-descending"),
            Self::BestValue => write!(f, "best-value"),
        }
    }
}

impl FromStr for SortMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "price-ascending" | "price-asc" => Ok(Self::PriceAscending),
            "price-descending" | "price-desc" => Ok(Self::PriceDescending),
            "rating-descending" | "rating" => Ok(Self::RatingDescending),
            "best-value" | "value" => Ok(Self::BestValue),
            _ => Err(ParseEnumError::InvalidValue("SortMode", s.to_string())),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod category {
        use super::*;

        #[test]
        fn parses_backend_identifiers() {
            for category in Category::ALL {
                assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
            }
        }

        #[test]
        fn agencies_alias_maps_to_tourism() {
            assert_eq!("Agencies".parse::<Category>().unwrap(), Category::Tourism);
        }

        #[test]
        fn unknown_is_rejected() {
            let err = "spa".parse::<Category>().unwrap_err();
            assert_eq!(err, ParseEnumError::InvalidValue("Category", "spa".to_string()));
        }

        #[test]
        fn serde_lowercase() {
            let json = serde_json::to_string(&Category::Transport).unwrap();
            assert_eq!(json, "\"transport\"");
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, Category::Transport);
        }
    }

    mod availability {
        use super::*;

        #[test]
        fn labels() {
            assert_eq!(Availability::High.label(), "High");
            assert_eq!(Availability::Medium.label(), "Medium");
            assert_eq!(Availability::Low.label(), "Low");
            assert!(Availability::High.is_high());
            assert!(!Availability::Low.is_high());
        }

        #[test]
        fn from_str_case_insensitive() {
            assert_eq!("MEDIUM".parse::<Availability>().unwrap(), Availability::Medium);
            assert!("unknown".parse::<Availability>().is_err());
        }
    }

    mod price_unit {
        use super::*;

        #[test]
        fn suffixes() {
            assert_eq!(PriceUnit::PerNight.suffix(), "/night");
            assert_eq!(PriceUnit::PerPerson.suffix(), "/person");
            assert_eq!(PriceUnit::PerTrip.suffix(), "/trip");
            assert_eq!(PriceUnit::PerHour.suffix(), "/hour");
            assert_eq!(PriceUnit::Fixed.suffix(), "");
        }

        #[test]
        fn serde_snake_case() {
            let json = serde_json::to_string(&PriceUnit::PerHour).unwrap();
            assert_eq!(json, "\"per_hour\"");
        }

        #[test]
        fn from_str_accepts_kebab() {
            assert_eq!("per-trip".parse::<PriceUnit>().unwrap(), PriceUnit::PerTrip);
        }
    }

    mod sort_mode {
        use super::*;

        #[test]
        fn default_is_best_value() {
            assert_eq!(SortMode::default(), SortMode::BestValue);
        }

        #[test]
        fn short_aliases() {
            assert_eq!("price-asc".parse::<SortMode>().unwrap(), SortMode::PriceAscending);
            assert_eq!("price_desc".parse::<SortMode>().unwrap(), SortMode::PriceDescending);
            assert_eq!("rating".parse::<SortMode>().unwrap(), SortMode::RatingDescending);
            assert_eq!("value".parse::<SortMode>().unwrap(), SortMode::BestValue);
        }

        #[test]
        fn only_best_value_marks_recommended() {
            assert!(SortMode::BestValue.marks_recommended());
            assert!(!SortMode::PriceAscending.marks_recommended());
            assert!(!SortMode::PriceDescending.marks_recommended());
            assert!(!SortMode::RatingDescending.marks_recommended());
        }

        #[test]
        fn serde_kebab_case() {
            let json = serde_json::to_string(&SortMode::RatingDescending).unwrap();
            assert_eq!(json, "\"rating-descending\"");
        }
    }

    mod parse_enum_error {
        use super::*;

        #[test]
        fn display_format() {
            let err = ParseEnumError::InvalidValue("SortMode", "random".to_string());
            assert_eq!(err.to_string(), "invalid SortMode value: 'random'");
        }
    }
}
