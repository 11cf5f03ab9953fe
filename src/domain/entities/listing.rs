//! # Partner Listing Entity
//!
//! A single partner service offering shown in the directory and
//! comparison views.
//!
//! Listings are owned and mutated by the external backend. The engine only
//! reads an immutable snapshot of them for the duration of one pass.
//!
//! # Examples
//!
//! ```
//! use tour_catalog::domain::entities::listing::{PartnerListing, Pricing};
//! use tour_catalog::domain::value_objects::{Availability, Category, Currency, PriceUnit};
//! use rust_decimal::Decimal;
//!
//! let listing = PartnerListing::builder(
//!     "1",
//!     "Angola Experience Tours",
//!     Category::Tourism,
//!     "Luanda",
//!     Pricing::new(Currency::Usd, Decimal::new(180, 0), PriceUnit::PerPerson)
//!         .with_original(Decimal::new(220, 0))
//!         .with_discount(18.0),
//! )
//! .certified(true)
//! .rating(4.8)
//! .availability(Availability::High)
//! .build()
//! .unwrap();
//!
//! assert!(listing.is_certified());
//! assert_eq!(listing.pricing().discount_percent(), Some(18.0));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    Availability, CancellationPolicy, Category, Currency, ListingId, PriceUnit,
};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest rating a listing may carry.
pub const MAX_RATING: f64 = 5.0;

/// Number of features shown on a card before the overflow counter.
pub const VISIBLE_FEATURES: usize = 3;

/// Canonical price of a listing.
///
/// `original_amount` and `discount_percent` are display hints. When they are
/// inconsistent with `amount` they are shown as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "PricingRecord")]
pub struct Pricing {
    /// Currency the amount is stored in.
    currency: Currency,
    /// Canonical price, never negative.
    #[schemars(with = "String")]
    amount: Decimal,
    /// What the price is charged per.
    unit: PriceUnit,
    /// Pre-discount price shown struck through.
    #[schemars(with = "Option<String>")]
    original_amount: Option<Decimal>,
    /// Advertised discount, `0..=100`.
    discount_percent: Option<f64>,
}

impl Pricing {
    /// Creates a pricing without discount information.
    #[must_use]
    pub fn new(currency: Currency, amount: Decimal, unit: PriceUnit) -> Self {
        Self {
            currency,
            amount,
            unit,
            original_amount: None,
            discount_percent: None,
        }
    }

    /// Sets the struck-through original amount.
    #[must_use]
    pub fn with_original(mut self, original: Decimal) -> Self {
        self.original_amount = Some(original);
        self
    }

    /// Sets the advertised discount percentage.
    #[must_use]
    pub fn with_discount(mut self, percent: f64) -> Self {
        self.discount_percent = Some(percent);
        self
    }

    /// Returns the currency the amount is stored in.
    #[inline]
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the canonical amount.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the price unit.
    #[inline]
    #[must_use]
    pub const fn unit(&self) -> PriceUnit {
        self.unit
    }

    /// Returns the original amount, if any.
    #[inline]
    #[must_use]
    pub const fn original_amount(&self) -> Option<Decimal> {
        self.original_amount
    }

    /// Returns the discount percentage, if any.
    #[inline]
    #[must_use]
    pub const fn discount_percent(&self) -> Option<f64> {
        self.discount_percent
    }

    fn validate(&self) -> DomainResult<()> {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(DomainError::InvalidPrice(format!(
                "amount must not be negative, got {}",
                self.amount
            )));
        }
        if let Some(original) = self.original_amount
            && original.is_sign_negative()
            && !original.is_zero()
        {
            return Err(DomainError::InvalidPrice(format!(
                "original amount must not be negative, got {original}"
            )));
        }
        if let Some(discount) = self.discount_percent
            && !(discount.is_finite() && (0.0..=100.0).contains(&discount))
        {
            return Err(DomainError::InvalidDiscount(discount));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct PricingRecord {
    currency: Currency,
    amount: Decimal,
    unit: PriceUnit,
    original_amount: Option<Decimal>,
    discount_percent: Option<f64>,
}

impl TryFrom<PricingRecord> for Pricing {
    type Error = DomainError;

    fn try_from(record: PricingRecord) -> DomainResult<Self> {
        let pricing = Self {
            currency: record.currency,
            amount: record.amount,
            unit: record.unit,
            original_amount: record.original_amount,
            discount_percent: record.discount_percent,
        };
        pricing.validate()?;
        Ok(pricing)
    }
}

/// A partner service offering.
///
/// # Invariants
///
/// - `id` and `name` are not empty
/// - `rating` is finite and within `0.0..=5.0`
/// - `pricing.amount` is not negative
/// - `pricing.discount_percent`, when present, is within `0..=100`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "ListingRecord")]
pub struct PartnerListing {
    id: ListingId,
    name: String,
    category: Category,
    province: String,
    certified: bool,
    rating: f64,
    description: String,
    pricing: Pricing,
    features: Vec<String>,
    availability: Availability,
    response_time: Option<String>,
    cancellation_policy: Option<CancellationPolicy>,
    link: Option<String>,
}

impl PartnerListing {
    /// Returns a builder for a listing.
    #[must_use]
    pub fn builder(
        id: impl Into<ListingId>,
        name: impl Into<String>,
        category: Category,
        province: impl Into<String>,
        pricing: Pricing,
    ) -> PartnerListingBuilder {
        PartnerListingBuilder::new(id, name, category, province, pricing)
    }

    /// Returns the listing id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ListingId {
        &self.id
    }

    /// Returns the partner name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the category.
    #[inline]
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the province label.
    #[inline]
    #[must_use]
    pub fn province(&self) -> &str {
        &self.province
    }

    /// Returns true if the partner is verified.
    #[inline]
    #[must_use]
    pub const fn is_certified(&self) -> bool {
        self.certified
    }

    /// Returns the rating, `0.0..=5.0`.
    #[inline]
    #[must_use]
    pub const fn rating(&self) -> f64 {
        self.rating
    }

    /// Returns the description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the pricing.
    #[inline]
    #[must_use]
    pub const fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    /// Returns all features in order.
    #[inline]
    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Returns the features shown on a card.
    #[must_use]
    pub fn visible_features(&self) -> &[String] {
        self.features
            .get(..VISIBLE_FEATURES)
            .unwrap_or(&self.features)
    }

    /// Returns how many features are hidden behind the overflow counter.
    #[must_use]
    pub fn hidden_feature_count(&self) -> usize {
        self.features.len().saturating_sub(VISIBLE_FEATURES)
    }

    /// Returns the availability tier.
    #[inline]
    #[must_use]
    pub const fn availability(&self) -> Availability {
        self.availability
    }

    /// Returns the response time label, if any.
    #[inline]
    #[must_use]
    pub fn response_time(&self) -> Option<&str> {
        self.response_time.as_deref()
    }

    /// Returns the cancellation policy, if any.
    #[inline]
    #[must_use]
    pub const fn cancellation_policy(&self) -> Option<CancellationPolicy> {
        self.cancellation_policy
    }

    /// Returns the partner's external link, if configured.
    #[inline]
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    fn validate(&self) -> DomainResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(DomainError::MissingField("id"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingField("name"));
        }
        if !(self.rating.is_finite() && (0.0..=MAX_RATING).contains(&self.rating)) {
            return Err(DomainError::InvalidRating(self.rating));
        }
        self.pricing.validate()
    }
}

/// Wire form of a listing before its invariants are checked.
#[derive(Deserialize)]
struct ListingRecord {
    id: ListingId,
    name: String,
    category: Category,
    province: String,
    certified: bool,
    rating: f64,
    description: String,
    pricing: Pricing,
    features: Vec<String>,
    availability: Availability,
    response_time: Option<String>,
    cancellation_policy: Option<CancellationPolicy>,
    link: Option<String>,
}

impl TryFrom<ListingRecord> for PartnerListing {
    type Error = DomainError;

    fn try_from(record: ListingRecord) -> DomainResult<Self> {
        let listing = Self {
            id: record.id,
            name: record.name,
            category: record.category,
            province: record.province,
            certified: record.certified,
            rating: record.rating,
            description: record.description,
            pricing: record.pricing,
            features: record.features,
            availability: record.availability,
            response_time: record.response_time,
            cancellation_policy: record.cancellation_policy,
            link: record.link,
        };
        listing.validate()?;
        Ok(listing)
    }
}

impl fmt::Display for PartnerListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Listing({} {} [{}] {} {} {})",
            self.id,
            self.name,
            self.category,
            self.province,
            self.pricing.amount,
            self.pricing.currency
        )
    }
}

/// Builder for [`PartnerListing`].
#[derive(Debug, Clone)]
pub struct PartnerListingBuilder {
    listing: PartnerListing,
}

impl PartnerListingBuilder {
    /// Creates a builder with the required fields.
    ///
    /// Defaults: not certified, rating 0, empty description and features,
    /// medium availability.
    #[must_use]
    pub fn new(
        id: impl Into<ListingId>,
        name: impl Into<String>,
        category: Category,
        province: impl Into<String>,
        pricing: Pricing,
    ) -> Self {
        Self {
            listing: PartnerListing {
                id: id.into(),
                name: name.into(),
                category,
                province: province.into(),
                certified: false,
                rating: 0.0,
                description: String::new(),
                pricing,
                features: Vec::new(),
                availability: Availability::Medium,
                response_time: None,
                cancellation_policy: None,
                link: None,
            },
        }
    }

    /// Sets the certification flag.
    #[must_use]
    pub fn certified(mut self, certified: bool) -> Self {
        self.listing.certified = certified;
        self
    }

    /// Sets the rating.
    #[must_use]
    pub fn rating(mut self, rating: f64) -> Self {
        self.listing.rating = rating;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.listing.description = description.into();
        self
    }

    /// Sets the features.
    #[must_use]
    pub fn features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.listing.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the availability tier.
    #[must_use]
    pub fn availability(mut self, availability: Availability) -> Self {
        self.listing.availability = availability;
        self
    }

    /// Sets the response time label.
    #[must_use]
    pub fn response_time(mut self, response_time: impl Into<String>) -> Self {
        self.listing.response_time = Some(response_time.into());
        self
    }

    /// Sets the cancellation policy.
    #[must_use]
    pub fn cancellation_policy(mut self, policy: CancellationPolicy) -> Self {
        self.listing.cancellation_policy = Some(policy);
        self
    }

    /// Sets the external link.
    #[must_use]
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.listing.link = Some(link.into());
        self
    }

    /// Validates and builds the listing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` for an empty id or name,
    /// `DomainError::InvalidRating` for a rating outside `0.0..=5.0`,
    /// `DomainError::InvalidPrice` for a negative amount and
    /// `DomainError::InvalidDiscount` for a discount outside `0..=100`.
    pub fn build(self) -> DomainResult<PartnerListing> {
        self.listing.validate()?;
        Ok(self.listing)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn pricing(amount: i64) -> Pricing {
        Pricing::new(Currency::Usd, Decimal::new(amount, 0), PriceUnit::PerNight)
    }

    fn builder() -> PartnerListingBuilder {
        PartnerListing::builder("h1", "Hotel Presidente", Category::Hotels, "Luanda", pricing(150))
    }

    mod construction {
        use super::*;

        #[test]
        fn builder_defaults() {
            let listing = builder().build().unwrap();
            assert!(!listing.is_certified());
            assert_eq!(listing.availability(), Availability::Medium);
            assert!(listing.response_time().is_none());
            assert!(listing.link().is_none());
            assert!(listing.features().is_empty());
        }

        #[test]
        fn builder_sets_optional_fields() {
            let listing = builder()
                .certified(true)
                .rating(4.6)
                .description("Vista para a baía")
                .response_time("< 2 horas")
                .cancellation_policy(CancellationPolicy::Flexible)
                .link("https://example.ao/presidente")
                .build()
                .unwrap();
            assert!(listing.is_certified());
            assert_eq!(listing.response_time(), Some("< 2 horas"));
            assert_eq!(
                listing.cancellation_policy(),
                Some(CancellationPolicy::Flexible)
            );
            assert_eq!(listing.link(), Some("https://example.ao/presidente"));
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn rejects_rating_above_five() {
            let err = builder().rating(5.1).build().unwrap_err();
            assert_eq!(err, DomainError::InvalidRating(5.1));
        }

        #[test]
        fn rejects_nan_rating() {
            assert!(matches!(
                builder().rating(f64::NAN).build(),
                Err(DomainError::InvalidRating(_))
            ));
        }

        #[test]
        fn rejects_negative_amount() {
            let listing =
                PartnerListing::builder("x", "X", Category::Hotels, "Luanda", pricing(-1)).build();
            assert!(matches!(listing, Err(DomainError::InvalidPrice(_))));
        }

        #[test]
        fn zero_amount_is_valid() {
            assert!(
                PartnerListing::builder("x", "X", Category::Culture, "Luanda", pricing(0))
                    .build()
                    .is_ok()
            );
        }

        #[test]
        fn rejects_discount_over_hundred() {
            let listing = PartnerListing::builder(
                "x",
                "X",
                Category::Hotels,
                "Luanda",
                pricing(10).with_discount(101.0),
            )
            .build();
            assert_eq!(listing.unwrap_err(), DomainError::InvalidDiscount(101.0));
        }

        #[test]
        fn inconsistent_original_is_kept_as_given() {
            let listing = PartnerListing::builder(
                "x",
                "X",
                Category::Hotels,
                "Luanda",
                pricing(200).with_original(Decimal::new(150, 0)).with_discount(10.0),
            )
            .build()
            .unwrap();
            assert_eq!(listing.pricing().original_amount(), Some(Decimal::new(150, 0)));
        }

        #[test]
        fn rejects_blank_name() {
            let listing =
                PartnerListing::builder("x", "  ", Category::Hotels, "Luanda", pricing(1)).build();
            assert_eq!(listing.unwrap_err(), DomainError::MissingField("name"));
        }
    }

    mod deserialization {
        use super::*;
        use serde_json::{Value, json};

        fn valid_json() -> Value {
            serde_json::to_value(
                builder()
                    .rating(4.2)
                    .features(["Wi-Fi"])
                    .build()
                    .unwrap(),
            )
            .unwrap()
        }

        fn load(value: Value) -> Result<PartnerListing, serde_json::Error> {
            serde_json::from_value(value)
        }

        #[test]
        fn valid_listing_loads() {
            let listing = load(valid_json()).unwrap();
            assert_eq!(listing.id().as_str(), "h1");
            assert_eq!(listing.rating(), 4.2);
        }

        #[test]
        fn rejects_empty_id() {
            let mut value = valid_json();
            value["id"] = json!("");
            let err = load(value).unwrap_err();
            assert!(err.to_string().contains("id"));
        }

        #[test]
        fn rejects_blank_name() {
            let mut value = valid_json();
            value["name"] = json!("   ");
            assert!(load(value).is_err());
        }

        #[test]
        fn rejects_out_of_range_rating() {
            let mut value = valid_json();
            value["rating"] = json!(42.0);
            let err = load(value).unwrap_err();
            assert!(err.to_string().contains("42"));
        }

        #[test]
        fn rejects_negative_amount() {
            let mut value = valid_json();
            value["pricing"]["amount"] = json!("-5");
            assert!(load(value).is_err());
        }

        #[test]
        fn rejects_negative_original_amount() {
            let mut value = valid_json();
            value["pricing"]["original_amount"] = json!("-1");
            assert!(load(value).is_err());
        }

        #[test]
        fn rejects_discount_over_hundred() {
            let mut value = valid_json();
            value["pricing"]["discount_percent"] = json!(500.0);
            assert!(load(value).is_err());
        }

        #[test]
        fn pricing_alone_is_validated() {
            let pricing: Result<Pricing, _> = serde_json::from_value(json!({
                "currency": "USD",
                "amount": "-5",
                "unit": "per_night",
                "original_amount": null,
                "discount_percent": null,
            }));
            assert!(pricing.is_err());
        }
    }

    mod features {
        use super::*;

        #[test]
        fn shows_first_three_and_counts_the_rest() {
            let listing = builder()
                .features(["Wi-Fi", "Piscina", "Spa", "Ginásio", "Restaurante"])
                .build()
                .unwrap();
            assert_eq!(listing.visible_features(), ["Wi-Fi", "Piscina", "Spa"]);
            assert_eq!(listing.hidden_feature_count(), 2);
        }

        #[test]
        fn short_feature_list_has_no_overflow() {
            let listing = builder().features(["Wi-Fi"]).build().unwrap();
            assert_eq!(listing.visible_features(), ["Wi-Fi"]);
            assert_eq!(listing.hidden_feature_count(), 0);
        }
    }
}
