//! # Backend Ingestion
//!
//! Validates loosely-typed backend rows into [`PartnerListing`]s.
//!
//! Each row of a JSON array is decoded and validated on its own, so one bad
//! row never discards the rest of the snapshot. A row is rejected when:
//!
//! - it does not decode (missing `id`, non-numeric price, ...)
//! - its category, availability, price unit, currency or cancellation
//!   policy is unknown
//! - its rating is outside `0..=5`, its price negative, or its discount
//!   outside `0..=100`
//!
//! Inactive rows are skipped. When an id repeats, the first occurrence wins.
//! Missing optional fields are not errors.

use crate::domain::entities::listing::{PartnerListing, Pricing};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{
    Availability, CancellationPolicy, Category, Currency, ListingId, PriceUnit,
};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use thiserror::Error;

/// Failure to read a backend payload as a whole.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// The payload is not valid JSON.
    #[error("invalid backend payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The payload is valid JSON but not an array of rows.
    #[error("backend payload must be a JSON array, got {0}")]
    NotAnArray(&'static str),
}

/// One listing row as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BackendListingRow {
    /// Listing identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category identifier.
    pub category: String,
    /// Province label.
    pub province: String,
    /// Verified partner.
    #[serde(default)]
    pub certified: Option<bool>,
    /// Average review score.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Free text.
    #[serde(default)]
    pub description: Option<String>,
    /// Canonical price.
    #[schemars(with = "f64")]
    pub price: Decimal,
    /// Currency code of the price, dollars when absent.
    #[serde(default)]
    pub currency: Option<String>,
    /// Unit identifier (`per_night`, `per_person`, ...).
    pub price_unit: String,
    /// Pre-discount price.
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub original_price: Option<Decimal>,
    /// Advertised discount.
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    /// Feature labels.
    #[serde(default)]
    pub features: Vec<String>,
    /// `high`, `medium` or `low`.
    #[serde(default)]
    pub availability: Option<String>,
    /// Free text such as "< 1h".
    #[serde(default)]
    pub response_time: Option<String>,
    /// `flexible`, `moderate` or `strict`.
    #[serde(default)]
    pub cancellation_policy: Option<String>,
    /// External link.
    #[serde(default)]
    pub link: Option<String>,
    /// Rows explicitly marked inactive are not listed.
    #[serde(default)]
    pub active: Option<bool>,
}

impl BackendListingRow {
    /// Returns false only for rows explicitly marked inactive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl TryFrom<BackendListingRow> for PartnerListing {
    type Error = DomainError;

    fn try_from(row: BackendListingRow) -> Result<Self, Self::Error> {
        let category: Category = row.category.parse()?;
        let unit: PriceUnit = row.price_unit.parse()?;
        let currency = match non_blank(row.currency) {
            Some(code) => code.parse::<Currency>()?,
            None => Currency::Usd,
        };

        let mut pricing = Pricing::new(currency, row.price, unit);
        if let Some(original) = row.original_price {
            pricing = pricing.with_original(original);
        }
        if let Some(discount) = row.discount_percentage {
            pricing = pricing.with_discount(discount);
        }

        let mut builder =
            PartnerListing::builder(row.id, row.name, category, row.province, pricing)
                .certified(row.certified.unwrap_or(false))
                .rating(row.rating.unwrap_or(0.0))
                .features(row.features);

        if let Some(description) = row.description {
            builder = builder.description(description);
        }
        if let Some(availability) = non_blank(row.availability) {
            builder = builder.availability(availability.parse::<Availability>()?);
        }
        if let Some(response_time) = non_blank(row.response_time) {
            builder = builder.response_time(response_time);
        }
        if let Some(policy) = non_blank(row.cancellation_policy) {
            builder = builder.cancellation_policy(policy.parse::<CancellationPolicy>()?);
        }
        if let Some(link) = non_blank(row.link) {
            builder = builder.link(link);
        }
        builder.build()
    }
}

/// A row that did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    /// Position in the payload.
    pub index: usize,
    /// Row id, when it could be read.
    pub id: Option<String>,
    /// Why the row was rejected.
    pub reason: String,
}

/// Outcome of ingesting a payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestionReport {
    /// Valid listings in payload order.
    pub listings: Vec<PartnerListing>,
    /// Rows that failed to decode or validate.
    pub rejected: Vec<RejectedRow>,
    /// Ids seen more than once; later occurrences were dropped.
    pub duplicates: Vec<ListingId>,
    /// Rows skipped because they are inactive.
    pub inactive: usize,
}

impl IngestionReport {
    /// Returns true if every row was accepted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.duplicates.is_empty()
    }

    /// Returns the accepted listings.
    #[must_use]
    pub fn into_listings(self) -> Vec<PartnerListing> {
        self.listings
    }
}

/// Validates typed rows.
#[must_use]
pub fn ingest_rows(rows: impl IntoIterator<Item = BackendListingRow>) -> IngestionReport {
    let mut ingestor = Ingestor::default();
    for (index, row) in rows.into_iter().enumerate() {
        ingestor.accept(index, row);
    }
    ingestor.finish()
}

/// Decodes and validates a JSON array of rows.
///
/// # Errors
///
/// Returns an error if the payload is not JSON or not an array. Individual
/// bad rows are reported, not returned as errors.
pub fn ingest_json(payload: &str) -> Result<IngestionReport, IngestionError> {
    let value: JsonValue = serde_json::from_str(payload)?;
    let JsonValue::Array(rows) = value else {
        return Err(IngestionError::NotAnArray(json_kind(&value)));
    };

    let mut ingestor = Ingestor::default();
    for (index, raw) in rows.into_iter().enumerate() {
        let id = raw.get("id").and_then(JsonValue::as_str).map(str::to_string);
        match serde_json::from_value::<BackendListingRow>(raw) {
            Ok(row) => ingestor.accept(index, row),
            Err(e) => ingestor.reject(index, id, e.to_string()),
        }
    }
    Ok(ingestor.finish())
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[derive(Debug, Default)]
struct Ingestor {
    report: IngestionReport,
    seen: HashSet<String>,
}

impl Ingestor {
    fn accept(&mut self, index: usize, row: BackendListingRow) {
        if !row.is_active() {
            tracing::debug!(index, id = %row.id, "skipping inactive backend row");
            self.report.inactive += 1;
            return;
        }
        if self.seen.contains(&row.id) {
            tracing::warn!(index, id = %row.id, "dropping duplicate backend row");
            self.report.duplicates.push(ListingId::new(row.id));
            return;
        }

        let id = row.id.clone();
        match PartnerListing::try_from(row) {
            Ok(listing) => {
                self.seen.insert(id);
                self.report.listings.push(listing);
            }
            Err(e) => self.reject(index, Some(id), e.to_string()),
        }
    }

    fn reject(&mut self, index: usize, id: Option<String>, reason: String) {
        tracing::warn!(index, id = id.as_deref().unwrap_or("-"), %reason, "rejecting backend row");
        self.report.rejected.push(RejectedRow { index, id, reason });
    }

    fn finish(self) -> IngestionReport {
        let report = self.report;
        tracing::debug!(
            accepted = report.listings.len(),
            rejected = report.rejected.len(),
            duplicates = report.duplicates.len(),
            inactive = report.inactive,
            "backend ingestion complete"
        );
        report
    }
}
