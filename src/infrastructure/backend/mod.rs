//! # Backend Boundary
//!
//! Conversion of backend records into typed catalog listings.

pub mod ingestion;

pub use ingestion::{
    BackendListingRow, IngestionError, IngestionReport, RejectedRow, ingest_json, ingest_rows,
};
