//! Prints JSON Schemas for the catalog boundary types.
//!
//! ```text
//! export_schemas                  # every schema, keyed by type name
//! export_schemas backend-row      # one schema
//! ```

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use schemars::schema::RootSchema;
use schemars::schema_for;
use std::collections::BTreeMap;
use tour_catalog::application::services::PriceDisplay;
use tour_catalog::domain::entities::{FilterQuery, FilterState, PartnerListing};
use tour_catalog::infrastructure::backend::BackendListingRow;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemaKind {
    Listing,
    FilterQuery,
    FilterState,
    PriceDisplay,
    BackendRow,
}

impl SchemaKind {
    fn type_name(self) -> &'static str {
        match self {
            Self::Listing => "PartnerListing",
            Self::FilterQuery => "FilterQuery",
            Self::FilterState => "FilterState",
            Self::PriceDisplay => "PriceDisplay",
            Self::BackendRow => "BackendListingRow",
        }
    }

    fn schema(self) -> RootSchema {
        match self {
            Self::Listing => schema_for!(PartnerListing),
            Self::FilterQuery => schema_for!(FilterQuery),
            Self::FilterState => schema_for!(FilterState),
            Self::PriceDisplay => schema_for!(PriceDisplay),
            Self::BackendRow => schema_for!(BackendListingRow),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "export_schemas")]
#[command(about = "Print JSON Schemas for the catalog boundary types")]
struct Cli {
    /// Schemas to print. Prints all when omitted.
    #[arg(value_enum)]
    kinds: Vec<SchemaKind>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = match cli.kinds.as_slice() {
        [] => {
            let all: BTreeMap<&str, RootSchema> = SchemaKind::value_variants()
                .iter()
                .map(|kind| (kind.type_name(), kind.schema()))
                .collect();
            serde_json::to_string_pretty(&all)?
        }
        [kind] => serde_json::to_string_pretty(&kind.schema())?,
        kinds => {
            let selected: BTreeMap<&str, RootSchema> = kinds
                .iter()
                .map(|kind| (kind.type_name(), kind.schema()))
                .collect();
            if selected.len() != kinds.len() {
                bail!("a schema was requested more than once");
            }
            serde_json::to_string_pretty(&selected)?
        }
    };
    println!("{output}");
    Ok(())
}
