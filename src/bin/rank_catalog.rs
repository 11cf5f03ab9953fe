//! Ranks a JSON catalog export from the command line.
//!
//! ```text
//! rank_catalog partners.json --category hotels --province Luanda --sort value --currency KZ
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tour_catalog::application::services::{CatalogService, RankedCatalog, RankingEngine};
use tour_catalog::domain::entities::FilterQuery;
use tour_catalog::domain::value_objects::Currency;
use tour_catalog::infrastructure::backend::ingest_json;
use tour_catalog::infrastructure::config::CatalogConfig;
use tour_catalog::infrastructure::persistence::in_memory::InMemoryCatalogProvider;
use tour_catalog::infrastructure::telemetry;
use tour_catalog::infrastructure::tracking::TracingTracker;

#[derive(Debug, Parser)]
#[command(name = "rank_catalog")]
#[command(about = "Filter, score and sort a partner catalog export")]
struct Cli {
    /// JSON array of backend partner rows.
    file: PathBuf,

    /// Category to rank (tourism, hotels, transport, culture, guides).
    #[arg(long, default_value = "tourism")]
    category: String,

    /// Exact province, or "all".
    #[arg(long)]
    province: Option<String>,

    /// Free-text query.
    #[arg(long)]
    search: Option<String>,

    /// Keep only verified partners.
    #[arg(long)]
    certified_only: bool,

    /// Sort mode (price-asc, price-desc, rating, value).
    #[arg(long)]
    sort: Option<String>,

    /// Display currency (USD, KZ, EUR). Defaults to the configured one.
    #[arg(long)]
    currency: Option<String>,

    /// Print the ranked catalog as JSON.
    #[arg(long)]
    json: bool,

    /// Configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CatalogConfig::load_from(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => CatalogConfig::load().context("loading configuration")?,
    };
    telemetry::init(&config.telemetry).context("installing tracing subscriber")?;

    let display = match &cli.currency {
        Some(code) => code
            .parse::<Currency>()
            .with_context(|| format!("unsupported display currency '{code}'"))?,
        None => config.currency.display,
    };

    let payload = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("reading {}", cli.file.display()))?;
    let report = ingest_json(&payload).context("decoding catalog export")?;
    if !report.is_clean() {
        eprintln!(
            "ingested {} listings ({} rejected, {} duplicates, {} inactive)",
            report.listings.len(),
            report.rejected.len(),
            report.duplicates.len(),
            report.inactive
        );
    }

    let engine = RankingEngine::new(config.currency.converter()?)
        .with_reference_currency(config.currency.reference)
        .with_display_currency(display);
    let provider = InMemoryCatalogProvider::from_listings(report.into_listings());
    let service = CatalogService::new(Arc::new(provider), engine, Arc::new(TracingTracker));

    let query = FilterQuery {
        category: cli.category,
        province: cli.province,
        search: cli.search,
        certified_only: cli.certified_only,
        sort: cli.sort,
    };
    let ranked = service.rank_query(&query).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        print_table(&ranked);
    }
    Ok(())
}

fn print_table(ranked: &RankedCatalog) {
    if ranked.is_empty() {
        println!("no partners match these filters");
        return;
    }
    println!(
        "{:>3}  {:<32} {:<12} {:>6} {:>6}  {:<20} {}",
        "#", "partner", "province", "rating", "score", "price", "response"
    );
    for item in ranked.iter() {
        let badge = if item.recommended { " *" } else { "" };
        println!(
            "{:>3}  {:<32} {:<12} {:>6.1} {:>6}  {:<20} {}{}",
            item.rank,
            item.listing.name(),
            item.listing.province(),
            item.listing.rating(),
            item.score.to_string(),
            item.price.label(),
            item.response_time_label(),
            badge
        );
    }
}
