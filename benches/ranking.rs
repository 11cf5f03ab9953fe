//! Benchmarks a full ranking pass over synthetic catalogs.

#![allow(clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rust_decimal::Decimal;
use std::hint::black_box;
use tour_catalog::application::services::RankingEngine;
use tour_catalog::domain::entities::{FilterState, PartnerListing, Pricing};
use tour_catalog::domain::value_objects::{
    Availability, Category, Currency, PriceUnit, ProvinceFilter, SortMode,
};

const PROVINCES: [&str; 4] = ["Luanda", "Benguela", "Huíla", "Namibe"];

fn catalog(size: usize) -> Vec<PartnerListing> {
    (0..size)
        .map(|index| {
            let (currency, amount) = if index % 3 == 0 {
                (Currency::Kz, Decimal::new(40_000 + (index as i64 * 700) % 90_000, 0))
            } else {
                (Currency::Usd, Decimal::new(50 + (index as i64 * 37) % 400, 0))
            };
            let availability = match index % 3 {
                0 => Availability::High,
                1 => Availability::Medium,
                _ => Availability::Low,
            };
            let province = PROVINCES[index % PROVINCES.len()];
            PartnerListing::builder(
                index.to_string(),
                format!("Partner {index}"),
                Category::Hotels,
                province,
                Pricing::new(currency, amount, PriceUnit::PerNight)
                    .with_discount((index % 25) as f64),
            )
            .certified(index % 2 == 0)
            .rating((index % 51) as f64 / 10.0)
            .availability(availability)
            .features(["Wi-Fi", "Piscina", "Pequeno-almoço", "Transfer"])
            .build()
            .unwrap()
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let engine = RankingEngine::default();
    let mut group = c.benchmark_group("rank");

    for size in [100, 1_000, 10_000] {
        let snapshot = catalog(size);
        for mode in [SortMode::BestValue, SortMode::PriceAscending] {
            let filters = FilterState::new(Category::Hotels).with_sort_mode(mode);
            group.bench_with_input(
                BenchmarkId::new(mode.to_string(), size),
                &snapshot,
                |b, snapshot| b.iter(|| engine.rank(black_box(snapshot), black_box(&filters))),
            );
        }

        let narrowed = FilterState::new(Category::Hotels)
            .with_province(ProvinceFilter::Only("Luanda".to_string()))
            .with_search("wi-fi")
            .certified_only(true);
        group.bench_with_input(BenchmarkId::new("filtered", size), &snapshot, |b, snapshot| {
            b.iter(|| engine.rank(black_box(snapshot), black_box(&narrowed)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
