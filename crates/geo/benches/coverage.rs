//! Benchmarks for coverage queries and the placement heuristic.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use responder_geo::{
    find_best_site, generate_assets, BufferRadii, Coordinate, CoverageModel, GeneratorWindow,
    StationCategory,
};

fn model_with_stations(assets: usize, stations: usize) -> CoverageModel {
    let window = GeneratorWindow { count: assets, ..GeneratorWindow::default() };
    let mut model = CoverageModel::planar(BufferRadii::default(), generate_assets(&window));

    for i in 0..stations {
        // Stations on a diagonal through the asset window
        let t = i as f64 / stations.max(1) as f64;
        let coordinate = Coordinate::new(20.8 + 2.2 * t, 77.8 + 2.7 * t);
        model
            .add_station(coordinate, format!("Station {i}"), StationCategory::UserPlaced)
            .expect("valid station");
    }

    model
}

fn bench_coverage_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("coverage_summary");

    for stations in [2, 10, 50].iter() {
        let model = model_with_stations(50, *stations);
        group.bench_with_input(BenchmarkId::new("stations", stations), stations, |b, _| {
            b.iter(|| black_box(&model).coverage_summary())
        });
    }

    group.finish();
}

fn bench_add_station(c: &mut Criterion) {
    let base = model_with_stations(50, 20);
    let site = Coordinate::new(21.9, 79.1);

    c.bench_function("add_station_after_20", |b| {
        b.iter_batched(
            || base.clone(),
            |mut model| model.add_station(black_box(site), "Bench", StationCategory::UserPlaced),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_find_best_site(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_best_site");

    for assets in [50, 500].iter() {
        let model = model_with_stations(*assets, 2);
        group.bench_with_input(BenchmarkId::new("assets", assets), assets, |b, _| {
            b.iter(|| find_best_site(black_box(&model)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_coverage_summary, bench_add_station, bench_find_best_site);
criterion_main!(benches);
