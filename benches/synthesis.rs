use agroclimate::{
    normalize, synthesize_monthly_climate, synthesize_temperature_trend, synthesize_water_usage,
    CropProduction, RegionTable,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_synthesis(c: &mut Criterion) {
    let regions = RegionTable::builtin();
    let profile = regions.resolve("3");

    c.bench_function("synthesize_monthly_climate", |b| {
        b.iter(|| synthesize_monthly_climate(black_box(&profile.pattern), &profile.thermal))
    });
    c.bench_function("synthesize_water_usage", |b| {
        b.iter(|| synthesize_water_usage(black_box(&profile.pattern)))
    });
    c.bench_function("synthesize_temperature_trend", |b| {
        b.iter(|| {
            synthesize_temperature_trend(black_box(&profile.pattern), &profile.thermal, 1960..=2020)
        })
    });
}

fn bench_normalize(c: &mut Criterion) {
    let production: CropProduction = [
        ("Wheat", 1_200_000.0),
        ("Rice", 830_000.0),
        ("Barley", 410_000.0),
        ("Maize", 2_700_000.0),
        ("Wheat", 90_000.0),
    ]
    .into_iter()
    .collect();

    c.bench_function("normalize", |b| b.iter(|| normalize(black_box(&production))));
}

criterion_group!(benches, bench_synthesis, bench_normalize);
criterion_main!(benches);
