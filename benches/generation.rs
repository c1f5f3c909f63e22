use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tactical_telemetry::core::rng::XorShiftRng;
use tactical_telemetry::game::round::run_round;
use tactical_telemetry::record::export::to_json;
use tactical_telemetry::{generate_match, Catalog, MapDef, SimConfig};

fn bench_round(c: &mut Criterion) {
    let config = SimConfig::default();
    let map = MapDef::ascent();
    let catalog = Catalog::default();

    c.bench_function("run_round", |b| {
        b.iter(|| {
            let mut rng = XorShiftRng::new(black_box(2026));
            run_round(1, &mut rng, &map, &catalog, &config)
        })
    });
}

fn bench_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");
    group.sample_size(10);

    let config = SimConfig::default();
    group.bench_function("generate_24_rounds", |b| {
        b.iter(|| generate_match(black_box(&config)))
    });

    let record = generate_match(&config).unwrap();
    group.bench_function("encode_json", |b| b.iter(|| to_json(black_box(&record))));
    group.bench_function("fingerprint", |b| b.iter(|| black_box(&record).fingerprint()));
    group.finish();
}

criterion_group!(benches, bench_round, bench_match);
criterion_main!(benches);
