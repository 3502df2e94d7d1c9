use criterion::{Criterion, black_box, criterion_group, criterion_main};

use greenspace_layers::config::SimplifyOptions;
use greenspace_layers::generation::greenspace::generate_greenspace_collection;
use greenspace_layers::geometry::simplify::{simplify, simplify_parallel};

fn bench_simplify_1k_features(c: &mut Criterion) {
    let options = SimplifyOptions::default();
    let collection = generate_greenspace_collection(1_000, 256, 12345, (13.1, 13.7), (52.35, 52.65));

    c.bench_function("simplify_1k_features", |b| {
        b.iter(|| {
            let results = simplify(black_box(&collection), &options);
            black_box(results)
        })
    });
}

fn bench_simplify_10k_features_parallel(c: &mut Criterion) {
    let options = SimplifyOptions::default();
    let collection = generate_greenspace_collection(10_000, 256, 12345, (13.1, 13.7), (52.35, 52.65));

    c.bench_function("simplify_10k_features_sequential", |b| {
        b.iter(|| black_box(simplify(black_box(&collection), &options)))
    });
    c.bench_function("simplify_10k_features_parallel", |b| {
        b.iter(|| black_box(simplify_parallel(black_box(&collection), &options)))
    });
}

fn bench_simplify_low_quality(c: &mut Criterion) {
    let options = SimplifyOptions {
        high_quality: false,
        ..SimplifyOptions::default()
    };
    let collection = generate_greenspace_collection(1_000, 1_024, 12345, (13.1, 13.7), (52.35, 52.65));

    c.bench_function("simplify_1k_features_dense_rings_low_quality", |b| {
        b.iter(|| black_box(simplify(black_box(&collection), &options)))
    });
}

criterion_group!(
    benches,
    bench_simplify_1k_features,
    bench_simplify_10k_features_parallel,
    bench_simplify_low_quality
);
criterion_main!(benches);
