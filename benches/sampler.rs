//! Sampler benchmark: representative selection over a synthetic population.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use drivesense::config::SamplerConfig;
use drivesense::sampler::{FeatureMatrix, RepresentativeSampler};

fn make_matrix(drives: usize, dims: usize) -> FeatureMatrix {
    let rows = (0..drives)
        .map(|i| {
            (0..dims)
                .map(|d| ((i * 31 + d * 17) % 97) as f64 / 97.0 + (i % 7) as f64)
                .collect()
        })
        .collect();
    FeatureMatrix {
        serials: (0..drives).map(|i| format!("Z{i:05}")).collect(),
        columns: (0..dims).map(|d| format!("f{d}")).collect(),
        rows,
    }
}

fn bench_select(c: &mut Criterion) {
    let matrix = make_matrix(500, 16);
    let sampler = RepresentativeSampler::new(SamplerConfig {
        sample_count: 25,
        max_iterations: 300,
    });
    c.bench_function("representative_select_500_to_25", |b| {
        b.iter(|| black_box(sampler.select(black_box(&matrix)).unwrap()))
    });
}

criterion_group!(benches, bench_select);
criterion_main!(benches);
