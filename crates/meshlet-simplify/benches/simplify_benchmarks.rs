//! Benchmarks for meshlet-simplify operations.
//!
//! Run with: cargo bench -p meshlet-simplify
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p meshlet-simplify -- --save-baseline main
//! 2. After changes: cargo bench -p meshlet-simplify -- --baseline main

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use meshlet_simplify::{simplify_lossless, simplify_mesh, SimplifyParams};
use meshlet_types::icosphere;

fn bench_simplification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simplification");
    group.sample_size(20); // Collapse sweeps are slower, reduce samples

    let test_cases = [
        ("sphere_320tri", icosphere(2)),
        ("sphere_1280tri", icosphere(3)),
        ("sphere_5120tri", icosphere(4)),
    ];

    for (name, mesh) in &test_cases {
        group.throughput(Throughput::Elements(mesh.triangle_count() as u64));

        let half = mesh.triangle_count() / 2;
        group.bench_with_input(
            BenchmarkId::new("simplify_50pct", name),
            &(mesh, half),
            |b, (mesh, target)| {
                let params = SimplifyParams::with_target_triangles(*target);
                b.iter(|| simplify_mesh(black_box(mesh), black_box(&params)));
            },
        );

        let tenth = mesh.triangle_count() / 10;
        group.bench_with_input(
            BenchmarkId::new("simplify_90pct", name),
            &(mesh, tenth),
            |b, (mesh, target)| {
                let params = SimplifyParams::with_target_triangles(*target);
                b.iter(|| simplify_mesh(black_box(mesh), black_box(&params)));
            },
        );
    }

    group.finish();
}

fn bench_lossless(c: &mut Criterion) {
    let mut group = c.benchmark_group("Lossless");
    group.sample_size(20);

    let mesh = icosphere(3);
    group.throughput(Throughput::Elements(mesh.triangle_count() as u64));
    group.bench_function("lossless_sphere_1280tri", |b| {
        let params = SimplifyParams::default();
        b.iter(|| simplify_lossless(black_box(&mesh), black_box(&params)));
    });

    group.finish();
}

criterion_group!(benches, bench_simplification, bench_lossless);
criterion_main!(benches);
