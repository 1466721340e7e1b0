//! Criterion benchmarks for the relaxation loop.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use strand_bench::{prepared_planner, reference_profile, run_to_completion, stress_profile};
use strand_engine::RelaxationConfig;

fn bench_step_reference(c: &mut Criterion) {
    let profile = reference_profile(42);
    let mut planner = prepared_planner(&profile, RelaxationConfig::default()).unwrap();

    c.bench_function("step_reference", |b| {
        b.iter(|| {
            // Re-prepare once the chain settles so every sample does real work.
            if planner.phase().is_terminal() {
                planner.prepare().unwrap();
            }
            black_box(planner.iterate().unwrap());
        });
    });
}

fn bench_step_stress(c: &mut Criterion) {
    let profile = stress_profile(42);
    let mut planner = prepared_planner(&profile, RelaxationConfig::default()).unwrap();

    c.bench_function("step_stress", |b| {
        b.iter(|| {
            if planner.phase().is_terminal() {
                planner.prepare().unwrap();
            }
            black_box(planner.iterate().unwrap());
        });
    });
}

fn bench_converge_reference(c: &mut Criterion) {
    let profile = reference_profile(42);
    let mut planner = prepared_planner(&profile, RelaxationConfig::default()).unwrap();

    c.bench_function("converge_reference", |b| {
        b.iter(|| {
            planner.prepare().unwrap();
            black_box(run_to_completion(&mut planner).unwrap());
        });
    });
}

fn bench_ingest_reference(c: &mut Criterion) {
    let profile = reference_profile(42);
    let mut planner = prepared_planner(&profile, RelaxationConfig::default()).unwrap();

    c.bench_function("ingest_prepare_reference", |b| {
        b.iter(|| {
            planner.ingest(black_box(&profile.path)).unwrap();
            planner.prepare().unwrap();
            black_box(planner.get_plan());
        });
    });
}

criterion_group!(
    benches,
    bench_step_reference,
    bench_step_stress,
    bench_converge_reference,
    bench_ingest_reference
);
criterion_main!(benches);
