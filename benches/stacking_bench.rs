//! Criterion benchmarks for u-stacking analysis.
//!
//! Uses seeded random candidate sets to measure pairwise resolution and
//! group construction at realistic and oversized project scales.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_stacking::compat::{CompatibilityMatrix, CompatibilityResolver};
use u_stacking::grouping::rank_candidates;
use u_stacking::program::{IncentiveProgram, IncentiveType, JurisdictionLevel, MatchedIncentive};
use u_stacking::{StackingConfig, StackingEngine};

// ===========================================================================
// Synthetic candidates
// ===========================================================================

const NAMES: [&str; 8] = [
    "Solar Investment Tax Credit",
    "EV Charger Rebate",
    "Heat Pump Incentive",
    "Affordable Housing Grant",
    "Section 48E Clean Electricity Credit",
    "Green Bank Loan",
    "Main Street Revitalization Fund",
    "Energy Efficiency Program",
];

const TAGS: [&str; 5] = ["solar", "storage", "ev", "hvac", "housing"];

fn random_candidates(n: usize, seed: u64) -> Vec<MatchedIncentive> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|k| {
            let level = JurisdictionLevel::ALL[rng.random_range(0..4)];
            let ty = IncentiveType::ALL[rng.random_range(0..4)];
            let name = NAMES[rng.random_range(0..NAMES.len())];
            let mut program = IncentiveProgram::new(format!("p{k}"), name, level, ty)
                .with_tag(TAGS[rng.random_range(0..TAGS.len())]);
            if rng.random_range(0..10) == 0 {
                program = program.with_stackable(false);
            }
            if rng.random_range(0..4) == 0 {
                program = program.with_domestic_content_rate(0.10);
            }
            MatchedIncentive::new(program, rng.random_range(1_000.0..500_000.0))
        })
        .collect()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("compat_matrix");
    group.sample_size(10);

    let resolver = CompatibilityResolver::default();
    for n in [10usize, 50, 200] {
        let ranked = rank_candidates(&random_candidates(n, 42));
        group.bench_with_input(BenchmarkId::from_parameter(n), &ranked, |b, ranked| {
            b.iter(|| {
                let matrix = CompatibilityMatrix::build(black_box(ranked), &resolver, false);
                black_box(matrix)
            })
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    group.sample_size(10);

    let config = StackingConfig::default()
        .with_domestic_content_eligible(true)
        .with_parallel(false);
    let engine = StackingEngine::new(config).unwrap();
    for n in [10usize, 50, 200] {
        let matches = random_candidates(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &matches, |b, m| {
            b.iter(|| black_box(engine.analyze(black_box(m))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_matrix, bench_analyze);
criterion_main!(benches);
