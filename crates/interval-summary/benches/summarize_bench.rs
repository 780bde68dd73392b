//! Benchmarks for the interval summarizer

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use interval_core::{CoverageSpec, Observation};
use interval_summary::{IntervalSummarizer, PiMode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn synthetic_observations(n_per_group: usize) -> Vec<Observation> {
    let mut rng = StdRng::seed_from_u64(42);
    let normal = Normal::new(10.0, 2.0).unwrap();
    let conditions = ["ci", "pi", "hops", "rug"];
    let facets = ["small", "medium", "large"];

    let mut observations = Vec::with_capacity(n_per_group * conditions.len() * facets.len());
    for condition in conditions {
        for facet in facets {
            for _ in 0..n_per_group {
                observations.push(Observation::new(normal.sample(&mut rng), condition, facet));
            }
        }
    }
    observations
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    for n_per_group in [10, 100, 1000] {
        let observations = synthetic_observations(n_per_group);

        group.bench_with_input(
            BenchmarkId::new("moment", n_per_group),
            &observations,
            |b, obs| {
                let summarizer = IntervalSummarizer::new(CoverageSpec::ONE_SD);
                b.iter(|| summarizer.summarize(black_box(obs)).unwrap());
            },
        );

        group.bench_with_input(
            BenchmarkId::new("quantile", n_per_group),
            &observations,
            |b, obs| {
                let summarizer =
                    IntervalSummarizer::new(CoverageSpec::ONE_SD).with_pi_mode(PiMode::Quantile);
                b.iter(|| summarizer.summarize(black_box(obs)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_summarize);
criterion_main!(benches);
