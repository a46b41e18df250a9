#![allow(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Benchmark rule aggregation throughput.
//!
//! Measures one full aggregation pass over rule sets of increasing size:
//! - Class rules only (the common case)
//! - Resource rules including `.class`-suffixed paths (the reclassification
//!   path)
//! - Rule sets dominated by unknown artifacts (the degrade-and-warn path)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use veil_core::{ArtifactKey, ClassRule, DependencySet, ResourceRule, RuleSet};

// ============================================================================
// FIXTURES
// ============================================================================

fn artifact(i: usize) -> ArtifactKey {
    ArtifactKey::parse(format!("io.bench:artifact-{i}")).expect("valid key")
}

fn dependency_set(artifacts: usize) -> DependencySet {
    (0..artifacts).map(artifact).collect()
}

fn class_rule_set(rules: usize, artifacts: usize) -> RuleSet {
    let mut set = RuleSet::new();
    for i in 0..rules {
        set.add_class_rule(ClassRule::of_class(
            artifact(i % artifacts),
            format!("com.bench.Class{i}"),
        ));
    }
    set
}

fn resource_rule_set(rules: usize, artifacts: usize) -> RuleSet {
    let mut set = RuleSet::new();
    for i in 0..rules {
        set.add_resource_rule(ResourceRule::new(
            artifact(i % artifacts),
            [
                format!("com/bench/Class{i}.class"),
                format!("META-INF/resource-{i}.txt"),
            ],
        ));
    }
    set
}

// ============================================================================
// BENCHMARKS
// ============================================================================

fn bench_class_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_class_rules");
    for size in [10_usize, 100, 1000] {
        let deps = dependency_set(8);
        let rules = class_rule_set(size, 8);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(rules.clone()).aggregate(black_box(&deps)));
        });
    }
    group.finish();
}

fn bench_resource_reclassification(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_resource_rules");
    for size in [10_usize, 100, 1000] {
        let deps = dependency_set(8);
        let rules = resource_rule_set(size, 8);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(rules.clone()).aggregate(black_box(&deps)));
        });
    }
    group.finish();
}

fn bench_unknown_artifacts(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_unknown_artifacts");
    for size in [10_usize, 100] {
        // Rules reference artifacts 0..size but only the first 2 resolve.
        let deps = dependency_set(2);
        let rules = class_rule_set(size, size.max(2));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(rules.clone()).aggregate(black_box(&deps)));
        });
    }
    group.finish();
}

fn bench_empty_fast_path(c: &mut Criterion) {
    let deps = dependency_set(8);
    c.bench_function("aggregate_empty_rule_set", |b| {
        b.iter(|| black_box(RuleSet::new()).aggregate(black_box(&deps)));
    });
}

criterion_group!(
    benches,
    bench_class_aggregation,
    bench_resource_reclassification,
    bench_unknown_artifacts,
    bench_empty_fast_path
);
criterion_main!(benches);
