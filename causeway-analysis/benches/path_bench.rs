//! Reachability and path enumeration benchmarks.
//!
//! Run with: cargo bench -p causeway-analysis --bench path_bench

use std::hint::black_box;

use causeway_analysis::search::find_sources;
use causeway_analysis::{
    CausalQuery, InfluenceMap, ModelChecker, PathEnumerator, Sign, SignedGraph, SignedNode,
    TableAdapter,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

/// Layered map: `width` nodes per layer, every node wired to every node of
/// the next layer, signs alternating.
fn layered_map(layers: usize, width: usize) -> InfluenceMap {
    let mut map = InfluenceMap::new();
    for layer in 0..layers.saturating_sub(1) {
        for i in 0..width {
            for j in 0..width {
                let sign = if (i + j) % 2 == 0 {
                    Sign::Positive
                } else {
                    Sign::Negative
                };
                map.add_edge(
                    &format!("L{layer}_{i}"),
                    &format!("L{}_{j}", layer + 1),
                    Some(sign),
                );
            }
        }
    }
    map
}

fn reachability(c: &mut Criterion) {
    let mut group = c.benchmark_group("reachability");
    for layers in [4_usize, 8, 16] {
        let graph = SignedGraph::from_influence_map(&layered_map(layers, 6), true).unwrap();
        let target = SignedNode::positive(format!("L{}_0", layers - 1));
        group.bench_with_input(BenchmarkId::from_parameter(layers), &layers, |b, _| {
            b.iter(|| find_sources(&graph, black_box(&target), None).count());
        });
    }
    group.finish();
}

fn enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumeration");
    group.sample_size(20);
    let graph = SignedGraph::from_influence_map(&layered_map(6, 5), true).unwrap();
    let source = SignedNode::positive("L0_0");
    let target = SignedNode::positive("L5_0");
    for k in [1_usize, 10, 50] {
        group.bench_with_input(BenchmarkId::new("first_k", k), &k, |b, &k| {
            b.iter(|| {
                PathEnumerator::enumerate(&graph, black_box(&source), black_box(&target))
                    .take(k)
                    .count()
            });
        });
    }
    group.finish();
}

fn check_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_model");
    group.sample_size(20);
    let width = 5;
    let mut adapter = TableAdapter::new();
    for i in 0..width {
        let entry = format!("L0_{i}");
        let exit = format!("L5_{i}");
        adapter = adapter
            .with_sources(&entry, [entry.clone()])
            .with_observable(&exit, &exit, Sign::Positive);
    }
    let graph = SignedGraph::from_influence_map(&layered_map(6, width), true).unwrap();
    let checker = ModelChecker::new(graph, adapter).with_bounds(5, 6);
    let queries: Vec<CausalQuery> = (0..width)
        .flat_map(|i| {
            (0..width).map(move |j| CausalQuery::increases(&format!("L0_{i}"), &format!("L5_{j}")))
        })
        .collect();

    group.bench_function("sequential", |b| {
        b.iter(|| checker.check_model(black_box(&queries)));
    });
    group.bench_function("parallel", |b| {
        b.iter(|| checker.check_model_parallel(black_box(&queries)));
    });
    group.finish();
}

criterion_group!(benches, reachability, enumeration, check_model);
criterion_main!(benches);
