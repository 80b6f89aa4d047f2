use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use topograph::graph::{
    ContainerPolicy, FxContainers, Graph, IndexedContainers, OrderedContainers, StdContainers,
    TopologyPolicy,
};
use topograph::NodeId;

struct Bench<C>(std::marker::PhantomData<C>);

impl<C: ContainerPolicy> TopologyPolicy for Bench<C> {
    type Node = ();
    type Edge = ();
    type Group = ();
    type Containers = C;
}

/// Build a graph where node `i` points at the next `fan_out` nodes
fn build_graph<P: TopologyPolicy>(size: usize, fan_out: usize) -> (Graph<P>, Vec<NodeId>) {
    let mut graph: Graph<P> = Graph::new();
    let nodes: Vec<NodeId> = (0..size).map(|_| graph.create_node().unwrap()).collect();
    for (i, &source) in nodes.iter().enumerate() {
        for j in 1..=fan_out {
            if let Some(&target) = nodes.get(i + j) {
                graph.create_edge(source, target).unwrap();
            }
        }
    }
    (graph, nodes)
}

/// Benchmark node insertion throughput
fn bench_node_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("node_insertion");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut graph: Graph = Graph::new();
                for _ in 0..size {
                    graph.create_node().unwrap();
                }
                criterion::black_box(graph.node_count());
            });
        });
    }
    group.finish();
}

/// Benchmark edge insertion, which also maintains the root node cache
fn bench_edge_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_insertion");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let (graph, _) = build_graph::<Bench<StdContainers>>(size, 4);
                criterion::black_box(graph.edge_count());
            });
        });
    }
    group.finish();
}

/// Benchmark node removal under each container policy
fn bench_node_removal(c: &mut Criterion) {
    let mut group = c.benchmark_group("node_removal");
    let size = 2_000;

    fn remove_all<P: TopologyPolicy>(size: usize) -> usize {
        let (mut graph, nodes) = build_graph::<P>(size, 4);
        for node in nodes {
            graph.remove_node(node).unwrap();
        }
        graph.edge_count()
    }

    group.bench_function(BenchmarkId::new("std", size), |b| {
        b.iter(|| criterion::black_box(remove_all::<Bench<StdContainers>>(size)))
    });
    group.bench_function(BenchmarkId::new("fx", size), |b| {
        b.iter(|| criterion::black_box(remove_all::<Bench<FxContainers>>(size)))
    });
    group.bench_function(BenchmarkId::new("indexed", size), |b| {
        b.iter(|| criterion::black_box(remove_all::<Bench<IndexedContainers>>(size)))
    });
    group.bench_function(BenchmarkId::new("ordered", size), |b| {
        b.iter(|| criterion::black_box(remove_all::<Bench<OrderedContainers>>(size)))
    });
    group.finish();
}

/// Benchmark edge lookup between node pairs
fn bench_find_edge(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_edge");

    for fan_out in [2, 8, 32].iter() {
        let (graph, nodes) = build_graph::<Bench<FxContainers>>(1_000, *fan_out);
        group.bench_with_input(BenchmarkId::from_parameter(fan_out), fan_out, |b, &fan_out| {
            b.iter(|| {
                let mut found = 0;
                for (i, &source) in nodes.iter().enumerate() {
                    if let Some(&target) = nodes.get(i + fan_out) {
                        if graph.has_edge(source, target) {
                            found += 1;
                        }
                    }
                }
                criterion::black_box(found);
            });
        });
    }
    group.finish();
}

/// Benchmark clearing a populated graph
fn bench_clear(c: &mut Criterion) {
    let mut group = c.benchmark_group("clear");

    for size in [100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let (mut graph, _) = build_graph::<Bench<StdContainers>>(size, 4);
                graph.clear().unwrap();
                criterion::black_box(graph.node_count());
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_node_insertion,
    bench_edge_insertion,
    bench_node_removal,
    bench_find_edge,
    bench_clear
);
criterion_main!(benches);
