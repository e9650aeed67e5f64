//! Benchmarks for blockmodel construction and merge rounds
//!
//! Run with: cargo bench --bench merge_benchmarks
//! HTML reports: target/criterion/report/index.html

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sbp_merge::util::{connectivity_merge_proposals, planted_partition};
use sbp_merge::{explore_merge_targets, DenseBlockmodel, NeighborList, Partition};

fn create_benchmark_graph(num_vertices: usize) -> Vec<NeighborList> {
    let mut rng = StdRng::seed_from_u64(42);
    let (neighbors, _) = planted_partition(num_vertices, 8, 0.2, 0.01, &mut rng);
    neighbors
}

/// Benchmark adjacency builds with the sparse and dense stores
fn bench_build_adjacency(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_adjacency");
    for &num_vertices in &[200, 500, 1000] {
        let neighbors = create_benchmark_graph(num_vertices);
        let assignment: Vec<usize> = (0..num_vertices).map(|v| v % 32).collect();

        group.bench_with_input(
            BenchmarkId::new("sparse", num_vertices),
            &neighbors,
            |b, neighbors| {
                b.iter(|| {
                    let partition: Partition =
                        Partition::new(32, neighbors, 0.5, Some(assignment.clone())).unwrap();
                    black_box(partition)
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("dense", num_vertices),
            &neighbors,
            |b, neighbors| {
                b.iter(|| {
                    let partition: Partition<DenseBlockmodel> =
                        Partition::new(32, neighbors, 0.5, Some(assignment.clone())).unwrap();
                    black_box(partition)
                })
            },
        );
    }
    group.finish();
}

/// Benchmark a single merge round from the all-singleton partition
fn bench_merge_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_round");
    group.sample_size(20);
    for &num_vertices in &[200, 500] {
        let neighbors = create_benchmark_graph(num_vertices);
        let base: Partition = Partition::new(num_vertices, &neighbors, 0.5, None).unwrap();
        let (delta, best) = connectivity_merge_proposals(&base);

        group.bench_with_input(
            BenchmarkId::new("carry_out_best_merges", num_vertices),
            &num_vertices,
            |b, &num_vertices| {
                b.iter(|| {
                    let mut trial = base.copy();
                    trial.set_num_blocks_to_merge(num_vertices / 4);
                    trial.carry_out_best_merges(&delta, &best).unwrap();
                    black_box(trial)
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("explore_merge_targets", num_vertices),
            &num_vertices,
            |b, &num_vertices| {
                let targets = [num_vertices / 8, num_vertices / 4, num_vertices / 3];
                b.iter(|| black_box(explore_merge_targets(&base, &neighbors, &delta, &best, &targets)))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_build_adjacency, bench_merge_round);
criterion_main!(benches);
