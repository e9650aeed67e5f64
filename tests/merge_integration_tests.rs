//! Integration tests for block merging
//!
//! Exercises the public API end to end:
//! 1. Building partitions (identity, ground truth, sampled)
//! 2. Merge rounds with compaction and adjacency rebuilds
//! 3. Parallel exploration and evaluation against the planted blocks

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sbp_merge::evaluation::evaluate_partition;
use sbp_merge::util::{are_equivalent_classifications, connectivity_merge_proposals, planted_partition};
use sbp_merge::{
    explore_merge_targets, BlockAdjacency, DenseBlockmodel, NeighborList, Partition,
    PartitionError, SparseBlockmodel,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Planted graph with dense blocks and no edges across them
fn separated_graph(num_vertices: usize, num_blocks: usize, seed: u64) -> (Vec<NeighborList>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    planted_partition(num_vertices, num_blocks, 0.8, 0.0, &mut rng)
}

fn assert_degree_invariants<M: BlockAdjacency>(partition: &Partition<M>) {
    for block in 0..partition.num_blocks() {
        assert_eq!(
            partition.blockmodel().row_sum(block),
            partition.block_degrees_out()[block]
        );
        assert_eq!(
            partition.blockmodel().col_sum(block),
            partition.block_degrees_in()[block]
        );
    }
    partition.validate().unwrap();
}

fn assert_compact<M: BlockAdjacency>(partition: &Partition<M>) {
    let mut seen = vec![false; partition.num_blocks()];
    for &block in partition.block_assignment() {
        assert!(block < partition.num_blocks());
        seen[block] = true;
    }
    assert!(seen.iter().all(|&s| s), "block ids have gaps");
}

#[test]
fn test_degree_invariants_for_random_assignments() {
    init_logger();
    let (neighbors, _) = separated_graph(60, 3, 1);
    let mut rng = StdRng::seed_from_u64(2);
    for num_blocks in [1, 2, 5, 17] {
        let sparse: Partition<SparseBlockmodel> =
            Partition::random(num_blocks, &neighbors, 0.5, &mut rng).unwrap();
        assert_degree_invariants(&sparse);

        let dense: Partition<DenseBlockmodel> = Partition::new(
            num_blocks,
            &neighbors,
            0.5,
            Some(sparse.block_assignment().to_vec()),
        )
        .unwrap();
        assert_degree_invariants(&dense);
        assert_eq!(dense.block_degrees(), sparse.block_degrees());
    }
}

#[test]
fn test_merge_rounds_recover_planted_blocks() {
    init_logger();
    let (neighbors, truth) = separated_graph(40, 4, 3);
    let mut partition: Partition = Partition::new(40, &neighbors, 0.5, None).unwrap();

    while partition.num_blocks() > 4 {
        let before = partition.num_blocks();
        let (delta, best) = connectivity_merge_proposals(&partition);
        let target = partition
            .merge_target_from_rate()
            .clamp(1, partition.num_blocks() - 4);
        partition.set_num_blocks_to_merge(target);
        match partition.carry_out_best_merges(&delta, &best) {
            Ok(()) => {}
            Err(PartitionError::InsufficientMergeCandidates { available, .. }) => {
                assert!(available > 0);
                partition.set_num_blocks_to_merge(available);
                partition.carry_out_best_merges(&delta, &best).unwrap();
            }
            Err(err) => panic!("unexpected error: {}", err),
        }
        assert_eq!(
            partition.num_blocks(),
            before - partition.num_blocks_to_merge()
        );
        assert_compact(&partition);
        partition.build_adjacency(&neighbors).unwrap();
        assert_degree_invariants(&partition);
    }

    // blocks never merge across components, so the planted blocks come back
    assert!(are_equivalent_classifications(partition.block_assignment(), &truth));
    let truth: Vec<Option<usize>> = truth.into_iter().map(Some).collect();
    let evaluation = evaluate_partition(&truth, partition.block_assignment()).unwrap();
    assert!((evaluation.pairwise.adjusted_rand_index - 1.0).abs() < 1e-9);
    assert!((evaluation.accuracy - 1.0).abs() < 1e-12);
    assert_eq!(evaluation.num_blocks_algorithm, 4);
}

#[test]
fn test_ground_truth_partition_matches_labels() {
    let (neighbors, truth) = separated_graph(30, 3, 5);
    let partition: Partition = Partition::from_ground_truth(&neighbors, &truth, 0.5).unwrap();
    assert_eq!(partition.num_blocks(), 3);
    assert_degree_invariants(&partition);
    // no edges cross the planted blocks
    for a in 0..3 {
        for b in (0..3).filter(|&b| b != a) {
            assert_eq!(partition.blockmodel().get(a, b), 0);
        }
    }
}

#[test]
fn test_reconcile_sample_of_planted_graph() {
    init_logger();
    let (neighbors, truth) = separated_graph(30, 3, 7);
    // sample every third vertex, keeping its planted block
    let sampled: Vec<usize> = (0..30).step_by(3).collect();
    let mapping: HashMap<usize, usize> = sampled
        .iter()
        .enumerate()
        .map(|(index, &vertex)| (vertex, index))
        .collect();
    let sample_assignment: Vec<usize> = sampled.iter().map(|&v| truth[v]).collect();

    let partition: Partition =
        Partition::from_sample(3, &neighbors, &sample_assignment, &mapping, 0.5).unwrap();
    assert!(partition.block_assignment().iter().all(|&b| b < 3));
    for &vertex in &sampled {
        assert_eq!(partition.block_assignment()[vertex], truth[vertex]);
    }
    assert_degree_invariants(&partition);
}

#[test]
fn test_reconcile_isolated_vertex_defaults_to_block_zero() {
    let neighbors: Vec<NeighborList> = vec![vec![(1, 1)], vec![(0, 1)], vec![]];
    let mapping = HashMap::from([(0, 0), (1, 1)]);
    let partition: Partition =
        Partition::from_sample(3, &neighbors, &[2, 2], &mapping, 0.5).unwrap();
    assert_eq!(partition.block_assignment(), &[2, 2, 0]);
}

#[test]
fn test_exploration_keeps_base_intact() {
    init_logger();
    let (neighbors, _) = separated_graph(24, 2, 11);
    let base: Partition = Partition::new(24, &neighbors, 0.5, None).unwrap();
    let snapshot = base.clone();
    let (delta, best) = connectivity_merge_proposals(&base);

    let targets = [2, 6, 12];
    let results = explore_merge_targets(&base, &neighbors, &delta, &best, &targets);
    assert_eq!(results.len(), targets.len());
    for (&target, result) in targets.iter().zip(results.iter()) {
        let trial = result.as_ref().unwrap();
        assert_eq!(trial.num_blocks(), 24 - target);
        assert_compact(trial);
        assert_degree_invariants(trial);
    }
    assert_eq!(base, snapshot);
}

#[test]
fn test_copy_then_merge_leaves_original() {
    let (neighbors, truth) = separated_graph(20, 2, 13);
    let mut original: Partition = Partition::new(2, &neighbors, 0.5, Some(truth)).unwrap();
    original.set_overall_entropy(-3.5);
    let mut copy = original.copy();

    copy.set_num_blocks_to_merge(1);
    copy.carry_out_best_merges(&[-1.0, 0.0], &[1, 0]).unwrap();
    copy.build_adjacency(&neighbors).unwrap();

    assert_eq!(copy.num_blocks(), 1);
    assert_eq!(original.num_blocks(), 2);
    assert_eq!(original.overall_entropy(), -3.5);
    assert_eq!(copy.overall_entropy(), -3.5);
    assert_degree_invariants(&original);
    assert_degree_invariants(&copy);
}
