/*
 * File: /src/util.rs
 * Created Date: Tuesday, June 18th 2024
 * Author: Zihan
 * -----
 * Last Modified: Friday, 16th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-16		Zihan	Planted-partition graphs and connectivity merge proposals
 */
use std::collections::HashMap;

use rand::Rng;

use crate::blockmodel::BlockAdjacency;
use crate::partition::Partition;
use crate::types::NeighborList;

/// 检查两个分类结果是否等价
pub fn are_equivalent_classifications(a: &[usize], b: &[usize]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut a_to_b_map = HashMap::new();
    let mut b_to_a_map = HashMap::new();

    for (&a_class, &b_class) in a.iter().zip(b.iter()) {
        let a_mapped = a_to_b_map.entry(a_class).or_insert(b_class);
        let b_mapped = b_to_a_map.entry(b_class).or_insert(a_class);

        if a_mapped != &b_class || b_mapped != &a_class {
            return false;
        }
    }

    true
}

/// Random directed graph with planted block structure.
///
/// Vertices are split into `num_blocks` contiguous groups. Every ordered pair
/// `(u, v)`, `u != v`, gets a unit edge with probability `p_in` inside a group
/// and `p_out` across groups. Returns the neighbor lists and the planted labels.
pub fn planted_partition<R: Rng + ?Sized>(
    num_vertices: usize,
    num_blocks: usize,
    p_in: f64,
    p_out: f64,
    rng: &mut R,
) -> (Vec<NeighborList>, Vec<usize>) {
    let num_blocks = num_blocks.clamp(1, num_vertices.max(1));
    let labels: Vec<usize> = (0..num_vertices)
        .map(|v| v * num_blocks / num_vertices)
        .collect();

    let p_in = p_in.clamp(0.0, 1.0);
    let p_out = p_out.clamp(0.0, 1.0);
    let neighbors = (0..num_vertices)
        .map(|u| {
            (0..num_vertices)
                .filter(|&v| {
                    let p = if labels[u] == labels[v] { p_in } else { p_out };
                    u != v && rng.random_bool(p)
                })
                .map(|v| (v, 1))
                .collect()
        })
        .collect();

    (neighbors, labels)
}

/// Propose a merge partner for every block from blockmodel connectivity.
///
/// Each block proposes the block it shares the most edge weight with (both
/// directions), scored by the negated share of the pair's total degree. A
/// block with no connections to other blocks proposes itself with a delta of
/// zero, which merge planning skips.
/// This is a cheap stand-in for an entropy-based proposal search.
pub fn connectivity_merge_proposals<M: BlockAdjacency>(
    partition: &Partition<M>,
) -> (Vec<f64>, Vec<usize>) {
    let num_blocks = partition.num_blocks();
    let blockmodel = partition.blockmodel();
    let degrees = partition.block_degrees();

    let mut delta_entropy = vec![0.0; num_blocks];
    let mut best_merge = vec![0; num_blocks];
    for block in 0..num_blocks {
        let mut partner = block;
        let mut shared = 0;
        for other in (0..num_blocks).filter(|&other| other != block) {
            let weight = blockmodel.get(block, other) + blockmodel.get(other, block);
            if weight > shared {
                shared = weight;
                partner = other;
            }
        }
        best_merge[block] = partner;
        let total = (degrees[block] + degrees[partner]).max(1);
        delta_entropy[block] = -(shared as f64) / total as f64;
    }

    (delta_entropy, best_merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::two_cliques;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_are_equivalent_classifications() {
        assert!(are_equivalent_classifications(&[0, 2, 1, 1], &[1, 2, 0, 0]));
        assert!(are_equivalent_classifications(&[0, 1, 1, 2], &[1, 2, 2, 0]));
        assert!(!are_equivalent_classifications(&[0, 1, 1, 2], &[1, 2, 0, 0]));
        assert!(!are_equivalent_classifications(&[0, 1, 1], &[1, 2, 0, 0]));
    }

    #[test]
    fn test_planted_partition_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let (neighbors, labels) = planted_partition(30, 3, 1.0, 0.0, &mut rng);
        assert_eq!(neighbors.len(), 30);
        assert_eq!(labels[0], 0);
        assert_eq!(labels[29], 2);
        // p_in = 1 and p_out = 0 gives complete groups and nothing else
        for (u, edges) in neighbors.iter().enumerate() {
            assert_eq!(edges.len(), 9);
            assert!(edges.iter().all(|&(v, _)| labels[v] == labels[u] && v != u));
        }
    }

    #[test]
    fn test_connectivity_proposals_pair_cliques() {
        let (neighbors, truth) = two_cliques(3);
        let mut assignment = truth.clone();
        // split each clique in two: blocks {0}, {1,2}, {3}, {4,5}
        assignment[1] = 1;
        assignment[2] = 1;
        assignment[3] = 2;
        assignment[4] = 3;
        assignment[5] = 3;
        let partition: Partition = Partition::new(4, &neighbors, 0.5, Some(assignment)).unwrap();

        let (delta, best) = connectivity_merge_proposals(&partition);
        assert_eq!(best, vec![1, 0, 3, 2]);
        assert!(delta.iter().all(|&d| d < 0.0));
    }
}
