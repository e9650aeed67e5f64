//! # Partition
//!
//! Block assignment of every vertex together with the blockmodel and block
//! degree vectors summarising inter-block connectivity.

/*
 * File: /src/partition.rs
 * Created Date: Friday, October 16th 2026
 * Author: Zihan
 * -----
 * Last Modified: Friday, 16th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-16		Zihan	Partition construction, copying and sample reconciliation
 * 2026-10-16		Zihan	Report degree overflow instead of panicking
 */

use std::collections::HashMap;

use log::{debug, info};
use ndarray::Array1;
use rand::Rng;

use crate::blockmodel::{BlockAdjacency, SparseBlockmodel};
use crate::types::{NeighborList, PartitionError};

/// Marks a vertex whose block is not known yet during reconciliation
const UNASSIGNED: usize = usize::MAX;

/// A block partition of a graph and its block-level edge summary.
///
/// The blockmodel and degree vectors describe `block_assignment` only after
/// [`Partition::build_adjacency`]; merging rewrites the assignment and leaves
/// them stale until the caller rebuilds.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<M: BlockAdjacency = SparseBlockmodel> {
    pub(crate) num_blocks: usize,
    pub(crate) block_assignment: Vec<usize>,
    pub(crate) blockmodel: M,
    pub(crate) block_degrees: Array1<u64>,
    pub(crate) block_degrees_out: Array1<u64>,
    pub(crate) block_degrees_in: Array1<u64>,
    pub(crate) overall_entropy: f64,
    pub(crate) num_blocks_to_merge: usize,
    pub(crate) block_reduction_rate: f64,
}

impl<M: BlockAdjacency> Partition<M> {
    /// Create a partition and build its blockmodel from `neighbors`.
    ///
    /// Without an initial assignment every vertex starts in its own block,
    /// so `num_blocks` must equal the vertex count.
    pub fn new(
        num_blocks: usize,
        neighbors: &[NeighborList],
        block_reduction_rate: f64,
        initial_assignment: Option<Vec<usize>>,
    ) -> Result<Self, PartitionError> {
        if num_blocks == 0 {
            return Err(PartitionError::InvalidBlockCount(num_blocks));
        }
        let block_assignment = match initial_assignment {
            Some(assignment) => assignment,
            None => {
                if neighbors.len() != num_blocks {
                    return Err(PartitionError::DimensionMismatch {
                        expected: num_blocks,
                        found: neighbors.len(),
                    });
                }
                (0..num_blocks).collect()
            }
        };

        let mut partition = Self::unbuilt(num_blocks, block_assignment, block_reduction_rate);
        partition.build_adjacency(neighbors)?;
        Ok(partition)
    }

    /// Create a partition with a uniformly random block for every vertex
    pub fn random<R: Rng + ?Sized>(
        num_blocks: usize,
        neighbors: &[NeighborList],
        block_reduction_rate: f64,
        rng: &mut R,
    ) -> Result<Self, PartitionError> {
        if num_blocks == 0 {
            return Err(PartitionError::InvalidBlockCount(num_blocks));
        }
        let assignment = (0..neighbors.len())
            .map(|_| rng.random_range(0..num_blocks))
            .collect();
        Self::new(num_blocks, neighbors, block_reduction_rate, Some(assignment))
    }

    /// Partition with zeroed statistics; callers must build adjacency before use
    fn unbuilt(num_blocks: usize, block_assignment: Vec<usize>, block_reduction_rate: f64) -> Self {
        Self {
            num_blocks,
            block_assignment,
            blockmodel: M::with_size(num_blocks),
            block_degrees: Array1::zeros(num_blocks),
            block_degrees_out: Array1::zeros(num_blocks),
            block_degrees_in: Array1::zeros(num_blocks),
            overall_entropy: 0.0,
            num_blocks_to_merge: 0,
            block_reduction_rate,
        }
    }

    /// Rebuild the blockmodel and degree vectors from the current assignment.
    ///
    /// Edge `(v -> n, w)` adds `w` to cell `(block(v), block(n))`, to the
    /// out-degree of `block(v)` and to the in-degree of `block(n)`.
    /// On error the partition is left unchanged.
    pub fn build_adjacency(&mut self, neighbors: &[NeighborList]) -> Result<(), PartitionError> {
        let num_vertices = self.block_assignment.len();
        if neighbors.len() != num_vertices {
            return Err(PartitionError::DimensionMismatch {
                expected: num_vertices,
                found: neighbors.len(),
            });
        }
        check_assignment(&self.block_assignment, self.num_blocks)?;

        let n = self.num_blocks;
        let mut blockmodel = M::with_size(n);
        let mut block_degrees_out = Array1::<u64>::zeros(n);
        let mut block_degrees_in = Array1::<u64>::zeros(n);

        for (vertex, vertex_neighbors) in neighbors.iter().enumerate() {
            if vertex_neighbors.is_empty() {
                continue;
            }
            let block = self.block_assignment[vertex];
            for &(neighbor, weight) in vertex_neighbors {
                let neighbor_block = *self.block_assignment.get(neighbor).ok_or(
                    PartitionError::DimensionMismatch {
                        expected: num_vertices,
                        found: neighbor + 1,
                    },
                )?;
                // Cells never exceed the out-degree, so checking degrees first covers them
                block_degrees_out[block] = block_degrees_out[block]
                    .checked_add(weight)
                    .ok_or(PartitionError::WeightOverflow { block })?;
                block_degrees_in[neighbor_block] = block_degrees_in[neighbor_block]
                    .checked_add(weight)
                    .ok_or(PartitionError::WeightOverflow {
                        block: neighbor_block,
                    })?;
                blockmodel.add(block, neighbor_block, weight);
            }
        }

        let mut block_degrees = Array1::<u64>::zeros(n);
        for block in 0..n {
            block_degrees[block] = block_degrees_out[block]
                .checked_add(block_degrees_in[block])
                .ok_or(PartitionError::WeightOverflow { block })?;
        }

        self.block_degrees = block_degrees;
        self.block_degrees_out = block_degrees_out;
        self.block_degrees_in = block_degrees_in;
        self.blockmodel = blockmodel;
        debug!(
            "Built blockmodel for {} vertices in {} blocks",
            num_vertices, self.num_blocks
        );
        Ok(())
    }

    /// Partition over the given ground-truth labels, sized to the number of
    /// distinct labels. Labels are used as block ids directly.
    pub fn from_ground_truth(
        neighbors: &[NeighborList],
        true_block_membership: &[usize],
        block_reduction_rate: f64,
    ) -> Result<Self, PartitionError> {
        let max_label = match true_block_membership.iter().max() {
            Some(&max_label) => max_label,
            None => return Err(PartitionError::InvalidBlockCount(0)),
        };
        // A label at or past the vertex count can never be a valid block id
        if max_label >= true_block_membership.len() {
            return Err(PartitionError::InvalidBlockId {
                block: max_label,
                num_blocks: true_block_membership.len(),
            });
        }

        let mut used = vec![false; max_label + 1];
        for &label in true_block_membership {
            used[label] = true;
        }
        let num_blocks = used.iter().filter(|&&u| u).count();

        Self::new(
            num_blocks,
            neighbors,
            block_reduction_rate,
            Some(true_block_membership.to_vec()),
        )
    }

    /// Same as [`Partition::from_ground_truth`], keeping this partition's reduction rate
    pub fn clone_with_ground_truth(
        &self,
        neighbors: &[NeighborList],
        true_block_membership: &[usize],
    ) -> Result<Self, PartitionError> {
        Self::from_ground_truth(neighbors, true_block_membership, self.block_reduction_rate)
    }

    /// Independent deep copy with the merge target reset to zero
    pub fn copy(&self) -> Self {
        Self {
            num_blocks: self.num_blocks,
            block_assignment: self.block_assignment.clone(),
            blockmodel: self.blockmodel.copy(),
            block_degrees: self.block_degrees.clone(),
            block_degrees_out: self.block_degrees_out.clone(),
            block_degrees_in: self.block_degrees_in.clone(),
            overall_entropy: self.overall_entropy,
            num_blocks_to_merge: 0,
            block_reduction_rate: self.block_reduction_rate,
        }
    }

    /// Rebuild a full-graph partition from a partition of a sampled subgraph.
    ///
    /// Sampled vertices keep their sample block. Every other vertex, in
    /// increasing id order, joins the block most of its already-resolved
    /// neighbors are in (lowest id on ties, block 0 if none are resolved).
    /// This is a single pass: a vertex only sees votes from vertices resolved
    /// before it.
    pub fn from_sample(
        num_blocks: usize,
        neighbors: &[NeighborList],
        sample_block_membership: &[usize],
        mapping: &HashMap<usize, usize>,
        block_reduction_rate: f64,
    ) -> Result<Self, PartitionError> {
        if num_blocks == 0 {
            return Err(PartitionError::InvalidBlockCount(num_blocks));
        }
        if mapping.is_empty() {
            return Err(PartitionError::MappingCoverage(
                "mapping has no sampled vertices".to_string(),
            ));
        }
        let num_vertices = neighbors.len();

        let mut block_assignment = vec![UNASSIGNED; num_vertices];
        for (&vertex, &sample_index) in mapping {
            if vertex >= num_vertices {
                return Err(PartitionError::MappingCoverage(format!(
                    "vertex {} is outside a graph of {} vertices",
                    vertex, num_vertices
                )));
            }
            let block = *sample_block_membership.get(sample_index).ok_or_else(|| {
                PartitionError::MappingCoverage(format!(
                    "sample index {} is outside a sample of {} vertices",
                    sample_index,
                    sample_block_membership.len()
                ))
            })?;
            if block >= num_blocks {
                return Err(PartitionError::InvalidBlockId { block, num_blocks });
            }
            block_assignment[vertex] = block;
        }

        // Placeholder ids past num_blocks mark vertices still to be resolved
        let mut next_block = num_blocks;
        for block in block_assignment.iter_mut().filter(|b| **b == UNASSIGNED) {
            *block = next_block;
            next_block += 1;
        }
        let num_unresolved = next_block - num_blocks;

        let mut block_counts = vec![0u64; num_blocks];
        for vertex in 0..num_vertices {
            if block_assignment[vertex] < num_blocks {
                continue;
            }
            block_counts.iter_mut().for_each(|count| *count = 0);
            for &(neighbor, _) in &neighbors[vertex] {
                let neighbor_block = *block_assignment.get(neighbor).ok_or(
                    PartitionError::DimensionMismatch {
                        expected: num_vertices,
                        found: neighbor + 1,
                    },
                )?;
                if neighbor_block < num_blocks {
                    block_counts[neighbor_block] += 1;
                }
            }
            block_assignment[vertex] = first_argmax(&block_counts);
        }

        info!(
            "Reconciled {} sampled and {} inferred vertices into {} blocks",
            num_vertices - num_unresolved,
            num_unresolved,
            num_blocks
        );
        Self::new(
            num_blocks,
            neighbors,
            block_reduction_rate,
            Some(block_assignment),
        )
    }

    /// Move every vertex of block `from` into block `to`.
    ///
    /// Only the assignment changes; the blockmodel and degrees go stale.
    pub fn merge_blocks(&mut self, from: usize, to: usize) -> Result<(), PartitionError> {
        for block in [from, to] {
            if block >= self.num_blocks {
                return Err(PartitionError::InvalidBlockId {
                    block,
                    num_blocks: self.num_blocks,
                });
            }
        }
        if from == to {
            return Err(PartitionError::SelfMerge(from));
        }
        self.relabel(from, to);
        Ok(())
    }

    pub(crate) fn relabel(&mut self, from: usize, to: usize) {
        for block in self.block_assignment.iter_mut() {
            if *block == from {
                *block = to;
            }
        }
    }

    /// Check that the blockmodel and degree vectors agree with each other
    /// and that every vertex has a block in range.
    pub fn validate(&self) -> Result<(), PartitionError> {
        check_assignment(&self.block_assignment, self.num_blocks)?;
        let n = self.num_blocks;
        for (expected, found) in [
            (n, self.blockmodel.size()),
            (n, self.block_degrees_out.len()),
            (n, self.block_degrees_in.len()),
            (n, self.block_degrees.len()),
        ] {
            if expected != found {
                return Err(PartitionError::DimensionMismatch { expected, found });
            }
        }
        for block in 0..n {
            let out = self.block_degrees_out[block];
            let incoming = self.block_degrees_in[block];
            if self.blockmodel.row_sum(block) != out
                || self.blockmodel.col_sum(block) != incoming
                || Some(self.block_degrees[block]) != out.checked_add(incoming)
            {
                return Err(PartitionError::InconsistentDegrees { block });
            }
        }
        Ok(())
    }

    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    pub fn num_vertices(&self) -> usize {
        self.block_assignment.len()
    }

    pub fn block_assignment(&self) -> &[usize] {
        &self.block_assignment
    }

    pub fn blockmodel(&self) -> &M {
        &self.blockmodel
    }

    pub fn block_degrees(&self) -> &Array1<u64> {
        &self.block_degrees
    }

    pub fn block_degrees_out(&self) -> &Array1<u64> {
        &self.block_degrees_out
    }

    pub fn block_degrees_in(&self) -> &Array1<u64> {
        &self.block_degrees_in
    }

    pub fn overall_entropy(&self) -> f64 {
        self.overall_entropy
    }

    pub fn set_overall_entropy(&mut self, entropy: f64) {
        self.overall_entropy = entropy;
    }

    pub fn num_blocks_to_merge(&self) -> usize {
        self.num_blocks_to_merge
    }

    pub fn set_num_blocks_to_merge(&mut self, num_blocks_to_merge: usize) {
        self.num_blocks_to_merge = num_blocks_to_merge;
    }

    pub fn block_reduction_rate(&self) -> f64 {
        self.block_reduction_rate
    }

    /// Merge target for the next round: `floor(num_blocks * block_reduction_rate)`
    pub fn merge_target_from_rate(&self) -> usize {
        (self.num_blocks as f64 * self.block_reduction_rate).floor().max(0.0) as usize
    }
}

fn check_assignment(assignment: &[usize], num_blocks: usize) -> Result<(), PartitionError> {
    match assignment.iter().find(|&&block| block >= num_blocks) {
        Some(&block) => Err(PartitionError::InvalidBlockId { block, num_blocks }),
        None => Ok(()),
    }
}

/// Index of the first maximum; 0 for an all-zero or empty slice
fn first_argmax(counts: &[u64]) -> usize {
    let mut best = 0;
    for (block, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = block;
        }
    }
    best
}
