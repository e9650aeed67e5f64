//! # Block Merging
//!
//! Greedy merge rounds over a [`Partition`]: rank the proposed merges, resolve
//! them through a block redirection table, relabel vertices, and compact the
//! surviving block ids back to `0..num_blocks`.

/*
 * File: /src/merge.rs
 * Created Date: Friday, October 16th 2026
 * Author: Zihan
 * -----
 * Last Modified: Friday, 16th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-16		Zihan	Merge planning, compaction and parallel merge exploration
 */

use std::collections::HashSet;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::blockmodel::BlockAdjacency;
use crate::partition::Partition;
use crate::types::{NeighborList, PartitionError};

impl<M: BlockAdjacency> Partition<M> {
    /// Carry out `num_blocks_to_merge` merges and compact the block ids.
    ///
    /// `delta_entropy_for_each_block[b]` is the entropy change of merging `b`
    /// into `best_merge_for_each_block[b]`; the most negative deltas are tried
    /// first. The blockmodel and degrees are not rebuilt, call
    /// [`Partition::build_adjacency`] before relying on them.
    ///
    /// # Errors
    /// Fails without touching the partition when the inputs do not cover every
    /// block, a partner id is out of range, or fewer than `num_blocks_to_merge`
    /// merges are possible.
    pub fn carry_out_best_merges(
        &mut self,
        delta_entropy_for_each_block: &[f64],
        best_merge_for_each_block: &[usize],
    ) -> Result<(), PartitionError> {
        let num_blocks = self.num_blocks;
        for found in [
            delta_entropy_for_each_block.len(),
            best_merge_for_each_block.len(),
        ] {
            if found != num_blocks {
                return Err(PartitionError::DimensionMismatch {
                    expected: num_blocks,
                    found,
                });
            }
        }
        if let Some(&block) = best_merge_for_each_block
            .iter()
            .find(|&&block| block >= num_blocks)
        {
            return Err(PartitionError::InvalidBlockId { block, num_blocks });
        }

        let ranking = rank_merge_candidates(delta_entropy_for_each_block);
        let merges = plan_merges(&ranking, best_merge_for_each_block, self.num_blocks_to_merge)?;

        for &(merge_from, merge_to) in &merges {
            debug!("Merging block {} into block {}", merge_from, merge_to);
            self.relabel(merge_from, merge_to);
        }

        let remaining_blocks = surviving_blocks(&self.block_assignment);
        let mut mapping = vec![usize::MAX; num_blocks];
        for (new_block, &old_block) in remaining_blocks.iter().enumerate() {
            mapping[old_block] = new_block;
        }
        for block in self.block_assignment.iter_mut() {
            *block = mapping[*block];
        }

        self.num_blocks -= self.num_blocks_to_merge;
        if remaining_blocks.len() != self.num_blocks {
            warn!(
                "{} blocks survive the merge round but {} were expected; empty blocks were present",
                remaining_blocks.len(),
                self.num_blocks
            );
        }
        info!(
            "Merged {} blocks, {} blocks remain",
            merges.len(),
            self.num_blocks
        );
        Ok(())
    }
}

/// Block indices ordered by ascending entropy delta.
///
/// The sort is stable, so equal deltas keep block order. NaN deltas rank last.
pub fn rank_merge_candidates(delta_entropy_for_each_block: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..delta_entropy_for_each_block.len()).collect();
    indices.sort_by(|&a, &b| {
        let (da, db) = (delta_entropy_for_each_block[a], delta_entropy_for_each_block[b]);
        match (da.is_nan(), db.is_nan()) {
            (false, false) => da.total_cmp(&db),
            (a_nan, b_nan) => a_nan.cmp(&b_nan),
        }
    });
    indices
}

/// Resolve up to `target` merges as `(from, to)` pairs, in execution order.
///
/// `block_map` sends every original block to its current representative and
/// is rewritten in full on each merge, so a lookup is one index.
fn plan_merges(
    ranking: &[usize],
    best_merge_for_each_block: &[usize],
    target: usize,
) -> Result<Vec<(usize, usize)>, PartitionError> {
    let mut block_map: Vec<usize> = (0..best_merge_for_each_block.len()).collect();
    let mut merges = Vec::with_capacity(target);

    for &merge_from in ranking {
        if merges.len() == target {
            break;
        }
        let merge_to = block_map[best_merge_for_each_block[merge_from]];
        if merge_to == merge_from {
            continue;
        }
        for block in block_map.iter_mut() {
            if *block == merge_from {
                *block = merge_to;
            }
        }
        merges.push((merge_from, merge_to));
    }

    if merges.len() < target {
        return Err(PartitionError::InsufficientMergeCandidates {
            requested: target,
            available: merges.len(),
        });
    }
    Ok(merges)
}

/// Distinct block ids in order of first appearance
fn surviving_blocks(block_assignment: &[usize]) -> Vec<usize> {
    let mut seen = HashSet::new();
    block_assignment
        .iter()
        .copied()
        .filter(|block| seen.insert(*block))
        .collect()
}

/// Run one merge round per target on independent copies of `base`, in parallel.
///
/// Each copy merges, then rebuilds its blockmodel from `neighbors`. Results come
/// back in the order of `targets`; `base` is never modified.
pub fn explore_merge_targets<M: BlockAdjacency>(
    base: &Partition<M>,
    neighbors: &[NeighborList],
    delta_entropy_for_each_block: &[f64],
    best_merge_for_each_block: &[usize],
    targets: &[usize],
) -> Vec<Result<Partition<M>, PartitionError>> {
    targets
        .par_iter()
        .map(|&target| -> Result<Partition<M>, PartitionError> {
            let mut trial = base.copy();
            trial.set_num_blocks_to_merge(target);
            trial.carry_out_best_merges(delta_entropy_for_each_block, best_merge_for_each_block)?;
            trial.build_adjacency(neighbors)?;
            Ok(trial)
        })
        .collect()
}
