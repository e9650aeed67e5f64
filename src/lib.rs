//! Block-merge phase of stochastic block model graph partitioning.
//!
//! A [`Partition`] keeps the block of every vertex, a blockmodel of edge
//! weights between blocks and the block degrees. Merge rounds
//! ([`Partition::carry_out_best_merges`]) apply externally scored merge
//! proposals and compact the block ids; [`Partition::from_sample`] infers
//! blocks for vertices left out of a sampled subgraph.

/*
 * File: /src/lib.rs
 * Created Date: Monday, January 22nd 2024
 * Author: Zihan
 * -----
 * Last Modified: Friday, 16th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-16		Zihan	Block-merge phase of stochastic block partitioning
 */

pub mod blockmodel;
pub mod config;
pub mod evaluation;
pub mod merge;
pub mod partition;
pub mod types;
pub mod util;

#[cfg(test)]
pub(crate) mod test_utils;

pub use blockmodel::{BlockAdjacency, DenseBlockmodel, SparseBlockmodel};
pub use merge::{explore_merge_targets, rank_merge_candidates};
pub use partition::Partition;
pub use types::{EvaluationError, NeighborList, PartitionError};
