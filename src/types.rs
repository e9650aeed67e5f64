//! # Shared Types
//!
//! Neighbor-list aliases and the error types returned by partition operations.

/*
 * File: /src/types.rs
 * Created Date: Friday, October 16th 2026
 * Author: Zihan
 * -----
 * Last Modified: Friday, 16th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-16		Zihan	Error types for block merging and reconciliation
 */

use std::error::Error;
use std::fmt;

/// Outgoing edges of one vertex as `(neighbor_vertex, weight)` pairs
pub type NeighborList = Vec<(usize, u64)>;

/// Errors that can occur while building or merging a partition
#[derive(Debug, Clone, PartialEq)]
pub enum PartitionError {
    /// A block id falls outside `[0, num_blocks)`
    InvalidBlockId { block: usize, num_blocks: usize },
    /// A partition must have at least one block
    InvalidBlockCount(usize),
    /// The ranking ran out before the merge target was reached
    InsufficientMergeCandidates { requested: usize, available: usize },
    /// Two inputs that must agree in length do not
    DimensionMismatch { expected: usize, found: usize },
    /// The sample mapping is empty or points outside the graph / sample
    MappingCoverage(String),
    /// A block cannot be merged into itself
    SelfMerge(usize),
    /// Blockmodel sums disagree with the degree vectors
    InconsistentDegrees { block: usize },
    /// Edge weights into or out of a block sum past `u64::MAX`
    WeightOverflow { block: usize },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PartitionError::InvalidBlockId { block, num_blocks } => {
                write!(f, "Block id {} out of range for {} blocks", block, num_blocks)
            }
            PartitionError::InvalidBlockCount(n) => {
                write!(f, "Invalid block count {} (must be positive)", n)
            }
            PartitionError::InsufficientMergeCandidates { requested, available } => write!(
                f,
                "Insufficient merge candidates: requested {} merges, only {} possible",
                requested, available
            ),
            PartitionError::DimensionMismatch { expected, found } => {
                write!(f, "Dimension mismatch: expected {}, found {}", expected, found)
            }
            PartitionError::MappingCoverage(msg) => write!(f, "Sample mapping error: {}", msg),
            PartitionError::SelfMerge(block) => {
                write!(f, "Cannot merge block {} into itself", block)
            }
            PartitionError::InconsistentDegrees { block } => {
                write!(f, "Blockmodel sums disagree with degrees of block {}", block)
            }
            PartitionError::WeightOverflow { block } => {
                write!(f, "Edge weights of block {} overflow u64", block)
            }
        }
    }
}

impl Error for PartitionError {}

/// Errors from comparing a partition against ground truth
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationError {
    LengthMismatch { truth: usize, algorithm: usize },
    Empty,
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvaluationError::LengthMismatch { truth, algorithm } => write!(
                f,
                "Truth has {} vertices but the algorithm assignment has {}",
                truth, algorithm
            ),
            EvaluationError::Empty => write!(f, "No vertices with known truth to evaluate"),
        }
    }
}

impl Error for EvaluationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PartitionError::InsufficientMergeCandidates {
            requested: 3,
            available: 1,
        };
        assert!(err.to_string().contains("requested 3"));

        let err = PartitionError::InvalidBlockId {
            block: 7,
            num_blocks: 4,
        };
        assert_eq!(err.to_string(), "Block id 7 out of range for 4 blocks");

        let boxed: Box<dyn Error> = Box::new(PartitionError::SelfMerge(2));
        assert!(boxed.to_string().contains("block 2"));
    }
}
