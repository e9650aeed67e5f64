/*
 * File: /src/blockmodel.rs
 * Created Date: Friday, October 16th 2026
 * Author: Zihan
 * -----
 * Last Modified: Friday, 16th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-16		Zihan	Sparse and dense block-adjacency stores
 * 2026-10-16		Zihan	Range checks left to callers in both stores
 */

use std::collections::HashMap;
use std::fmt::Debug;

use ndarray::Array2;

/// Square matrix of edge weights between blocks.
///
/// Cell `(a, b)` holds the total weight of edges from block `a` to block `b`.
/// Callers are responsible for keeping indices below `size()`.
pub trait BlockAdjacency: Clone + Debug + Send + Sync {
    /// Create an all-zero `n x n` store
    fn with_size(n: usize) -> Self;

    fn size(&self) -> usize;

    fn get(&self, row: usize, col: usize) -> u64;

    fn add(&mut self, row: usize, col: usize, weight: u64);

    /// Change the dimension, keeping cells that still fit
    fn resize(&mut self, n: usize);

    /// Independent deep copy
    fn copy(&self) -> Self {
        self.clone()
    }

    fn row_sum(&self, row: usize) -> u64 {
        (0..self.size()).map(|col| self.get(row, col)).sum()
    }

    fn col_sum(&self, col: usize) -> u64 {
        (0..self.size()).map(|row| self.get(row, col)).sum()
    }
}

/// Mapped matrix: one hash map of non-zero cells per row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseBlockmodel {
    rows: Vec<HashMap<usize, u64>>,
}

impl SparseBlockmodel {
    /// Number of stored non-zero cells
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }
}

impl BlockAdjacency for SparseBlockmodel {
    fn with_size(n: usize) -> Self {
        Self {
            rows: vec![HashMap::new(); n],
        }
    }

    fn size(&self) -> usize {
        self.rows.len()
    }

    fn get(&self, row: usize, col: usize) -> u64 {
        self.rows[row].get(&col).copied().unwrap_or(0)
    }

    fn add(&mut self, row: usize, col: usize, weight: u64) {
        if weight == 0 {
            return;
        }
        *self.rows[row].entry(col).or_insert(0) += weight;
    }

    fn resize(&mut self, n: usize) {
        self.rows.resize_with(n, HashMap::new);
        for row in self.rows.iter_mut() {
            row.retain(|&col, _| col < n);
        }
    }

    // Row sums only touch stored cells
    fn row_sum(&self, row: usize) -> u64 {
        self.rows[row].values().sum()
    }
}

/// Dense store backed by an `ndarray` matrix, for small block counts.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseBlockmodel {
    data: Array2<u64>,
}

impl BlockAdjacency for DenseBlockmodel {
    fn with_size(n: usize) -> Self {
        Self {
            data: Array2::zeros((n, n)),
        }
    }

    fn size(&self) -> usize {
        self.data.nrows()
    }

    fn get(&self, row: usize, col: usize) -> u64 {
        self.data[(row, col)]
    }

    fn add(&mut self, row: usize, col: usize, weight: u64) {
        self.data[(row, col)] += weight;
    }

    fn resize(&mut self, n: usize) {
        let mut data = Array2::zeros((n, n));
        let keep = n.min(self.size());
        for row in 0..keep {
            for col in 0..keep {
                data[(row, col)] = self.data[(row, col)];
            }
        }
        self.data = data;
    }

    fn row_sum(&self, row: usize) -> u64 {
        self.data.row(row).sum()
    }

    fn col_sum(&self, col: usize) -> u64 {
        self.data.column(col).sum()
    }
}
