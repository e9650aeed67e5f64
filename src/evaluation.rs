//! # Partition Evaluation
//!
//! Compares an algorithm's block assignment with ground-truth labels through
//! their contingency table: accuracy under the best one-to-one block matching,
//! pair-counting scores (rand index, adjusted rand index, pairwise recall and
//! precision) and information-theoretic scores.

/*
 * File: /src/evaluation.rs
 * Created Date: Friday, October 16th 2026
 * Author: Zihan
 * -----
 * Last Modified: Friday, 16th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-16		Zihan	Contingency table, pairwise and information metrics
 * 2026-10-16		Zihan	Accuracy through Kuhn-Munkres label matching
 */

use std::collections::HashSet;

use log::info;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::types::EvaluationError;

/// Pair-counting agreement between truth and algorithm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairwiseMetrics {
    pub rand_index: f64,
    pub adjusted_rand_index: f64,
    pub pairwise_recall: f64,
    pub pairwise_precision: f64,
}

/// Entropies (natural log) of the truth and algorithm partitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InformationMetrics {
    pub entropy_truth: f64,
    pub entropy_algorithm: f64,
    pub entropy_truth_given_algorithm: f64,
    pub entropy_algorithm_given_truth: f64,
    pub mutual_info: f64,
    pub missed_info: f64,
    pub erroneous_info: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub num_vertices: usize,
    pub num_blocks_truth: usize,
    pub num_blocks_algorithm: usize,
    /// Fraction of vertices on the diagonal after optimal label matching
    pub accuracy: f64,
    pub pairwise: PairwiseMetrics,
    pub information: InformationMetrics,
}

/// Count vertices per `(truth block, algorithm block)` pair.
///
/// Vertices whose truth is `None` are left out. Rows are indexed by truth
/// label, columns by algorithm block.
pub fn contingency_table(
    truth: &[Option<usize>],
    algorithm: &[usize],
) -> Result<Array2<u64>, EvaluationError> {
    if truth.len() != algorithm.len() {
        return Err(EvaluationError::LengthMismatch {
            truth: truth.len(),
            algorithm: algorithm.len(),
        });
    }
    let known: Vec<(usize, usize)> = truth
        .iter()
        .zip(algorithm.iter())
        .filter_map(|(t, &a)| t.map(|t| (t, a)))
        .collect();
    if known.is_empty() {
        return Err(EvaluationError::Empty);
    }

    let rows = known.iter().map(|&(t, _)| t).max().unwrap_or(0) + 1;
    let cols = known.iter().map(|&(_, a)| a).max().unwrap_or(0) + 1;
    let mut table = Array2::<u64>::zeros((rows, cols));
    for (t, a) in known {
        table[(t, a)] += 1;
    }
    Ok(table)
}

/// Pair truth blocks with algorithm blocks one-to-one, maximising the number
/// of vertices the pairs share.
///
/// Returns `(truth_block, algorithm_block)` pairs sorted by truth block. The
/// shorter side of the table is fully matched; the extra blocks of the longer
/// side stay unmatched.
///
/// # Algorithm
///
/// Potential-based Kuhn-Munkres on the negated counts, O(n^2 m) for an
/// `n x m` table with `n <= m`. A table with more rows than columns is solved
/// transposed.
pub fn match_labels(table: &Array2<u64>) -> Vec<(usize, usize)> {
    let transposed = table.nrows() > table.ncols();
    let weights = if transposed { table.t() } else { table.view() };
    let (n, m) = weights.dim();
    if n == 0 {
        return Vec::new();
    }
    let cost = |row: usize, col: usize| -(weights[(row, col)] as i64);
    let inf = i64::MAX / 4;

    // 1-indexed potentials; column 0 is the source of each augmenting path
    let mut u = vec![0_i64; n + 1];
    let mut v = vec![0_i64; m + 1];
    // row_of[j]: 1-indexed row matched to column j, 0 when free
    let mut row_of = vec![0_usize; m + 1];
    let mut way = vec![0_usize; m + 1];

    for row in 1..=n {
        row_of[0] = row;
        let mut j0 = 0;
        let mut min_slack = vec![inf; m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[j0] = true;
            let i0 = row_of[j0];
            let mut delta = inf;
            let mut j1 = 0;
            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let slack = cost(i0 - 1, j - 1) - u[i0] - v[j];
                if slack < min_slack[j] {
                    min_slack[j] = slack;
                    way[j] = j0;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    j1 = j;
                }
            }
            for j in 0..=m {
                if used[j] {
                    u[row_of[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }
            j0 = j1;
            if row_of[j0] == 0 {
                break;
            }
        }

        loop {
            let j1 = way[j0];
            row_of[j0] = row_of[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut pairs: Vec<(usize, usize)> = (1..=m)
        .filter(|&col| row_of[col] != 0)
        .map(|col| {
            let (row, col) = (row_of[col] - 1, col - 1);
            if transposed {
                (col, row)
            } else {
                (row, col)
            }
        })
        .collect();
    pairs.sort_unstable();
    pairs
}

/// Share of vertices that land in matched `(truth, algorithm)` block pairs
pub fn accuracy(table: &Array2<u64>) -> f64 {
    let matched: u64 = match_labels(table)
        .into_iter()
        .map(|(truth, algorithm)| table[(truth, algorithm)])
        .sum();
    ratio(matched as f64, table.sum() as f64)
}

fn choose2(n: f64) -> f64 {
    n * (n - 1.0) / 2.0
}

/// Ratio that treats an empty denominator as perfect agreement when the
/// numerator is empty too
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        if numerator == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        numerator / denominator
    }
}

pub fn pairwise_metrics(table: &Array2<u64>) -> PairwiseMetrics {
    let table = table.mapv(|c| c as f64);
    let n = table.sum();
    let num_pairs = choose2(n);
    let rowsum = table.sum_axis(Axis(1));
    let colsum = table.sum_axis(Axis(0));

    let sum_table_choose_2: f64 = table.iter().map(|&c| choose2(c)).sum();
    let sum_rowsum_choose_2: f64 = rowsum.iter().map(|&c| choose2(c)).sum();
    let sum_colsum_choose_2: f64 = colsum.iter().map(|&c| choose2(c)).sum();

    // pairs split apart by both partitions
    let num_agreement_diff = 0.5
        * (n * n + table.mapv(|c| c * c).sum()
            - colsum.mapv(|c| c * c).sum()
            - rowsum.mapv(|c| c * c).sum());
    let num_agreement_same = sum_table_choose_2;

    let expected = ratio(sum_rowsum_choose_2 * sum_colsum_choose_2, num_pairs);
    let adjusted_rand_index = ratio(
        sum_table_choose_2 - expected,
        0.5 * (sum_rowsum_choose_2 + sum_colsum_choose_2) - expected,
    );

    PairwiseMetrics {
        rand_index: ratio(num_agreement_same + num_agreement_diff, num_pairs),
        adjusted_rand_index,
        pairwise_recall: ratio(num_agreement_same, sum_rowsum_choose_2),
        pairwise_precision: ratio(num_agreement_same, sum_colsum_choose_2),
    }
}

pub fn information_metrics(table: &Array2<u64>) -> InformationMetrics {
    let n = table.sum() as f64;
    let joint = table.mapv(|c| if n > 0.0 { c as f64 / n } else { 0.0 });
    let marginal_truth = joint.sum_axis(Axis(1));
    let marginal_algorithm = joint.sum_axis(Axis(0));

    let entropy = |p: f64| if p > 0.0 { -p * p.ln() } else { 0.0 };
    let entropy_truth: f64 = marginal_truth.iter().map(|&p| entropy(p)).sum();
    let entropy_algorithm: f64 = marginal_algorithm.iter().map(|&p| entropy(p)).sum();

    let mut entropy_algorithm_given_truth = 0.0;
    let mut entropy_truth_given_algorithm = 0.0;
    let mut mutual_info = 0.0;
    for ((i, j), &p) in joint.indexed_iter() {
        if p <= 0.0 {
            continue;
        }
        entropy_algorithm_given_truth -= p * (p / marginal_truth[i]).ln();
        entropy_truth_given_algorithm -= p * (p / marginal_algorithm[j]).ln();
        mutual_info += p * (p / (marginal_truth[i] * marginal_algorithm[j])).ln();
    }

    let missed_info = if entropy_truth > 0.0 {
        entropy_truth_given_algorithm / entropy_truth
    } else {
        0.0
    };
    let erroneous_info = if entropy_algorithm > 0.0 {
        entropy_algorithm_given_truth / entropy_algorithm
    } else {
        0.0
    };

    InformationMetrics {
        entropy_truth,
        entropy_algorithm,
        entropy_truth_given_algorithm,
        entropy_algorithm_given_truth,
        mutual_info,
        missed_info,
        erroneous_info,
    }
}

/// Score `algorithm` against `truth`, skipping vertices with unknown truth
pub fn evaluate_partition(
    truth: &[Option<usize>],
    algorithm: &[usize],
) -> Result<Evaluation, EvaluationError> {
    let table = contingency_table(truth, algorithm)?;
    let num_blocks_truth = truth.iter().flatten().collect::<HashSet<_>>().len();
    let num_blocks_algorithm = algorithm.iter().collect::<HashSet<_>>().len();

    let evaluation = Evaluation {
        num_vertices: table.sum() as usize,
        num_blocks_truth,
        num_blocks_algorithm,
        accuracy: accuracy(&table),
        pairwise: pairwise_metrics(&table),
        information: information_metrics(&table),
    };

    info!(
        "Evaluated {} vertices: {} truth blocks, {} algorithm blocks",
        evaluation.num_vertices, num_blocks_truth, num_blocks_algorithm
    );
    info!(
        "Accuracy (with optimal block matching): {:.4}",
        evaluation.accuracy
    );
    info!(
        "Rand index: {:.4}, adjusted rand index: {:.4}, recall: {:.4}, precision: {:.4}",
        evaluation.pairwise.rand_index,
        evaluation.pairwise.adjusted_rand_index,
        evaluation.pairwise.pairwise_recall,
        evaluation.pairwise.pairwise_precision
    );
    info!(
        "Mutual information: {:.4}, missed info: {:.4}, erroneous info: {:.4}",
        evaluation.information.mutual_info,
        evaluation.information.missed_info,
        evaluation.information.erroneous_info
    );
    Ok(evaluation)
}
