/*
 * File: /src/config.rs
 * Created Date: Friday, January 26th 2024
 * Author: Zihan
 * -----
 * Last Modified: Friday, 16th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-16		Zihan	Merge-round configuration for the demo driver
 */
use std::error::Error;

use serde::{Deserialize, Serialize};

/// Parameters of a merge run over a planted-partition graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    pub num_vertices: usize,
    /// Planted blocks in the generated graph
    pub num_planted_blocks: usize,
    /// Edge probability inside a planted block
    pub p_in: f64,
    /// Edge probability across planted blocks
    pub p_out: f64,
    /// Fraction of blocks merged per round
    pub block_reduction_rate: f64,
    pub seed: u64,
    /// Merging stops once this many blocks remain
    pub target_num_blocks: usize,
    /// Extra merge targets tried in parallel on the first round
    pub exploration_targets: Vec<usize>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            num_vertices: 200,
            num_planted_blocks: 4,
            p_in: 0.3,
            p_out: 0.01,
            block_reduction_rate: 0.5,
            seed: 42,
            target_num_blocks: 4,
            exploration_targets: vec![25, 50, 100],
        }
    }
}

pub struct Config {
    merge: MergeConfig,
}

impl Config {
    /// constructor
    ///
    /// # Examples
    /// ```bash
    /// $ cargo run -- 200 4 0.5 42
    /// ```
    pub fn new(mut args: impl Iterator<Item = String>) -> Result<Config, Box<dyn Error>> {
        // args:
        // 0: program name
        // 1: number of vertices
        // 2: planted blocks (also the block count merging stops at)
        // 3: block reduction rate
        // 4: seed
        args.next();
        let mut merge = MergeConfig::default();
        if let Some(arg) = args.next() {
            merge.num_vertices = arg.parse::<usize>()?;
        }
        if let Some(arg) = args.next() {
            merge.num_planted_blocks = arg.parse::<usize>()?;
            merge.target_num_blocks = merge.num_planted_blocks;
        }
        if let Some(arg) = args.next() {
            merge.block_reduction_rate = arg.parse::<f64>()?;
        }
        if let Some(arg) = args.next() {
            merge.seed = arg.parse::<u64>()?;
        }

        if merge.num_vertices == 0 || merge.num_planted_blocks == 0 {
            return Err("number of vertices and blocks must be positive".into());
        }
        if !(merge.block_reduction_rate > 0.0 && merge.block_reduction_rate < 1.0) {
            return Err(format!(
                "block reduction rate {} must lie in (0, 1)",
                merge.block_reduction_rate
            )
            .into());
        }
        Ok(Config { merge })
    }

    pub fn get_merge(&self) -> &MergeConfig {
        &self.merge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        std::iter::once("target/debug/sbp_merge".to_string())
            .chain(values.iter().map(|v| v.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_new_config() {
        let config = Config::new(args(&["120", "3", "0.25", "7"])).unwrap();
        let merge = config.get_merge();
        assert_eq!(merge.num_vertices, 120);
        assert_eq!(merge.num_planted_blocks, 3);
        assert_eq!(merge.target_num_blocks, 3);
        assert_eq!(merge.block_reduction_rate, 0.25);
        assert_eq!(merge.seed, 7);
    }

    #[test]
    fn test_defaults_and_errors() {
        let config = Config::new(args(&[])).unwrap();
        assert_eq!(config.get_merge(), &MergeConfig::default());

        assert!(Config::new(args(&["abc"])).is_err());
        assert!(Config::new(args(&["10", "0"])).is_err());
        assert!(Config::new(args(&["10", "2", "1.5"])).is_err());
    }
}
