/*
 * File: /main.rs
 * Created Date: Tuesday November 21st 2023
 * Author: Zihan
 * -----
 * Last Modified: Friday, 16th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-16		Zihan	Merge rounds over a planted-partition graph
 */

use std::env;
use std::error::Error;
use std::time::Instant;

use chrono::Local;
use log::{info, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sbp_merge::config::Config;
use sbp_merge::evaluation::evaluate_partition;
use sbp_merge::util::{connectivity_merge_proposals, planted_partition};
use sbp_merge::{explore_merge_targets, Partition, PartitionError};

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()?;

    let config = Config::new(env::args())?;
    let merge = config.get_merge();
    let mut rng = StdRng::seed_from_u64(merge.seed);

    let (neighbors, truth) = planted_partition(
        merge.num_vertices,
        merge.num_planted_blocks,
        merge.p_in,
        merge.p_out,
        &mut rng,
    );
    info!(
        "[{}] Generated graph: {} vertices, {} edges, {} planted blocks",
        timestamp(),
        neighbors.len(),
        neighbors.iter().map(|edges| edges.len()).sum::<usize>(),
        merge.num_planted_blocks
    );

    let mut partition: Partition = Partition::new(
        merge.num_vertices,
        &neighbors,
        merge.block_reduction_rate,
        None,
    )?;

    // Compare a few merge targets on the first round
    let (delta, best) = connectivity_merge_proposals(&partition);
    let targets: Vec<usize> = merge
        .exploration_targets
        .iter()
        .copied()
        .filter(|&target| target < partition.num_blocks())
        .collect();
    for (target, result) in targets
        .iter()
        .zip(explore_merge_targets(&partition, &neighbors, &delta, &best, &targets))
    {
        match result {
            Ok(trial) => info!(
                "[{}] Exploring target {}: {} blocks remain",
                timestamp(),
                target,
                trial.num_blocks()
            ),
            Err(err) => warn!("[{}] Exploring target {}: {}", timestamp(), target, err),
        }
    }

    let start_time = Instant::now();
    let mut round = 0;
    while partition.num_blocks() > merge.target_num_blocks {
        round += 1;
        let (delta, best) = connectivity_merge_proposals(&partition);
        let mut target = partition
            .merge_target_from_rate()
            .clamp(1, partition.num_blocks() - merge.target_num_blocks);

        let mut trial = partition.copy();
        trial.set_num_blocks_to_merge(target);
        match trial.carry_out_best_merges(&delta, &best) {
            Ok(()) => {}
            Err(PartitionError::InsufficientMergeCandidates { available: 0, .. }) => {
                warn!("[{}] No merge candidates left at round {}", timestamp(), round);
                break;
            }
            Err(PartitionError::InsufficientMergeCandidates { available, .. }) => {
                // Retry with what the proposals can deliver
                target = available;
                trial = partition.copy();
                trial.set_num_blocks_to_merge(target);
                trial.carry_out_best_merges(&delta, &best)?;
            }
            Err(err) => return Err(err.into()),
        }
        trial.build_adjacency(&neighbors)?;
        partition = trial;

        info!(
            "[{}] Round {}: merged {} blocks, {} remain",
            timestamp(),
            round,
            target,
            partition.num_blocks()
        );
    }
    info!(
        "[{}] Block merging done in {:.3}s",
        timestamp(),
        start_time.elapsed().as_secs_f64()
    );

    let truth: Vec<Option<usize>> = truth.into_iter().map(Some).collect();
    evaluate_partition(&truth, partition.block_assignment())?;
    Ok(())
}
