use anyhow::Result;
use log::{info, warn};
use std::time::Instant;

use crate::cli::CommitArgs;
use crate::common::jsonl::read_jsonl;
use crate::common::{format_elapsed, setup_logging, CommitStats};
use crate::store::{commit_reviews, LabelStore, ReviewedLabels};

/// Run the commit command with the given arguments
pub fn run_commit(args: CommitArgs) -> Result<CommitStats> {
    setup_logging(&args.log_level)?;
    commit_queue(&args)
}

/// Core commit pass, separated so the pipeline can reuse it.
pub fn commit_queue(args: &CommitArgs) -> Result<CommitStats> {
    let start_time = Instant::now();

    info!("Starting label commit");
    info!("Review queue: {}", args.input);
    info!("Label store: {}", args.labels);

    // Both inputs tolerate absence: an empty review queue commits nothing,
    // an absent store starts empty.
    let reviews: Vec<ReviewedLabels> = read_jsonl(&args.input)?;
    if reviews.is_empty() {
        warn!("Review queue is empty or missing: {}", args.input);
    }

    let mut store = LabelStore::load(&args.labels)?;
    info!("Existing store records: {}", store.len());

    let stats = commit_reviews(&reviews, &mut store);
    store.save(&args.labels)?;

    let total_time = start_time.elapsed();

    info!("==================== FINAL SUMMARY ====================");
    info!("Total execution time: {}", format_elapsed(total_time));
    info!("Review records read: {}", reviews.len());
    info!("Added: {}", stats.added);
    info!("Updated: {}", stats.updated);
    info!("Skipped (no final_l1): {}", stats.skipped);
    info!("Store records: {}", store.len());
    info!("Output file: {}", args.labels);
    info!("========================================================");

    Ok(stats)
}
