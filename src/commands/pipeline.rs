use anyhow::{Context, Result};
use log::info;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use uuid::Uuid;

use crate::cli::{CommitArgs, PipelineArgs, QueueArgs, TreeArgs};
use crate::commands::{commit, queue, tree};
use crate::common::{format_elapsed, setup_logging, CommitStats, QueueStats, TreeStats};
use crate::ontology::Ontology;

/// Context for managing pipeline state and temp files
struct PipelineContext {
    temp_dir: PathBuf,
    queue_output: PathBuf,
    keep_intermediates: bool,
}

impl PipelineContext {
    fn new(args: &PipelineArgs) -> Result<Self> {
        let run_id = &Uuid::new_v4().to_string()[..8];

        let temp_dir = args
            .temp_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir);

        fs::create_dir_all(&temp_dir)
            .with_context(|| format!("Failed to create temp directory: {}", temp_dir.display()))?;

        let queue_output = temp_dir.join(format!("review_queue_{}.jsonl", run_id));

        Ok(Self {
            temp_dir,
            queue_output,
            keep_intermediates: args.keep_intermediates,
        })
    }

    fn cleanup(&self) -> Result<()> {
        if self.keep_intermediates {
            info!("Keeping intermediate files:");
            info!("  Review queue: {}", self.queue_output.display());
            return Ok(());
        }

        info!("Cleaning up intermediate files...");

        if self.queue_output.exists() {
            fs::remove_file(&self.queue_output)
                .with_context(|| format!("Failed to remove: {}", self.queue_output.display()))?;
        }

        Ok(())
    }
}

impl Drop for PipelineContext {
    fn drop(&mut self) {
        // Best-effort cleanup on drop (e.g., if a step fails)
        if !self.keep_intermediates {
            let _ = fs::remove_file(&self.queue_output);
        }
    }
}

/// Run the full pass: queue -> commit auto-decided labels -> tree.
///
/// No human review happens in between, so only records the policy
/// auto-decided carry a `final_l1` and reach the store.
pub fn run_pipeline(args: PipelineArgs) -> Result<(QueueStats, CommitStats, TreeStats)> {
    let start_time = Instant::now();

    setup_logging(&args.log_level)?;

    info!("Starting labeling pipeline");
    info!("Papers: {}", args.input);
    info!("Ontology: {}", args.ontology);
    info!("Label store: {}", args.labels);
    info!("Tree output: {}", args.tree);

    let ontology = Ontology::load(&args.ontology)?;
    let ctx = PipelineContext::new(&args)?;

    info!("Temp directory: {}", ctx.temp_dir.display());

    info!("");
    info!("=== STEP 1/3: Building review queue ===");
    info!("");

    let queue_args = QueueArgs {
        input: args.input.clone(),
        ontology: args.ontology.clone(),
        output: ctx.queue_output.to_string_lossy().to_string(),
        l1_min_score: args.l1_min_score,
        l1_min_gap: args.l1_min_gap,
        l2_min_score: args.l2_min_score,
        l2_min_gap: args.l2_min_gap,
        no_tags: args.no_tags,
        log_level: args.log_level.clone(),
    };

    let queue_stats = queue::build_queue(&queue_args, &ontology).context("Queue step failed")?;
    info!(
        "Queue complete: {} of {} papers auto-decided at L1",
        queue_stats.l1_auto, queue_stats.papers_processed
    );

    info!("");
    info!("=== STEP 2/3: Committing auto-decided labels ===");
    info!("");

    let commit_args = CommitArgs {
        input: ctx.queue_output.to_string_lossy().to_string(),
        labels: args.labels.clone(),
        log_level: args.log_level.clone(),
    };

    let commit_stats = commit::commit_queue(&commit_args).context("Commit step failed")?;
    info!(
        "Commit complete: {} added, {} updated, {} skipped",
        commit_stats.added, commit_stats.updated, commit_stats.skipped
    );

    info!("");
    info!("=== STEP 3/3: Building display tree ===");
    info!("");

    let tree_args = TreeArgs {
        input: args.labels.clone(),
        output: args.tree.clone(),
        log_level: args.log_level.clone(),
    };

    let tree_stats = tree::build_tree(&tree_args).context("Tree step failed")?;

    ctx.cleanup()?;

    let total_time = start_time.elapsed();

    info!("");
    info!("==================== PIPELINE COMPLETE ====================");
    info!("Total execution time: {}", format_elapsed(total_time));
    info!("");
    info!("Queue step:");
    info!("  Papers processed: {}", queue_stats.papers_processed);
    info!("  L1 auto-decided: {}", queue_stats.l1_auto);
    info!("  L1 manual review: {}", queue_stats.l1_manual);
    info!("  L2 auto-decided: {}", queue_stats.l2_auto);
    info!("");
    info!("Commit step:");
    info!("  Added: {}", commit_stats.added);
    info!("  Updated: {}", commit_stats.updated);
    info!("  Skipped: {}", commit_stats.skipped);
    info!("");
    info!("Tree step:");
    info!("  L1 nodes: {}", tree_stats.l1_nodes);
    info!("  L2 nodes: {}", tree_stats.l2_nodes);
    info!("  Records under an Unlabeled bucket: {}", tree_stats.unlabeled);
    info!("");
    info!("Label store: {}", args.labels);
    info!("Tree output: {}", args.tree);
    info!("===========================================================");

    Ok((queue_stats, commit_stats, tree_stats))
}
