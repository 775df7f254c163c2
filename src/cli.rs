use clap::{Parser, Subcommand};

use crate::label::policy::{DEFAULT_MIN_GAP, DEFAULT_MIN_SCORE};

#[derive(Parser)]
#[command(name = "literature-taxonomy")]
#[command(about = "Unified CLI for weak-labeling, reviewing, and committing topic labels over a paper corpus")]
#[command(version = "0.3.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every paper against the ontology rules and build the review queue
    Queue(QueueArgs),

    /// Merge reviewed labels into the canonical label store (fill-only, tags union)
    Commit(CommitArgs),

    /// Reshape the canonical label store into the display tree artifact
    Tree(TreeArgs),

    /// Run the full pass: queue -> commit auto-decided labels -> tree
    Pipeline(PipelineArgs),
}

#[derive(Parser, Clone)]
pub struct QueueArgs {
    /// Papers corpus (line-delimited JSON)
    #[arg(short, long, required = true)]
    pub input: String,

    /// Ontology configuration file
    #[arg(long, default_value = "ontology.yaml")]
    pub ontology: String,

    /// Output review queue (line-delimited JSON)
    #[arg(short, long, default_value = "labels/review_queue.jsonl")]
    pub output: String,

    /// Minimum top-1 score for an automatic L1 decision
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    pub l1_min_score: i64,

    /// Minimum lead over the runner-up for an automatic L1 decision
    #[arg(long, default_value_t = DEFAULT_MIN_GAP)]
    pub l1_min_gap: i64,

    /// Minimum top-1 score for an automatic L2 decision
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    pub l2_min_score: i64,

    /// Minimum lead over the runner-up for an automatic L2 decision
    #[arg(long, default_value_t = DEFAULT_MIN_GAP)]
    pub l2_min_gap: i64,

    /// Skip the title tag heuristics
    #[arg(long, default_value = "false")]
    pub no_tags: bool,

    /// Logging level (DEBUG, INFO, WARN, ERROR, OFF)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone)]
pub struct CommitArgs {
    /// Reviewed queue file (line-delimited JSON)
    #[arg(short, long, default_value = "labels/review_queue.jsonl")]
    pub input: String,

    /// Canonical label store to merge into
    #[arg(long, default_value = "labels/paper_labels.jsonl")]
    pub labels: String,

    /// Logging level (DEBUG, INFO, WARN, ERROR, OFF)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone)]
pub struct TreeArgs {
    /// Canonical label store (line-delimited JSON)
    #[arg(short, long, default_value = "labels/paper_labels.jsonl")]
    pub input: String,

    /// Output tree artifact (nested JSON)
    #[arg(short, long, default_value = "tree.json")]
    pub output: String,

    /// Logging level (DEBUG, INFO, WARN, ERROR, OFF)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone)]
pub struct PipelineArgs {
    /// Papers corpus (line-delimited JSON)
    #[arg(short, long, required = true)]
    pub input: String,

    /// Ontology configuration file
    #[arg(long, default_value = "ontology.yaml")]
    pub ontology: String,

    /// Canonical label store to merge into
    #[arg(long, default_value = "labels/paper_labels.jsonl")]
    pub labels: String,

    /// Output tree artifact (nested JSON)
    #[arg(long, default_value = "tree.json")]
    pub tree: String,

    /// Minimum top-1 score for an automatic L1 decision
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    pub l1_min_score: i64,

    /// Minimum lead over the runner-up for an automatic L1 decision
    #[arg(long, default_value_t = DEFAULT_MIN_GAP)]
    pub l1_min_gap: i64,

    /// Minimum top-1 score for an automatic L2 decision
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    pub l2_min_score: i64,

    /// Minimum lead over the runner-up for an automatic L2 decision
    #[arg(long, default_value_t = DEFAULT_MIN_GAP)]
    pub l2_min_gap: i64,

    /// Skip the title tag heuristics
    #[arg(long, default_value = "false")]
    pub no_tags: bool,

    /// Keep the intermediate review queue instead of deleting it
    #[arg(long, default_value = "false")]
    pub keep_intermediates: bool,

    /// Directory for intermediate files (default: system temp)
    #[arg(long)]
    pub temp_dir: Option<String>,

    /// Logging level (DEBUG, INFO, WARN, ERROR, OFF)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}
