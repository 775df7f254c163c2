use anyhow::Result;
use log::info;
use std::path::Path;
use std::time::Instant;

use crate::cli::QueueArgs;
use crate::common::jsonl::{read_jsonl, write_jsonl};
use crate::common::progress::create_count_progress_bar;
use crate::common::{
    format_elapsed, setup_logging, AutoMeta, Paper, QueueStats, ReviewRecord,
};
use crate::label::policy::{decide, Decision, PolicyThresholds};
use crate::label::recommend::{recommend_l1, recommend_l2, Recommendation};
use crate::label::tags::title_tags;
use crate::ontology::Ontology;

/// Run the queue command with the given arguments
pub fn run_queue(args: QueueArgs) -> Result<QueueStats> {
    setup_logging(&args.log_level)?;
    let ontology = Ontology::load(&args.ontology)?;
    build_queue(&args, &ontology)
}

/// Core queue pass, separated so the pipeline can reuse it with an already
/// loaded ontology and initialized logging.
pub fn build_queue(args: &QueueArgs, ontology: &Ontology) -> Result<QueueStats> {
    let start_time = Instant::now();

    info!("Starting review queue build");
    info!("Papers: {}", args.input);
    info!("Ontology: {}", args.ontology);
    info!("Output: {}", args.output);

    if !Path::new(&args.input).exists() {
        return Err(anyhow::anyhow!("Papers file does not exist: {}", args.input));
    }

    let l1_policy = PolicyThresholds {
        min_score: args.l1_min_score,
        min_gap: args.l1_min_gap,
    };
    let l2_policy = PolicyThresholds {
        min_score: args.l2_min_score,
        min_gap: args.l2_min_gap,
    };

    let papers: Vec<Paper> = read_jsonl(&args.input)?;
    info!("Loaded {} papers", papers.len());

    let progress = create_count_progress_bar(papers.len() as u64);
    let mut stats = QueueStats::default();
    let mut records = Vec::with_capacity(papers.len());

    // One record per input paper, in file order.
    for paper in &papers {
        records.push(review_paper(
            paper,
            ontology,
            &l1_policy,
            &l2_policy,
            !args.no_tags,
            &mut stats,
        ));
        stats.papers_processed += 1;
        progress.inc(1);
    }
    progress.finish_with_message("Scoring complete");

    write_jsonl(&args.output, &records)?;
    stats.records_written = records.len();

    let total_time = start_time.elapsed();

    info!("==================== FINAL SUMMARY ====================");
    info!("Total execution time: {}", format_elapsed(total_time));
    info!("Papers processed: {}", stats.papers_processed);
    info!("L1 auto-decided: {}", stats.l1_auto);
    info!("L1 manual review: {}", stats.l1_manual);
    info!("L2 auto-decided: {}", stats.l2_auto);
    info!("L2 manual review: {}", stats.l2_manual);
    info!("L2 skipped (no L1): {}", stats.l2_skipped);
    info!("Records written: {}", stats.records_written);
    info!("Output file: {}", args.output);
    info!("========================================================");

    Ok(stats)
}

/// Build the review record for one paper: L1 candidates and decision, then
/// L2 only when L1 was auto-decided, then the title tag heuristics.
fn review_paper(
    paper: &Paper,
    ontology: &Ontology,
    l1_policy: &PolicyThresholds,
    l2_policy: &PolicyThresholds,
    fill_tags: bool,
    stats: &mut QueueStats,
) -> ReviewRecord {
    let l1 = recommend_l1(paper, ontology);
    let l1_decision = decide(&l1.ranking, l1_policy);

    let (l2, l2_decision) = if l1_decision.is_auto() {
        let l2 = recommend_l2(paper, ontology, &l1_decision.label);
        let l2_decision = decide(&l2.ranking, l2_policy);
        (l2, l2_decision)
    } else {
        (Recommendation::default(), Decision::skipped_no_l1())
    };

    if l1_decision.is_auto() {
        stats.l1_auto += 1;
        if l2_decision.is_auto() {
            stats.l2_auto += 1;
        } else {
            stats.l2_manual += 1;
        }
    } else {
        stats.l1_manual += 1;
        stats.l2_skipped += 1;
    }

    let tags = if fill_tags {
        title_tags(&paper.metadata.title)
    } else {
        Vec::new()
    };

    ReviewRecord {
        paper_id: paper.paper_id.clone(),
        title: paper.metadata.title.clone(),
        l1_top3: l1.ranking,
        evidence_l1: l1.evidence,
        l2_top3: l2.ranking,
        evidence_l2: l2.evidence,
        final_l1: l1_decision.label,
        final_l2: l2_decision.label,
        tags,
        auto_meta: AutoMeta {
            l1_policy: *l1_policy,
            l2_policy: *l2_policy,
            l1_reason: l1_decision.reason,
            l2_reason: l2_decision.reason,
        },
    }
}
