use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use crate::cli::TreeArgs;
use crate::common::jsonl::{read_jsonl, write_json_pretty};
use crate::common::{format_elapsed, setup_logging, TreeStats};
use crate::store::LabelRecord;

const ROOT_NAME: &str = "ROOT";
const UNLABELED: &str = "Unlabeled";

/// Display artifact node: L2 leaves carry `value` (paper count) and
/// `paper_ids`; ROOT and L1 nodes carry `children`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paper_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

/// Run the tree command with the given arguments
pub fn run_tree(args: TreeArgs) -> Result<TreeStats> {
    setup_logging(&args.log_level)?;
    build_tree(&args)
}

/// Core tree pass, separated so the pipeline can reuse it.
pub fn build_tree(args: &TreeArgs) -> Result<TreeStats> {
    let start_time = Instant::now();

    info!("Starting tree build");
    info!("Label store: {}", args.input);
    info!("Output: {}", args.output);

    if !Path::new(&args.input).exists() {
        return Err(anyhow::anyhow!("Labels file does not exist: {}", args.input));
    }

    let records: Vec<LabelRecord> = read_jsonl(&args.input)?;
    let (root, stats) = assemble_tree(&records);

    write_json_pretty(&args.output, &root)?;

    let total_time = start_time.elapsed();

    info!("==================== FINAL SUMMARY ====================");
    info!("Total execution time: {}", format_elapsed(total_time));
    info!("Label records: {}", stats.records);
    info!("L1 nodes: {}", stats.l1_nodes);
    info!("L2 nodes: {}", stats.l2_nodes);
    info!("Records under an Unlabeled bucket: {}", stats.unlabeled);
    info!("Output file: {}", args.output);
    info!("========================================================");

    Ok(stats)
}

/// Group records L1 -> L2 -> paper_ids and shape them for display. Empty
/// labels fall into `Unlabeled` buckets; both levels come out sorted by name.
pub fn assemble_tree(records: &[LabelRecord]) -> (TreeNode, TreeStats) {
    let mut grouped: BTreeMap<&str, BTreeMap<&str, Vec<String>>> = BTreeMap::new();
    let mut stats = TreeStats {
        records: records.len(),
        ..Default::default()
    };

    for record in records {
        let l1 = non_empty_or(&record.topic_l1, UNLABELED);
        let l2 = non_empty_or(&record.topic_l2, UNLABELED);
        if l1 == UNLABELED || l2 == UNLABELED {
            stats.unlabeled += 1;
        }
        grouped
            .entry(l1)
            .or_default()
            .entry(l2)
            .or_default()
            .push(record.paper_id.clone());
    }

    let mut root = TreeNode {
        name: ROOT_NAME.to_string(),
        value: None,
        paper_ids: Vec::new(),
        children: Vec::new(),
    };

    for (l1, l2_map) in grouped {
        let mut l1_node = TreeNode {
            name: l1.to_string(),
            value: None,
            paper_ids: Vec::new(),
            children: Vec::new(),
        };
        for (l2, paper_ids) in l2_map {
            l1_node.children.push(TreeNode {
                name: l2.to_string(),
                value: Some(paper_ids.len()),
                paper_ids,
                children: Vec::new(),
            });
            stats.l2_nodes += 1;
        }
        root.children.push(l1_node);
        stats.l1_nodes += 1;
    }

    (root, stats)
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
