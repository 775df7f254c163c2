//! Canonical label store and the fill-only commit policy.
//!
//! The store is the authoritative record of human-confirmed labels. Commits
//! may only fill empty fields and grow tag sets; a value a reviewer entered
//! is never overwritten.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::common::jsonl::{read_jsonl, write_jsonl};
use crate::common::CommitStats;

/// One canonical record per paper, keyed by `paper_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    #[serde(default)]
    pub paper_id: String,
    #[serde(default)]
    pub topic_l1: String,
    #[serde(default)]
    pub topic_l2: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The subset of a review record the committer consumes. Reviewers edit
/// these fields by hand, so `tags` stays untyped until normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewedLabels {
    #[serde(default)]
    pub paper_id: String,
    #[serde(default)]
    pub final_l1: String,
    #[serde(default)]
    pub final_l2: String,
    #[serde(default)]
    pub tags: Value,
}

/// Normalize a reviewer-edited tags value: a list of strings or one
/// comma-separated string; any other JSON type yields no tags. Entries are
/// trimmed and empties dropped.
pub fn normalize_tags(tags: &Value) -> Vec<String> {
    match tags {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string().trim().to_string(),
            })
            .filter(|tag| !tag.is_empty())
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// Fill-only merge of an incoming record into an existing one.
///
/// Non-empty existing topics win; `topic_l2` is additionally only filled
/// when the incoming value is non-empty. Tags become a sorted, deduplicated
/// union, so they accumulate and never shrink. Pure: storage-independent.
pub fn merge(existing: &LabelRecord, incoming: &LabelRecord) -> LabelRecord {
    let mut merged = existing.clone();

    if merged.topic_l1.trim().is_empty() {
        merged.topic_l1 = incoming.topic_l1.clone();
    }
    if merged.topic_l2.trim().is_empty() && !incoming.topic_l2.is_empty() {
        merged.topic_l2 = incoming.topic_l2.clone();
    }
    if !incoming.tags.is_empty() {
        let union: BTreeSet<String> = merged
            .tags
            .iter()
            .chain(incoming.tags.iter())
            .cloned()
            .collect();
        merged.tags = union.into_iter().collect();
    }

    merged
}

/// In-memory view of the canonical store, keyed by `paper_id`. The key order
/// of the underlying map gives the ascending-id file order on save.
#[derive(Debug, Default)]
pub struct LabelStore {
    records: BTreeMap<String, LabelRecord>,
}

impl LabelStore {
    /// Load from a line-delimited file; a missing file is an empty store.
    /// Records without a `paper_id` are dropped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let rows: Vec<LabelRecord> = read_jsonl(path)?;
        let mut records = BTreeMap::new();
        for row in rows {
            if !row.paper_id.is_empty() {
                records.insert(row.paper_id.clone(), row);
            }
        }
        Ok(Self { records })
    }

    pub fn get(&self, paper_id: &str) -> Option<&LabelRecord> {
        self.records.get(paper_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending `paper_id` order.
    pub fn records(&self) -> impl Iterator<Item = &LabelRecord> {
        self.records.values()
    }

    /// Apply one reviewed record. A missing `paper_id` or an empty trimmed
    /// `final_l1` skips the record: L1 is the minimum signal to commit.
    pub fn apply(&mut self, review: &ReviewedLabels, stats: &mut CommitStats) {
        if review.paper_id.is_empty() {
            stats.skipped += 1;
            return;
        }

        let final_l1 = review.final_l1.trim();
        if final_l1.is_empty() {
            stats.skipped += 1;
            return;
        }

        let incoming = LabelRecord {
            paper_id: review.paper_id.clone(),
            topic_l1: final_l1.to_string(),
            topic_l2: review.final_l2.trim().to_string(),
            tags: dedup_first_seen(normalize_tags(&review.tags)),
        };

        let merged = match self.records.get(&incoming.paper_id) {
            Some(existing) => {
                stats.updated += 1;
                merge(existing, &incoming)
            }
            None => {
                stats.added += 1;
                incoming
            }
        };
        self.records.insert(merged.paper_id.clone(), merged);
    }

    /// Rewrite the store file in full, sorted by `paper_id` ascending. The
    /// write goes through a temp file and rename, so a failed run leaves the
    /// prior store intact.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let rows: Vec<&LabelRecord> = self.records.values().collect();
        write_jsonl(path, &rows)
    }
}

/// Merge a whole review queue into the store.
pub fn commit_reviews(reviews: &[ReviewedLabels], store: &mut LabelStore) -> CommitStats {
    let mut stats = CommitStats::default();
    for review in reviews {
        store.apply(review, &mut stats);
    }
    stats
}

fn dedup_first_seen(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn review(paper_id: &str, l1: &str, l2: &str, tags: Value) -> ReviewedLabels {
        ReviewedLabels {
            paper_id: paper_id.to_string(),
            final_l1: l1.to_string(),
            final_l2: l2.to_string(),
            tags,
        }
    }

    #[test]
    fn test_normalize_tags_list() {
        let tags = normalize_tags(&json!([" climate-risk ", "", "pension"]));
        assert_eq!(tags, vec!["climate-risk", "pension"]);
    }

    #[test]
    fn test_normalize_tags_comma_string() {
        let tags = normalize_tags(&json!("climate-risk, pension , "));
        assert_eq!(tags, vec!["climate-risk", "pension"]);
    }

    #[test]
    fn test_normalize_tags_other_types_empty() {
        assert!(normalize_tags(&json!(null)).is_empty());
        assert!(normalize_tags(&json!(42)).is_empty());
        assert!(normalize_tags(&json!({"a": 1})).is_empty());
    }

    #[test]
    fn test_merge_preserves_existing_l1() {
        let existing = LabelRecord {
            paper_id: "p1".into(),
            topic_l1: "Human Choice".into(),
            ..Default::default()
        };
        let incoming = LabelRecord {
            paper_id: "p1".into(),
            topic_l1: "Machine Choice".into(),
            ..Default::default()
        };
        let merged = merge(&existing, &incoming);
        assert_eq!(merged.topic_l1, "Human Choice");
    }

    #[test]
    fn test_merge_fills_empty_l1() {
        let existing = LabelRecord {
            paper_id: "p1".into(),
            topic_l1: "   ".into(),
            ..Default::default()
        };
        let incoming = LabelRecord {
            paper_id: "p1".into(),
            topic_l1: "Filled".into(),
            ..Default::default()
        };
        assert_eq!(merge(&existing, &incoming).topic_l1, "Filled");
    }

    #[test]
    fn test_merge_l2_needs_nonempty_incoming() {
        let existing = LabelRecord {
            paper_id: "p1".into(),
            topic_l1: "L1".into(),
            ..Default::default()
        };
        let incoming = LabelRecord {
            paper_id: "p1".into(),
            topic_l1: "L1".into(),
            topic_l2: String::new(),
            ..Default::default()
        };
        assert_eq!(merge(&existing, &incoming).topic_l2, "");
    }

    #[test]
    fn test_merge_tags_sorted_union() {
        let existing = LabelRecord {
            paper_id: "p1".into(),
            topic_l1: "L1".into(),
            tags: vec!["pension".into(), "ai".into()],
            ..Default::default()
        };
        let incoming = LabelRecord {
            paper_id: "p1".into(),
            topic_l1: "L1".into(),
            tags: vec!["climate-risk".into(), "pension".into()],
            ..Default::default()
        };
        let merged = merge(&existing, &incoming);
        assert_eq!(merged.tags, vec!["ai", "climate-risk", "pension"]);
    }

    #[test]
    fn test_merge_empty_incoming_tags_leaves_existing() {
        let existing = LabelRecord {
            paper_id: "p1".into(),
            topic_l1: "L1".into(),
            tags: vec!["pension".into(), "ai".into()],
            ..Default::default()
        };
        let incoming = LabelRecord {
            paper_id: "p1".into(),
            topic_l1: "L1".into(),
            ..Default::default()
        };
        // untouched, not even re-sorted
        assert_eq!(merge(&existing, &incoming).tags, vec!["pension", "ai"]);
    }

    #[test]
    fn test_apply_skips_missing_paper_id_and_empty_l1() {
        let mut store = LabelStore::default();
        let mut stats = CommitStats::default();

        store.apply(&review("", "L1", "", json!([])), &mut stats);
        store.apply(&review("p1", "   ", "", json!([])), &mut stats);

        assert_eq!(stats.skipped, 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_apply_adds_then_updates() {
        let mut store = LabelStore::default();
        let mut stats = CommitStats::default();

        store.apply(
            &review("p1", "Household Insurance Demand", "", json!(["pension"])),
            &mut stats,
        );
        store.apply(
            &review("p1", "Risk & Loss Modeling", "Tail Risk", json!(["ai"])),
            &mut stats,
        );

        assert_eq!(stats, CommitStats { added: 1, updated: 1, skipped: 0 });

        let record = store.get("p1").unwrap();
        assert_eq!(record.topic_l1, "Household Insurance Demand");
        assert_eq!(record.topic_l2, "Tail Risk");
        assert_eq!(record.tags, vec!["ai", "pension"]);
    }

    #[test]
    fn test_commit_is_idempotent() {
        let reviews = vec![
            review("p2", "B", "B2", json!(["t2"])),
            review("p1", "A", "", json!(["t1", "t1"])),
        ];

        let mut once = LabelStore::default();
        commit_reviews(&reviews, &mut once);

        let mut twice = LabelStore::default();
        commit_reviews(&reviews, &mut twice);
        commit_reviews(&reviews, &mut twice);

        let once: Vec<_> = once.records().cloned().collect();
        let twice: Vec<_> = twice.records().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_tag_monotonicity() {
        let mut store = LabelStore::default();
        let mut stats = CommitStats::default();
        store.apply(&review("p1", "A", "", json!(["a", "b"])), &mut stats);

        let before: BTreeSet<String> = store.get("p1").unwrap().tags.iter().cloned().collect();
        store.apply(&review("p1", "A", "", json!(["c"])), &mut stats);
        let after: BTreeSet<String> = store.get("p1").unwrap().tags.iter().cloned().collect();

        assert!(after.is_superset(&before));
    }

    #[test]
    fn test_store_save_load_sorted_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper_labels.jsonl");

        let mut store = LabelStore::default();
        let mut stats = CommitStats::default();
        store.apply(&review("p9", "B", "", json!([])), &mut stats);
        store.apply(&review("p1", "A", "", json!([])), &mut stats);
        store.save(&path).unwrap();

        let loaded = LabelStore::load(&path).unwrap();
        let ids: Vec<&str> = loaded.records().map(|r| r.paper_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p9"]);
    }

    #[test]
    fn test_load_drops_records_without_paper_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper_labels.jsonl");
        std::fs::write(
            &path,
            "{\"paper_id\":\"p1\",\"topic_l1\":\"A\"}\n{\"topic_l1\":\"B\"}\n",
        )
        .unwrap();

        let store = LabelStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
    }
}
