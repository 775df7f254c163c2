use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::label::policy::PolicyThresholds;

/// One paper as it arrives in the corpus file. Immutable input; every field
/// is defaulted so sparse or null-bearing records still parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paper {
    #[serde(default, deserialize_with = "null_to_default")]
    pub paper_id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub metadata: PaperMetadata,
    #[serde(default, deserialize_with = "null_to_default")]
    pub raw_text: PaperRawText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperMetadata {
    #[serde(default, deserialize_with = "null_to_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub keywords_author: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperRawText {
    #[serde(rename = "abstract", default, deserialize_with = "null_to_default")]
    pub abstract_text: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub keywords_text: String,
}

/// Explicit JSON null is treated like an absent field.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One reviewable record per paper: ranked candidates, evidence, provisional
/// decisions, and the thresholds they were made under. Reviewers edit
/// `final_l1` / `final_l2` / `tags` in place before the commit step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub paper_id: String,
    pub title: String,

    pub l1_top3: Vec<(String, i64)>,
    pub evidence_l1: IndexMap<String, Vec<String>>,

    pub l2_top3: Vec<(String, i64)>,
    pub evidence_l2: IndexMap<String, Vec<String>>,

    pub final_l1: String,
    pub final_l2: String,
    pub tags: Vec<String>,

    pub auto_meta: AutoMeta,
}

/// Policy metadata carried on every review record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoMeta {
    pub l1_policy: PolicyThresholds,
    pub l2_policy: PolicyThresholds,
    pub l1_reason: String,
    pub l2_reason: String,
}

/// Statistics from the queue step
#[derive(Debug, Clone, Default)]
pub struct QueueStats {
    pub papers_processed: usize,
    pub l1_auto: usize,
    pub l1_manual: usize,
    pub l2_auto: usize,
    pub l2_manual: usize,
    pub l2_skipped: usize,
    pub records_written: usize,
}

/// Statistics from the commit step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitStats {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Statistics from the tree step
#[derive(Debug, Clone, Default)]
pub struct TreeStats {
    pub records: usize,
    pub l1_nodes: usize,
    pub l2_nodes: usize,
    pub unlabeled: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_paper_parses_with_defaults() {
        let paper: Paper = serde_json::from_str(r#"{"paper_id":"p1"}"#).unwrap();
        assert_eq!(paper.paper_id, "p1");
        assert!(paper.metadata.title.is_empty());
        assert!(paper.raw_text.abstract_text.is_empty());
    }

    #[test]
    fn test_null_fields_parse_like_absent() {
        let paper: Paper = serde_json::from_str(
            r#"{"paper_id":"p1","metadata":{"title":null,"keywords_author":null},"raw_text":null}"#,
        )
        .unwrap();
        assert!(paper.metadata.title.is_empty());
        assert!(paper.metadata.keywords_author.is_empty());
        assert!(paper.raw_text.keywords_text.is_empty());
    }

    #[test]
    fn test_abstract_field_name() {
        let paper: Paper = serde_json::from_str(
            r#"{"paper_id":"p1","raw_text":{"abstract":"flood insurance"}}"#,
        )
        .unwrap();
        assert_eq!(paper.raw_text.abstract_text, "flood insurance");

        let json = serde_json::to_value(&paper).unwrap();
        assert_eq!(json["raw_text"]["abstract"], "flood insurance");
    }
}
