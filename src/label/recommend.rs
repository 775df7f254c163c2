use indexmap::IndexMap;

use crate::common::Paper;
use crate::label::scorer::{score_rules, top_k, CompiledRuleSet};
use crate::ontology::Ontology;

/// Candidates are truncated to the top three; reviewers rarely look further.
pub const TOP_K: usize = 3;

/// Ranked label candidates with the full evidence map behind them.
#[derive(Debug, Clone, Default)]
pub struct Recommendation {
    pub ranking: Vec<(String, i64)>,
    pub evidence: IndexMap<String, Vec<String>>,
}

/// Composite text a paper is scored on: title, abstract, author keywords
/// joined by spaces, free-text keywords; empty fields dropped, parts joined
/// by newline.
pub fn paper_text(paper: &Paper) -> String {
    let parts = [
        paper.metadata.title.clone(),
        paper.raw_text.abstract_text.clone(),
        paper.metadata.keywords_author.join(" "),
        paper.raw_text.keywords_text.clone(),
    ];

    parts
        .iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Top-3 L1 candidates under the corpus-wide rule set.
pub fn recommend_l1(paper: &Paper, ontology: &Ontology) -> Recommendation {
    recommend(paper, &ontology.l1_rules)
}

/// Top-3 L2 candidates under the rule subset scoped to `l1`. An L1 with no
/// defined L2 rules yields an empty ranking.
pub fn recommend_l2(paper: &Paper, ontology: &Ontology, l1: &str) -> Recommendation {
    match ontology.l2_rules.get(l1) {
        Some(rules) => recommend(paper, rules),
        None => Recommendation::default(),
    }
}

fn recommend(paper: &Paper, rules: &CompiledRuleSet) -> Recommendation {
    let text = paper_text(paper);
    let outcome = score_rules(&text, rules);
    Recommendation {
        ranking: top_k(&outcome.scores, TOP_K),
        evidence: outcome.evidence,
    }
}
