use indexmap::IndexMap;
use log::warn;
use regex::{Regex, RegexBuilder};

use crate::ontology::RuleSet;

/// A rule whose pattern compiled successfully.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Literal pattern string as declared; reported verbatim as evidence.
    pub pattern: String,
    pub weight: i64,
    regex: Regex,
}

/// A rule set with every pattern compiled once, case-insensitive.
///
/// Every declared label is retained even when all of its patterns were
/// invalid, so downstream score maps stay complete.
#[derive(Debug, Clone, Default)]
pub struct CompiledRuleSet {
    labels: IndexMap<String, Vec<CompiledRule>>,
}

impl CompiledRuleSet {
    pub fn compile(rules: &RuleSet) -> Self {
        let mut labels = IndexMap::new();

        for (label, entries) in rules {
            let mut compiled = Vec::with_capacity(entries.len());
            for entry in entries {
                match RegexBuilder::new(&entry.pattern).case_insensitive(true).build() {
                    Ok(regex) => compiled.push(CompiledRule {
                        pattern: entry.pattern.clone(),
                        weight: entry.weight,
                        regex,
                    }),
                    Err(e) => {
                        warn!(
                            "Skipping invalid pattern {:?} under label {:?}: {}",
                            entry.pattern, label, e
                        );
                    }
                }
            }
            labels.insert(label.clone(), compiled);
        }

        Self { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Per-label scores and matched-pattern evidence for one text.
#[derive(Debug, Clone, Default)]
pub struct ScoreOutcome {
    /// Label -> accumulated weight; carries every declared label, 0 included.
    pub scores: IndexMap<String, i64>,
    /// Label -> matched pattern strings in declaration order; only labels
    /// with at least one match appear.
    pub evidence: IndexMap<String, Vec<String>>,
}

/// Score a text against a rule set.
///
/// A pattern that matches anywhere in the text (case-insensitive substring
/// search, not full match) contributes its weight once. Pure: no mutation of
/// the rule set, deterministic for a given (text, rule set).
pub fn score_rules(text: &str, rules: &CompiledRuleSet) -> ScoreOutcome {
    let mut outcome = ScoreOutcome::default();

    for (label, compiled) in &rules.labels {
        let mut score = 0;
        for rule in compiled {
            if rule.regex.is_match(text) {
                score += rule.weight;
                outcome
                    .evidence
                    .entry(label.clone())
                    .or_default()
                    .push(rule.pattern.clone());
            }
        }
        outcome.scores.insert(label.clone(), score);
    }

    outcome
}

/// Rank labels by descending score and keep the first `k`.
///
/// The sort is stable, so equal scores keep rule-set declaration order.
pub fn top_k(scores: &IndexMap<String, i64>, k: usize) -> Vec<(String, i64)> {
    let mut ranked: Vec<(String, i64)> = scores
        .iter()
        .map(|(label, score)| (label.clone(), *score))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(k);
    ranked
}
