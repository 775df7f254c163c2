//! Ontology configuration: taxonomy label lists and scoring rule sets.
//!
//! Loaded once at startup, compiled, and passed by reference into the scoring
//! components; nothing here mutates after load.

pub mod rules;

pub use rules::{default_l1_rules, RuleEntry, RuleSet};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;
use std::path::Path;

use crate::label::scorer::CompiledRuleSet;

/// Raw shape of the ontology file (`ontology.yaml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OntologySpec {
    /// Ordered first-level label names.
    #[serde(rename = "L1", default)]
    pub l1: Vec<String>,

    /// Second-level label names per L1, for display and tree building.
    #[serde(rename = "L2", default)]
    pub l2: IndexMap<String, Vec<String>>,

    /// Optional override of the built-in corpus-wide L1 rule set.
    #[serde(rename = "L1_RULES", default)]
    pub l1_rules: Option<RuleSet>,

    /// L2 scoring rules, scoped per L1 label.
    #[serde(rename = "L2_RULES", default)]
    pub l2_rules: IndexMap<String, RuleSet>,
}

/// Compiled, read-only ontology injected into the labeling components.
#[derive(Debug, Clone)]
pub struct Ontology {
    pub l1: Vec<String>,
    pub l2: IndexMap<String, Vec<String>>,
    pub l1_rules: CompiledRuleSet,
    pub l2_rules: IndexMap<String, CompiledRuleSet>,
}

impl Ontology {
    /// Load and compile the ontology from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ontology file: {}", path.display()))?;
        let spec: OntologySpec = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid ontology YAML: {}", path.display()))?;
        Ok(Self::from_spec(spec))
    }

    pub fn from_spec(spec: OntologySpec) -> Self {
        // Rule sets referencing labels outside the declared lists usually
        // mean a typo in the ontology file.
        if !spec.l1.is_empty() {
            for l1 in spec.l2_rules.keys() {
                if !spec.l1.contains(l1) {
                    warn!("L2_RULES references undeclared L1 label {:?}", l1);
                }
            }
        }
        for (l1, rules) in &spec.l2_rules {
            if let Some(declared) = spec.l2.get(l1) {
                for l2 in rules.keys() {
                    if !declared.contains(l2) {
                        warn!("L2_RULES for {:?} references undeclared L2 label {:?}", l1, l2);
                    }
                }
            }
        }

        let l1_rules = CompiledRuleSet::compile(&spec.l1_rules.unwrap_or_else(default_l1_rules));
        let l2_rules = spec
            .l2_rules
            .iter()
            .map(|(l1, rules)| (l1.clone(), CompiledRuleSet::compile(rules)))
            .collect();

        Self {
            l1: spec.l1,
            l2: spec.l2,
            l1_rules,
            l2_rules,
        }
    }

    /// Built-in ontology: the starter L1 rules and no L2 scoping. Used by
    /// unit tests and as a fallback when no config file is wanted.
    pub fn builtin() -> Self {
        Self::from_spec(OntologySpec::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_carries_default_l1_rules() {
        let ontology = Ontology::builtin();
        assert_eq!(ontology.l1_rules.len(), 5);
        assert!(ontology.l2_rules.is_empty());
    }

    #[test]
    fn test_spec_parses_all_rule_entry_shapes() {
        let yaml = r#"
L1:
  - Household Insurance Demand
  - Corporate Risk Management
L2:
  Household Insurance Demand:
    - Catastrophe & Flood
L2_RULES:
  Household Insurance Demand:
    Catastrophe & Flood:
      - {pattern: '\b(flood|hurricane)\b', weight: 2}
      - ['\bcatastroph(e|ic)\b', 2]
      - '\bnatural disaster\b'
"#;
        let spec: OntologySpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.l1.len(), 2);

        let rules = &spec.l2_rules["Household Insurance Demand"]["Catastrophe & Flood"];
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].weight, 2);
        assert_eq!(rules[1].weight, 2);
        assert_eq!(rules[2].weight, 1);
        assert_eq!(rules[2].pattern, r"\bnatural disaster\b");
    }

    #[test]
    fn test_l1_rules_override() {
        let yaml = r#"
L1_RULES:
  Only Label:
    - {pattern: '\bonly\b', weight: 3}
"#;
        let spec: OntologySpec = serde_yaml::from_str(yaml).unwrap();
        let ontology = Ontology::from_spec(spec);
        assert_eq!(ontology.l1_rules.len(), 1);
    }

    #[test]
    fn test_l2_lookup_is_scoped_per_l1() {
        let yaml = r#"
L2_RULES:
  A:
    A1:
      - '\balpha\b'
  B:
    B1:
      - '\bbeta\b'
"#;
        let spec: OntologySpec = serde_yaml::from_str(yaml).unwrap();
        let ontology = Ontology::from_spec(spec);
        assert!(ontology.l2_rules.contains_key("A"));
        assert!(ontology.l2_rules.contains_key("B"));
        assert!(!ontology.l2_rules.contains_key("C"));
    }
}
