use indexmap::IndexMap;
use serde::Deserialize;

/// One scoring rule: a regex pattern and its integer weight.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RuleEntryDe")]
pub struct RuleEntry {
    pub pattern: String,
    pub weight: i64,
}

impl RuleEntry {
    pub fn new(pattern: &str, weight: i64) -> Self {
        Self {
            pattern: pattern.to_string(),
            weight,
        }
    }
}

/// Accepted config shapes: `{pattern: ..., weight: ...}`, `[pattern, weight]`,
/// or a bare pattern string with implicit weight 1.
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleEntryDe {
    Entry {
        pattern: String,
        #[serde(default = "default_weight")]
        weight: i64,
    },
    Pair(String, i64),
    Bare(String),
}

fn default_weight() -> i64 {
    1
}

impl From<RuleEntryDe> for RuleEntry {
    fn from(de: RuleEntryDe) -> Self {
        match de {
            RuleEntryDe::Entry { pattern, weight } => Self { pattern, weight },
            RuleEntryDe::Pair(pattern, weight) => Self { pattern, weight },
            RuleEntryDe::Bare(pattern) => Self { pattern, weight: 1 },
        }
    }
}

/// Mapping from label to its ordered rule list. Insertion order is
/// significant: it drives tie-breaks in candidate rankings.
pub type RuleSet = IndexMap<String, Vec<RuleEntry>>;

/// Starter corpus-wide L1 rule set; an `L1_RULES` section in the ontology
/// file replaces it wholesale.
pub fn default_l1_rules() -> RuleSet {
    let mut rules = RuleSet::new();

    rules.insert(
        "Household Insurance Demand".to_string(),
        vec![
            RuleEntry::new(r"\b(willingness to pay|WTP|take[- ]?up|purchase|demand)\b", 2),
            RuleEntry::new(
                r"\b(household|individual|consumer|retirement|annuity|pension|long[- ]?term care|LTC)\b",
                2,
            ),
        ],
    );
    rules.insert(
        "Corporate Risk Management".to_string(),
        vec![
            RuleEntry::new(r"\b(firm|corporate|nonfinancial|enterprise)\b", 2),
            RuleEntry::new(r"\b(hedg(e|ing)|risk management|ERM|insurance use)\b", 2),
        ],
    );
    rules.insert(
        "Insurer Behavior & Performance".to_string(),
        vec![
            RuleEntry::new(r"\b(insurer|insurance company|property casualty|P\&C)\b", 2),
            RuleEntry::new(
                r"\b(capital|solvency|RBC|reinsurance|underwriting|reserving|portfolio)\b",
                2,
            ),
        ],
    );
    rules.insert(
        "Market / Regulation / Policy".to_string(),
        vec![
            RuleEntry::new(r"\b(regulation|regulatory|policy|reform|mandate|Solvency)\b", 2),
            RuleEntry::new(r"\b(competition|market structure|entry|premium regulation)\b", 1),
        ],
    );
    rules.insert(
        "Risk & Loss Modeling".to_string(),
        vec![
            RuleEntry::new(
                r"\b(loss distribution|tail risk|extreme value|catastrophe model)\b",
                2,
            ),
            RuleEntry::new(
                r"\b(pricing model|valuation|robust|ambiguity|risk measure|classification|machine learning|AI)\b",
                2,
            ),
        ],
    );

    rules
}
