use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_SCORE: i64 = 4;
pub const DEFAULT_MIN_GAP: i64 = 2;

/// Minimum top-1 score and minimum lead over the runner-up required to
/// auto-accept a candidate. L1 and L2 carry independent thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyThresholds {
    pub min_score: i64,
    pub min_gap: i64,
}

impl Default for PolicyThresholds {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            min_gap: DEFAULT_MIN_GAP,
        }
    }
}

/// Outcome of the auto-decision policy. An empty label means the paper needs
/// manual review; the reason string is carried verbatim into review records.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub label: String,
    pub reason: String,
}

impl Decision {
    pub fn is_auto(&self) -> bool {
        !self.label.is_empty()
    }

    /// L2 decision for papers whose L1 was not auto-decided; L2 scoring is
    /// never attempted without a confident L1.
    pub fn skipped_no_l1() -> Self {
        Self {
            label: String::new(),
            reason: "skipped(no_final_l1)".to_string(),
        }
    }
}

/// Convert a ranking into a confident label or an empty "manual" result.
///
/// The gap requirement keeps near-ties out of auto-commit even when the
/// absolute score clears the threshold.
pub fn decide(ranking: &[(String, i64)], thresholds: &PolicyThresholds) -> Decision {
    let Some((top1_label, top1_score)) = ranking.first() else {
        return Decision {
            label: String::new(),
            reason: "no_candidates".to_string(),
        };
    };

    let top2_score = ranking.get(1).map(|(_, score)| *score).unwrap_or(0);
    let gap = top1_score - top2_score;

    if *top1_score >= thresholds.min_score && gap >= thresholds.min_gap {
        Decision {
            label: top1_label.clone(),
            reason: format!("auto(score={},gap={})", top1_score, gap),
        }
    } else {
        Decision {
            label: String::new(),
            reason: format!("manual_needed(score={},gap={})", top1_score, gap),
        }
    }
}
