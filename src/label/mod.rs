pub mod policy;
pub mod recommend;
pub mod scorer;
pub mod tags;

pub use policy::{decide, Decision, PolicyThresholds};
pub use recommend::{paper_text, recommend_l1, recommend_l2, Recommendation};
pub use scorer::{score_rules, top_k, CompiledRuleSet, ScoreOutcome};
pub use tags::title_tags;
