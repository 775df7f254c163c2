//! Unweighted title heuristics feeding the `tags` field of review records.
//! Distinct from the scored L1/L2 rules: each check is a plain substring
//! test over the lowercased title and fires at most one tag.

/// Derive short topic tags from a paper title, deduplicated preserving
/// first-seen order.
pub fn title_tags(title: &str) -> Vec<String> {
    let t = title.to_lowercase();
    let mut tags: Vec<&str> = Vec::new();

    // climate / nat-cat
    if contains_any(&t, &["natural disaster", "catastrophe", "hurricane", "flood"]) {
        tags.push("natural-disaster");
    }
    if contains_any(&t, &["climate", "natural disaster", "catastrophe"]) {
        tags.push("climate-risk");
    }

    // cyber
    if t.contains("cyber") {
        tags.push("cyber-risk");
    }

    // AI / ML
    if contains_any(&t, &["ai", "machine learning", "intelligent", "risk profiling"]) {
        tags.push("ai");
    }

    // LTC / pension; the \u{2010} variant covers the non-ASCII hyphen some
    // publishers emit in "long-term"
    if contains_any(&t, &["long-term care", "long\u{2010}term care", "ltc"]) {
        tags.push("long-term-care");
    }
    if contains_any(&t, &["pension", "annuity", "retirement"]) {
        tags.push("pension");
    }

    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        if !out.iter().any(|seen| seen == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catastrophe_title_gets_both_climate_tags() {
        let tags = title_tags("Catastrophe bonds and reinsurance");
        assert_eq!(tags, vec!["natural-disaster", "climate-risk"]);
    }

    #[test]
    fn test_flood_is_natural_disaster_only() {
        let tags = title_tags("Flood exposure and coverage gaps");
        assert_eq!(tags, vec!["natural-disaster"]);
    }

    #[test]
    fn test_cyber_tag() {
        let tags = title_tags("Pricing cyber risk");
        assert_eq!(tags, vec!["cyber-risk"]);
    }

    #[test]
    fn test_ltc_and_pension() {
        let tags = title_tags("Long-term care and retirement planning");
        assert_eq!(tags, vec!["long-term-care", "pension"]);
    }

    #[test]
    fn test_unicode_hyphen_ltc() {
        let tags = title_tags("Long\u{2010}term care insurance");
        assert_eq!(tags, vec!["long-term-care"]);
    }

    #[test]
    fn test_no_heuristic_fires() {
        assert!(title_tags("Optimal reinsurance contracts").is_empty());
    }

    #[test]
    fn test_empty_title() {
        assert!(title_tags("").is_empty());
    }

    #[test]
    fn test_tags_deduplicated_in_first_seen_order() {
        // "climate" and "catastrophe" both map to climate-risk; it appears once
        let tags = title_tags("Climate change and catastrophe insurance");
        assert_eq!(tags, vec!["natural-disaster", "climate-risk"]);
    }
}
