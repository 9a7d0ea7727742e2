//! Category and tag inference
//!
//! Two strategies, matching the two migration paths:
//! - Ghost posts carry tag slugs, mapped through a fixed tag -> category table.
//! - LinkedIn articles carry nothing, so category comes from keyword scoring
//!   over title + content and tags from a known vocabulary.

use crate::config::TaxonomyConfig;

/// Map source tag slugs to a category via the configured table.
/// First matching tag wins, in tag order.
pub fn category_from_tags(config: &TaxonomyConfig, tags: &[String]) -> String {
    for tag in tags {
        if let Some(category) = config.category_map.get(tag) {
            return category.clone();
        }
    }
    config.default_category.clone()
}

/// Infer a category by scoring keyword occurrences in title + content.
/// Ties and zero scores fall back to the default category.
pub fn infer_category(config: &TaxonomyConfig, title: &str, content: &str) -> String {
    let text = format!("{} {}", title, content).to_lowercase();

    let mut best: (&str, usize) = (&config.default_category, 0);
    // Sort for deterministic tie-breaking, HashMap order is not stable
    let mut entries: Vec<_> = config.category_keywords.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (category, keywords) in entries {
        let score: usize = keywords
            .iter()
            .map(|keyword| text.matches(keyword.to_lowercase().as_str()).count())
            .sum();
        if score > best.1 {
            best = (category, score);
        }
    }

    best.0.to_string()
}

/// Infer tags by checking which vocabulary entries appear in the text.
/// Hyphenated tags match their space-separated form ("ai-coding" matches
/// "ai coding"). Capped at `max_tags`.
pub fn infer_tags(config: &TaxonomyConfig, title: &str, content: &str) -> Vec<String> {
    let text = format!("{} {}", title, content).to_lowercase();

    config
        .tag_vocabulary
        .iter()
        .filter(|tag| {
            let needle = tag.replace('-', " ");
            text.contains(&needle)
        })
        .take(config.max_tags)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_tags_first_match_wins() {
        let config = TaxonomyConfig::default();
        let tags = vec!["unknown-tag".to_string(), "commerce".to_string()];
        assert_eq!(category_from_tags(&config, &tags), "Commerce");
    }

    #[test]
    fn test_category_from_tags_default() {
        let config = TaxonomyConfig::default();
        let tags = vec!["nothing-known".to_string()];
        assert_eq!(category_from_tags(&config, &tags), "Reflections");
    }

    #[test]
    fn test_infer_category_scores_keywords() {
        let config = TaxonomyConfig::default();
        let category = infer_category(
            &config,
            "Shipping an LLM agent",
            "We wired the copilot into our automation stack. The agent handles AI tasks.",
        );
        assert_eq!(category, "AI & Automation");
    }

    #[test]
    fn test_infer_category_default_on_no_hits() {
        let config = TaxonomyConfig::default();
        let category = infer_category(&config, "Untitled", "Nothing matches here at all.");
        assert_eq!(category, "Reflections");
    }

    #[test]
    fn test_infer_tags_matches_vocabulary() {
        let config = TaxonomyConfig::default();
        let tags = infer_tags(
            &config,
            "Leadership notes",
            "Good leadership means systems thinking about architecture.",
        );
        assert!(tags.contains(&"leadership".to_string()));
        assert!(tags.contains(&"systems-thinking".to_string()));
        assert!(tags.contains(&"architecture".to_string()));
        assert!(tags.len() <= config.max_tags);
    }

    #[test]
    fn test_infer_tags_cap() {
        let mut config = TaxonomyConfig::default();
        config.max_tags = 1;
        let tags = infer_tags(&config, "leadership", "architecture devops testing");
        assert_eq!(tags.len(), 1);
    }
}
