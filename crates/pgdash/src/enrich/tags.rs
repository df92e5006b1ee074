//! Keyword tagging of free-text comments.

use indexmap::IndexSet;
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::schema::{Derived, Listing};

use super::pipeline::EnrichmentStep;

/// Label given to listings whose comments match no category.
pub const GENERIC_TAG: &str = "Reviewed";

/// Words that cancel the keyword right after them ("no parking available").
const NEGATIONS: &str = "not|no|never";

/// A labelled category of comment keywords.
///
/// Keywords match whole words, case-insensitively, with an optional plural
/// `s`. A keyword directly preceded by a negation does not count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagRule {
    /// Tag added when any keyword matches.
    pub label: String,
    /// Words or phrases to look for.
    pub keywords: Vec<String>,
    #[serde(skip)]
    pattern: OnceCell<Option<Regex>>,
}

impl TagRule {
    pub fn new(label: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            label: label.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            pattern: OnceCell::new(),
        }
    }

    /// Whether `text` contains any keyword that is not negated.
    pub fn matches(&self, text: &str) -> bool {
        match self.pattern() {
            Some(pattern) => pattern.captures_iter(text).any(|caps| caps.get(1).is_none()),
            None => false,
        }
    }

    /// Alternation of all keywords, compiled on first use.
    fn pattern(&self) -> Option<&Regex> {
        self.pattern
            .get_or_init(|| {
                let alternatives: Vec<String> = self
                    .keywords
                    .iter()
                    .filter(|k| !k.trim().is_empty())
                    .map(|k| {
                        k.split_whitespace()
                            .map(regex::escape)
                            .collect::<Vec<_>>()
                            .join(r"\s+")
                    })
                    .collect();
                if alternatives.is_empty() {
                    return None;
                }

                let source = format!(
                    r"(?i)\b(?:({NEGATIONS})\s+)?(?:{})s?\b",
                    alternatives.join("|")
                );
                match Regex::new(&source) {
                    Ok(pattern) => Some(pattern),
                    Err(e) => {
                        tracing::warn!(label = %self.label, error = %e, "unusable tag keywords");
                        None
                    }
                }
            })
            .as_ref()
    }
}

impl PartialEq for TagRule {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.keywords == other.keywords
    }
}

/// The built-in categories, positive variant before negative.
pub fn default_tag_rules() -> Vec<TagRule> {
    vec![
        TagRule::new(
            "Good Food",
            &["good food", "food is good", "great food", "tasty", "delicious", "homely food"],
        ),
        TagRule::new(
            "Bad Food",
            &["bad food", "food is bad", "poor food", "worst food", "tasteless", "food is not good"],
        ),
        TagRule::new(
            "Good WiFi",
            &["good wifi", "fast wifi", "wifi is good", "good internet", "fast internet"],
        ),
        TagRule::new(
            "Poor WiFi",
            &["no wifi", "slow wifi", "bad wifi", "poor wifi", "wifi issue", "slow internet", "no internet"],
        ),
        TagRule::new("Clean", &["clean", "hygienic", "neat", "tidy"]),
        TagRule::new(
            "Hygiene Issue",
            &["dirty", "unclean", "not clean", "unhygienic", "cockroach", "pests", "bed bug", "smelly"],
        ),
        TagRule::new(
            "Parking",
            &["parking available", "good parking", "ample parking", "has parking", "bike parking"],
        ),
        TagRule::new("No Parking", &["no parking", "parking issue", "parking problem"]),
        TagRule::new("Spacious", &["spacious", "big room", "large room", "airy"]),
        TagRule::new("Cramped", &["cramped", "small room", "congested", "tiny room"]),
        TagRule::new(
            "Friendly Staff",
            &["friendly", "helpful owner", "helpful staff", "supportive"],
        ),
        TagRule::new(
            "Rude Staff",
            &["rude", "strict owner", "unfriendly", "not friendly", "uncooperative", "not cooperative"],
        ),
    ]
}

/// Tags for a comment: one label per matching rule, in rule order.
///
/// Rules are matched independently, so contradictory labels can both apply.
pub fn tags_for(comments: &str, rules: &[TagRule]) -> IndexSet<String> {
    let mut tags: IndexSet<String> = rules
        .iter()
        .filter(|rule| rule.matches(comments))
        .map(|rule| rule.label.clone())
        .collect();

    if tags.is_empty() {
        tags.insert(GENERIC_TAG.to_string());
    }
    tags
}

/// Adds comment tags to each listing.
#[derive(Debug, Clone)]
pub struct Tagger {
    rules: Vec<TagRule>,
}

impl Tagger {
    pub fn new() -> Self {
        Self::with_rules(default_tag_rules())
    }

    pub fn with_rules(rules: Vec<TagRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[TagRule] {
        &self.rules
    }
}

impl Default for Tagger {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrichmentStep for Tagger {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn derive(&self, listing: &Listing, derived: &mut Derived) {
        derived.tags = tags_for(&listing.comments, &self.rules);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(comments: &str) -> Vec<String> {
        tags_for(comments, &default_tag_rules()).into_iter().collect()
    }

    #[test]
    fn test_categories_match_independently() {
        assert_eq!(
            labels("Good food and clean rooms but no parking"),
            vec!["Good Food", "Clean", "No Parking"]
        );
    }

    #[test]
    fn test_order_follows_rules_not_text() {
        assert_eq!(labels("No parking. Tasty meals."), vec!["Good Food", "No Parking"]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(labels("FAST WIFI"), vec!["Good WiFi"]);
    }

    #[test]
    fn test_contradictory_tags_are_kept() {
        assert_eq!(labels("Looks clean but dirty bathrooms"), vec!["Clean", "Hygiene Issue"]);
    }

    #[test]
    fn test_no_match_gets_generic_label() {
        assert_eq!(labels("Near the metro station"), vec![GENERIC_TAG]);
        assert_eq!(labels(""), vec![GENERIC_TAG]);
    }

    #[test]
    fn test_label_added_once_per_rule() {
        assert_eq!(labels("tasty, delicious, good food"), vec!["Good Food"]);
    }

    #[test]
    fn test_negative_words_do_not_trigger_positive_tags() {
        assert_eq!(labels("unclean rooms"), vec!["Hygiene Issue"]);
        assert_eq!(labels("unhygienic kitchen"), vec!["Hygiene Issue"]);
        assert_eq!(labels("unfriendly owner"), vec!["Rude Staff"]);
        assert_eq!(labels("owner is not cooperative"), vec!["Rude Staff"]);
    }

    #[test]
    fn test_keywords_match_whole_words() {
        assert_eq!(labels("dairy products served"), vec![GENERIC_TAG]);
        assert_eq!(labels("prudent choice"), vec![GENERIC_TAG]);
        assert_eq!(labels("small rooms, no lift"), vec!["Cramped"]);
    }

    #[test]
    fn test_negated_keyword_is_ignored() {
        assert_eq!(labels("no parking available"), vec!["No Parking"]);
        assert_eq!(labels("rooms are not clean"), vec!["Hygiene Issue"]);
        assert_eq!(labels("NOT FRIENDLY at all"), vec!["Rude Staff"]);
    }

    #[test]
    fn test_rule_without_keywords_never_matches() {
        let rules = vec![TagRule::new("Empty", &["", "  "])];
        assert_eq!(
            tags_for("anything", &rules).into_iter().collect::<Vec<_>>(),
            vec![GENERIC_TAG]
        );
    }

    #[test]
    fn test_custom_rules() {
        let rules = vec![TagRule::new("Metro", &["METRO"])];
        let tags = tags_for("walk to metro", &rules);
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["Metro"]);
    }
}
