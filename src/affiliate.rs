//! Affiliate link resolution.
//!
//! Site config carries an ordered list of `[[affiliates]]` rules. Each rule
//! pairs a substring key with the monetized link that should replace an
//! item's catalog link when the key appears in the item's name:
//!
//! ```toml
//! [[affiliates]]
//! key = "jasper"
//! link = "https://aff.example/jasper"
//! ```
//!
//! Rules are tried in declaration order and the first match wins. Matching is
//! case-insensitive on both sides. No match keeps the catalog link.

use serde::{Deserialize, Serialize};

/// A single `(substring key, override link)` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AffiliateRule {
    pub key: String,
    pub link: String,
}

impl AffiliateRule {
    pub fn new(key: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            link: link.into(),
        }
    }
}

/// Resolve the outbound link for an item.
///
/// Returns the link of the first rule whose lowercase key is a substring of
/// the lowercase item name, or `default` when nothing matches. Rules with an
/// empty key never match.
pub fn resolve_link<'a>(name: &str, default: &'a str, rules: &'a [AffiliateRule]) -> &'a str {
    let name = name.to_lowercase();
    rules
        .iter()
        .filter(|rule| !rule.key.is_empty())
        .find(|rule| name.contains(&rule.key.to_lowercase()))
        .map(|rule| rule.link.as_str())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_key_overrides_default() {
        let rules = vec![AffiliateRule::new("jasper", "https://aff.example/jasper")];
        assert_eq!(
            resolve_link("Jasper AI Pro", "https://jasper.ai", &rules),
            "https://aff.example/jasper"
        );
    }

    #[test]
    fn no_match_keeps_default() {
        let rules = vec![AffiliateRule::new("jasper", "https://aff.example/jasper")];
        assert_eq!(
            resolve_link("Copy.ai", "https://copy.ai", &rules),
            "https://copy.ai"
        );
    }

    #[test]
    fn first_rule_in_order_wins() {
        let rules = vec![
            AffiliateRule::new("ai", "https://aff.example/generic"),
            AffiliateRule::new("jasper", "https://aff.example/jasper"),
        ];
        assert_eq!(
            resolve_link("Jasper AI", "https://jasper.ai", &rules),
            "https://aff.example/generic"
        );

        let reversed: Vec<_> = rules.into_iter().rev().collect();
        assert_eq!(
            resolve_link("Jasper AI", "https://jasper.ai", &reversed),
            "https://aff.example/jasper"
        );
    }

    #[test]
    fn key_case_is_ignored() {
        let rules = vec![AffiliateRule::new("SEMrush", "https://aff.example/semrush")];
        assert_eq!(
            resolve_link("semrush", "", &rules),
            "https://aff.example/semrush"
        );
    }

    #[test]
    fn empty_key_never_matches() {
        let rules = vec![AffiliateRule::new("", "https://aff.example/everything")];
        assert_eq!(resolve_link("Anything", "https://x.test", &rules), "https://x.test");
    }

    #[test]
    fn empty_rules_keep_default() {
        assert_eq!(resolve_link("Tool", "https://tool.test", &[]), "https://tool.test");
    }
}
