//! Shared test utilities for the matchup test suite.
//!
//! Provides catalog record builders, a ready-to-validate site config, and
//! lookup helpers over rendered HTML.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let items = sample_items();
//! let config = test_config();
//! assert!(hrefs(r#"<a href="/x/">"#).contains(&"/x/"));
//! ```

use crate::catalog::ItemRecord;
use crate::config::SiteConfig;

// =========================================================================
// Fixture builders
// =========================================================================

/// A record with only `name` and `price` set.
pub fn item(name: &str, price: &str) -> ItemRecord {
    ItemRecord {
        name: name.to_string(),
        price: price.to_string(),
        ..Default::default()
    }
}

/// A fully populated record.
pub fn full_item(name: &str, price: &str, score: &str, link: &str) -> ItemRecord {
    ItemRecord {
        name: name.to_string(),
        price: price.to_string(),
        score: score.to_string(),
        features: format!("{name} core features"),
        pros: "Fast | Easy to start".to_string(),
        cons: "Limited exports".to_string(),
        affiliate_link: link.to_string(),
        description: format!("{name} helps teams write better copy with AI assistance."),
    }
}

/// Three tools with distinct, known prices plus one with an unknown price.
pub fn sample_items() -> Vec<ItemRecord> {
    vec![
        full_item("Jasper", "$49/mo", "4.7", "https://jasper.example"),
        full_item("Copy.ai", "$36/mo", "4.5", "https://copy.example"),
        full_item("Writesonic", "$19/mo", "4.3", "https://writesonic.example"),
        full_item("Rytr", "Contact sales", "N/A", "https://rytr.example"),
    ]
}

/// Stock config with a base URL and a fixed build date.
pub fn test_config() -> SiteConfig {
    SiteConfig {
        site_name: "Tool Arena".to_string(),
        base_url: "https://arena.test".to_string(),
        build_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 31),
        ..SiteConfig::default()
    }
}

/// Same as [`test_config`] restricted to the given locales.
pub fn test_config_with_locales(locales: &[&str]) -> SiteConfig {
    SiteConfig {
        locales: locales.iter().map(|c| c.to_string()).collect(),
        default_locale: locales.first().unwrap_or(&"en").to_string(),
        ..test_config()
    }
}

// =========================================================================
// Lookup helpers
// =========================================================================

/// Every `href="..."` value in `html`, in document order.
pub fn hrefs(html: &str) -> Vec<&str> {
    html.split("href=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .collect()
}

/// Number of non-overlapping occurrences of `needle` in `html`.
pub fn count(html: &str, needle: &str) -> usize {
    html.matches(needle).count()
}
