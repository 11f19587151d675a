//! Catalog records and the ingestion boundary.
//!
//! The catalog is a JSON array of tool records. Field names follow the
//! snake_case form below; the spreadsheet headers the catalog is usually
//! exported from (`Tool_Name`, `Price`, `Rating`, ...) are accepted as
//! aliases.
//!
//! ```json
//! [
//!   {
//!     "name": "Jasper AI",
//!     "price": "$49/mo",
//!     "score": "4.7",
//!     "features": "Brand voice, templates",
//!     "pros": "Fast | Good templates",
//!     "cons": "Pricey",
//!     "affiliate_link": "https://jasper.ai",
//!     "description": "AI copywriting assistant."
//!   }
//! ]
//! ```
//!
//! Missing fields become empty strings. Rows that cannot be read as a record
//! are dropped and counted in [`Catalog::skipped`]; they never fail the load.
//! [`validate_items`] then enforces the identity rules every later stage
//! relies on: at least one item, unique names, and unique non-empty slugs.

use crate::slug::slugify;
use serde::{Deserialize, Deserializer};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Catalog must be a JSON array of records")]
    NotAnArray,
    #[error("Catalog contains no usable records")]
    Empty,
    #[error("Duplicate item name: {0}")]
    DuplicateName(String),
    #[error("Item name produces an empty slug: {0:?}")]
    UnsluggableName(String),
    #[error("Items {0:?} and {1:?} share the slug {2:?}")]
    SlugCollision(String, String, String),
}

/// One catalog entry. Never mutated once loaded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItemRecord {
    #[serde(alias = "Tool_Name", deserialize_with = "text")]
    pub name: String,
    /// Raw price text, parsed on demand with [`crate::price::parse_price`].
    #[serde(alias = "Price", deserialize_with = "text")]
    pub price: String,
    /// `0`–`5`, or `N/A`.
    #[serde(alias = "Rating", alias = "Score", deserialize_with = "text")]
    pub score: String,
    #[serde(alias = "Features", alias = "Feature", deserialize_with = "text")]
    pub features: String,
    #[serde(alias = "Pros", deserialize_with = "text")]
    pub pros: String,
    #[serde(alias = "Cons", deserialize_with = "text")]
    pub cons: String,
    #[serde(alias = "Affiliate_Link", alias = "Link", deserialize_with = "text")]
    pub affiliate_link: String,
    #[serde(alias = "Description", deserialize_with = "text")]
    pub description: String,
}

impl ItemRecord {
    /// Enrichment pros, one entry per `|`, `;` or line separated point.
    pub fn pros(&self) -> Vec<&str> {
        split_points(&self.pros)
    }

    pub fn cons(&self) -> Vec<&str> {
        split_points(&self.cons)
    }

    /// Parsed score, see [`parse_score`].
    pub fn rating(&self) -> Option<f64> {
        parse_score(&self.score)
    }
}

/// Accept strings, numbers, booleans or null for a text field.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

fn split_points(text: &str) -> Vec<&str> {
    text.split(['|', ';', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a `0`–`5` score such as `"4.7"` or `"4.7/5"`.
///
/// Returns `None` for `N/A`, empty text, or values outside the range.
pub fn parse_score(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let number = raw.split('/').next().unwrap_or(raw).trim();
    match number.parse::<f64>() {
        Ok(v) if (0.0..=5.0).contains(&v) => Some(v),
        _ => None,
    }
}

/// Records loaded from a catalog file.
#[derive(Debug, Default)]
pub struct Catalog {
    pub items: Vec<ItemRecord>,
    /// Rows dropped because they could not be read as a record.
    pub skipped: usize,
}

/// Header labels that show up as data when a spreadsheet export repeats its
/// header row.
const HEADER_NAMES: &[&str] = &["name", "tool_name", "tool name"];

/// Load and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    let catalog = parse_catalog(&content)?;
    validate_items(&catalog.items)?;
    Ok(catalog)
}

/// Parse catalog JSON, dropping malformed rows.
///
/// Does not validate identity rules; see [`validate_items`].
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(rows) = value else {
        return Err(CatalogError::NotAnArray);
    };

    let mut catalog = Catalog::default();
    for (index, row) in rows.into_iter().enumerate() {
        if !row.is_object() {
            tracing::warn!(row = index, "skipping catalog row: not an object");
            catalog.skipped += 1;
            continue;
        }
        match serde_json::from_value::<ItemRecord>(row) {
            Ok(item) if item.name.is_empty() => {
                tracing::warn!(row = index, "skipping catalog row: missing name");
                catalog.skipped += 1;
            }
            Ok(item) if HEADER_NAMES.contains(&item.name.to_lowercase().as_str()) => {
                tracing::warn!(row = index, "skipping catalog row: repeated header");
                catalog.skipped += 1;
            }
            Ok(item) => catalog.items.push(item),
            Err(e) => {
                tracing::warn!(row = index, error = %e, "skipping catalog row");
                catalog.skipped += 1;
            }
        }
    }
    Ok(catalog)
}

/// Enforce the identity rules pair generation depends on.
pub fn validate_items(items: &[ItemRecord]) -> Result<(), CatalogError> {
    if items.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut names: HashSet<&str> = HashSet::new();
    let mut slugs: HashMap<String, &str> = HashMap::new();
    for item in items {
        if !names.insert(item.name.as_str()) {
            return Err(CatalogError::DuplicateName(item.name.clone()));
        }
        let slug = slugify(&item.name);
        if slug.is_empty() {
            return Err(CatalogError::UnsluggableName(item.name.clone()));
        }
        if let Some(other) = slugs.get(&slug) {
            return Err(CatalogError::SlugCollision(
                other.to_string(),
                item.name.clone(),
                slug,
            ));
        }
        slugs.insert(slug, &item.name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::item;
    use tempfile::TempDir;

    #[test]
    fn parses_snake_case_fields() {
        let catalog = parse_catalog(
            r#"[{"name": "Jasper", "price": "$49", "score": "4.7", "features": "Templates",
                 "pros": "Fast | Smart", "cons": "Pricey", "affiliate_link": "https://jasper.ai",
                 "description": "Copywriting"}]"#,
        )
        .unwrap();
        let item = &catalog.items[0];
        assert_eq!(item.name, "Jasper");
        assert_eq!(item.price, "$49");
        assert_eq!(item.affiliate_link, "https://jasper.ai");
        assert_eq!(item.pros(), vec!["Fast", "Smart"]);
        assert_eq!(catalog.skipped, 0);
    }

    #[test]
    fn accepts_spreadsheet_aliases() {
        let catalog =
            parse_catalog(r#"[{"Tool_Name": "Surfer", "Price": "89", "Rating": "4.5"}]"#).unwrap();
        assert_eq!(catalog.items[0].name, "Surfer");
        assert_eq!(catalog.items[0].price, "89");
        assert_eq!(catalog.items[0].score, "4.5");
    }

    #[test]
    fn numbers_become_text() {
        let catalog = parse_catalog(r#"[{"name": "A", "price": 19.99, "score": 4}]"#).unwrap();
        assert_eq!(catalog.items[0].price, "19.99");
        assert_eq!(catalog.items[0].score, "4");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let catalog = parse_catalog(r#"[{"name": "A", "price": null}]"#).unwrap();
        let item = &catalog.items[0];
        assert_eq!(item.price, "");
        assert_eq!(item.description, "");
        assert!(item.pros().is_empty());
    }

    #[test]
    fn malformed_rows_skipped() {
        let catalog = parse_catalog(
            r#"[{"name": "A"}, 42, {"price": "$5"}, {"name": "  "}, {"Tool_Name": "Tool_Name"}, {"name": "B"}]"#,
        )
        .unwrap();
        let names: Vec<&str> = catalog.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(catalog.skipped, 4);
    }

    #[test]
    fn non_array_rejected() {
        let result = parse_catalog(r#"{"name": "A"}"#);
        assert!(matches!(result, Err(CatalogError::NotAnArray)));
    }

    #[test]
    fn empty_catalog_is_fatal() {
        assert!(matches!(validate_items(&[]), Err(CatalogError::Empty)));
    }

    #[test]
    fn duplicate_name_is_fatal() {
        let items = vec![item("Jasper", "$10"), item("Jasper", "$20")];
        assert!(matches!(
            validate_items(&items),
            Err(CatalogError::DuplicateName(name)) if name == "Jasper"
        ));
    }

    #[test]
    fn colliding_slugs_are_fatal() {
        let items = vec![item("Copy.ai", "$10"), item("Copyai", "$20")];
        assert!(matches!(
            validate_items(&items),
            Err(CatalogError::SlugCollision(_, _, slug)) if slug == "copyai"
        ));
    }

    #[test]
    fn unsluggable_name_is_fatal() {
        let items = vec![item("Good", "$1"), item("???", "$2")];
        assert!(matches!(
            validate_items(&items),
            Err(CatalogError::UnsluggableName(_))
        ));
    }

    #[test]
    fn non_ascii_names_are_valid() {
        let items = vec![item("ChatGPT", "$20"), item("文心一言", "$0"), item("Résumé AI", "$9")];
        assert!(validate_items(&items).is_ok());
    }

    #[test]
    fn load_catalog_validates() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        fs::write(&path, r#"[{"name": "A"}, {"name": "A"}]"#).unwrap();
        assert!(matches!(
            load_catalog(&path),
            Err(CatalogError::DuplicateName(_))
        ));

        fs::write(&path, r#"[{"name": "A"}, {"name": "B"}]"#).unwrap();
        assert_eq!(load_catalog(&path).unwrap().items.len(), 2);
    }

    #[test]
    fn score_parsing() {
        assert_eq!(parse_score("4.7"), Some(4.7));
        assert_eq!(parse_score("4.7/5"), Some(4.7));
        assert_eq!(parse_score("N/A"), None);
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("7"), None);
    }

    #[test]
    fn points_split_on_all_separators() {
        let record = ItemRecord {
            cons: "Slow; Costly | Limited\nNo API".into(),
            ..Default::default()
        };
        assert_eq!(record.cons(), vec!["Slow", "Costly", "Limited", "No API"]);
    }
}
