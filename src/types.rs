//! Types shared between the renderer, the orchestrator, and the SEO stage.

use crate::affiliate::{AffiliateRule, resolve_link};
use crate::catalog::ItemRecord;
use crate::price::{Price, parse_price};
use crate::slug::slugify;
use std::path::PathBuf;

/// A catalog record plus the values derived from it for rendering.
///
/// The record itself is never modified; the resolved affiliate link and the
/// parsed price travel alongside it.
#[derive(Debug, Clone)]
pub struct ResolvedItem<'a> {
    pub record: &'a ItemRecord,
    pub price: Price,
    pub link: &'a str,
    pub slug: String,
}

impl<'a> ResolvedItem<'a> {
    pub fn resolve(record: &'a ItemRecord, rules: &'a [AffiliateRule]) -> Self {
        Self {
            record,
            price: parse_price(&record.price),
            link: resolve_link(&record.name, &record.affiliate_link, rules),
            slug: slugify(&record.name),
        }
    }

    pub fn name(&self) -> &'a str {
        &self.record.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageKind {
    Home,
    Comparison,
    Legal,
}

/// A rendered page ready to be written.
#[derive(Debug, Clone)]
pub struct PageArtifact {
    pub kind: PageKind,
    /// Relative to the output root.
    pub path: PathBuf,
    pub canonical_url: String,
    pub body: String,
}

/// Record of a page that made it to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPage {
    pub kind: PageKind,
    pub locale: &'static str,
    /// `A vs B` for comparisons, the page slug otherwise.
    pub title: String,
    pub path: PathBuf,
    pub canonical_url: String,
}
