//! Sitemap and robots policy.
//!
//! The sitemap is built from the [`WrittenPage`] records the orchestrator
//! collects as it writes files, never from the planned page set. A page that
//! failed to render has no record and therefore no `<loc>`.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/jasper-vs-rytr/</loc>
//!     <lastmod>2026-01-31</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.8</priority>
//!   </url>
//! </urlset>
//! ```

use crate::types::{PageKind, WrittenPage};
use chrono::NaiveDate;
use std::fmt::Write as _;

pub const SITEMAP_FILE: &str = "sitemap.xml";
pub const ROBOTS_FILE: &str = "robots.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Yearly,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: NaiveDate,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

fn schedule(kind: PageKind) -> (ChangeFreq, f32) {
    match kind {
        PageKind::Home => (ChangeFreq::Daily, 1.0),
        PageKind::Comparison => (ChangeFreq::Weekly, 0.8),
        PageKind::Legal => (ChangeFreq::Yearly, 0.3),
    }
}

/// One entry per written page, in write order.
pub fn sitemap_entries(pages: &[WrittenPage], last_modified: NaiveDate) -> Vec<SitemapEntry> {
    pages
        .iter()
        .map(|page| {
            let (changefreq, priority) = schedule(page.kind);
            SitemapEntry {
                url: page.canonical_url.clone(),
                last_modified,
                changefreq,
                priority,
            }
        })
        .collect()
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        // Writing to a String cannot fail
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    \
             <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&entry.url),
            entry.last_modified.format("%Y-%m-%d"),
            entry.changefreq.as_str(),
            entry.priority,
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

pub fn render_robots(sitemap_url: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {sitemap_url}\n")
}

/// Every `<loc>` value in a sitemap document, unescaped, in document order.
pub fn parse_sitemap_locs(xml: &str) -> Vec<String> {
    xml.split("<loc>")
        .skip(1)
        .filter_map(|rest| rest.split_once("</loc>"))
        .map(|(loc, _)| unescape_xml(loc.trim()))
        .collect()
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
