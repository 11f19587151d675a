//! CLI output formatting for the build and check commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each page leads with
//! its positional index and title, followed by `→` and the file it was
//! written to. Locales are section headers; failures get their own section
//! so they are never buried in the page list.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Catalog: 4 items (1 row skipped)
//!
//! en → /
//!     Home → index.html
//!     001 Jasper vs Copy.ai → jasper-vs-copyai/index.html
//!     002 Jasper vs Writesonic → jasper-vs-writesonic/index.html
//!     Legal → privacy/index.html, terms/index.html
//! es → /es/
//!     ...
//!
//! Failed
//!     en Copy.ai vs Writesonic → /copyai-vs-writesonic/
//!         Error: ...
//!
//! Generated 12 comparisons, 2 home pages, 4 legal pages across 2 locales
//! Sitemap: 18 URLs, lastmod 2026-01-31
//! ```
//!
//! ## Check
//!
//! ```text
//! Pages on disk: 18
//! Sitemap entries: 18
//! Orphans (written, not in sitemap)
//!     https://example.com/old-vs-page/
//! robots.txt: ok
//! Inconsistent
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::catalog::Catalog;
use crate::check::CheckReport;
use crate::generate::BuildReport;
use crate::types::{PageKind, WrittenPage};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Output-relative path with `/` separators on every platform.
fn display_path(page: &WrittenPage) -> String {
    page.path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Catalog
// ============================================================================

pub fn format_catalog_summary(catalog: &Catalog) -> Vec<String> {
    let items = plural(catalog.items.len(), "item", "items");
    let line = match catalog.skipped {
        0 => format!("Catalog: {items}"),
        n => format!("Catalog: {items} ({} skipped)", plural(n, "row", "rows")),
    };
    vec![line]
}

pub fn print_catalog_summary(catalog: &Catalog) {
    for line in format_catalog_summary(catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format the build report: pages per locale, failures, totals.
pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    for &code in &report.locales {
        let pages: Vec<&WrittenPage> = report.pages.iter().filter(|p| p.locale == code).collect();
        let home = pages.iter().find(|p| p.kind == PageKind::Home);
        let root = home
            .map(|p| url_path(&p.canonical_url))
            .unwrap_or_else(|| "(no home page)".to_string());
        lines.push(format!("{code} \u{2192} {root}"));

        if let Some(home) = home {
            lines.push(format!("{}Home \u{2192} {}", indent(1), display_path(home)));
        }
        for (i, page) in pages
            .iter()
            .filter(|p| p.kind == PageKind::Comparison)
            .enumerate()
        {
            lines.push(format!(
                "{}{} {} \u{2192} {}",
                indent(1),
                format_index(i + 1),
                page.title,
                display_path(page)
            ));
        }
        let legal: Vec<String> = pages
            .iter()
            .filter(|p| p.kind == PageKind::Legal)
            .map(|p| display_path(p))
            .collect();
        if !legal.is_empty() {
            lines.push(format!("{}Legal \u{2192} {}", indent(1), legal.join(", ")));
        }
    }

    if !report.failures.is_empty() {
        lines.push(String::new());
        lines.push("Failed".to_string());
        for failure in &report.failures {
            lines.push(format!(
                "{}{} {} \u{2192} {}",
                indent(1),
                failure.locale,
                failure.title,
                failure.url_path
            ));
            lines.push(format!("{}Error: {}", indent(2), failure.error));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {} across {}",
        plural(report.count(PageKind::Comparison), "comparison", "comparisons"),
        plural(report.count(PageKind::Home), "home page", "home pages"),
        plural(report.count(PageKind::Legal), "legal page", "legal pages"),
        plural(report.locales.len(), "locale", "locales"),
    ));
    lines.push(format!(
        "Sitemap: {}, lastmod {}",
        plural(report.pages.len(), "URL", "URLs"),
        report.last_modified.format("%Y-%m-%d")
    ));
    if !report.failures.is_empty() {
        lines.push(format!(
            "Skipped {}",
            plural(report.failures.len(), "page", "pages")
        ));
    }

    lines
}

/// Print the build report to stdout.
pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{}", line);
    }
}

/// Path part of an absolute URL (`https://x.test/es/` → `/es/`).
fn url_path(url: &str) -> String {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    match without_scheme.find('/') {
        Some(i) => without_scheme[i..].to_string(),
        None => "/".to_string(),
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_report(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![
        format!("Pages on disk: {}", report.pages.len()),
        format!("Sitemap entries: {}", report.sitemap.len()),
    ];

    let sections: [(&str, &[String]); 3] = [
        ("Orphans (written, not in sitemap)", &report.orphans),
        ("Dangling (in sitemap, not written)", &report.dangling),
        ("Duplicate sitemap entries", &report.duplicates),
    ];
    for (heading, urls) in sections {
        if urls.is_empty() {
            continue;
        }
        lines.push(heading.to_string());
        for url in urls {
            lines.push(format!("{}{}", indent(1), url));
        }
    }

    lines.push(format!(
        "robots.txt: {}",
        if report.robots_ok {
            "ok"
        } else {
            "missing sitemap reference"
        }
    ));
    lines.push(
        if report.is_consistent() {
            "Consistent"
        } else {
            "Inconsistent"
        }
        .to_string(),
    );
    lines
}

pub fn print_check_report(report: &CheckReport) {
    for line in format_check_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::PageFailure;
    use crate::render::RenderError;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn page(kind: PageKind, locale: &'static str, title: &str, path: &str, url: &str) -> WrittenPage {
        WrittenPage {
            kind,
            locale,
            title: title.to_string(),
            path: PathBuf::from(path),
            canonical_url: url.to_string(),
        }
    }

    fn report() -> BuildReport {
        BuildReport {
            output_dir: PathBuf::from("dist"),
            item_count: 3,
            pair_count: 3,
            locales: vec!["en", "es"],
            pages: vec![
                page(PageKind::Home, "en", "home", "index.html", "https://x.test/"),
                page(
                    PageKind::Comparison,
                    "en",
                    "A vs B",
                    "a-vs-b/index.html",
                    "https://x.test/a-vs-b/",
                ),
                page(PageKind::Legal, "en", "privacy", "privacy/index.html", "https://x.test/privacy/"),
                page(PageKind::Legal, "en", "terms", "terms/index.html", "https://x.test/terms/"),
                page(PageKind::Home, "es", "home", "es/index.html", "https://x.test/es/"),
            ],
            failures: vec![PageFailure {
                locale: "es",
                kind: PageKind::Comparison,
                title: "A vs C".to_string(),
                url_path: "/es/a-vs-c/".to_string(),
                error: RenderError::Template("boom".to_string()),
            }],
            last_modified: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "item", "items"), "1 item");
        assert_eq!(plural(0, "item", "items"), "0 items");
    }

    #[test]
    fn url_path_extraction() {
        assert_eq!(url_path("https://x.test/es/"), "/es/");
        assert_eq!(url_path("https://x.test"), "/");
    }

    #[test]
    fn catalog_summary_mentions_skips() {
        let catalog = Catalog {
            items: vec![Default::default(), Default::default()],
            skipped: 1,
        };
        assert_eq!(
            format_catalog_summary(&catalog),
            vec!["Catalog: 2 items (1 row skipped)"]
        );
        let clean = Catalog {
            items: vec![Default::default()],
            skipped: 0,
        };
        assert_eq!(format_catalog_summary(&clean), vec!["Catalog: 1 item"]);
    }

    #[test]
    fn build_report_lists_locales_and_pages() {
        let lines = format_build_report(&report());
        assert_eq!(lines[0], "en \u{2192} /");
        assert_eq!(lines[1], "    Home \u{2192} index.html");
        assert_eq!(lines[2], "    001 A vs B \u{2192} a-vs-b/index.html");
        assert_eq!(
            lines[3],
            "    Legal \u{2192} privacy/index.html, terms/index.html"
        );
        assert_eq!(lines[4], "es \u{2192} /es/");
        assert_eq!(lines[5], "    Home \u{2192} es/index.html");
    }

    #[test]
    fn build_report_failures_section() {
        let lines = format_build_report(&report());
        let failed = lines.iter().position(|l| l == "Failed").unwrap();
        assert_eq!(lines[failed + 1], "    es A vs C \u{2192} /es/a-vs-c/");
        assert_eq!(lines[failed + 2], "        Error: boom");
    }

    #[test]
    fn build_report_totals() {
        let lines = format_build_report(&report());
        assert!(lines.contains(
            &"Generated 1 comparison, 2 home pages, 2 legal pages across 2 locales".to_string()
        ));
        assert!(lines.contains(&"Sitemap: 5 URLs, lastmod 2026-01-31".to_string()));
        assert_eq!(lines.last().unwrap(), "Skipped 1 page");
    }

    #[test]
    fn check_report_sections() {
        let report = CheckReport {
            pages: ["https://x.test/".to_string()].into_iter().collect(),
            sitemap: ["https://x.test/".to_string(), "https://x.test/gone/".to_string()]
                .into_iter()
                .collect(),
            orphans: vec![],
            dangling: vec!["https://x.test/gone/".to_string()],
            duplicates: vec![],
            robots_ok: true,
        };
        let lines = format_check_report(&report);
        assert_eq!(
            lines,
            vec![
                "Pages on disk: 1",
                "Sitemap entries: 2",
                "Dangling (in sitemap, not written)",
                "    https://x.test/gone/",
                "robots.txt: ok",
                "Inconsistent",
            ]
        );
    }
}
