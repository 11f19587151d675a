//! Output tree verification.
//!
//! Re-derives the sitemap consistency invariant from what is on disk: every
//! `index.html` under the output root maps back to exactly one canonical URL,
//! and that set must equal the set of `<loc>` entries in `sitemap.xml`.
//!
//! ```text
//! dist/index.html               → {base}/
//! dist/es/jasper-vs-rytr/index.html → {base}/es/jasper-vs-rytr/
//! ```

use crate::seo::{ROBOTS_FILE, SITEMAP_FILE, parse_sitemap_locs};
use crate::slug::{PAGE_FILE, encode_segment};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Output directory not found: {}", .0.display())]
    MissingOutput(PathBuf),
    #[error("No sitemap.xml in {}", .0.display())]
    MissingSitemap(PathBuf),
}

#[derive(Debug, Default)]
pub struct CheckReport {
    /// Canonical URLs of every page on disk.
    pub pages: BTreeSet<String>,
    /// `<loc>` values in the sitemap.
    pub sitemap: BTreeSet<String>,
    /// Written but not listed.
    pub orphans: Vec<String>,
    /// Listed but not written.
    pub dangling: Vec<String>,
    /// `<loc>` values listed more than once.
    pub duplicates: Vec<String>,
    /// robots.txt exists and names the sitemap URL.
    pub robots_ok: bool,
}

impl CheckReport {
    pub fn is_consistent(&self) -> bool {
        self.orphans.is_empty()
            && self.dangling.is_empty()
            && self.duplicates.is_empty()
            && self.robots_ok
    }
}

/// Canonical URL for a page file relative to the output root.
///
/// Returns `None` for anything other than an `index.html`.
pub fn url_for_page(base_url: &str, relative: &Path) -> Option<String> {
    if relative.file_name()? != PAGE_FILE {
        return None;
    }
    let mut url = format!("{base_url}/");
    if let Some(dir) = relative.parent() {
        for part in dir.components() {
            url.push_str(&encode_segment(&part.as_os_str().to_string_lossy()));
            url.push('/');
        }
    }
    Some(url)
}

/// Compare the pages under `output_dir` with its sitemap.
pub fn verify_output(output_dir: &Path, base_url: &str) -> Result<CheckReport, CheckError> {
    if !output_dir.is_dir() {
        return Err(CheckError::MissingOutput(output_dir.to_path_buf()));
    }
    let sitemap_path = output_dir.join(SITEMAP_FILE);
    if !sitemap_path.is_file() {
        return Err(CheckError::MissingSitemap(output_dir.to_path_buf()));
    }

    let mut report = CheckReport::default();

    for entry in WalkDir::new(output_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(output_dir) else {
            continue;
        };
        if let Some(url) = url_for_page(base_url, relative) {
            report.pages.insert(url);
        }
    }

    for loc in parse_sitemap_locs(&fs::read_to_string(&sitemap_path)?) {
        if !report.sitemap.insert(loc.clone()) {
            report.duplicates.push(loc);
        }
    }

    report.orphans = report.pages.difference(&report.sitemap).cloned().collect();
    report.dangling = report.sitemap.difference(&report.pages).cloned().collect();

    let sitemap_url = format!("{base_url}/{SITEMAP_FILE}");
    let robots_path = output_dir.join(ROBOTS_FILE);
    report.robots_ok = robots_path.is_file()
        && fs::read_to_string(&robots_path)?
            .lines()
            .any(|line| line.trim() == format!("Sitemap: {sitemap_url}"));

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BASE: &str = "https://x.test";

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    fn sitemap(locs: &[&str]) -> String {
        let mut xml = String::from("<urlset>");
        for loc in locs {
            xml.push_str(&format!("<url><loc>{loc}</loc></url>"));
        }
        xml.push_str("</urlset>");
        xml
    }

    fn robots() -> String {
        format!("User-agent: *\nAllow: /\n\nSitemap: {BASE}/sitemap.xml\n")
    }

    #[test]
    fn url_mapping() {
        assert_eq!(
            url_for_page(BASE, Path::new("index.html")).as_deref(),
            Some("https://x.test/")
        );
        assert_eq!(
            url_for_page(BASE, Path::new("es/a-vs-b/index.html")).as_deref(),
            Some("https://x.test/es/a-vs-b/")
        );
        assert_eq!(url_for_page(BASE, Path::new("robots.txt")), None);
    }

    #[test]
    fn url_mapping_encodes_unicode_directories() {
        assert_eq!(
            url_for_page(BASE, Path::new("de/chatgpt-vs-文心一言/index.html")).as_deref(),
            Some("https://x.test/de/chatgpt-vs-%E6%96%87%E5%BF%83%E4%B8%80%E8%A8%80/")
        );
    }

    #[test]
    fn consistent_tree_passes() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "index.html", "");
        write(tmp.path(), "a-vs-b/index.html", "");
        write(tmp.path(), "sitemap.xml", &sitemap(&["https://x.test/", "https://x.test/a-vs-b/"]));
        write(tmp.path(), "robots.txt", &robots());

        let report = verify_output(tmp.path(), BASE).unwrap();
        assert!(report.is_consistent());
        assert_eq!(report.pages.len(), 2);
    }

    #[test]
    fn orphan_and_dangling_reported() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "index.html", "");
        write(tmp.path(), "orphan-vs-page/index.html", "");
        write(
            tmp.path(),
            "sitemap.xml",
            &sitemap(&["https://x.test/", "https://x.test/gone-vs-away/"]),
        );
        write(tmp.path(), "robots.txt", &robots());

        let report = verify_output(tmp.path(), BASE).unwrap();
        assert!(!report.is_consistent());
        assert_eq!(report.orphans, vec!["https://x.test/orphan-vs-page/"]);
        assert_eq!(report.dangling, vec!["https://x.test/gone-vs-away/"]);
    }

    #[test]
    fn duplicate_locs_reported() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "index.html", "");
        write(tmp.path(), "sitemap.xml", &sitemap(&["https://x.test/", "https://x.test/"]));
        write(tmp.path(), "robots.txt", &robots());

        let report = verify_output(tmp.path(), BASE).unwrap();
        assert_eq!(report.duplicates, vec!["https://x.test/"]);
        assert!(!report.is_consistent());
    }

    #[test]
    fn robots_must_reference_sitemap() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "index.html", "");
        write(tmp.path(), "sitemap.xml", &sitemap(&["https://x.test/"]));
        write(tmp.path(), "robots.txt", "User-agent: *\nAllow: /\n");

        let report = verify_output(tmp.path(), BASE).unwrap();
        assert!(!report.robots_ok);
        assert!(report.orphans.is_empty() && report.dangling.is_empty());
    }

    #[test]
    fn missing_sitemap_is_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "index.html", "");
        assert!(matches!(
            verify_output(tmp.path(), BASE),
            Err(CheckError::MissingSitemap(_))
        ));
    }

    #[test]
    fn missing_output_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            verify_output(&tmp.path().join("nope"), BASE),
            Err(CheckError::MissingOutput(_))
        ));
    }
}
