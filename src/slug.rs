//! Slugs and routes.
//!
//! Every URL the site produces comes from a [`Route`]. Pages, the locale home
//! listing, and the sitemap all ask the same `Route` for their path, so the
//! three can never disagree about where a page lives.
//!
//! ## Convention
//!
//! Directory routing only. Each page is an `index.html` inside its own
//! directory and is addressed by the directory URL with a trailing slash:
//!
//! ```text
//! Route                      file                            URL path
//! Home          (en)         index.html                      /
//! Home          (es)         es/index.html                   /es/
//! Comparison    (en)         jasper-vs-copyai/index.html     /jasper-vs-copyai/
//! Comparison    (es)         es/jasper-vs-copyai/index.html  /es/jasper-vs-copyai/
//! Legal Privacy (de)         de/privacy/index.html           /de/privacy/
//! ```
//!
//! The locale prefix is empty for the default locale and `/{code}` otherwise.

use std::path::PathBuf;

/// Token joining the two item slugs of a comparison.
pub const PAIR_SEPARATOR: &str = "-vs-";

/// Name of the page file written inside each route directory.
pub const PAGE_FILE: &str = "index.html";

/// Turn an item name into a path segment.
///
/// Lowercases, turns whitespace and underscores into hyphens, keeps every
/// other alphanumeric character (accented and CJK letters included), drops
/// periods and punctuation, and collapses repeated hyphens. May return an
/// empty string for names with no usable characters. URLs carry the
/// percent-encoded form, see [`encode_segment`].
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars().flat_map(char::to_lowercase) {
        let mapped = match c {
            '-' | '_' => Some('-'),
            c if c.is_whitespace() => Some('-'),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        };
        if let Some(m) = mapped {
            if m == '-' && (slug.is_empty() || slug.ends_with('-')) {
                continue;
            }
            slug.push(m);
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Slug for the comparison of `a` against `b`, in presentation order.
pub fn pair_slug(a: &str, b: &str) -> String {
    format!("{}{}{}", slugify(a), PAIR_SEPARATOR, slugify(b))
}

/// Percent-encode a path segment for use in a URL.
///
/// ASCII letters, digits and `-._~` pass through; every other byte of the
/// UTF-8 encoding becomes `%XX`. The file on disk keeps the raw segment.
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Fixed legal pages generated for every locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LegalKind {
    Privacy,
    Terms,
}

impl LegalKind {
    pub const ALL: [LegalKind; 2] = [LegalKind::Privacy, LegalKind::Terms];

    pub fn slug(self) -> &'static str {
        match self {
            LegalKind::Privacy => "privacy",
            LegalKind::Terms => "terms",
        }
    }
}

/// A page location within one locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Comparison(String),
    Legal(LegalKind),
}

impl Route {
    fn segment(&self) -> Option<&str> {
        match self {
            Route::Home => None,
            Route::Comparison(slug) => Some(slug),
            Route::Legal(kind) => Some(kind.slug()),
        }
    }

    /// Root-relative URL path, always ending in `/`.
    pub fn url_path(&self, prefix: &str) -> String {
        match self.segment() {
            None => format!("{prefix}/"),
            Some(seg) => format!("{prefix}/{}/", encode_segment(seg)),
        }
    }

    /// File path relative to the output root.
    pub fn file_path(&self, prefix: &str) -> PathBuf {
        let mut path = PathBuf::new();
        let locale_dir = prefix.trim_start_matches('/');
        if !locale_dir.is_empty() {
            path.push(locale_dir);
        }
        if let Some(seg) = self.segment() {
            path.push(seg);
        }
        path.push(PAGE_FILE);
        path
    }

    /// Absolute URL under `base_url` (which carries no trailing slash).
    pub fn canonical_url(&self, base_url: &str, prefix: &str) -> String {
        format!("{}{}", base_url, self.url_path(prefix))
    }
}
