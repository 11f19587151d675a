//! Page rendering.
//!
//! Every page kind has a typed context ([`ComparisonPage`], [`HomePage`],
//! [`LegalPage`]) that lists everything its template reads, and a
//! [`Renderer`] turns a context into a complete HTML document. Renderers are
//! pure: they return the document and never touch the filesystem, so the
//! orchestrator can run them in parallel and decide what gets written.
//!
//! [`HtmlRenderer`] is the production implementation, built on
//! [maud](https://maud.lambda.xyz/). All interpolated values are escaped by
//! maud; the only pre-escaped fragments are the embedded stylesheet, the
//! calculator script, the Markdown legal bodies, and the JSON-LD block
//! (see [`schema`]).
//!
//! ## Document Shell
//!
//! All pages share [`base_document`]: `lang` from the locale, title, meta
//! description, canonical link, inline CSS, a site header linking to the
//! locale home, and a footer with legal links and the language switcher.

pub mod comparison;
pub mod home;
pub mod legal;
pub mod schema;

use crate::config::{ThemeConfig, generate_theme_css};
use crate::locale::LocaleBundle;
use crate::slug::{LegalKind, Route};
use crate::types::ResolvedItem;
use crate::verdict::Verdict;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{item}: refusing to link to {link:?}")]
    UnsafeLink { item: String, link: String },
    #[error("{0}")]
    Template(String),
}

const CSS_STATIC: &str = include_str!("../../static/style.css");

/// Site-wide values every page needs, for one locale.
#[derive(Debug, Clone, Copy)]
pub struct SiteContext<'a> {
    pub site_name: &'a str,
    pub base_url: &'a str,
    /// Locale being rendered.
    pub locale: &'a LocaleBundle,
    /// All active locales, for the language switcher.
    pub locales: &'a [LocaleBundle],
}

impl SiteContext<'_> {
    pub fn prefix(&self) -> &str {
        &self.locale.path_prefix
    }

    pub fn url_path(&self, route: &Route) -> String {
        route.url_path(self.prefix())
    }

    pub fn canonical_url(&self, route: &Route) -> String {
        route.canonical_url(self.base_url, self.prefix())
    }
}

/// Another comparison shown in the related list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedLink {
    pub title: String,
    pub href: String,
}

/// Everything the comparison template reads.
#[derive(Debug)]
pub struct ComparisonPage<'a> {
    pub site: SiteContext<'a>,
    pub a: &'a ResolvedItem<'a>,
    pub b: &'a ResolvedItem<'a>,
    pub verdict: &'a Verdict,
    pub route: Route,
    pub related: Vec<RelatedLink>,
}

/// One card on a locale home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// `A vs B`
    pub title: String,
    /// Root-relative link to the comparison.
    pub href: String,
    /// Name of the cheaper item, `None` for a tie.
    pub winner: Option<String>,
}

#[derive(Debug)]
pub struct HomePage<'a> {
    pub site: SiteContext<'a>,
    pub entries: Vec<IndexEntry>,
    pub tool_count: usize,
}

#[derive(Debug)]
pub struct LegalPage<'a> {
    pub site: SiteContext<'a>,
    pub kind: LegalKind,
}

/// Turns page contexts into HTML documents.
///
/// `Sync` so one renderer can be shared across rayon workers.
pub trait Renderer: Sync {
    fn render_comparison(&self, page: &ComparisonPage<'_>) -> Result<String, RenderError>;
    fn render_home(&self, page: &HomePage<'_>) -> Result<String, RenderError>;
    fn render_legal(&self, page: &LegalPage<'_>) -> Result<String, RenderError>;
}

/// Maud-based renderer with the theme stylesheet baked in.
pub struct HtmlRenderer {
    css: String,
}

impl HtmlRenderer {
    pub fn new(theme: &ThemeConfig) -> Self {
        Self {
            css: format!("{}\n\n{}", generate_theme_css(theme), CSS_STATIC),
        }
    }
}

impl Renderer for HtmlRenderer {
    fn render_comparison(&self, page: &ComparisonPage<'_>) -> Result<String, RenderError> {
        comparison::render(page, &self.css).map(Markup::into_string)
    }

    fn render_home(&self, page: &HomePage<'_>) -> Result<String, RenderError> {
        Ok(home::render(page, &self.css).into_string())
    }

    fn render_legal(&self, page: &LegalPage<'_>) -> Result<String, RenderError> {
        Ok(legal::render(page, &self.css).into_string())
    }
}

// ============================================================================
// Shared components
// ============================================================================

/// Head metadata for [`base_document`].
pub(crate) struct Head<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub canonical_url: &'a str,
}

/// Renders the base HTML document structure.
pub(crate) fn base_document(
    site: &SiteContext<'_>,
    head: Head<'_>,
    css: &str,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(site.locale.code) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (head.title) }
                meta name="description" content=(head.description);
                link rel="canonical" href=(head.canonical_url);
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (site_header(site))
                main { (content) }
                (site_footer(site))
            }
        }
    }
}

fn site_header(site: &SiteContext<'_>) -> Markup {
    html! {
        header.site-header {
            a.site-name href=(site.url_path(&Route::Home)) { (site.site_name) }
            span.locale-flag { (site.locale.flag) }
        }
    }
}

fn site_footer(site: &SiteContext<'_>) -> Markup {
    let labels = site.locale.labels;
    html! {
        footer.site-footer {
            nav.legal-links {
                a href=(site.url_path(&Route::Legal(LegalKind::Privacy))) { (labels.privacy) }
                " · "
                a href=(site.url_path(&Route::Legal(LegalKind::Terms))) { (labels.terms) }
            }
            nav.language-switcher aria-label=(labels.languages) {
                @for other in site.locales {
                    @let current = other.code == site.locale.code;
                    a href=(Route::Home.url_path(&other.path_prefix))
                        hreflang=(other.code)
                        class=[current.then_some("current")] {
                        (other.flag) " " (other.code.to_uppercase())
                    }
                }
            }
            p.copyright { "© " (site.site_name) }
        }
    }
}

/// Fill `{key}` placeholders in a label.
///
/// One left-to-right pass over the template: substituted text is never
/// scanned again, and unknown placeholders are kept as written.
pub(crate) fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match value {
            Some((v, close)) => {
                out.push_str(v);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::locale;
    use crate::test_helpers::{count, hrefs};
    use std::sync::Mutex;

    /// Renderer that fails comparisons whose slug contains `fail_on`,
    /// and records every comparison slug it was asked for.
    pub struct FailingRenderer {
        pub inner: HtmlRenderer,
        pub fail_on: String,
        pub seen: Mutex<Vec<String>>,
    }

    impl FailingRenderer {
        pub fn new(fail_on: &str) -> Self {
            Self {
                inner: HtmlRenderer::new(&ThemeConfig::default()),
                fail_on: fail_on.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Renderer for FailingRenderer {
        fn render_comparison(&self, page: &ComparisonPage<'_>) -> Result<String, RenderError> {
            let Route::Comparison(slug) = &page.route else {
                return Err(RenderError::Template("not a comparison".into()));
            };
            self.seen.lock().unwrap().push(slug.clone());
            if slug.contains(&self.fail_on) {
                return Err(RenderError::Template(format!("forced failure for {slug}")));
            }
            self.inner.render_comparison(page)
        }

        fn render_home(&self, page: &HomePage<'_>) -> Result<String, RenderError> {
            self.inner.render_home(page)
        }

        fn render_legal(&self, page: &LegalPage<'_>) -> Result<String, RenderError> {
            self.inner.render_legal(page)
        }
    }

    pub fn bundles() -> Vec<LocaleBundle> {
        locale::bundles_for(&["en".to_string(), "de".to_string()], "en")
    }

    pub fn site<'a>(bundles: &'a [LocaleBundle], index: usize) -> SiteContext<'a> {
        SiteContext {
            site_name: "Tool Arena",
            base_url: "https://arena.test",
            locale: &bundles[index],
            locales: bundles,
        }
    }

    #[test]
    fn base_document_includes_doctype_and_lang() {
        let bundles = bundles();
        let site = site(&bundles, 1);
        let head = Head {
            title: "T",
            description: "D",
            canonical_url: "https://arena.test/de/",
        };
        let html = base_document(&site, head, "", None, html! { p { "x" } }).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="de">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://arena.test/de/">"#));
    }

    #[test]
    fn footer_links_legal_pages_and_locales() {
        let bundles = bundles();
        let site = site(&bundles, 1);
        let html = site_footer(&site).into_string();
        let links = hrefs(&html);
        assert!(links.contains(&"/de/privacy/"));
        assert!(links.contains(&"/de/terms/"));
        assert!(links.contains(&"/"));
        assert!(links.contains(&"/de/"));
        assert_eq!(count(&html, "class=\"current\""), 1);
    }

    #[test]
    fn header_links_locale_home() {
        let bundles = bundles();
        let html = site_header(&site(&bundles, 1)).into_string();
        assert_eq!(hrefs(&html), vec!["/de/"]);
    }

    #[test]
    fn fill_replaces_all_placeholders() {
        assert_eq!(
            fill("{a} and {b} and {a}", &[("a", "X"), ("b", "Y")]),
            "X and Y and X"
        );
    }

    #[test]
    fn fill_does_not_rescan_substituted_text() {
        assert_eq!(
            fill(
                "{cheaper} beats {pricier} by {delta}",
                &[("cheaper", "Tool {pricier}"), ("pricier", "Other"), ("delta", "$5")]
            ),
            "Tool {pricier} beats Other by $5"
        );
    }

    #[test]
    fn fill_keeps_unknown_and_unclosed_braces() {
        assert_eq!(fill("{x} {a} {", &[("a", "A")]), "{x} A {");
    }

    #[test]
    fn html_renderer_embeds_theme() {
        let mut theme = ThemeConfig::default();
        theme.accent = "#abcdef".to_string();
        let renderer = HtmlRenderer::new(&theme);
        assert!(renderer.css.contains("--color-accent: #abcdef"));
    }
}
