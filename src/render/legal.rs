//! Privacy and terms pages.
//!
//! Bodies are Markdown embedded at compile time and converted with
//! pulldown-cmark. `{site_name}` is substituted after conversion, escaped, so
//! a site name can never inject markup.

use super::{Head, LegalPage, base_document};
use crate::slug::{LegalKind, Route};
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

const PRIVACY_MD: &str = include_str!("../../static/privacy.md");
const TERMS_MD: &str = include_str!("../../static/terms.md");

fn source(kind: LegalKind) -> &'static str {
    match kind {
        LegalKind::Privacy => PRIVACY_MD,
        LegalKind::Terms => TERMS_MD,
    }
}

/// Markdown to HTML with the site name filled in.
pub(crate) fn body_html(kind: LegalKind, site_name: &str) -> String {
    let parser = Parser::new(source(kind));
    let mut body = String::new();
    md_html::push_html(&mut body, parser);
    let escaped_name = html! { (site_name) }.into_string();
    body.replace("{site_name}", &escaped_name)
}

pub(crate) fn render(page: &LegalPage<'_>, css: &str) -> Markup {
    let labels = page.site.locale.labels;
    let heading = match page.kind {
        LegalKind::Privacy => labels.privacy,
        LegalKind::Terms => labels.terms,
    };
    let title = format!("{heading} | {}", page.site.site_name);
    let canonical_url = page.site.canonical_url(&Route::Legal(page.kind));

    let content = html! {
        article.legal-content {
            (PreEscaped(body_html(page.kind, page.site.site_name)))
        }
    };

    let head = Head {
        title: &title,
        description: &title,
        canonical_url: &canonical_url,
    };
    base_document(&page.site, head, css, Some("legal-page"), content)
}
