//! Locale home page: summary counts and one card per comparison.

use super::{Head, HomePage, base_document, fill};
use crate::slug::Route;
use maud::{Markup, html};

pub(crate) fn render(page: &HomePage<'_>, css: &str) -> Markup {
    let labels = page.site.locale.labels;
    let summary = fill(
        labels.home_summary,
        &[
            ("tools", page.tool_count.to_string().as_str()),
            ("pairs", page.entries.len().to_string().as_str()),
        ],
    );
    let title = format!("{} | {}", labels.home_heading, page.site.site_name);
    let canonical_url = page.site.canonical_url(&Route::Home);

    let content = html! {
        section.home-intro {
            h1 { (labels.home_heading) }
            p.summary { (summary) }
        }
        div.card-grid {
            @for entry in &page.entries {
                a.card href=(entry.href) {
                    h2 { (entry.title) }
                    p.winner {
                        @match &entry.winner {
                            Some(name) => { (labels.winner) ": " (name) }
                            None => { (labels.tie) }
                        }
                    }
                }
            }
        }
    };

    let head = Head {
        title: &title,
        description: &summary,
        canonical_url: &canonical_url,
    };
    base_document(&page.site, head, css, Some("home-page"), content)
}
