//! The "A vs B" comparison page.
//!
//! ```text
//! header     A vs B, one badge per side
//! table      price / score / features
//! verdict    localized sentence, yearly savings when there is a real saving
//! calculator months → savings (only when there is a real saving)
//! pros/cons  one column per side
//! CTAs       resolved affiliate links, rel="sponsored noopener"
//! related    up to six other pairs sharing an item
//! JSON-LD    see [`super::schema`]
//! ```

use super::{ComparisonPage, Head, RenderError, base_document, fill, schema};
use crate::locale::Labels;
use crate::price::{Price, format_money};
use crate::types::ResolvedItem;
use crate::verdict::{BadgeKind, Side, Verdict};
use maud::{Markup, PreEscaped, html};

const CALCULATOR_JS: &str = include_str!("../../static/calculator.js");

/// Characters of A's description used in the meta description.
const DESCRIPTION_EXCERPT: usize = 100;

pub(crate) fn render(page: &ComparisonPage<'_>, css: &str) -> Result<Markup, RenderError> {
    let (a, b) = (page.a, page.b);
    for item in [a, b] {
        check_link(item)?;
    }

    let labels = page.site.locale.labels;
    let heading = format!("{} vs {}", a.name(), b.name());
    let title = format!("{heading} | {}", page.site.site_name);
    let description = meta_description(labels, &heading, &a.record.description);
    let canonical_url = page.site.canonical_url(&page.route);
    let json_ld = schema::comparison_json_ld(a, b, page.site.site_name)?;

    let content = html! {
        article.comparison {
            header.comparison-header {
                h1 { (heading) }
                div.badges {
                    (badge(labels, a, page.verdict.badge_for(Side::A)))
                    (badge(labels, b, page.verdict.badge_for(Side::B)))
                }
            }
            (comparison_table(labels, a, b))
            (verdict_section(labels, page.verdict, a, b))
            @if !page.verdict.is_tie() {
                (calculator(labels, page.verdict))
            }
            div.pros-cons {
                (pros_cons(labels, a))
                (pros_cons(labels, b))
            }
            div.cta-row {
                (cta(labels, a))
                (cta(labels, b))
            }
            p.affiliate-note { (labels.affiliate_note) }
            @if !page.related.is_empty() {
                nav.related {
                    h2 { (labels.related) }
                    ul {
                        @for link in &page.related {
                            li { a href=(link.href) { (link.title) } }
                        }
                    }
                }
            }
        }
        script type="application/ld+json" { (PreEscaped(json_ld)) }
    };

    let head = Head {
        title: &title,
        description: &description,
        canonical_url: &canonical_url,
    };
    Ok(base_document(
        &page.site,
        head,
        css,
        Some("comparison-page"),
        content,
    ))
}

/// Outbound links must be absolute http(s) URLs. Empty links render as
/// pending and are not an error.
fn check_link(item: &ResolvedItem<'_>) -> Result<(), RenderError> {
    let link = item.link.trim();
    if link.is_empty() || link.starts_with("https://") || link.starts_with("http://") {
        Ok(())
    } else {
        Err(RenderError::UnsafeLink {
            item: item.name().to_string(),
            link: item.link.to_string(),
        })
    }
}

fn meta_description(labels: &Labels, heading: &str, description: &str) -> String {
    let excerpt: String = description.chars().take(DESCRIPTION_EXCERPT).collect();
    let excerpt = excerpt.trim();
    if excerpt.is_empty() {
        format!("{}: {heading}.", labels.title)
    } else {
        format!("{}: {heading}. {excerpt}", labels.title)
    }
}

fn badge_label(labels: &Labels, kind: BadgeKind) -> &'static str {
    match kind {
        BadgeKind::BestValue => labels.best_value,
        BadgeKind::TopPerformance => labels.top_performance,
        BadgeKind::Tie => labels.tie,
    }
}

fn badge(labels: &Labels, item: &ResolvedItem<'_>, kind: BadgeKind) -> Markup {
    let class = match kind {
        BadgeKind::BestValue => "badge best-value",
        BadgeKind::TopPerformance => "badge top-performance",
        BadgeKind::Tie => "badge tie",
    };
    html! {
        span class=(class) { (item.name()) ": " (badge_label(labels, kind)) }
    }
}

/// Price cell text: formatted amount, else the raw catalog text, else pending.
fn price_text(labels: &Labels, item: &ResolvedItem<'_>) -> String {
    match item.price {
        Price::Amount(v) => format_money(v),
        Price::Unknown if !item.record.price.is_empty() => item.record.price.clone(),
        Price::Unknown => labels.pending.to_string(),
    }
}

fn score_text(labels: &Labels, item: &ResolvedItem<'_>) -> String {
    match item.record.rating() {
        Some(v) => format!("{v:.1}/5.0"),
        None => labels.pending.to_string(),
    }
}

fn or_pending<'a>(labels: &Labels, text: &'a str) -> &'a str {
    if text.is_empty() { labels.pending } else { text }
}

fn comparison_table(labels: &Labels, a: &ResolvedItem<'_>, b: &ResolvedItem<'_>) -> Markup {
    html! {
        table.comparison-table {
            thead {
                tr {
                    th { (labels.feature) }
                    th { (a.name()) }
                    th { (b.name()) }
                }
            }
            tbody {
                tr.price-row {
                    th { (labels.price) }
                    td { (price_text(labels, a)) }
                    td { (price_text(labels, b)) }
                }
                tr.score-row {
                    th { (labels.score) }
                    td { (score_text(labels, a)) }
                    td { (score_text(labels, b)) }
                }
                tr.feature-row {
                    th { (labels.feature) }
                    td { (or_pending(labels, &a.record.features)) }
                    td { (or_pending(labels, &b.record.features)) }
                }
            }
        }
    }
}

/// The localized verdict sentence.
pub(crate) fn verdict_sentence(
    labels: &Labels,
    verdict: &Verdict,
    a: &ResolvedItem<'_>,
    b: &ResolvedItem<'_>,
) -> String {
    if verdict.is_tie() {
        return fill(labels.verdict_tie, &[("a", a.name()), ("b", b.name())]);
    }
    let cheaper = verdict.cheaper.pick(a, b);
    let pricier = verdict.pricier.pick(a, b);
    fill(
        labels.verdict_decided,
        &[
            ("cheaper", cheaper.name()),
            ("pricier", pricier.name()),
            ("delta", format_money(verdict.price_delta).as_str()),
        ],
    )
}

fn verdict_section(
    labels: &Labels,
    verdict: &Verdict,
    a: &ResolvedItem<'_>,
    b: &ResolvedItem<'_>,
) -> Markup {
    html! {
        section.verdict {
            h2 {
                @match verdict.winner() {
                    Some(side) => { (labels.winner) ": " (side.pick(a, b).name()) }
                    None => { (labels.tie) }
                }
            }
            p.verdict-sentence { (verdict_sentence(labels, verdict, a, b)) }
            @if !verdict.is_tie() {
                p.savings {
                    (fill(labels.savings, &[("amount", format_money(verdict.annual_savings).as_str())]))
                }
            }
        }
    }
}

fn calculator(labels: &Labels, verdict: &Verdict) -> Markup {
    html! {
        section.calculator data-delta=(verdict.price_delta) data-save-label=(labels.save) {
            h2 { (labels.calc_title) }
            label for="calc-months" { (labels.input_label) }
            input id="calc-months" type="number" min="1" value="12";
            button.calc-button type="button" { (labels.calc_btn) }
            p.calc-result {}
        }
        script { (PreEscaped(CALCULATOR_JS)) }
    }
}

fn pros_cons(labels: &Labels, item: &ResolvedItem<'_>) -> Markup {
    let pros = item.record.pros();
    let cons = item.record.cons();
    html! {
        div.pros-cons-column {
            h3 { (item.name()) }
            h4 { (labels.pros) }
            @if pros.is_empty() {
                p.pending { (labels.pending) }
            } @else {
                ul.pros { @for p in &pros { li { (p) } } }
            }
            h4 { (labels.cons) }
            @if cons.is_empty() {
                p.pending { (labels.pending) }
            } @else {
                ul.cons { @for c in &cons { li { (c) } } }
            }
        }
    }
}

fn cta(labels: &Labels, item: &ResolvedItem<'_>) -> Markup {
    html! {
        @if item.link.trim().is_empty() {
            span.cta.cta-disabled { (item.name()) ": " (labels.pending) }
        } @else {
            a.cta href=(item.link.trim()) rel="sponsored noopener" target="_blank" {
                (labels.visit) ": " (item.name())
            }
        }
    }
}
