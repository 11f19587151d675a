//! Site build orchestration.
//!
//! Takes validated catalog records and a site config and produces the whole
//! output tree in one pass. Every build is a clean rebuild: the output
//! directory is removed and recreated first, so a page for an item that has
//! left the catalog can never survive.
//!
//! ## Build Sequence
//!
//! ```text
//! validate catalog + config          fatal on any error
//! resolve items                      price, affiliate link, slug
//! plan pairs                         verdict + route per pair, fatal on route collision
//! clear output dir
//! for each locale:
//!     render comparisons             parallel (rayon), collected in pair order
//!     write comparisons              sequential, failures recorded and skipped
//!     render + write legal pages
//!     render + write home            lists only the comparisons written above
//! sitemap.xml + robots.txt           from the written-page records
//! ```
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                     # default-locale home
//! ├── jasper-vs-rytr/index.html      # default-locale comparison
//! ├── privacy/index.html
//! ├── terms/index.html
//! ├── es/
//! │   ├── index.html
//! │   ├── jasper-vs-rytr/index.html
//! │   └── ...
//! ├── sitemap.xml
//! └── robots.txt
//! ```
//!
//! ## Failure Handling
//!
//! A page whose render fails is logged, recorded as a [`PageFailure`], and
//! left out of its locale home and of the sitemap. Write failures are IO
//! errors and abort the build.

use crate::catalog::{CatalogError, ItemRecord, validate_items};
use crate::config::{ConfigError, SiteConfig};
use crate::pairs::{Pair, generate_pairs};
use crate::render::{ComparisonPage, LegalPage, RenderError, Renderer, SiteContext};
use crate::seo::{ROBOTS_FILE, SITEMAP_FILE, render_robots, render_sitemap, sitemap_entries};
use crate::site_index::{home_page, index_entry, related_indices, related_link};
use crate::slug::{LegalKind, Route, pair_slug};
use crate::types::{PageArtifact, PageKind, ResolvedItem, WrittenPage};
use crate::verdict::{Verdict, compute_verdict};
use chrono::NaiveDate;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("{first:?} and {second:?} both resolve to /{slug}/")]
    RouteCollision {
        first: String,
        second: String,
        slug: String,
    },
    #[error("Refusing to clear output directory {}", .0.display())]
    UnsafeOutputDir(PathBuf),
}

/// A page that was planned but not written.
#[derive(Debug)]
pub struct PageFailure {
    pub locale: &'static str,
    pub kind: PageKind,
    pub title: String,
    pub url_path: String,
    pub error: RenderError,
}

/// What a build produced.
#[derive(Debug)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub item_count: usize,
    pub pair_count: usize,
    pub locales: Vec<&'static str>,
    /// Written pages, grouped by locale, home first within each locale.
    pub pages: Vec<WrittenPage>,
    pub failures: Vec<PageFailure>,
    pub last_modified: NaiveDate,
}

impl BuildReport {
    pub fn count(&self, kind: PageKind) -> usize {
        self.pages.iter().filter(|p| p.kind == kind).count()
    }

    pub fn canonical_urls(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.canonical_url.as_str()).collect()
    }
}

/// A pair with its presentation data decided once for all locales.
#[derive(Debug)]
struct PlannedPair {
    pair: Pair<usize>,
    title: String,
    route: Route,
    verdict: Verdict,
}

/// Build the full site into `output_dir`.
///
/// `last_modified` is stamped on every sitemap entry; pass a fixed date for
/// byte-identical rebuilds.
pub fn build_site(
    items: &[ItemRecord],
    config: &SiteConfig,
    output_dir: &Path,
    renderer: &impl Renderer,
    last_modified: NaiveDate,
) -> Result<BuildReport, BuildError> {
    validate_items(items)?;
    config.validate()?;

    let resolved: Vec<ResolvedItem> = items
        .iter()
        .map(|record| ResolvedItem::resolve(record, &config.affiliates))
        .collect();
    let plans = plan_pairs(&resolved)?;
    let members: Vec<(usize, usize)> = plans.iter().map(|p| (p.pair.a, p.pair.b)).collect();
    let bundles = config.locale_bundles();

    info!(
        items = resolved.len(),
        pairs = plans.len(),
        locales = bundles.len(),
        "planned build"
    );

    prepare_output_dir(output_dir)?;

    let mut report = BuildReport {
        output_dir: output_dir.to_path_buf(),
        item_count: resolved.len(),
        pair_count: plans.len(),
        locales: bundles.iter().map(|b| b.code).collect(),
        pages: Vec::new(),
        failures: Vec::new(),
        last_modified,
    };

    for locale in &bundles {
        let site = SiteContext {
            site_name: &config.site_name,
            base_url: &config.base_url,
            locale,
            locales: &bundles,
        };
        build_locale(&site, &resolved, &plans, &members, renderer, output_dir, &mut report)?;
    }

    let entries = sitemap_entries(&report.pages, last_modified);
    fs::write(output_dir.join(SITEMAP_FILE), render_sitemap(&entries))?;
    fs::write(
        output_dir.join(ROBOTS_FILE),
        render_robots(&config.sitemap_url()),
    )?;

    info!(
        pages = report.pages.len(),
        failures = report.failures.len(),
        "site generated at {}",
        output_dir.display()
    );
    Ok(report)
}

/// Verdict, title and route for every pair, in pair order.
///
/// Two pairs that resolve to the same slug would overwrite each other's
/// page, so that is fatal.
fn plan_pairs(resolved: &[ResolvedItem]) -> Result<Vec<PlannedPair>, BuildError> {
    let indices: Vec<usize> = (0..resolved.len()).collect();
    let mut by_slug: HashMap<String, String> = HashMap::new();
    let mut plans = Vec::new();

    for pair in generate_pairs(&indices) {
        let (a, b) = (&resolved[pair.a], &resolved[pair.b]);
        let title = format!("{} vs {}", a.name(), b.name());
        let slug = pair_slug(a.name(), b.name());
        if let Some(first) = by_slug.get(&slug) {
            return Err(BuildError::RouteCollision {
                first: first.clone(),
                second: title,
                slug,
            });
        }
        by_slug.insert(slug.clone(), title.clone());
        debug!(pair = %title, a = %a.price, b = %b.price, "planned pair");
        plans.push(PlannedPair {
            pair,
            title,
            route: Route::Comparison(slug),
            verdict: compute_verdict(a.price, b.price),
        });
    }
    Ok(plans)
}

fn build_locale(
    site: &SiteContext<'_>,
    resolved: &[ResolvedItem],
    plans: &[PlannedPair],
    members: &[(usize, usize)],
    renderer: &impl Renderer,
    output_dir: &Path,
    report: &mut BuildReport,
) -> Result<(), BuildError> {
    let locale = site.locale;

    let rendered = render_comparisons(site, resolved, plans, members, renderer);

    let mut written = Vec::new();
    let mut entries = Vec::new();
    for (plan, result) in plans.iter().zip(rendered) {
        let (a, b) = (&resolved[plan.pair.a], &resolved[plan.pair.b]);
        if emit(
            site,
            PageKind::Comparison,
            &plan.route,
            &plan.title,
            result,
            output_dir,
            &mut written,
            &mut report.failures,
        )? {
            entries.push(index_entry(site, &plan.route, a, b, &plan.verdict));
        }
    }

    for kind in LegalKind::ALL {
        let result = renderer.render_legal(&LegalPage { site: *site, kind });
        emit(
            site,
            PageKind::Legal,
            &Route::Legal(kind),
            kind.slug(),
            result,
            output_dir,
            &mut written,
            &mut report.failures,
        )?;
    }

    let comparisons = entries.len();
    let result = renderer.render_home(&home_page(*site, entries, resolved.len()));
    let mut home = Vec::new();
    emit(
        site,
        PageKind::Home,
        &Route::Home,
        "home",
        result,
        output_dir,
        &mut home,
        &mut report.failures,
    )?;

    info!(
        locale = locale.code,
        comparisons,
        pages = home.len() + written.len(),
        "locale written"
    );
    report.pages.extend(home);
    report.pages.extend(written);
    Ok(())
}

/// Render every comparison of one locale, in pair order.
///
/// Related links must only point at pages that exist, so when a render
/// fails, every page listing it as related is rendered again without it.
/// The failed set only grows, which bounds the loop.
fn render_comparisons(
    site: &SiteContext<'_>,
    resolved: &[ResolvedItem],
    plans: &[PlannedPair],
    members: &[(usize, usize)],
    renderer: &impl Renderer,
) -> Vec<Result<String, RenderError>> {
    let render_one = |index: usize, failed: &HashSet<usize>| {
        let plan = &plans[index];
        let related = related_indices(members, index, failed)
            .into_iter()
            .map(|i| related_link(site, &plans[i].route, &plans[i].title))
            .collect();
        let page = ComparisonPage {
            site: *site,
            a: &resolved[plan.pair.a],
            b: &resolved[plan.pair.b],
            verdict: &plan.verdict,
            route: plan.route.clone(),
            related,
        };
        renderer.render_comparison(&page)
    };

    let mut results: Vec<Option<Result<String, RenderError>>> =
        plans.iter().map(|_| None).collect();
    let mut failed: HashSet<usize> = HashSet::new();
    let mut pending: Vec<usize> = (0..plans.len()).collect();

    while !pending.is_empty() {
        let batch: Vec<(usize, Result<String, RenderError>)> = pending
            .par_iter()
            .map(|&index| (index, render_one(index, &failed)))
            .collect();

        let mut new_failure = false;
        for (index, result) in batch {
            if result.is_err() {
                failed.insert(index);
                new_failure = true;
            }
            results[index] = Some(result);
        }
        if !new_failure {
            break;
        }
        pending = (0..plans.len())
            .filter(|i| !failed.contains(i))
            .filter(|&i| failed.iter().any(|&j| shares_item(members[i], members[j])))
            .collect();
        debug!(
            locale = site.locale.code,
            rerender = pending.len(),
            "re-rendering pages linking to failed comparisons"
        );
    }

    results
        .into_iter()
        .map(|r| r.unwrap_or_else(|| Err(RenderError::Template("not rendered".into()))))
        .collect()
}

fn shares_item((a, b): (usize, usize), (x, y): (usize, usize)) -> bool {
    a == x || a == y || b == x || b == y
}

/// Write a rendered page, or record why it was not rendered.
///
/// Returns whether the page was written.
#[allow(clippy::too_many_arguments)]
fn emit(
    site: &SiteContext<'_>,
    kind: PageKind,
    route: &Route,
    title: &str,
    result: Result<String, RenderError>,
    output_dir: &Path,
    written: &mut Vec<WrittenPage>,
    failures: &mut Vec<PageFailure>,
) -> Result<bool, BuildError> {
    let locale = site.locale;
    match result {
        Ok(body) => {
            let artifact = PageArtifact {
                kind,
                path: route.file_path(site.prefix()),
                canonical_url: site.canonical_url(route),
                body,
            };
            write_page(output_dir, &artifact)?;
            debug!(locale = locale.code, path = %artifact.path.display(), "wrote page");
            written.push(WrittenPage {
                kind,
                locale: locale.code,
                title: title.to_string(),
                path: artifact.path,
                canonical_url: artifact.canonical_url,
            });
            Ok(true)
        }
        Err(error) => {
            warn!(locale = locale.code, page = title, %error, "skipping page");
            failures.push(PageFailure {
                locale: locale.code,
                kind,
                title: title.to_string(),
                url_path: site.url_path(route),
                error,
            });
            Ok(false)
        }
    }
}

fn write_page(output_dir: &Path, artifact: &PageArtifact) -> std::io::Result<()> {
    let path = output_dir.join(&artifact.path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &artifact.body)
}

/// Remove and recreate the output directory.
///
/// Refuses paths with no normal component (`/`, `.`, `..`, empty) and
/// paths ending in `..`.
fn prepare_output_dir(dir: &Path) -> Result<(), BuildError> {
    let has_name = dir.components().any(|c| matches!(c, Component::Normal(_)));
    let ends_in_parent = matches!(dir.components().next_back(), Some(Component::ParentDir));
    if !has_name || ends_in_parent {
        return Err(BuildError::UnsafeOutputDir(dir.to_path_buf()));
    }
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}
