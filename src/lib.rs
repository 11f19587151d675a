//! # Matchup
//!
//! A static site generator for pairwise software comparison pages. Give it a
//! catalog of N tools and it writes one "A vs B" page for every unordered
//! pair, in every configured language, plus a home page per language, legal
//! pages, `sitemap.xml` and `robots.txt`.
//!
//! # Architecture: One Clean Pass
//!
//! ```text
//! catalog.json ─┐
//!               ├─ validate → resolve items → plan pairs → render per locale → dist/
//! config.toml ──┘                                                   │
//!                                                  written pages ───┴→ sitemap.xml
//! ```
//!
//! Every build starts from an empty output directory. There is no manifest
//! and no cache: the output is a pure function of the catalog, the config,
//! and the build date.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Catalog JSON loading, malformed-row filtering, identity validation |
//! | [`config`] | `config.toml` loading, stock defaults, merging, validation, theme CSS |
//! | [`price`] | Price text parsing (`"$49/mo"`, `"Contact sales"`) and money display |
//! | [`affiliate`] | Ordered substring rules overriding catalog affiliate links |
//! | [`pairs`] | Unordered 2-combinations in catalog order |
//! | [`verdict`] | Cheaper/pricier classification, badges, savings |
//! | [`slug`] | Name slugs, pair slugs, and the `Route` → path/URL mapping |
//! | [`locale`] | Label tables for the supported languages |
//! | [`render`] | Maud templates for comparison, home, and legal pages |
//! | [`site_index`] | Home page cards and related-comparison links |
//! | [`seo`] | Sitemap and robots.txt |
//! | [`generate`] | The build orchestrator |
//! | [`check`] | Verifies an existing output tree against its sitemap |
//! | [`types`] | Types shared between stages (`ResolvedItem`, `WrittenPage`) |
//! | [`output`] | CLI output formatting for build and check reports |
//!
//! # Design Decisions
//!
//! ## The Sitemap Follows the Disk
//!
//! Sitemap entries come from the records of pages that were actually
//! written, never from the planned page set. A page whose render fails is
//! left out of its locale home, its siblings' related links, and the sitemap
//! in one go, so `check` always finds the two sets equal after a build.
//!
//! ## Identity Problems Are Fatal
//!
//! Duplicate names, names that slug to nothing, and two names that slug to
//! the same path all stop the build before anything is written. Silently
//! dropping one of them would make the generated URL set depend on catalog
//! order.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Each page kind has
//! a typed context struct ([`render::ComparisonPage`], [`render::HomePage`],
//! [`render::LegalPage`]), so a missing field is a compile error and all
//! interpolation is escaped.
//!
//! ## Deterministic Output
//!
//! Pairs are rendered in parallel with rayon but collected in pair order,
//! and the sitemap date comes from `build_date` when set. Two builds of the
//! same inputs are byte-identical.

pub mod affiliate;
pub mod catalog;
pub mod check;
pub mod config;
pub mod generate;
pub mod locale;
pub mod output;
pub mod pairs;
pub mod price;
pub mod render;
pub mod seo;
pub mod site_index;
pub mod slug;
pub mod types;
pub mod verdict;

#[cfg(test)]
pub(crate) mod test_helpers;
