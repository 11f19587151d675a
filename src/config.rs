//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. User values are
//! layered over stock defaults, so a config file only needs the keys it
//! wants to change. `base_url` is the one key without a usable default.
//!
//! ## Configuration Options
//!
//! ```toml
//! site_name = "AI Tool Diff Engine"
//! base_url = "https://compare.example.com"   # required, no trailing slash
//! default_locale = "en"                      # served from the site root
//! locales = ["en", "es", "de", "fr", "pt"]   # active locales, in order
//! # build_date = "2026-01-31"                # fixes sitemap lastmod
//!
//! [[affiliates]]                             # first matching key wins
//! key = "jasper"
//! link = "https://aff.example/jasper"
//!
//! [theme]
//! accent = "#2563eb"
//! background = "#f8fafc"
//! text = "#1e293b"
//! card = "#ffffff"
//! border = "#e2e8f0"
//!
//! [processing]
//! max_processes = 4         # Max parallel render workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early. `[[affiliates]]` is an
//! array, so a user file replaces the stock list rather than extending it.

use crate::affiliate::AffiliateRule;
use crate::locale::{self, LocaleBundle};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// Passed explicitly to every stage that needs it; nothing reads site
/// settings from global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Display name used in titles, headers and structured data.
    pub site_name: String,
    /// Canonical origin for every generated URL, without trailing slash.
    pub base_url: String,
    /// Locale served from the root; all others live under `/{code}/`.
    pub default_locale: String,
    /// Active locale codes, in build order.
    pub locales: Vec<String>,
    /// Fixed `lastmod` date for the sitemap. Today when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_date: Option<NaiveDate>,
    /// Ordered affiliate override rules.
    pub affiliates: Vec<AffiliateRule>,
    /// Page colors.
    pub theme: ThemeConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "AI Tool Diff Engine".to_string(),
            base_url: String::new(),
            default_locale: "en".to_string(),
            locales: locale::supported_codes()
                .into_iter()
                .map(String::from)
                .collect(),
            build_date: None,
            affiliates: Vec::new(),
            theme: ThemeConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate required values and cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation("base_url is required".into()));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "base_url must start with http:// or https://".into(),
            ));
        }
        if self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "base_url must not end with '/'".into(),
            ));
        }
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::Validation("site_name must not be empty".into()));
        }
        if self.locales.is_empty() {
            return Err(ConfigError::Validation("locales must not be empty".into()));
        }
        for (i, code) in self.locales.iter().enumerate() {
            if !locale::is_supported(code) {
                return Err(ConfigError::Validation(format!(
                    "unsupported locale '{code}' (supported: {})",
                    locale::supported_codes().join(", ")
                )));
            }
            if self.locales[..i].contains(code) {
                return Err(ConfigError::Validation(format!(
                    "locale '{code}' listed twice"
                )));
            }
        }
        if !self.locales.contains(&self.default_locale) {
            return Err(ConfigError::Validation(format!(
                "default_locale '{}' must be one of locales",
                self.default_locale
            )));
        }
        if let Some(rule) = self.affiliates.iter().find(|r| r.key.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "affiliate rule for '{}' has an empty key",
                rule.link
            )));
        }
        Ok(())
    }

    /// Bundles for the active locales, default locale unprefixed.
    pub fn locale_bundles(&self) -> Vec<LocaleBundle> {
        locale::bundles_for(&self.locales, &self.default_locale)
    }

    /// Absolute URL of the sitemap.
    pub fn sitemap_url(&self) -> String {
        format!("{}/sitemap.xml", self.base_url)
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Page colors, emitted as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Links, buttons, highlighted prices.
    pub accent: String,
    pub background: String,
    pub text: String,
    /// Card and table background.
    pub card: String,
    pub border: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: "#2563eb".to_string(),
            background: "#f8fafc".to_string(),
            text: "#1e293b".to_string(),
            card: "#ffffff".to_string(),
            border: "#e2e8f0".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (arrays included) replace base values.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, normalize, then validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let mut config: SiteConfig = merged.try_into()?;
    config.base_url = config.base_url.trim().trim_end_matches('/').to_string();
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path` over stock defaults.
///
/// A missing file is not an error by itself, but the result still has to
/// validate, so `base_url` must come from somewhere.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Matchup Configuration
# =====================
# Values shown below are the defaults, except base_url which has none.
# Unknown keys will cause an error.

# Display name used in page titles, headers and structured data.
site_name = "AI Tool Diff Engine"

# Canonical origin for every generated URL. Required. No trailing slash.
base_url = "https://compare.example.com"

# Locale served from the site root. Every other locale lives under /{code}/.
default_locale = "en"

# Active locales, in build order. Supported: en, es, de, fr, pt.
locales = ["en", "es", "de", "fr", "pt"]

# Fix the sitemap <lastmod> date (YYYY-MM-DD). Omit to use today's date.
# build_date = "2026-01-31"

# ---------------------------------------------------------------------------
# Affiliate links
# ---------------------------------------------------------------------------
# Rules are tried top to bottom. The first rule whose key appears in an item
# name (case-insensitive) replaces that item's catalog link.
#
# [[affiliates]]
# key = "jasper"
# link = "https://aff.example/jasper"

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
accent = "#2563eb"
background = "#f8fafc"
text = "#1e293b"
card = "#ffffff"
border = "#e2e8f0"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --color-accent: {accent};
    --color-bg: {background};
    --color-text: {text};
    --color-card: {card};
    --color-border: {border};
}}"#,
        accent = theme.accent,
        background = theme.background,
        text = theme.text,
        card = theme.card,
        border = theme.border,
    )
}
