//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives at
//! the content root and is sparse: user values are merged key by key over the
//! stock defaults, so a file only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! default_locale = "en"                # Locale served without a URL prefix
//! locales = ["en", "fr", "es", "nl"]   # Enabled locales
//!
//! [listing]
//! default_sort = "newest"              # newest | oldest | fastest | longest
//! latest_limit = 6                     # Home page "latest" row
//! seasonal_limit = 4                   # Home page "in season" row
//! tag_cloud_limit = 8                  # Home page popular tags
//! quick_tags = ["breakfast", "mains", "dessert"]
//!
//! [storage]
//! path = ".simple-recipes/checklists.json"   # Relative to the content root
//!
//! [tags.fr]                            # Tag label overrides per locale
//! vegan = "Vegan"
//!
//! [strings.nl]                         # UI string overrides per locale
//! "search.placeholder" = "Zoek een recept"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::filter::SortKey;
use crate::i18n::{Locale, LocaleOverrides, Translator};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
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
/// All fields have sensible defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Locale rendered at the site root (no `/xx` prefix).
    pub default_locale: Locale,
    /// Enabled locales, in language menu order.
    pub locales: Vec<Locale>,
    /// Listing and home page settings.
    pub listing: ListingConfig,
    /// Checklist persistence.
    pub storage: StorageConfig,
    /// Tag label overrides: locale code → tag slug → label.
    pub tags: LocaleOverrides,
    /// UI string overrides: locale code → string key → template.
    pub strings: LocaleOverrides,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::En,
            locales: Locale::ALL.to_vec(),
            listing: ListingConfig::default(),
            storage: StorageConfig::default(),
            tags: LocaleOverrides::new(),
            strings: LocaleOverrides::new(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locales.is_empty() {
            return Err(ConfigError::Validation("locales must not be empty".into()));
        }
        if !self.locales.contains(&self.default_locale) {
            return Err(ConfigError::Validation(format!(
                "default_locale '{}' must be listed in locales",
                self.default_locale
            )));
        }
        for (section, overrides) in [("tags", &self.tags), ("strings", &self.strings)] {
            for code in overrides.keys() {
                if code.parse::<Locale>().is_err() {
                    return Err(ConfigError::Validation(format!(
                        "[{section}.{code}] does not name a known locale"
                    )));
                }
            }
        }
        if self.storage.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage.path must not be empty".into(),
            ));
        }
        if self.listing.latest_limit == 0 {
            return Err(ConfigError::Validation(
                "listing.latest_limit must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Check that `requested` (or the default locale) is enabled.
    pub fn resolve_locale(&self, requested: Option<Locale>) -> Result<Locale, ConfigError> {
        let locale = requested.unwrap_or(self.default_locale);
        if self.locales.contains(&locale) {
            Ok(locale)
        } else {
            Err(ConfigError::Validation(format!(
                "locale '{locale}' is not enabled (enabled: {})",
                self.locales
                    .iter()
                    .map(|l| l.code())
                    .collect::<Vec<_>>()
                    .join(", ")
            )))
        }
    }

    /// Translator for `locale` with this site's overrides applied.
    pub fn translator(&self, locale: Locale) -> Translator {
        Translator::with_overrides(locale, &self.strings, &self.tags)
    }

    /// Checklist store location. Relative paths resolve against `root`.
    pub fn storage_path(&self, root: &Path) -> PathBuf {
        let path = Path::new(&self.storage.path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }
}

/// Listing and home page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    pub default_sort: SortKey,
    pub latest_limit: usize,
    pub seasonal_limit: usize,
    pub tag_cloud_limit: usize,
    /// Tags offered as one-click filters, shown only when some recipe uses them.
    pub quick_tags: Vec<String>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_sort: SortKey::Newest,
            latest_limit: crate::collection::DEFAULT_LATEST_LIMIT,
            seasonal_limit: crate::collection::DEFAULT_SEASONAL_LIMIT,
            tag_cloud_limit: crate::collection::DEFAULT_TAG_CLOUD_LIMIT,
            quick_tags: crate::collection::DEFAULT_QUICK_TAGS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: ".simple-recipes/checklists.json".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`, `Err` if the file
/// exists but is not valid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Recipes Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at the root of the content directory.
# Unknown keys will cause an error.

# Locale served at the site root, without a /xx prefix.
default_locale = "en"

# Enabled locales, in language menu order. Known: en, fr, es, nl.
locales = ["en", "fr", "es", "nl"]

# ---------------------------------------------------------------------------
# Listing and home page
# ---------------------------------------------------------------------------
[listing]
# Initial sort of the recipe index: newest, oldest, fastest or longest.
default_sort = "newest"

# Number of recipes in the home page "latest" row.
latest_limit = 6

# Number of recipes in the home page "in season" row.
seasonal_limit = 4

# Number of tags in the home page tag cloud.
tag_cloud_limit = 8

# One-click filter tags. Tags no recipe uses are hidden.
quick_tags = ["breakfast", "mains", "dessert"]

# ---------------------------------------------------------------------------
# Checklist persistence
# ---------------------------------------------------------------------------
[storage]
# JSON file holding ingredient and step checklists.
# Relative paths resolve against the content directory.
path = ".simple-recipes/checklists.json"

# ---------------------------------------------------------------------------
# Label overrides
# ---------------------------------------------------------------------------
# Tag labels per locale, layered over the built-in dictionaries:
# [tags.fr]
# vegan = "Végane"
#
# UI strings per locale:
# [strings.en]
# "search.placeholder" = "Find a recipe"
"##
}
