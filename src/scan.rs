//! Content scanning and manifest generation.
//!
//! Walks the content root, parses every recipe record, resolves its locale
//! and produces a [`Manifest`] that the listing, detail and home commands
//! consume.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                     # Content root
//! ├── config.toml              # Site configuration (optional)
//! ├── en/
//! │   ├── pasta-al-limone.toml # slug "pasta-al-limone", locale en
//! │   └── mains/
//! │       └── lentil-soup.toml # nesting is free-form
//! ├── fr/
//! │   └── soupe-de-lentilles.toml
//! ├── shared-bread.toml        # no locale directory: lang field or default
//! └── .drafts/                 # dot-prefixed entries are skipped
//! ```
//!
//! ## Locale Resolution
//!
//! 1. The record's own `lang` field.
//! 2. The first directory component, when it is a locale code.
//! 3. The configured `default_locale`.
//!
//! ## Validation
//!
//! - Every `.toml` file other than the root `config.toml` must parse as a
//!   recipe record (unknown fields are errors).
//! - Slugs are unique within a locale.

use crate::config::{self, SiteConfig};
use crate::i18n::Locale;
use crate::recipe::{self, RecipeRecord};
use crate::types::RecipeSummary;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid recipe {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Duplicate slug '{slug}' in locale {locale}: {first} and {second}")]
    DuplicateSlug {
        slug: String,
        locale: Locale,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Manifest output from the scan stage.
#[derive(Debug)]
pub struct Manifest {
    /// Every record, newest first.
    pub recipes: Vec<RecipeRecord>,
    pub config: SiteConfig,
}

impl Manifest {
    /// One locale's records, newest first.
    pub fn collection(&self, locale: Locale) -> Vec<&RecipeRecord> {
        self.recipes.iter().filter(|r| r.locale == locale).collect()
    }

    /// Listing summaries of one locale's records, newest first.
    pub fn summaries(&self, locale: Locale) -> Vec<RecipeSummary> {
        self.collection(locale)
            .into_iter()
            .map(recipe::summarize)
            .collect()
    }

    pub fn find(&self, locale: Locale, slug: &str) -> Option<&RecipeRecord> {
        self.recipes
            .iter()
            .find(|r| r.locale == locale && r.slug == slug)
    }

    /// Record count per locale.
    pub fn locale_counts(&self) -> BTreeMap<Locale, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.recipes {
            *counts.entry(r.locale).or_insert(0) += 1;
        }
        counts
    }

    /// Other-locale records sharing `record`'s translation key.
    pub fn translations_of(&self, record: &RecipeRecord) -> Vec<&RecipeRecord> {
        let Some(key) = record.translation_key.as_deref() else {
            return Vec::new();
        };
        self.recipes
            .iter()
            .filter(|r| r.locale != record.locale && r.translation_key.as_deref() == Some(key))
            .collect()
    }
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    // Load site config (uses defaults if config.toml doesn't exist)
    let config = config::load_config(root)?;

    let mut recipes = Vec::new();
    let mut seen: HashMap<(Locale, String), PathBuf> = HashMap::new();

    for path in collect_record_paths(root)? {
        let record = parse_record(root, &path, config.default_locale)?;
        let key = (record.locale, record.slug.clone());
        if let Some(first) = seen.get(&key) {
            return Err(ScanError::DuplicateSlug {
                slug: record.slug,
                locale: record.locale,
                first: first.clone(),
                second: path,
            });
        }
        tracing::debug!(slug = %record.slug, locale = %record.locale, path = %record.source_path, "scanned recipe");
        seen.insert(key, path);
        recipes.push(record);
    }

    crate::dates::sort_newest_first(&mut recipes, |r| r.date.as_deref());
    tracing::debug!(count = recipes.len(), "scan complete");

    Ok(Manifest { recipes, config })
}

/// Recipe files under `root` in path order, skipping hidden entries and the
/// root config file.
fn collect_record_paths(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut paths = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_toml(entry.path()) {
            continue;
        }
        if entry.depth() == 1 && entry.file_name() == "config.toml" {
            continue;
        }
        paths.push(entry.into_path());
    }
    Ok(paths)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("toml"))
        .unwrap_or(false)
}

fn parse_record(root: &Path, path: &Path, default_locale: Locale) -> Result<RecipeRecord, ScanError> {
    let content = fs::read_to_string(path)?;
    let mut record: RecipeRecord = toml::from_str(&content).map_err(|source| ScanError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let relative = path.strip_prefix(root).unwrap_or(path);
    record.slug = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    record.source_path = relative.to_string_lossy().replace('\\', "/");
    record.locale = record
        .lang
        .or_else(|| locale_from_path(relative))
        .unwrap_or(default_locale);
    Ok(record)
}

/// Locale named by the first directory component of `relative`, if any.
fn locale_from_path(relative: &Path) -> Option<Locale> {
    let mut components = relative.components();
    let first = components.next()?;
    // A bare file at the root has no directory component.
    components.next()?;
    first.as_os_str().to_str()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn scan_finds_all_fixture_recipes() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.collection(Locale::En).len(), 5);
        assert_eq!(manifest.collection(Locale::Fr).len(), 2);
    }

    #[test]
    fn records_sorted_newest_first() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let stamps: Vec<i64> = manifest
            .recipes
            .iter()
            .map(|r| crate::dates::to_timestamp_millis(r.date.as_deref()))
            .collect();
        let mut sorted = stamps.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(stamps, sorted);
    }

    #[test]
    fn slug_is_file_stem() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let pasta = find_recipe(&manifest, Locale::En, "pasta-al-limone");
        assert_eq!(pasta.display_title(), "Pasta al limone");
        assert_eq!(pasta.source_path, "en/pasta-al-limone.toml");
    }

    #[test]
    fn nested_directories_keep_locale_of_first_component() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let soup = find_recipe(&manifest, Locale::En, "lentil-soup");
        assert_eq!(soup.source_path, "en/mains/lentil-soup.toml");
    }

    #[test]
    fn lang_field_wins_over_directory() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "en/tarte.toml", "title = \"Tarte\"\nlang = \"fr\"");
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.recipes[0].locale, Locale::Fr);
    }

    #[test]
    fn root_file_uses_default_locale() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "config.toml", "default_locale = \"nl\"");
        write(tmp.path(), "brood.toml", "title = \"Brood\"");
        write(tmp.path(), "misc/stroopwafel.toml", "title = \"Stroopwafel\"");
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.collection(Locale::Nl).len(), 2);
    }

    #[test]
    fn hidden_entries_and_config_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "config.toml", "");
        write(tmp.path(), ".drafts/secret.toml", "title = \"Secret\"");
        write(tmp.path(), "en/.wip.toml", "title = \"Wip\"");
        write(tmp.path(), "en/notes.txt", "not a recipe");
        write(tmp.path(), "en/real.toml", "title = \"Real\"");
        let manifest = scan(tmp.path()).unwrap();
        let slugs: Vec<&str> = manifest.recipes.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["real"]);
    }

    #[test]
    fn nested_config_toml_is_a_recipe_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "en/config.toml", "title = \"Config cake\"");
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(find_recipe(&manifest, Locale::En, "config").display_title(), "Config cake");
    }

    #[test]
    fn invalid_record_is_parse_error_with_path() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "en/broken.toml", "titel = \"Typo\"");
        let err = scan(tmp.path()).unwrap_err();
        match err {
            ScanError::Parse { path, .. } => assert!(path.ends_with("en/broken.toml")),
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn duplicate_slug_in_one_locale_is_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "en/soup.toml", "title = \"Soup\"");
        write(tmp.path(), "en/mains/soup.toml", "title = \"Other soup\"");
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::DuplicateSlug { ref slug, .. } if slug == "soup"));
    }

    #[test]
    fn same_slug_in_two_locales_is_fine() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "en/soup.toml", "title = \"Soup\"");
        write(tmp.path(), "fr/soup.toml", "title = \"Soupe\"");
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.recipes.len(), 2);
    }

    #[test]
    fn config_errors_propagate() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "config.toml", "locales = []");
        assert!(matches!(scan(tmp.path()), Err(ScanError::Config(_))));
    }

    #[test]
    fn default_config_when_no_toml() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "en/soup.toml", "title = \"Soup\"");
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.default_locale, Locale::En);
    }

    #[test]
    fn translations_linked_by_key() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let pasta = find_recipe(&manifest, Locale::En, "pasta-al-limone");
        let translations = manifest.translations_of(pasta);
        let slugs: Vec<&str> = translations.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["pates-au-citron"]);
    }

    #[test]
    fn summaries_follow_collection_order() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let summaries = manifest.summaries(Locale::En);
        let slugs: Vec<&str> = summaries.iter().map(|s| s.slug.as_str()).collect();
        let records: Vec<&str> = manifest
            .collection(Locale::En)
            .iter()
            .map(|r| r.slug.as_str())
            .collect();
        assert_eq!(slugs, records);
        assert!(summaries.iter().all(|s| s.lang == Some(Locale::En)));
    }

    #[test]
    fn locale_counts_per_locale() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let counts = manifest.locale_counts();
        assert_eq!(counts.get(&Locale::En), Some(&5));
        assert_eq!(counts.get(&Locale::Fr), Some(&2));
        assert_eq!(counts.get(&Locale::Es), None);
    }
}
