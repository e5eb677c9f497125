//! Shared test utilities for the simple-recipes test suite.
//!
//! Provides fixture setup, a fluent [`RecipeSummary`] builder and lookup
//! helpers that panic with the available candidates on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//! let pasta = find_recipe(&manifest, Locale::En, "pasta-al-limone");
//!
//! let soup = summary("soup", "Soup").tags(&["vegan"]).total(30).build();
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::i18n::Locale;
use crate::recipe::RecipeRecord;
use crate::scan::Manifest;
use crate::types::{Difficulty, RecipeSummary, Season};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Summary builder
// =========================================================================

/// Start a summary with only slug and title set.
pub fn summary(slug: &str, title: &str) -> SummaryBuilder {
    SummaryBuilder(RecipeSummary::new(slug, title))
}

pub struct SummaryBuilder(RecipeSummary);

impl SummaryBuilder {
    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.0.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn total(mut self, minutes: u32) -> Self {
        self.0.total = Some(minutes);
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.0.date = Some(date.to_string());
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.0.difficulty = Some(difficulty);
        self
    }

    pub fn featured(mut self) -> Self {
        self.0.featured = true;
        self
    }

    pub fn season(mut self, season: Season) -> Self {
        self.0.season = Some(season);
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.0.month = Some(month);
        self
    }

    pub fn image(mut self, src: &str) -> Self {
        self.0.image = Some(src.to_string());
        self
    }

    pub fn build(self) -> RecipeSummary {
        self.0
    }
}

// =========================================================================
// Lookups and extractors
// =========================================================================

/// Find a recipe by locale and slug. Panics if not found.
pub fn find_recipe<'a>(manifest: &'a Manifest, locale: Locale, slug: &str) -> &'a RecipeRecord {
    manifest.find(locale, slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = manifest
            .collection(locale)
            .iter()
            .map(|r| r.slug.as_str())
            .collect();
        panic!("recipe '{slug}' not found in locale {locale}. Available: {slugs:?}")
    })
}

/// Titles in result order.
pub fn titles<'a>(items: &[&'a RecipeSummary]) -> Vec<&'a str> {
    items.iter().map(|i| i.title.as_str()).collect()
}

/// Parse a record from TOML text and give it a slug, as the scanner would.
pub fn record(slug: &str, toml_str: &str) -> RecipeRecord {
    let mut record: RecipeRecord = toml::from_str(toml_str).unwrap();
    record.slug = slug.to_string();
    record
}
