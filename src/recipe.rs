//! Recipe content records.
//!
//! A [`RecipeRecord`] is one recipe file as authored: a TOML document whose
//! file stem is the recipe slug. Only structural validation happens here
//! (types, field names). Everything downstream of the scan works on the
//! derived [`RecipeSummary`] or borrows the record read-only.
//!
//! ```toml
//! title = "Pasta al limone"
//! date = 2024-01-01
//! difficulty = "easy"
//! tags = ["dinner", "vegetarian"]
//! steps = ["Boil the pasta.", "Toss with lemon."]
//!
//! [time]
//! total = 20
//!
//! [[ingredient_groups]]
//! ingredients = ["200 g spaghetti", "1 lemon"]
//! ```

use crate::i18n::Locale;
use crate::types::{Difficulty, RecipeSummary, Season};
use serde::{Deserialize, Deserializer};

/// One recipe content record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecipeRecord {
    /// File stem of the source file. Set by the scanner.
    #[serde(skip)]
    pub slug: String,
    /// Source path relative to the content root. Set by the scanner.
    #[serde(skip)]
    pub source_path: String,
    /// Resolved locale of this record. Set by the scanner.
    #[serde(skip)]
    pub locale: Locale,

    pub title: Option<String>,
    #[serde(deserialize_with = "date_text")]
    pub date: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub lang: Option<Locale>,
    #[serde(rename = "yield", deserialize_with = "servings")]
    pub servings: Option<u32>,
    /// Raw difficulty; anything other than `easy|medium|hard` means none.
    pub difficulty: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub season: Option<String>,
    #[serde(deserialize_with = "month")]
    pub month: Option<u32>,
    pub translation_key: Option<String>,
    pub time: Option<Timing>,
    pub images: Vec<ImageRef>,
    pub ingredient_groups: Vec<IngredientGroup>,
    pub steps: Vec<String>,
    pub notes: Vec<String>,
    pub nutrition: Option<Nutrition>,
}

/// Time estimates in minutes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Timing {
    pub prep: Option<u32>,
    pub cook: Option<u32>,
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageRef {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A titled (or untitled) block of ingredients, e.g. "For the dough".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngredientGroup {
    pub title: Option<String>,
    pub ingredients: Vec<String>,
}

/// Nutritional values per serving.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Nutrition {
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub sugar_g: Option<f64>,
    pub sodium_mg: Option<f64>,
}

/// A displayable nutrient row: translation key, value, unit suffix.
pub struct NutrientRow {
    pub label_key: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

impl Nutrition {
    /// Present, non-NaN nutrients in display order.
    pub fn rows(&self) -> Vec<NutrientRow> {
        [
            ("nutrition.calories", self.calories, ""),
            ("nutrition.protein", self.protein_g, " g"),
            ("nutrition.carbs", self.carbs_g, " g"),
            ("nutrition.fat", self.fat_g, " g"),
            ("nutrition.fiber", self.fiber_g, " g"),
            ("nutrition.sugar", self.sugar_g, " g"),
            ("nutrition.sodium", self.sodium_mg, " mg"),
        ]
        .into_iter()
        .filter_map(|(label_key, value, unit)| {
            value.filter(|v| !v.is_nan()).map(|value| NutrientRow {
                label_key,
                value,
                unit,
            })
        })
        .collect()
    }

    pub fn has_values(&self) -> bool {
        !self.rows().is_empty()
    }
}

impl RecipeRecord {
    /// Display title, falling back to the slug.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.slug)
    }

    pub fn has_notes(&self) -> bool {
        self.notes.iter().any(|n| !n.trim().is_empty())
    }

    pub fn has_nutrition(&self) -> bool {
        self.nutrition.as_ref().is_some_and(Nutrition::has_values)
    }

    pub fn total_minutes(&self) -> Option<u32> {
        self.time.as_ref().and_then(|t| t.total)
    }

    /// Locale-qualified identity (`fr/tart`) used to key checklist storage.
    ///
    /// Slugs are only unique within a locale, so the bare slug would let
    /// `en/tart` and `fr/tart` share state. Empty when the slug is empty.
    pub fn checklist_key(&self) -> String {
        if self.slug.is_empty() {
            String::new()
        } else {
            format!("{}/{}", self.locale.code(), self.slug)
        }
    }
}

/// Project a content record into its listing summary.
pub fn summarize(record: &RecipeRecord) -> RecipeSummary {
    RecipeSummary {
        slug: record.slug.clone(),
        title: record.display_title().to_string(),
        tags: record.tags.clone(),
        total: record.total_minutes(),
        date: record.date.clone(),
        difficulty: record
            .difficulty
            .as_deref()
            .and_then(|d| d.parse::<Difficulty>().ok()),
        image: record.images.first().map(|i| i.src.clone()),
        summary: record.summary.clone(),
        featured: record.featured,
        season: record.season.as_deref().and_then(|s| s.parse::<Season>().ok()),
        month: record.month,
        lang: Some(record.locale),
    }
}

// =============================================================================
// Lenient field deserializers
// =============================================================================

/// Accept a TOML date/datetime or a string, keeping the textual form.
fn date_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<toml::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        toml::Value::String(s) => Some(s),
        toml::Value::Datetime(dt) => Some(dt.to_string()),
        _ => None,
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

/// `yield = 4` or `yield = "4-6"` (first run of digits wins).
fn servings<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => u32::try_from(n).ok(),
        Some(NumberOrText::Text(s)) => first_number(&s),
        None => None,
    })
}

/// `month = 3` or `month = "3"`.
fn month<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => u32::try_from(n).ok(),
        Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

fn first_number(s: &str) -> Option<u32> {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> RecipeRecord {
        let mut record: RecipeRecord = toml::from_str(toml_str).unwrap();
        record.slug = "test-recipe".to_string();
        record
    }

    #[test]
    fn toml_date_kept_as_text() {
        let r = parse("date = 2024-01-01");
        assert_eq!(r.date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn toml_offset_datetime_kept_as_rfc3339() {
        let r = parse("date = 2024-01-01T10:30:00Z");
        assert_eq!(r.date.as_deref(), Some("2024-01-01T10:30:00Z"));
    }

    #[test]
    fn string_date_accepted() {
        let r = parse(r#"date = "2024-06-01""#);
        assert_eq!(r.date.as_deref(), Some("2024-06-01"));
    }

    #[test]
    fn yield_accepts_number_or_range_text() {
        assert_eq!(parse("yield = 4").servings, Some(4));
        assert_eq!(parse(r#"yield = "4-6 people""#).servings, Some(4));
        assert_eq!(parse(r#"yield = "a few""#).servings, None);
    }

    #[test]
    fn month_accepts_number_or_numeric_text() {
        assert_eq!(parse("month = 3").month, Some(3));
        assert_eq!(parse(r#"month = " 11 ""#).month, Some(11));
        assert_eq!(parse(r#"month = "march""#).month, None);
    }

    #[test]
    fn unknown_field_rejected() {
        let result: Result<RecipeRecord, _> = toml::from_str("titel = \"Typo\"");
        assert!(result.is_err());
    }

    #[test]
    fn summarize_maps_fields() {
        let r = parse(
            r#"
title = "Pasta"
date = 2024-01-01
difficulty = "easy"
tags = ["dinner"]
featured = true
season = "Winter"

[time]
total = 20

[[images]]
src = "/img/pasta.jpg"

[[images]]
src = "/img/pasta-2.jpg"
"#,
        );
        let s = summarize(&r);
        assert_eq!(s.slug, "test-recipe");
        assert_eq!(s.title, "Pasta");
        assert_eq!(s.total, Some(20));
        assert_eq!(s.difficulty, Some(Difficulty::Easy));
        assert_eq!(s.image.as_deref(), Some("/img/pasta.jpg"));
        assert_eq!(s.season, Some(Season::Winter));
        assert!(s.featured);
    }

    #[test]
    fn summarize_falls_back_to_slug_title() {
        let s = summarize(&parse(""));
        assert_eq!(s.title, "test-recipe");
    }

    #[test]
    fn unknown_difficulty_becomes_none() {
        let s = summarize(&parse(r#"difficulty = "extreme""#));
        assert_eq!(s.difficulty, None);
    }

    #[test]
    fn notes_of_whitespace_do_not_count() {
        assert!(!parse(r#"notes = ["", "   "]"#).has_notes());
        assert!(parse(r#"notes = ["", "Keeps 3 days"]"#).has_notes());
    }

    #[test]
    fn nutrition_requires_a_real_number() {
        assert!(!parse("[nutrition]").has_nutrition());
        assert!(!parse("[nutrition]\ncalories = nan").has_nutrition());
        assert!(parse("[nutrition]\nprotein_g = 12").has_nutrition());
    }

    #[test]
    fn nutrition_rows_in_display_order() {
        let r = parse("[nutrition]\nsodium_mg = 300\ncalories = 450\nfat_g = 10.5");
        let keys: Vec<&str> = r
            .nutrition
            .as_ref()
            .unwrap()
            .rows()
            .iter()
            .map(|row| row.label_key)
            .collect();
        assert_eq!(
            keys,
            vec!["nutrition.calories", "nutrition.fat", "nutrition.sodium"]
        );
    }
}
