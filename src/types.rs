//! Shared types used across the listing, filtering and rendering layers.
//!
//! [`RecipeSummary`] is the flat, read-only projection of a recipe content
//! record. It is produced once per record by [`crate::recipe::summarize`] and
//! never mutated afterwards: the filter engine, the home-page selections and
//! the renderers all borrow it.

use crate::i18n::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a closed-set identifier (difficulty, sort key, section,
/// locale, season) does not name a known value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// How demanding a recipe is.
///
/// Ordered `Easy < Medium < Hard` so sets of difficulties iterate in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ParseError::new("difficulty", other, "easy, medium, hard")),
        }
    }
}

/// Meteorological season used for seasonal picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

impl FromStr for Season {
    type Err = ParseError;

    /// Case-insensitive: content authors write `Winter` as often as `winter`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" => Ok(Season::Autumn),
            _ => Err(ParseError::new(
                "season",
                s,
                "winter, spring, summer, autumn",
            )),
        }
    }
}

/// Flattened projection of a recipe content record used for listing and
/// filtering.
///
/// `slug` is unique within one locale's collection. `total` is minutes;
/// `None` means unknown and is never treated as zero. `date` keeps the raw
/// textual form; comparisons go through [`RecipeSummary::timestamp_millis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<Locale>,
}

impl RecipeSummary {
    /// Minimal summary with only the required fields set.
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            tags: Vec::new(),
            total: None,
            date: None,
            difficulty: None,
            image: None,
            summary: None,
            featured: false,
            season: None,
            month: None,
            lang: None,
        }
    }

    /// Normalized date in milliseconds since the Unix epoch (`0` when missing
    /// or unparsable, which sorts the recipe as the oldest).
    pub fn timestamp_millis(&self) -> i64 {
        crate::dates::to_timestamp_millis(self.date.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_lowercase_ids() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
    }

    #[test]
    fn difficulty_rejects_unknown_id() {
        let err = "extreme".parse::<Difficulty>().unwrap_err();
        assert!(err.to_string().contains("unknown difficulty 'extreme'"));
    }

    #[test]
    fn difficulty_orders_easy_first() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Hard);
    }

    #[test]
    fn season_parse_is_case_insensitive() {
        assert_eq!("Winter".parse::<Season>(), Ok(Season::Winter));
        assert_eq!("AUTUMN".parse::<Season>(), Ok(Season::Autumn));
        assert!("fall".parse::<Season>().is_err());
    }

    #[test]
    fn summary_without_date_is_epoch() {
        let s = RecipeSummary::new("pasta", "Pasta");
        assert_eq!(s.timestamp_millis(), 0);
    }

    #[test]
    fn summary_json_omits_missing_optionals() {
        let s = RecipeSummary::new("pasta", "Pasta");
        let json = serde_json::to_string(&s).unwrap();
        assert!(!json.contains("total"));
        assert!(!json.contains("difficulty"));
        assert!(json.contains(r#""slug":"pasta""#));
    }
}
