//! Light/dark theme preference.
//!
//! The reader's explicit choice lives under [`THEME_KEY`] in the same
//! key-value store as the checklists. Resolution order: a saved `light` or
//! `dark`, then the system's dark-mode preference, then light. Any other
//! stored value counts as no choice.

use crate::store::KeyValueStore;
use crate::types::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store key of the saved preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseError::new("theme", other, "light, dark")),
        }
    }
}

/// Where a resolved theme came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    Saved,
    System,
    Default,
}

impl ThemeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeSource::Saved => "saved",
            ThemeSource::System => "system",
            ThemeSource::Default => "default",
        }
    }
}

/// The saved preference, if it is exactly `light` or `dark`.
pub fn stored_theme<S: KeyValueStore + ?Sized>(store: &S) -> Option<Theme> {
    store.get(THEME_KEY).and_then(|raw| raw.parse().ok())
}

pub fn resolve_theme<S: KeyValueStore + ?Sized>(
    store: &S,
    prefers_dark: bool,
) -> (Theme, ThemeSource) {
    match stored_theme(store) {
        Some(theme) => (theme, ThemeSource::Saved),
        None if prefers_dark => (Theme::Dark, ThemeSource::System),
        None => (Theme::Light, ThemeSource::Default),
    }
}

/// Save the reader's choice. Failures are logged; the choice still applies
/// to the current run.
pub fn save_theme<S: KeyValueStore + ?Sized>(store: &mut S, theme: Theme) {
    if let Err(e) = store.set(THEME_KEY, theme.as_str().to_string()) {
        tracing::warn!(error = %e, "could not save theme");
    }
}
