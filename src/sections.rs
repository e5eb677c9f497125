//! Active-section state for the recipe detail view, bound to the URL fragment.
//!
//! The detail view shows one section at a time. Which one is active is kept
//! in sync with the page's fragment identifier in both directions:
//!
//! - On load and on external fragment changes (back/forward, a shared link)
//!   the fragment decides, as long as it names an available section.
//! - On user selection the active section decides, and the fragment is
//!   rewritten in place (a history *replace*, never a push).
//!
//! [`SectionController::apply`] is the only state update. Every fragment the
//! controller asks the host to write arms an echo token, so the change event
//! the host may raise for that write is recognized and swallowed instead of
//! being handled as navigation.

use crate::recipe::RecipeRecord;
use crate::types::ParseError;
use std::fmt;
use std::str::FromStr;

/// A tab of the recipe detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Ingredients,
    Steps,
    Notes,
    NutritionalValues,
}

impl Section {
    /// Fixed display order. Also the fallback order for the initial section.
    pub const ORDER: [Section; 4] = [
        Section::Ingredients,
        Section::Steps,
        Section::Notes,
        Section::NutritionalValues,
    ];

    /// Fragment identifier for this section.
    pub fn id(self) -> &'static str {
        match self {
            Section::Ingredients => "ingredients",
            Section::Steps => "steps",
            Section::Notes => "notes",
            Section::NutritionalValues => "nutritional-values",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Section::ORDER.into_iter().find(|s| s.id() == id)
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Section::Ingredients => "sections.ingredients",
            Section::Steps => "sections.steps",
            Section::Notes => "sections.notes",
            Section::NutritionalValues => "sections.nutritional-values",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::from_id(parse_fragment(s)).ok_or_else(|| {
            ParseError::new("section", s, "ingredients, steps, notes, nutritional-values")
        })
    }
}

/// Sections a recipe can show, in display order.
///
/// Ingredients and steps are always present (they render an empty-state
/// message when the recipe has none). Notes need at least one non-blank note,
/// nutritional values at least one numeric nutrient.
pub fn available_sections(record: &RecipeRecord) -> Vec<Section> {
    Section::ORDER
        .into_iter()
        .filter(|section| match section {
            Section::Ingredients | Section::Steps => true,
            Section::Notes => record.has_notes(),
            Section::NutritionalValues => record.has_nutrition(),
        })
        .collect()
}

/// Strip a single leading `#` from a raw fragment.
pub fn parse_fragment(raw: &str) -> &str {
    raw.strip_prefix('#').unwrap_or(raw)
}

/// Input to [`SectionController::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEvent<'a> {
    /// The reader picked a tab.
    Select(Section),
    /// The host reports the fragment is now `raw` (with or without `#`).
    FragmentChanged(&'a str),
}

/// What the host must do with the URL fragment after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentUpdate {
    Unchanged,
    /// Replace the current history entry's fragment with this value (`#id`).
    Replace(String),
}

/// Result of one state update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub active: Section,
    /// Whether the active section differs from before the event.
    pub changed: bool,
    pub fragment: FragmentUpdate,
}

/// Two-way binding between the active section and the URL fragment.
#[derive(Debug, Clone)]
pub struct SectionController {
    available: Vec<Section>,
    active: Section,
    /// Last known fragment, without `#`.
    fragment: String,
    /// Fragment we asked the host to write and have not seen echoed back yet.
    pending_echo: Option<String>,
}

impl SectionController {
    /// Start from the fragment present at load time.
    ///
    /// The fragment wins when it names an available section, otherwise the
    /// first available section is active. Call [`sync_fragment`] once to
    /// learn whether the fragment needs rewriting to match.
    ///
    /// [`sync_fragment`]: SectionController::sync_fragment
    pub fn new(available: Vec<Section>, fragment: &str) -> Self {
        let fragment = parse_fragment(fragment);
        let active = Section::from_id(fragment)
            .filter(|s| available.contains(s))
            .or_else(|| available.first().copied())
            .unwrap_or(Section::Ingredients);
        Self {
            available,
            active,
            fragment: fragment.to_string(),
            pending_echo: None,
        }
    }

    pub fn for_recipe(record: &RecipeRecord, fragment: &str) -> Self {
        Self::new(available_sections(record), fragment)
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn available(&self) -> &[Section] {
        &self.available
    }

    pub fn is_available(&self, section: Section) -> bool {
        self.available.contains(&section)
    }

    /// Current fragment as the controller understands it, without `#`.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Bring the fragment in line with the active section.
    pub fn sync_fragment(&mut self) -> FragmentUpdate {
        if self.fragment == self.active.id() {
            FragmentUpdate::Unchanged
        } else {
            self.write_fragment()
        }
    }

    /// The single state update function.
    pub fn apply(&mut self, event: SectionEvent<'_>) -> Transition {
        match event {
            SectionEvent::Select(section) => self.select(section),
            SectionEvent::FragmentChanged(raw) => self.on_fragment_change(raw),
        }
    }

    fn select(&mut self, section: Section) -> Transition {
        if !self.is_available(section) {
            return self.unchanged();
        }
        let changed = section != self.active;
        self.active = section;
        let fragment = self.sync_fragment();
        Transition {
            active: self.active,
            changed,
            fragment,
        }
    }

    fn on_fragment_change(&mut self, raw: &str) -> Transition {
        let fragment = parse_fragment(raw);
        if self.pending_echo.as_deref() == Some(fragment) {
            self.pending_echo = None;
            return self.unchanged();
        }
        self.pending_echo = None;
        self.fragment = fragment.to_string();

        match Section::from_id(fragment).filter(|s| self.is_available(*s)) {
            Some(section) => {
                let changed = section != self.active;
                self.active = section;
                Transition {
                    active: section,
                    changed,
                    fragment: FragmentUpdate::Unchanged,
                }
            }
            None => self.unchanged(),
        }
    }

    fn write_fragment(&mut self) -> FragmentUpdate {
        let id = self.active.id();
        self.fragment = id.to_string();
        self.pending_echo = Some(id.to_string());
        FragmentUpdate::Replace(format!("#{id}"))
    }

    fn unchanged(&self) -> Transition {
        Transition {
            active: self.active,
            changed: false,
            fragment: FragmentUpdate::Unchanged,
        }
    }
}
