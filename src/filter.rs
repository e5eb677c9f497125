//! Recipe search, filter and sort engine.
//!
//! [`filter_and_sort`] is a pure function of its inputs: a slice of
//! summaries, a [`FilterState`] and a tag-label lookup. It never mutates the
//! summaries and returns borrowed references in display order.
//!
//! ## Matching
//!
//! An item survives when all three predicates hold:
//!
//! - **Query**: the trimmed query is empty, or the folded title contains the
//!   folded query, or one of the item's folded tag labels does.
//! - **Tags**: no tag is active, or the item carries at least one active tag
//!   (OR across tags).
//! - **Difficulty**: no difficulty is active, or the item has a difficulty and
//!   it is active. Items without a difficulty never match an active filter.
//!
//! ## Ordering
//!
//! A stable sort, so ties keep their input order:
//!
//! | Key | Order | Missing value |
//! |-----|-------|---------------|
//! | `newest` | date descending | epoch 0 (oldest) |
//! | `oldest` | date ascending | epoch 0 (oldest) |
//! | `fastest` | total ascending | last |
//! | `longest` | total descending | last |
//!
//! A missing total sorts last in both directions: an unknown duration is
//! never ranked as the longest.

use crate::fold::fold;
use crate::types::{Difficulty, ParseError, RecipeSummary};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Fastest,
    Longest,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::Fastest,
        SortKey::Longest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Fastest => "fastest",
            SortKey::Longest => "longest",
        }
    }

    /// Translation key of the sort option label.
    pub fn label_key(self) -> &'static str {
        match self {
            SortKey::Newest => "search.sort_newest",
            SortKey::Oldest => "search.sort_oldest",
            SortKey::Fastest => "search.fastest",
            SortKey::Longest => "search.longest",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseError::new("sort key", s, "newest, oldest, fastest, longest"))
    }
}

/// Ephemeral listing controls owned by the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub active_tags: BTreeSet<String>,
    pub active_difficulties: BTreeSet<Difficulty>,
    pub sort: SortKey,
}

impl FilterState {
    /// Add the tag if absent, remove it if present.
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.active_tags.remove(tag) {
            self.active_tags.insert(tag.to_string());
        }
    }

    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) {
        if !self.active_difficulties.remove(&difficulty) {
            self.active_difficulties.insert(difficulty);
        }
    }

    /// Back to an empty query, no filters, newest first.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any narrowing control is set (the sort key does not count).
    pub fn has_active_filters(&self) -> bool {
        !self.query.is_empty()
            || !self.active_tags.is_empty()
            || !self.active_difficulties.is_empty()
    }
}

/// Filter `items` by `state` and order them by `state.sort`.
///
/// `translate_tag` maps a tag slug to its display label and is only used for
/// query matching.
pub fn filter_and_sort<'a, F>(
    items: &'a [RecipeSummary],
    state: &FilterState,
    translate_tag: F,
) -> Vec<&'a RecipeSummary>
where
    F: Fn(&str) -> String,
{
    let query = fold(state.query.trim());

    let mut matched: Vec<&RecipeSummary> = items
        .iter()
        .filter(|item| matches_query(item, &query, &translate_tag))
        .filter(|item| matches_tags(item, &state.active_tags))
        .filter(|item| matches_difficulty(item, &state.active_difficulties))
        .collect();

    sort_items(&mut matched, state.sort);
    matched
}

fn matches_query<F>(item: &RecipeSummary, folded_query: &str, translate_tag: &F) -> bool
where
    F: Fn(&str) -> String,
{
    folded_query.is_empty()
        || fold(&item.title).contains(folded_query)
        || item
            .tags
            .iter()
            .any(|tag| fold(&translate_tag(tag)).contains(folded_query))
}

fn matches_tags(item: &RecipeSummary, active: &BTreeSet<String>) -> bool {
    active.is_empty() || item.tags.iter().any(|tag| active.contains(tag))
}

fn matches_difficulty(item: &RecipeSummary, active: &BTreeSet<Difficulty>) -> bool {
    active.is_empty() || item.difficulty.is_some_and(|d| active.contains(&d))
}

/// Stable sort in place. Date keys are computed once per item.
pub fn sort_items(items: &mut Vec<&RecipeSummary>, sort: SortKey) {
    match sort {
        SortKey::Newest | SortKey::Oldest => {
            let mut keyed: Vec<(i64, &RecipeSummary)> =
                items.iter().map(|i| (i.timestamp_millis(), *i)).collect();
            if sort == SortKey::Newest {
                keyed.sort_by(|a, b| b.0.cmp(&a.0));
            } else {
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
            }
            *items = keyed.into_iter().map(|(_, i)| i).collect();
        }
        SortKey::Fastest => items.sort_by(|a, b| known_first(a.total, b.total, |x, y| x.cmp(&y))),
        SortKey::Longest => items.sort_by(|a, b| known_first(a.total, b.total, |x, y| y.cmp(&x))),
    }
}

/// Compare known values with `cmp`; unknown values go after every known one.
fn known_first(a: Option<u32>, b: Option<u32>, cmp: impl Fn(u32, u32) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Every distinct tag across `items`, ordered by folded display label.
pub fn all_tags<F>(items: &[RecipeSummary], translate_tag: F) -> Vec<String>
where
    F: Fn(&str) -> String,
{
    let distinct: BTreeSet<&str> = items
        .iter()
        .flat_map(|i| i.tags.iter().map(String::as_str))
        .collect();
    let mut tags: Vec<(String, &str)> = distinct
        .into_iter()
        .map(|tag| (fold(&translate_tag(tag)), tag))
        .collect();
    tags.sort();
    tags.into_iter().map(|(_, tag)| tag.to_string()).collect()
}
