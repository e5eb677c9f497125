//! Per-recipe checklist progress.
//!
//! Each recipe owns two independent namespaces in the local store, one for
//! ingredient items and one for steps. Both are keyed by the recipe's
//! locale-qualified key (`<locale>/<slug>`, see
//! [`crate::recipe::RecipeRecord::checklist_key`]):
//!
//! ```text
//! ing:en/pasta    {"en/pasta:<group>:<item>": true, ...}
//! steps:en/pasta  {"0": true, "3": false, ...}
//! ```
//!
//! A namespace is stored as one serialized JSON object. Every toggle writes
//! the whole updated mapping back; loading parses the blob once. A missing or
//! malformed blob reads as an empty mapping, and failed writes are logged and
//! otherwise ignored, so nothing here returns an error.

use crate::store::KeyValueStore;
use crate::types::ParseError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Item id → checked.
pub type ChecklistState = BTreeMap<String, bool>;

/// Which of a recipe's two checklists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecklistKind {
    Ingredients,
    Steps,
}

impl ChecklistKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChecklistKind::Ingredients => "ingredients",
            ChecklistKind::Steps => "steps",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            ChecklistKind::Ingredients => "ing",
            ChecklistKind::Steps => "steps",
        }
    }
}

impl fmt::Display for ChecklistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecklistKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ingredients" => Ok(ChecklistKind::Ingredients),
            "steps" => Ok(ChecklistKind::Steps),
            other => Err(ParseError::new("checklist", other, "ingredients, steps")),
        }
    }
}

/// Store key for a recipe's checklist. `None` for an empty recipe key: such
/// a checklist lives in memory only.
pub fn namespace(kind: ChecklistKind, recipe_key: &str) -> Option<String> {
    if recipe_key.is_empty() {
        None
    } else {
        Some(format!("{}:{}", kind.prefix(), recipe_key))
    }
}

/// Id of ingredient `item` in ingredient group `group`.
pub fn ingredient_item_id(recipe_key: &str, group: usize, item: usize) -> String {
    let recipe_key = if recipe_key.is_empty() { "recipe" } else { recipe_key };
    format!("{recipe_key}:{group}:{item}")
}

pub fn step_item_id(index: usize) -> String {
    index.to_string()
}

/// Read a namespace. Missing and malformed blobs are both empty.
pub fn load_all<S>(store: &S, namespace: &str) -> ChecklistState
where
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(namespace) else {
        return ChecklistState::new();
    };
    match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(e) => {
            tracing::debug!(namespace, error = %e, "ignoring malformed checklist");
            ChecklistState::new()
        }
    }
}

/// One recipe checklist bound to a store.
pub struct Checklist<'s, S: KeyValueStore + ?Sized> {
    store: &'s mut S,
    namespace: Option<String>,
    state: ChecklistState,
}

impl<'s, S: KeyValueStore + ?Sized> Checklist<'s, S> {
    pub fn open(store: &'s mut S, kind: ChecklistKind, recipe_key: &str) -> Self {
        let namespace = namespace(kind, recipe_key);
        let state = namespace
            .as_deref()
            .map(|ns| load_all(&*store, ns))
            .unwrap_or_default();
        Self {
            store,
            namespace,
            state,
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn state(&self) -> &ChecklistState {
        &self.state
    }

    pub fn is_checked(&self, item_id: &str) -> bool {
        self.state.get(item_id).copied().unwrap_or(false)
    }

    /// Set one item and write the full mapping back.
    pub fn toggle(&mut self, item_id: &str, checked: bool) {
        self.state.insert(item_id.to_string(), checked);
        self.persist();
    }

    /// Clear every item in this namespace.
    pub fn reset(&mut self) {
        self.state.clear();
        self.persist();
    }

    fn persist(&mut self) {
        let Some(ns) = self.namespace.as_deref() else {
            return;
        };
        let blob = match serde_json::to_string(&self.state) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(namespace = ns, error = %e, "could not serialize checklist");
                return;
            }
        };
        if let Err(e) = self.store.set(ns, blob) {
            tracing::warn!(namespace = ns, error = %e, "could not save checklist");
        }
    }
}
