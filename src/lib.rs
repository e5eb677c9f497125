//! # Simple Recipes
//!
//! A multilingual recipe collection driven by plain files. Each recipe is a
//! TOML record under a locale directory; the crate turns those records into a
//! searchable, sortable listing, a tabbed detail view bound to the URL
//! fragment, and per-recipe checklists that survive restarts.
//!
//! # Architecture: Scan, Then Pure Functions
//!
//! ```text
//! content/  →  scan  →  Manifest { recipes, config }
//!                          │
//!                          ├─ summarize → filter_and_sort → grid / list
//!                          ├─ SectionController  (tab ⇄ #fragment)
//!                          └─ Checklist<KeyValueStore>  (ing:<locale>/<slug>, steps:<locale>/<slug>)
//! ```
//!
//! Scanning is the only stage that touches the content directory. Everything
//! downstream receives borrowed records or summaries and returns values, so
//! the filter engine, the home selections and the section controller are
//! tested without a filesystem. The checklists reach storage only through the
//! [`store::KeyValueStore`] trait.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the content directory, parses records, resolves locales, produces the [`scan::Manifest`] |
//! | [`recipe`] | Full content record schema and its projection to a summary |
//! | [`types`] | Shared closed sets (`Difficulty`, `Season`) and the flat `RecipeSummary` |
//! | [`dates`] | Date string → comparable timestamp, missing or invalid as oldest |
//! | [`fold`] | Case and accent folding for search |
//! | [`filter`] | Query, tag and difficulty filtering plus stable sorting |
//! | [`collection`] | Home page selections: featured, latest, seasonal, tag cloud |
//! | [`sections`] | Active tab controller with two-way fragment binding |
//! | [`checklist`] | Per-recipe checked-item sets persisted under namespaced keys |
//! | [`store`] | Key-value storage seam with in-memory and JSON file backends |
//! | [`theme`] | Saved light/dark preference with a system fallback |
//! | [`i18n`] | Locales, UI strings, tag labels and `{count}` pluralization |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`render`] | Maud HTML for the card grid, tag filter, section tabs and language menu |
//! | [`output`] | CLI output formatting for every command |
//! | [`logging`] | `tracing` subscriber setup for the binary |
//!
//! # Design Decisions
//!
//! ## Widget State Is a Value
//!
//! The listing's filters are a plain [`filter::FilterState`]; every change
//! produces a fresh result from [`filter::filter_and_sort`]. There are no
//! callbacks and no cached result to invalidate. The same holds for tabs:
//! [`sections::SectionController::apply`] takes an event and returns the new
//! active section together with what the host should do with the fragment.
//!
//! ## Fragment Echo Suppression
//!
//! When the controller asks the host to rewrite the fragment, it remembers
//! the value it wrote. A change notification carrying exactly that value is
//! swallowed, so a select never bounces back as an external navigation. Any
//! other fragment change clears the token and is handled normally.
//!
//! ## Storage Failures Never Reach the Reader
//!
//! A checklist that cannot be written keeps working in memory and logs a
//! warning. A blob that cannot be parsed reads as empty. Recipes stay usable
//! on read-only disks and after hand-edited state files.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a build error and every interpolation is escaped.

pub mod checklist;
pub mod collection;
pub mod config;
pub mod dates;
pub mod filter;
pub mod fold;
pub mod i18n;
pub mod logging;
pub mod output;
pub mod recipe;
pub mod render;
pub mod scan;
pub mod sections;
pub mod store;
pub mod theme;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
