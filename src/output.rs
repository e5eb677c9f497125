//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every recipe leads
//! with its positional index and localized title. Source paths, metadata and
//! checklist ids follow as indented context lines, so the output reads as a
//! content inventory while still pointing back at files and item ids.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Recipes
//! en (5 recipes)
//!     001 Lentil soup
//!         Source: en/mains/lentil-soup.toml
//!         Medium · Dinner, Vegan
//!
//! Config
//!     config.toml
//!     Locales: en (default), fr
//! ```
//!
//! ## List
//!
//! ```text
//! 2 recipes · Newest
//! 001 Lentil soup
//!     Medium · Dinner, Vegan
//! 002 Pasta al limone
//!     20 min · Easy · Dinner, Vegetarian
//!
//! Tags: Dinner, Medium, [Vegan], Vegetarian
//! ```
//!
//! ## Show
//!
//! ```text
//! Pasta al limone
//!     Source: en/pasta-al-limone.toml
//! Sections: [Ingredients] Steps
//! Fragment: #ingredients (replace)
//! Languages:
//!     [English] /pasta-al-limone#ingredients
//!     Français /fr/pates-au-citron#ingredients
//!
//! Ingredients
//!     [ ] 200 g spaghetti (0:0)
//!     To serve
//!     [x] Parmesan (1:0)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::checklist;
use crate::collection::HomeSelection;
use crate::filter::FilterState;
use crate::i18n::{Locale, Params, Translator};
use crate::render::RecipeDetail;
use crate::scan::Manifest;
use crate::sections::{FragmentUpdate, Section};
use crate::theme::{Theme, ThemeSource};
use crate::types::RecipeSummary;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    }
}

/// `20 min · Easy · Dinner, Vegan`, skipping whatever is unknown.
fn meta_line(summary: &RecipeSummary, t: &Translator) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(minutes) = summary.total {
        parts.push(t.t_with("time.total", &Params::new().set("minutes", minutes)));
    }
    if let Some(d) = summary.difficulty {
        parts.push(t.t(&format!("difficulty.{}", d.as_str())));
    }
    if !summary.tags.is_empty() {
        let labels: Vec<String> = summary
            .tags
            .iter()
            .map(|tag| t.tag_label_or_slug(tag))
            .collect();
        parts.push(labels.join(", "));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}

/// Header line plus indented metadata for one summary.
fn summary_lines(index: usize, summary: &RecipeSummary, t: &Translator, depth: usize) -> Vec<String> {
    let base = indent(depth);
    let mut lines = vec![format!("{}{} {}", base, format_index(index), summary.title)];
    if let Some(meta) = meta_line(summary, t) {
        lines.push(format!("{}    {}", base, meta));
    }
    lines
}

// ============================================================================
// check
// ============================================================================

/// Format the content inventory found by a scan.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Recipes".to_string()];
    let counts = manifest.locale_counts();

    for locale in Locale::ALL {
        let enabled = manifest.config.locales.contains(&locale);
        let count = counts.get(&locale).copied().unwrap_or(0);
        if count == 0 && !enabled {
            continue;
        }
        let noun = if count == 1 { "recipe" } else { "recipes" };
        let marker = if enabled { "" } else { ", not enabled" };
        lines.push(format!("{} ({} {}{})", locale.code(), count, noun, marker));

        let t = manifest.config.translator(locale);
        for (i, record) in manifest.collection(locale).into_iter().enumerate() {
            let summary = crate::recipe::summarize(record);
            let mut entry = summary_lines(i + 1, &summary, &t, 1);
            entry.insert(1, format!("        Source: {}", record.source_path));
            if let Some(desc) = record.summary.as_deref().or(record.description.as_deref()) {
                let truncated = truncate_desc(desc.trim(), 60);
                if !truncated.is_empty() {
                    entry.push(format!("        {}", truncated));
                }
            }
            lines.extend(entry);
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    }
    let locales: Vec<String> = manifest
        .config
        .locales
        .iter()
        .map(|l| {
            if *l == manifest.config.default_locale {
                format!("{} (default)", l.code())
            } else {
                l.code().to_string()
            }
        })
        .collect();
    lines.push(format!("    Locales: {}", locales.join(", ")));

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// list
// ============================================================================

/// Format a filtered listing in result order, followed by the tags the
/// filter can pick from (`tags`, as returned by [`crate::filter::all_tags`]).
pub fn format_recipe_list(
    items: &[&RecipeSummary],
    tags: &[String],
    state: &FilterState,
    t: &Translator,
) -> Vec<String> {
    let mut lines = Vec::new();
    if items.is_empty() {
        lines.push(t.t("search.no_results"));
        if state.has_active_filters() {
            lines.push(format!("    {}", t.t("search.reset_filters")));
        }
    } else {
        lines.push(format!(
            "{} · {}",
            t.t_with("search.results", &Params::new().count(items.len())),
            t.t(state.sort.label_key())
        ));
        for (i, item) in items.iter().enumerate() {
            lines.extend(summary_lines(i + 1, item, t, 0));
        }
    }

    lines.push(String::new());
    lines.push(format_tag_line(tags, state, t));
    lines
}

/// `Tags: Dinner, [Vegan]` with active tags bracketed.
fn format_tag_line(tags: &[String], state: &FilterState, t: &Translator) -> String {
    if tags.is_empty() {
        return format!("{}: {}", t.t("search.tags"), t.t("search.no_tags_yet"));
    }
    let labels: Vec<String> = tags
        .iter()
        .map(|tag| {
            let label = t.tag_label_or_slug(tag);
            if state.active_tags.contains(tag) { format!("[{label}]") } else { label }
        })
        .collect();
    format!("{}: {}", t.t("search.tags"), labels.join(", "))
}

pub fn print_recipe_list(
    items: &[&RecipeSummary],
    tags: &[String],
    state: &FilterState,
    t: &Translator,
) {
    for line in format_recipe_list(items, tags, state, t) {
        println!("{}", line);
    }
}

// ============================================================================
// show
// ============================================================================

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

/// Format the detail view: section tabs, fragment action and active pane.
pub fn format_recipe_detail(detail: &RecipeDetail<'_>, t: &Translator) -> Vec<String> {
    let record = detail.record;
    let mut lines = vec![
        record.display_title().to_string(),
        format!("    Source: {}", record.source_path),
    ];
    if let Some(meta) = meta_line(&crate::recipe::summarize(record), t) {
        lines.push(format!("    {}", meta));
    }

    let active = detail.sections.active();
    let tabs: Vec<String> = detail
        .sections
        .available()
        .iter()
        .map(|s| {
            let label = t.t(s.label_key());
            if *s == active { format!("[{label}]") } else { label }
        })
        .collect();
    lines.push(format!("Sections: {}", tabs.join(" ")));
    match detail.fragment {
        FragmentUpdate::Replace(fragment) => lines.push(format!("Fragment: {fragment} (replace)")),
        FragmentUpdate::Unchanged => {
            lines.push(format!("Fragment: #{}", detail.sections.fragment()))
        }
    }
    if detail.languages.len() > 1 {
        lines.push("Languages:".to_string());
        for link in detail.languages {
            let label = if link.current {
                format!("[{}]", link.label)
            } else {
                link.label.to_string()
            };
            lines.push(format!("    {} {}", label, link.href));
        }
    }

    lines.push(String::new());
    lines.push(t.t(active.label_key()));
    lines.extend(section_body(detail, active, t));
    lines
}

fn section_body(detail: &RecipeDetail<'_>, section: Section, t: &Translator) -> Vec<String> {
    let record = detail.record;
    let mut lines = Vec::new();
    match section {
        Section::Ingredients => {
            if record.ingredient_groups.is_empty() {
                lines.push(format!("    {}", t.t("sections.missing_ingredients")));
            }
            for (g, group) in record.ingredient_groups.iter().enumerate() {
                if let Some(title) = group.title.as_deref() {
                    lines.push(format!("    {}", title));
                }
                for (i, text) in group.ingredients.iter().enumerate() {
                    let id = checklist::ingredient_item_id(&record.checklist_key(), g, i);
                    let checked = detail.ingredients.get(&id).copied().unwrap_or(false);
                    lines.push(format!("    {} {} ({g}:{i})", checkbox(checked), text));
                }
            }
        }
        Section::Steps => {
            if record.steps.is_empty() {
                lines.push(format!("    {}", t.t("sections.missing_steps")));
            }
            for (i, step) in record.steps.iter().enumerate() {
                let id = checklist::step_item_id(i);
                let checked = detail.steps.get(&id).copied().unwrap_or(false);
                lines.push(format!("    {} {}. {} ({i})", checkbox(checked), i + 1, step));
            }
        }
        Section::Notes => {
            for note in record.notes.iter().filter(|n| !n.trim().is_empty()) {
                lines.push(format!("    {}", note));
            }
        }
        Section::NutritionalValues => {
            lines.push(format!("    {}", t.t("nutrition.per_serving")));
            if let Some(nutrition) = record.nutrition.as_ref() {
                for row in nutrition.rows() {
                    lines.push(format!(
                        "    {}: {}{}",
                        t.t(row.label_key),
                        row.value,
                        row.unit
                    ));
                }
            }
        }
    }
    lines
}

pub fn print_recipe_detail(detail: &RecipeDetail<'_>, t: &Translator) {
    for line in format_recipe_detail(detail, t) {
        println!("{}", line);
    }
}

// ============================================================================
// tick / reset
// ============================================================================

/// One-line confirmation of a checklist change.
pub fn format_checklist_change(namespace: Option<&str>, item_id: &str, checked: bool) -> String {
    let verb = if checked { "Checked" } else { "Unchecked" };
    match namespace {
        Some(ns) => format!("{verb} {item_id} in {ns}"),
        None => format!("{verb} {item_id} (not saved)"),
    }
}

pub fn format_checklist_reset(namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) => format!("Reset {ns}"),
        None => "Nothing to reset".to_string(),
    }
}

/// `Theme: dark (saved)`.
pub fn format_theme(theme: Theme, source: ThemeSource) -> String {
    format!("Theme: {} ({})", theme, source.as_str())
}

// ============================================================================
// home
// ============================================================================

/// Format the home page rows.
pub fn format_home(home: &HomeSelection<'_>, t: &Translator) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(featured) = home.featured {
        lines.push(t.t("home.featured"));
        lines.push(format!("    {}", featured.title));
        if let Some(summary) = featured.summary.as_deref() {
            lines.push(format!("        {}", truncate_desc(summary.trim(), 60)));
        }
        lines.push(String::new());
    }

    lines.push(t.t("home.latest"));
    for (i, item) in home.latest.iter().enumerate() {
        lines.extend(summary_lines(i + 1, item, t, 1));
    }

    lines.push(String::new());
    lines.push(format!("{} ({})", t.t("home.seasonal"), home.season.as_str()));
    for (i, item) in home.seasonal.iter().enumerate() {
        lines.extend(summary_lines(i + 1, item, t, 1));
    }

    if !home.quick_tags.is_empty() {
        lines.push(String::new());
        lines.push(t.t("home.quick_tags"));
        let labels: Vec<String> = home
            .quick_tags
            .iter()
            .map(|tag| t.tag_label_or_slug(tag))
            .collect();
        lines.push(format!("    {}", labels.join(", ")));
    }

    if !home.popular_tags.is_empty() {
        lines.push(String::new());
        lines.push(t.t("home.popular_tags"));
        let cloud: Vec<String> = home
            .popular_tags
            .iter()
            .map(|c| format!("{} ({})", t.tag_label_or_slug(&c.tag), c.count))
            .collect();
        lines.push(format!("    {}", cloud.join(", ")));
    }

    lines
}

pub fn print_home(home: &HomeSelection<'_>, t: &Translator) {
    for line in format_home(home, t) {
        println!("{}", line);
    }
}
