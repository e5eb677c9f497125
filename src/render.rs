//! HTML rendering for the listing grid and the recipe detail tabs.
//!
//! This is a thin consumer of the filter engine, the section controller and
//! the checklists: it receives their computed values and turns them into
//! markup with [Maud](https://maud.lambda.xyz/). All interpolation is escaped.
//!
//! ## Grid
//!
//! One card per summary, in the order given. A card links to
//! `<locale prefix>/<slug>` and shows the first image, up to three tag
//! labels, the total time and the difficulty. An empty list renders a single
//! "no results" card.
//!
//! ## Sections
//!
//! A tab list with one `a[href="#<id>"]` per available section (the active
//! one carries `aria-selected="true"`), followed by one pane per section.
//! Only the active pane is visible; the others carry `hidden`. When the
//! recipe exists in more than one locale a language menu comes first; its
//! links carry the active section as fragment so switching language keeps
//! the reader's place.

use crate::checklist::{self, ChecklistState};
use crate::filter::FilterState;
use crate::i18n::{Locale, Params, Translator};
use crate::recipe::RecipeRecord;
use crate::scan::Manifest;
use crate::sections::{FragmentUpdate, Section, SectionController};
use crate::theme::Theme;
use crate::types::RecipeSummary;
use maud::{DOCTYPE, Markup, html};

/// Tags shown on a card before the rest are elided.
const CARD_TAG_LIMIT: usize = 3;

/// Everything the detail view needs for one recipe.
pub struct RecipeDetail<'a> {
    pub record: &'a RecipeRecord,
    pub sections: &'a SectionController,
    pub fragment: &'a FragmentUpdate,
    pub ingredients: &'a ChecklistState,
    pub steps: &'a ChecklistState,
    /// Language menu entries, current locale included.
    pub languages: &'a [LanguageLink],
}

/// One entry of a recipe's language menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageLink {
    pub locale: Locale,
    /// Native language name.
    pub label: &'static str,
    pub href: String,
    pub current: bool,
}

/// `record` and its translations, in the site's locale order.
///
/// Each link points at `<locale prefix>/<slug>#<section>`. Locales not
/// enabled in config are left out.
pub fn language_links(
    manifest: &Manifest,
    record: &RecipeRecord,
    section: Section,
) -> Vec<LanguageLink> {
    let translations = manifest.translations_of(record);
    manifest
        .config
        .locales
        .iter()
        .filter_map(|&locale| {
            let target = if locale == record.locale {
                record
            } else {
                *translations.iter().find(|r| r.locale == locale)?
            };
            Some(LanguageLink {
                locale,
                label: locale.label(),
                href: format!(
                    "{}/{}#{}",
                    locale.url_prefix(manifest.config.default_locale),
                    target.slug,
                    section.id()
                ),
                current: locale == record.locale,
            })
        })
        .collect()
}

/// Wrap `content` in a full HTML document for `locale`.
pub fn render_page(title: &str, locale: Locale, theme: Theme, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html.dark[theme == Theme::Dark] lang=(locale.code()) dir=(locale.direction().as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the filtered list as a card grid.
pub fn render_grid(items: &[&RecipeSummary], t: &Translator, default_locale: Locale) -> Markup {
    let prefix = t.locale().url_prefix(default_locale);
    html! {
        @if items.is_empty() {
            div.card.card-empty {
                p { (t.t("search.no_results")) }
            }
        } @else {
            p.results-count { (t.t_with("search.results", &Params::new().count(items.len()))) }
            div.recipe-grid {
                @for item in items {
                    (render_card(item, t, &prefix))
                }
            }
        }
    }
}

/// The tag filter panel: every tag of the collection, active ones marked.
pub fn render_tag_filter(tags: &[String], state: &FilterState, t: &Translator) -> Markup {
    html! {
        div.tag-filter {
            h3 { (t.t("search.tags")) }
            @if tags.is_empty() {
                p.empty { (t.t("search.no_tags_yet")) }
            } @else {
                ul.tags {
                    @for tag in tags {
                        @let active = state.active_tags.contains(tag);
                        li {
                            span.badge.badge-tag.active[active]
                                data-tag=(tag)
                                aria-pressed=(if active { "true" } else { "false" }) {
                                (t.tag_label_or_slug(tag))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_card(item: &RecipeSummary, t: &Translator, prefix: &str) -> Markup {
    let href = format!("{}/{}", prefix, item.slug);
    html! {
        article.card {
            @if let Some(src) = &item.image {
                a.card-image href=(href) {
                    img src=(src) alt=(item.title) loading="lazy";
                }
            }
            div.card-content {
                a href=(href) {
                    h3 { (item.title) }
                }
                div.badges {
                    @for tag in item.tags.iter().take(CARD_TAG_LIMIT) {
                        span.badge.badge-tag { (t.tag_label_or_slug(tag)) }
                    }
                    @if let Some(minutes) = item.total {
                        span.badge.badge-time {
                            (t.t_with("time.total", &Params::new().set("minutes", minutes)))
                        }
                    }
                    @if let Some(d) = item.difficulty {
                        span.badge.badge-difficulty { (t.t(&format!("difficulty.{}", d.as_str()))) }
                    }
                }
            }
        }
    }
}

/// Renders the tab list and panes of a recipe.
pub fn render_sections(detail: &RecipeDetail<'_>, t: &Translator) -> Markup {
    let active = detail.sections.active();
    html! {
        @if detail.languages.len() > 1 {
            nav.lang-menu aria-label=(t.t("nav.language")) {
                ul {
                    @for link in detail.languages {
                        li {
                            a href=(link.href)
                                hreflang=(link.locale.code())
                                lang=(link.locale.code())
                                aria-current=[link.current.then_some("page")] {
                                (link.label)
                            }
                        }
                    }
                }
            }
        }
        div.recipe-sections {
            nav.tabs role="tablist" {
                @for section in detail.sections.available() {
                    @let selected = *section == active;
                    a.tab.active[selected]
                        id={ "tab-" (section.id()) }
                        href={ "#" (section.id()) }
                        role="tab"
                        aria-selected=(if selected { "true" } else { "false" }) {
                        (t.t(section.label_key()))
                    }
                }
            }
            @for section in detail.sections.available() {
                section.pane
                    id=(section.id())
                    role="tabpanel"
                    aria-labelledby={ "tab-" (section.id()) }
                    hidden[*section != active] {
                    h2.sr-only { (t.t(section.label_key())) }
                    (render_pane(detail, *section, t))
                }
            }
        }
    }
}

fn render_pane(detail: &RecipeDetail<'_>, section: Section, t: &Translator) -> Markup {
    let record = detail.record;
    match section {
        Section::Ingredients => html! {
            @if record.ingredient_groups.is_empty() {
                p.empty { (t.t("sections.missing_ingredients")) }
            }
            @for (g, group) in record.ingredient_groups.iter().enumerate() {
                div.ingredient-group {
                    @if let Some(title) = &group.title {
                        h3 { (title) }
                    }
                    ul.checklist {
                        @for (i, text) in group.ingredients.iter().enumerate() {
                            @let id = checklist::ingredient_item_id(&record.checklist_key(), g, i);
                            @let checked = detail.ingredients.get(&id).copied().unwrap_or(false);
                            li {
                                input type="checkbox" id=(id) checked[checked];
                                label.done[checked] for=(id) { (text) }
                            }
                        }
                    }
                }
            }
        },
        Section::Steps => html! {
            @if record.steps.is_empty() {
                p.empty { (t.t("sections.missing_steps")) }
            } @else {
                ol.checklist.steps {
                    @for (i, step) in record.steps.iter().enumerate() {
                        @let id = format!("step-{}", checklist::step_item_id(i));
                        @let checked = detail.steps.get(&checklist::step_item_id(i)).copied().unwrap_or(false);
                        li {
                            input type="checkbox" id=(id) checked[checked];
                            span.step-number { (i + 1) }
                            label.done[checked] for=(id) { (step) }
                        }
                    }
                }
            }
        },
        Section::Notes => html! {
            ul.notes {
                @for note in record.notes.iter().filter(|n| !n.trim().is_empty()) {
                    li { (note) }
                }
            }
        },
        Section::NutritionalValues => html! {
            table.nutrition {
                caption { (t.t("nutrition.per_serving")) }
                thead {
                    tr {
                        th { (t.t("nutrition.nutrient")) }
                        th { (t.t("nutrition.amount")) }
                    }
                }
                tbody {
                    @if let Some(nutrition) = &record.nutrition {
                        @for row in nutrition.rows() {
                            tr {
                                td { (t.t(row.label_key)) }
                                td.amount { (row.value) (row.unit) }
                            }
                        }
                    }
                }
            }
        },
    }
}
