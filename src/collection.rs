//! Home-page selections over a locale's recipe collection.
//!
//! All functions take summaries already sorted newest first (as
//! [`crate::scan::Manifest::summaries`] returns them) and return borrowed slices or references, so the
//! home page can slice freely without re-sorting.

use crate::config::ListingConfig;
use crate::types::{RecipeSummary, Season};

pub const DEFAULT_LATEST_LIMIT: usize = 6;
pub const DEFAULT_SEASONAL_LIMIT: usize = 4;
pub const DEFAULT_TAG_CLOUD_LIMIT: usize = 8;
pub const DEFAULT_QUICK_TAGS: [&str; 3] = ["breakfast", "mains", "dessert"];

/// One entry of the tag cloud.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

pub fn pick_featured(summaries: &[RecipeSummary]) -> Option<&RecipeSummary> {
    summaries.iter().find(|s| s.featured)
}

pub fn pick_latest(summaries: &[RecipeSummary], limit: usize) -> &[RecipeSummary] {
    &summaries[..limit.min(summaries.len())]
}

/// The `preferred` tags used by at least one recipe, in `preferred` order.
pub fn resolve_quick_tags<'p>(summaries: &[RecipeSummary], preferred: &'p [String]) -> Vec<&'p str> {
    preferred
        .iter()
        .filter(|tag| summaries.iter().any(|s| s.tags.contains(*tag)))
        .map(String::as_str)
        .collect()
}

/// Meteorological season of a 1-based month. Out-of-range months wrap.
pub fn season_for_month(month: u32) -> Season {
    match (month % 12 + 11) % 12 / 3 {
        0 => Season::Winter,
        1 => Season::Spring,
        2 => Season::Summer,
        _ => Season::Autumn,
    }
}

/// Recipes tagged for `month` or its season, or every recipe when none are.
pub fn pick_seasonal(summaries: &[RecipeSummary], month: u32, limit: usize) -> Vec<&RecipeSummary> {
    let season = season_for_month(month);
    let matches: Vec<&RecipeSummary> = summaries
        .iter()
        .filter(|s| s.month == Some(month) || s.season == Some(season))
        .collect();
    let source: Vec<&RecipeSummary> = if matches.is_empty() {
        summaries.iter().collect()
    } else {
        matches
    };
    source.into_iter().take(limit).collect()
}

/// Tag usage counts, most used first. Ties keep first-seen order.
pub fn collect_tag_counts(summaries: &[RecipeSummary], limit: usize) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    for tag in summaries.iter().flat_map(|s| &s.tags) {
        match counts.iter_mut().find(|c| &c.tag == tag) {
            Some(entry) => entry.count += 1,
            None => counts.push(TagCount {
                tag: tag.clone(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Everything the home page shows, for one locale and month.
#[derive(Debug)]
pub struct HomeSelection<'a> {
    pub featured: Option<&'a RecipeSummary>,
    pub latest: &'a [RecipeSummary],
    pub season: Season,
    pub seasonal: Vec<&'a RecipeSummary>,
    pub quick_tags: Vec<&'a str>,
    pub popular_tags: Vec<TagCount>,
}

/// Compute the home page rows from newest-first `summaries`.
pub fn select_home<'a>(
    summaries: &'a [RecipeSummary],
    listing: &'a ListingConfig,
    month: u32,
) -> HomeSelection<'a> {
    HomeSelection {
        featured: pick_featured(summaries),
        latest: pick_latest(summaries, listing.latest_limit),
        season: season_for_month(month),
        seasonal: pick_seasonal(summaries, month, listing.seasonal_limit),
        quick_tags: resolve_quick_tags(summaries, &listing.quick_tags),
        popular_tags: collect_tag_counts(summaries, listing.tag_cloud_limit),
    }
}
