//! Date normalization for recipe ordering.
//!
//! Content records carry a date as a TOML date, a TOML datetime, or free
//! text. Ordering only needs a single comparable number, so everything is
//! reduced to milliseconds since the Unix epoch. Values without an offset are
//! read as UTC. Missing or unparsable dates become `0`.
//!
//! Accepted forms:
//!
//! ```text
//! 2024-06-01T12:00:00+02:00        RFC 3339
//! 2024-06-01T12:00:00.250          naive datetime, UTC
//! 2024-06-01                       midnight UTC
//! 2024-06, 2024                    first day of the month or year
//! Sat, 01 Jun 2024 12:00:00 +0000  RFC 2822
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Normalize an optional date string to milliseconds since the epoch.
pub fn to_timestamp_millis(input: Option<&str>) -> i64 {
    input.and_then(parse_millis).unwrap_or(0)
}

fn parse_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_partial_date(raw))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// `YYYY-MM` or `YYYY`, as the first day of that period.
fn parse_partial_date(raw: &str) -> Option<NaiveDate> {
    let (year, month) = raw.split_once('-').unwrap_or((raw, "01"));
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(year, 4) || !digits(month, 2) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Stable sort, newest first by the date `date_of` returns.
///
/// Equal timestamps keep their input order; undated items sink to the end.
pub fn sort_newest_first<T, F>(items: &mut [T], date_of: F)
where
    F: Fn(&T) -> Option<&str>,
{
    items.sort_by_cached_key(|item| std::cmp::Reverse(to_timestamp_millis(date_of(item))));
}
