//! Text folding for search matching.
//!
//! A folded string is lowercased, put through Unicode canonical decomposition
//! (NFD), and stripped of combining marks, so `"Café"`, `"CAFÉ"` and `"cafe"`
//! all fold to `"cafe"`. Folding is idempotent.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Case- and diacritic-insensitive normalization of `input`.
pub fn fold(input: &str) -> String {
    input
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
