//! Answer and cache-key normalization
//!
//! Two strings that differ only in case, punctuation or diacritics are the
//! same utterance for matching and caching purposes.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a string for pronunciation-identity comparison
///
/// Lowercases, decomposes to NFD, drops combining marks (diacritics) and
/// strips everything outside `[a-z0-9]`.
#[must_use]
pub fn normalize(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}
