//! Phonetic and orthographic answer matching
//!
//! Pure functions only: normalization, the curated homophone table, a small
//! Levenshtein implementation, and the matcher that ties them together.
//! The matcher never errors; it is a total function over strings.

mod confusions;
mod levenshtein;
mod matcher;
mod normalize;

pub use confusions::are_confusable;
pub use levenshtein::levenshtein;
pub use matcher::{MatchOutcome, MatchTolerance, PhoneticMatcher};
pub use normalize::normalize;
