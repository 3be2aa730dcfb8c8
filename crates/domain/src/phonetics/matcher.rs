//! Phonetic matcher
//!
//! Decides whether a spoken or typed answer counts as correct for a target
//! word. Matching tiers are tried in order: exact, homophone table, then a
//! bounded edit distance that applies to short targets only. Very short
//! words are acoustically ambiguous and strict equality produces
//! unacceptable false negatives; on longer words the same tolerance would
//! produce false positives instead, so it is never applied there.

use serde::{Deserialize, Serialize};

use crate::phonetics::{are_confusable, levenshtein, normalize};
use crate::value_objects::MatchKind;

/// Tunable edit-distance bounds
///
/// The source exercises disagree on exact thresholds, so they are
/// configuration rather than constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTolerance {
    /// Longest normalized target the edit-distance tier applies to
    pub max_fuzzy_len: usize,
    /// Accepted distance for targets of length <= 2
    pub tiny_target_distance: usize,
    /// Accepted distance for longer (but still fuzzy-eligible) targets
    pub short_target_distance: usize,
}

impl Default for MatchTolerance {
    fn default() -> Self {
        Self {
            max_fuzzy_len: 3,
            tiny_target_distance: 2,
            short_target_distance: 1,
        }
    }
}

/// Result of one match decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Whether the answer is accepted
    pub matched: bool,
    /// Which tier accepted it, when one did
    pub kind: Option<MatchKind>,
}

impl MatchOutcome {
    const fn hit(kind: MatchKind) -> Self {
        Self {
            matched: true,
            kind: Some(kind),
        }
    }

    const fn miss() -> Self {
        Self {
            matched: false,
            kind: None,
        }
    }
}

/// Pure answer matcher; deterministic, no I/O
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneticMatcher {
    tolerance: MatchTolerance,
}

impl PhoneticMatcher {
    /// Matcher with default tolerance
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matcher with caller-tuned edit-distance bounds
    #[must_use]
    pub const fn with_tolerance(tolerance: MatchTolerance) -> Self {
        Self { tolerance }
    }

    /// Judge a candidate answer against a target word
    ///
    /// Both strings are normalized first; the first satisfied tier wins.
    /// An empty (or punctuation-only) answer never matches.
    #[must_use]
    pub fn is_match(&self, spoken: &str, target: &str) -> MatchOutcome {
        let candidate = normalize(spoken);
        let target = normalize(target);

        if candidate.is_empty() || target.is_empty() {
            return MatchOutcome::miss();
        }

        if candidate == target {
            return MatchOutcome::hit(MatchKind::Exact);
        }

        if are_confusable(&candidate, &target) {
            return MatchOutcome::hit(MatchKind::PhoneticMapping);
        }

        let target_len = target.chars().count();
        if target_len <= self.tolerance.max_fuzzy_len {
            let bound = if target_len <= 2 {
                self.tolerance.tiny_target_distance
            } else {
                self.tolerance.short_target_distance
            };
            if levenshtein(&candidate, &target) <= bound {
                return MatchOutcome::hit(MatchKind::EditDistance);
            }
        }

        MatchOutcome::miss()
    }
}
