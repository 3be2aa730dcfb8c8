//! Match kind value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// How an answer was judged correct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Normalized strings were equal
    Exact,
    /// Accepted through the curated homophone table
    PhoneticMapping,
    /// Accepted within the edit-distance bound for short words
    EditDistance,
}

impl MatchKind {
    /// Stable string form, used in logs and summaries
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::PhoneticMapping => "phonetic_mapping",
            Self::EditDistance => "edit_distance",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
