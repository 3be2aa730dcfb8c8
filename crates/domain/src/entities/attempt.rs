//! Attempt entity
//!
//! One scored answer against one word. Attempts are appended to the session
//! history and never mutated after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{MatchKind, WordId};

/// A single verified answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    word_id: WordId,
    answer_text: String,
    is_correct: bool,
    match_kind: Option<MatchKind>,
    recorded_at: DateTime<Utc>,
}

impl Attempt {
    /// Record a correct answer with the kind of match that accepted it
    pub fn correct(word_id: WordId, answer_text: impl Into<String>, kind: MatchKind) -> Self {
        Self {
            word_id,
            answer_text: answer_text.into(),
            is_correct: true,
            match_kind: Some(kind),
            recorded_at: Utc::now(),
        }
    }

    /// Record an incorrect answer
    pub fn incorrect(word_id: WordId, answer_text: impl Into<String>) -> Self {
        Self {
            word_id,
            answer_text: answer_text.into(),
            is_correct: false,
            match_kind: None,
            recorded_at: Utc::now(),
        }
    }

    /// Word this attempt was made against
    #[must_use]
    pub const fn word_id(&self) -> WordId {
        self.word_id
    }

    /// The answer as submitted (spoken hypothesis or typed text)
    #[must_use]
    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }

    /// Whether the matcher accepted the answer
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        self.is_correct
    }

    /// How the answer matched, when it did
    #[must_use]
    pub const fn match_kind(&self) -> Option<MatchKind> {
        self.match_kind
    }

    /// When the attempt was recorded
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
