//! Word entity
//!
//! An atomic unit to prompt and verify. Words are loaded by the content
//! collaborator and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::value_objects::WordId;

/// A word or short utterance the learner must speak or type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    id: WordId,
    text: String,
    source_ref: String,
}

impl Word {
    /// Create a word with a fresh ID
    pub fn new(text: impl Into<String>, source_ref: impl Into<String>) -> Self {
        Self {
            id: WordId::new(),
            text: text.into(),
            source_ref: source_ref.into(),
        }
    }

    /// Create a word with a known ID (content catalog round-trips)
    pub fn with_id(id: WordId, text: impl Into<String>, source_ref: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            source_ref: source_ref.into(),
        }
    }

    /// The word's identifier
    #[must_use]
    pub const fn id(&self) -> WordId {
        self.id
    }

    /// The text to prompt and verify against
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Reference into the content store this word came from
    #[must_use]
    pub fn source_ref(&self) -> &str {
        &self.source_ref
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_fresh_ids() {
        let a = Word::new("chat", "animals/1");
        let b = Word::new("chat", "animals/1");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn with_id_preserves_identity() {
        let id = WordId::new();
        let word = Word::with_id(id, "chien", "animals/2");
        assert_eq!(word.id(), id);
        assert_eq!(word.text(), "chien");
        assert_eq!(word.source_ref(), "animals/2");
    }
}
