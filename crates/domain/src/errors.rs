//! Domain-level errors

use thiserror::Error;

/// Errors raised by domain invariants
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A session cannot be built from an empty word list
    #[error("word list is empty")]
    EmptyWordList,

    /// The session has finished and is read-only
    #[error("session is finished")]
    SessionFinished,

    /// An attempt was recorded without an active word
    #[error("no word is currently active")]
    NoActiveWord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_word_list_error_message() {
        assert_eq!(DomainError::EmptyWordList.to_string(), "word list is empty");
    }

    #[test]
    fn session_finished_error_message() {
        assert_eq!(
            DomainError::SessionFinished.to_string(),
            "session is finished"
        );
    }

    #[test]
    fn no_active_word_error_message() {
        assert_eq!(
            DomainError::NoActiveWord.to_string(),
            "no word is currently active"
        );
    }
}
