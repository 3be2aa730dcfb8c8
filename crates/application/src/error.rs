//! Application layer errors

use thiserror::Error;

use domain::DomainError;
use speech::SpeechError;

/// Errors surfaced by the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain invariant violation
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Speech pipeline failure that exhausted every tier
    #[error("speech error: {0}")]
    Speech(#[from] SpeechError),

    /// Operation on a session that already finished
    #[error("session already finished")]
    SessionFinished,

    /// A prompt/verify cycle is already in flight
    #[error("a prompt/verify cycle is already in flight")]
    CycleInFlight,

    /// Session started with no words to practice
    #[error("word list is empty")]
    EmptyWordList,

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_convert() {
        let err: ApplicationError = DomainError::NoActiveWord.into();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[test]
    fn speech_errors_convert() {
        let err: ApplicationError = SpeechError::Cancelled.into();
        assert!(matches!(err, ApplicationError::Speech(_)));
        assert_eq!(err.to_string(), "speech error: capture cancelled");
    }

    #[test]
    fn cycle_in_flight_message() {
        assert_eq!(
            ApplicationError::CycleInFlight.to_string(),
            "a prompt/verify cycle is already in flight"
        );
    }
}
