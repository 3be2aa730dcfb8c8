//! Speech processing errors

use thiserror::Error;

/// Errors that can occur during speech synthesis or recognition
#[derive(Debug, Error)]
pub enum SpeechError {
    /// No backend of the requested kind is present
    #[error("no speech backend available: {0}")]
    Unavailable(String),

    /// Microphone access was refused
    #[error("microphone permission denied: {0}")]
    PermissionDenied(String),

    /// Capture or processing exceeded its deadline
    #[error("speech processing timed out after {0}ms")]
    Timeout(u64),

    /// Capture was cancelled by the caller
    #[error("capture cancelled")]
    Cancelled,

    /// A second capture was requested while one is in progress
    #[error("a capture is already in progress")]
    AlreadyCapturing,

    /// Network or provider transport error
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// Provider returned a payload that could not be decoded
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Recognition backend reported a failure
    #[error("recognition failed: {0}")]
    RecognitionFailed(String),

    /// Synthesis backend reported a failure
    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Backing store read or write failed
    #[error("storage failure: {0}")]
    Storage(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl SpeechError {
    /// Whether this is a provider-side failure that justifies trying the
    /// next tier within the same call
    #[must_use]
    pub const fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::TransportFailure(_)
                | Self::MalformedResponse(_)
                | Self::Unavailable(_)
                | Self::RecognitionFailed(_)
                | Self::SynthesisFailed(_)
        )
    }
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TransportFailure(format!("request timed out: {err}"))
        } else if err.is_connect() {
            Self::TransportFailure(format!("connection failed: {err}"))
        } else {
            Self::TransportFailure(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_error_message() {
        let err = SpeechError::Unavailable("no TTS tier configured".to_string());
        assert_eq!(
            err.to_string(),
            "no speech backend available: no TTS tier configured"
        );
    }

    #[test]
    fn permission_denied_error_message() {
        let err = SpeechError::PermissionDenied("user declined".to_string());
        assert_eq!(err.to_string(), "microphone permission denied: user declined");
    }

    #[test]
    fn timeout_error_message() {
        let err = SpeechError::Timeout(5000);
        assert_eq!(err.to_string(), "speech processing timed out after 5000ms");
    }

    #[test]
    fn cancelled_error_message() {
        assert_eq!(SpeechError::Cancelled.to_string(), "capture cancelled");
    }

    #[test]
    fn already_capturing_error_message() {
        assert_eq!(
            SpeechError::AlreadyCapturing.to_string(),
            "a capture is already in progress"
        );
    }

    #[test]
    fn transport_failure_error_message() {
        let err = SpeechError::TransportFailure("500 Internal Server Error".to_string());
        assert_eq!(
            err.to_string(),
            "transport failure: 500 Internal Server Error"
        );
    }

    #[test]
    fn malformed_response_error_message() {
        let err = SpeechError::MalformedResponse("not base64".to_string());
        assert_eq!(err.to_string(), "malformed provider response: not base64");
    }

    #[test]
    fn provider_failures_are_fallback_worthy() {
        assert!(SpeechError::TransportFailure("x".into()).is_provider_failure());
        assert!(SpeechError::MalformedResponse("x".into()).is_provider_failure());
        assert!(!SpeechError::Cancelled.is_provider_failure());
        assert!(!SpeechError::Storage("disk full".into()).is_provider_failure());
        assert!(!SpeechError::PermissionDenied("x".into()).is_provider_failure());
        assert!(!SpeechError::AlreadyCapturing.is_provider_failure());
    }
}
