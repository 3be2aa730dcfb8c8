//! Port definitions for speech processing
//!
//! The resolvers iterate tagged backends through these traits; concrete
//! adapters live in `providers` and in the infrastructure crate.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SpeechError;
use crate::types::{AudioData, RecognitionTier, SynthesisSource};

/// Port for one synthesis tier
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    /// Which tier this backend represents
    fn source(&self) -> SynthesisSource;

    /// Check if the backend is ready to synthesize
    async fn is_available(&self) -> bool;

    /// Convert text to audio
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` when the provider fails; the resolver treats
    /// this as "try the next tier".
    async fn synthesize(
        &self,
        text: &str,
        provider_voice_id: &str,
    ) -> Result<AudioData, SpeechError>;
}

/// Port for one recognition tier
#[async_trait]
pub trait RecognitionBackend: Send + Sync {
    /// Which tier this backend represents
    fn tier(&self) -> RecognitionTier;

    /// Check if the backend is ready (e.g. offline model loaded)
    async fn is_available(&self) -> bool;

    /// Capture from the microphone stream and produce one hypothesis
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` when capture or the provider fails.
    async fn recognize(&self, mic: &mut dyn MicrophoneStream) -> Result<String, SpeechError>;
}

/// Port for acquiring the microphone
#[async_trait]
pub trait Microphone: Send + Sync {
    /// Acquire exclusive microphone access
    ///
    /// # Errors
    ///
    /// Fails fast with `SpeechError::PermissionDenied` when access is
    /// refused or the device is unavailable.
    async fn acquire(&self) -> Result<Box<dyn MicrophoneStream>, SpeechError>;
}

/// An acquired microphone stream
///
/// Dropping the stream releases the device.
#[async_trait]
pub trait MicrophoneStream: Send {
    /// Next captured frame; `None` when the stream ends
    async fn next_frame(&mut self) -> Result<Option<Bytes>, SpeechError>;

    /// Record a fixed-duration clip as a single blob
    async fn record(&mut self, duration: Duration) -> Result<AudioData, SpeechError>;
}

/// Port for an offline streaming recognition model
#[async_trait]
pub trait StreamingModel: Send + Sync {
    /// Whether the model weights are loaded and ready
    async fn is_loaded(&self) -> bool;

    /// Feed one audio frame; `Some(text)` once a hypothesis is finalized
    async fn feed(&self, frame: &[u8]) -> Result<Option<String>, SpeechError>;

    /// Discard any partial hypothesis before a new capture
    async fn reset(&self);
}

/// Port for the platform's built-in recognizer
#[async_trait]
pub trait SystemRecognition: Send + Sync {
    /// Drive the platform recognizer until its first final result
    async fn recognize_once(&self, mic: &mut dyn MicrophoneStream)
    -> Result<String, SpeechError>;
}

/// Port for audio playback
#[async_trait]
pub trait AudioSink: Send + Sync + std::fmt::Debug {
    /// Play audio to completion; resolves at end of playback
    async fn play(&self, audio: &AudioData) -> Result<(), SpeechError>;

    /// Stop any playback in progress
    fn stop(&self);
}

/// Port for the cache's backing key-value store
///
/// `set` failures must be tolerated by callers; the audio cache treats
/// caching as an optimization, never a correctness requirement.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Get a blob by key; `None` when absent
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SpeechError>;

    /// Store a blob under a key, overwriting any existing value
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), SpeechError>;

    /// Delete a single entry; absent keys are not an error
    async fn delete(&self, key: &str) -> Result<(), SpeechError>;

    /// List all stored keys
    async fn keys(&self) -> Result<Vec<String>, SpeechError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AudioFormat;

    /// Mock synthesis backend for testing
    struct MockSynthesis {
        source: SynthesisSource,
        available: bool,
    }

    #[async_trait]
    impl SynthesisBackend for MockSynthesis {
        fn source(&self) -> SynthesisSource {
            self.source
        }

        async fn is_available(&self) -> bool {
            self.available
        }

        async fn synthesize(
            &self,
            _text: &str,
            _provider_voice_id: &str,
        ) -> Result<AudioData, SpeechError> {
            Ok(AudioData::new(vec![0, 1, 2], AudioFormat::Mp3))
        }
    }

    struct MockRecognition;

    #[async_trait]
    impl RecognitionBackend for MockRecognition {
        fn tier(&self) -> RecognitionTier {
            RecognitionTier::Builtin
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn recognize(
            &self,
            _mic: &mut dyn MicrophoneStream,
        ) -> Result<String, SpeechError> {
            Ok("chat".to_string())
        }
    }

    struct EmptyStream;

    #[async_trait]
    impl MicrophoneStream for EmptyStream {
        async fn next_frame(&mut self) -> Result<Option<Bytes>, SpeechError> {
            Ok(None)
        }

        async fn record(&mut self, _duration: Duration) -> Result<AudioData, SpeechError> {
            Ok(AudioData::new(Vec::new(), AudioFormat::Wav))
        }
    }

    #[tokio::test]
    async fn mock_synthesis_backend_synthesizes() {
        let backend = MockSynthesis {
            source: SynthesisSource::Cloud,
            available: true,
        };
        assert!(backend.is_available().await);
        let audio = backend.synthesize("chat", "voice-1").await.unwrap();
        assert!(!audio.is_empty());
        assert_eq!(backend.source(), SynthesisSource::Cloud);
    }

    #[tokio::test]
    async fn mock_recognition_backend_recognizes() {
        let backend = MockRecognition;
        let mut mic = EmptyStream;
        let text = backend.recognize(&mut mic).await.unwrap();
        assert_eq!(text, "chat");
        assert_eq!(backend.tier(), RecognitionTier::Builtin);
    }

    #[tokio::test]
    async fn unavailable_backend_reports_it() {
        let backend = MockSynthesis {
            source: SynthesisSource::OnDevice,
            available: false,
        };
        assert!(!backend.is_available().await);
    }
}
