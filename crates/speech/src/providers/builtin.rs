//! Platform built-in recognition tier
//!
//! Thin wrapper over the injected `SystemRecognition` port; the last
//! resort after the offline model and the cloud API.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::error::SpeechError;
use crate::ports::{MicrophoneStream, RecognitionBackend, SystemRecognition};
use crate::types::RecognitionTier;

/// Recognition tier backed by the platform recognizer
pub struct BuiltinRecognition {
    system: Arc<dyn SystemRecognition>,
}

impl std::fmt::Debug for BuiltinRecognition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinRecognition").finish_non_exhaustive()
    }
}

impl BuiltinRecognition {
    /// Wrap the platform recognizer as a recognition tier
    #[must_use]
    pub fn new(system: Arc<dyn SystemRecognition>) -> Self {
        Self { system }
    }
}

#[async_trait]
impl RecognitionBackend for BuiltinRecognition {
    fn tier(&self) -> RecognitionTier {
        RecognitionTier::Builtin
    }

    async fn is_available(&self) -> bool {
        true
    }

    #[instrument(skip(self, mic))]
    async fn recognize(&self, mic: &mut dyn MicrophoneStream) -> Result<String, SpeechError> {
        self.system.recognize_once(mic).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bytes::Bytes;

    use super::*;
    use crate::types::{AudioData, AudioFormat};

    struct FixedRecognizer(&'static str);

    #[async_trait]
    impl SystemRecognition for FixedRecognizer {
        async fn recognize_once(
            &self,
            _mic: &mut dyn MicrophoneStream,
        ) -> Result<String, SpeechError> {
            Ok(self.0.to_string())
        }
    }

    struct SilentStream;

    #[async_trait]
    impl MicrophoneStream for SilentStream {
        async fn next_frame(&mut self) -> Result<Option<Bytes>, SpeechError> {
            Ok(None)
        }

        async fn record(&mut self, _duration: Duration) -> Result<AudioData, SpeechError> {
            Ok(AudioData::new(Vec::new(), AudioFormat::Wav))
        }
    }

    #[tokio::test]
    async fn delegates_to_the_platform_recognizer() {
        let backend = BuiltinRecognition::new(Arc::new(FixedRecognizer("le chien")));
        let mut mic = SilentStream;

        let text = backend.recognize(&mut mic).await.unwrap();
        assert_eq!(text, "le chien");
        assert_eq!(backend.tier(), RecognitionTier::Builtin);
        assert!(backend.is_available().await);
    }
}
