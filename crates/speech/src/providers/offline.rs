//! Offline streaming-model recognition tier
//!
//! Wraps an injected `StreamingModel` port: frames are pumped from the
//! microphone into the model until it finalizes a hypothesis. The tier is
//! unavailable until the model weights are loaded, so the resolver skips
//! it silently on cold starts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::SpeechError;
use crate::ports::{MicrophoneStream, RecognitionBackend, StreamingModel};
use crate::types::RecognitionTier;

/// Recognition tier backed by an offline streaming model
pub struct OfflineModelBackend {
    model: Arc<dyn StreamingModel>,
}

impl std::fmt::Debug for OfflineModelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfflineModelBackend").finish_non_exhaustive()
    }
}

impl OfflineModelBackend {
    /// Wrap a streaming model as a recognition tier
    #[must_use]
    pub fn new(model: Arc<dyn StreamingModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl RecognitionBackend for OfflineModelBackend {
    fn tier(&self) -> RecognitionTier {
        RecognitionTier::OfflineModel
    }

    async fn is_available(&self) -> bool {
        self.model.is_loaded().await
    }

    #[instrument(skip(self, mic))]
    async fn recognize(&self, mic: &mut dyn MicrophoneStream) -> Result<String, SpeechError> {
        // Stale partials from an aborted capture must not leak into this one.
        self.model.reset().await;

        let mut frames = 0_u64;
        while let Some(frame) = mic.next_frame().await? {
            frames += 1;
            if let Some(text) = self.model.feed(&frame).await? {
                debug!(frames, "offline model finalized a hypothesis");
                return Ok(text);
            }
        }

        debug!(frames, "stream ended without a hypothesis");
        Err(SpeechError::RecognitionFailed(
            "stream ended without a hypothesis".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::time::Duration;

    use bytes::Bytes;
    use parking_lot::Mutex;

    use super::*;
    use crate::types::{AudioData, AudioFormat};

    /// Model that finalizes after a fixed number of frames
    struct ScriptedModel {
        loaded: bool,
        finalize_after: u32,
        fed: AtomicU32,
        was_reset: AtomicBool,
    }

    impl ScriptedModel {
        fn new(finalize_after: u32) -> Self {
            Self {
                loaded: true,
                finalize_after,
                fed: AtomicU32::new(0),
                was_reset: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl StreamingModel for ScriptedModel {
        async fn is_loaded(&self) -> bool {
            self.loaded
        }

        async fn feed(&self, _frame: &[u8]) -> Result<Option<String>, SpeechError> {
            let fed = self.fed.fetch_add(1, Ordering::SeqCst) + 1;
            if fed >= self.finalize_after {
                Ok(Some("le chat".to_string()))
            } else {
                Ok(None)
            }
        }

        async fn reset(&self) {
            self.was_reset.store(true, Ordering::SeqCst);
        }
    }

    struct FrameStream {
        frames: Mutex<VecDeque<Bytes>>,
    }

    impl FrameStream {
        fn with_frames(count: usize) -> Self {
            Self {
                frames: Mutex::new((0..count).map(|_| Bytes::from_static(&[0; 8])).collect()),
            }
        }
    }

    #[async_trait]
    impl MicrophoneStream for FrameStream {
        async fn next_frame(&mut self) -> Result<Option<Bytes>, SpeechError> {
            Ok(self.frames.lock().pop_front())
        }

        async fn record(&mut self, _duration: Duration) -> Result<AudioData, SpeechError> {
            Ok(AudioData::new(Vec::new(), AudioFormat::Wav))
        }
    }

    #[tokio::test]
    async fn pumps_frames_until_the_model_finalizes() {
        let model = Arc::new(ScriptedModel::new(3));
        let backend = OfflineModelBackend::new(model.clone());
        let mut mic = FrameStream::with_frames(10);

        let text = backend.recognize(&mut mic).await.unwrap();
        assert_eq!(text, "le chat");
        assert_eq!(model.fed.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn resets_the_model_before_each_capture() {
        let model = Arc::new(ScriptedModel::new(1));
        let backend = OfflineModelBackend::new(model.clone());
        let mut mic = FrameStream::with_frames(2);

        backend.recognize(&mut mic).await.unwrap();
        assert!(model.was_reset.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn exhausted_stream_without_hypothesis_fails() {
        let model = Arc::new(ScriptedModel::new(100));
        let backend = OfflineModelBackend::new(model);
        let mut mic = FrameStream::with_frames(3);

        let err = backend.recognize(&mut mic).await.unwrap_err();
        assert!(matches!(err, SpeechError::RecognitionFailed(_)));
        assert!(err.is_provider_failure());
    }

    #[tokio::test]
    async fn unloaded_model_reports_unavailable() {
        let model = Arc::new(ScriptedModel {
            loaded: false,
            ..ScriptedModel::new(1)
        });
        let backend = OfflineModelBackend::new(model);
        assert!(!backend.is_available().await);
        assert_eq!(backend.tier(), RecognitionTier::OfflineModel);
    }
}
