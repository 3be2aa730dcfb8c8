//! Speech-to-text resolution
//!
//! Resolves one spoken answer to text through ordered tiers: offline
//! streaming model, cloud transcription, platform built-in. The tier is
//! chosen once per call on availability; once a tier runs, its failure is
//! final, except that a cloud failure retries on the platform built-in
//! within the same call. Only one capture may be in flight per recognizer;
//! concurrent calls are rejected rather than queued. Every capture is
//! bounded by a deadline and can be cancelled from another task.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Notify;
use tracing::{debug, info, instrument, warn};

use crate::capability::Capabilities;
use crate::config::CaptureConfig;
use crate::error::SpeechError;
use crate::ports::{Microphone, RecognitionBackend};
use crate::types::{RecognitionAttempt, RecognitionTier};

/// Multi-tier STT resolver with single-capture enforcement
pub struct SpeechRecognizer {
    backends: Vec<Box<dyn RecognitionBackend>>,
    microphone: Arc<dyn Microphone>,
    capabilities: Capabilities,
    capture: CaptureConfig,
    capturing: AtomicBool,
    cancel: Notify,
}

impl std::fmt::Debug for SpeechRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechRecognizer")
            .field("backends", &self.backends.len())
            .field("capabilities", &self.capabilities)
            .field("capturing", &self.capturing.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Clears the capturing flag when the listen call unwinds
struct CaptureGuard<'a>(&'a AtomicBool);

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SpeechRecognizer {
    /// Create a recognizer over an ordered list of backends
    ///
    /// Backends are tried in the given order; put the offline model first,
    /// then cloud, then the platform built-in.
    #[must_use]
    pub fn new(
        backends: Vec<Box<dyn RecognitionBackend>>,
        microphone: Arc<dyn Microphone>,
        capabilities: Capabilities,
        capture: CaptureConfig,
    ) -> Self {
        Self {
            backends,
            microphone,
            capabilities,
            capture,
            capturing: AtomicBool::new(false),
            cancel: Notify::new(),
        }
    }

    /// Capture one spoken answer and resolve it to text
    ///
    /// # Errors
    ///
    /// - `SpeechError::AlreadyCapturing` when a capture is in flight
    /// - `SpeechError::PermissionDenied` when the microphone is refused
    /// - `SpeechError::Timeout` when no hypothesis arrived in time
    /// - `SpeechError::Cancelled` when `cancel()` was called
    /// - the active tier's error when it fails; a cloud failure surfaces
    ///   only after the platform built-in also failed or was skipped
    #[instrument(skip(self))]
    pub async fn listen(&self) -> Result<RecognitionAttempt, SpeechError> {
        if self
            .capturing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SpeechError::AlreadyCapturing);
        }
        let _guard = CaptureGuard(&self.capturing);

        let requested_at = Utc::now();
        let mut mic = self.microphone.acquire().await?;
        let deadline = Duration::from_millis(self.capture.listen_timeout_ms);

        let resolved = tokio::select! {
            result = self.resolve(mic.as_mut()) => result,
            () = self.cancel.notified() => {
                debug!("capture cancelled");
                Err(SpeechError::Cancelled)
            },
            () = tokio::time::sleep(deadline) => {
                warn!(timeout_ms = self.capture.listen_timeout_ms, "capture deadline exceeded");
                Err(SpeechError::Timeout(self.capture.listen_timeout_ms))
            },
        };

        let (tier, raw_text) = resolved?;
        info!(tier = tier.as_str(), "hypothesis resolved");
        Ok(RecognitionAttempt::new(tier, raw_text).with_requested_at(requested_at))
    }

    /// Cancel the capture in flight, if any
    ///
    /// The pending `listen()` resolves with `SpeechError::Cancelled`; the
    /// microphone is released as its stream drops.
    pub fn cancel(&self) {
        self.cancel.notify_waiters();
    }

    /// Whether a capture is currently in flight
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    async fn resolve(
        &self,
        mic: &mut dyn crate::ports::MicrophoneStream,
    ) -> Result<(RecognitionTier, String), SpeechError> {
        let mut last_error: Option<SpeechError> = None;

        for backend in &self.backends {
            let tier = backend.tier();
            if tier == RecognitionTier::Builtin && !self.capabilities.builtin_recognition {
                continue;
            }
            if !backend.is_available().await {
                debug!(tier = tier.as_str(), "recognition tier not available, skipping");
                continue;
            }

            match backend.recognize(mic).await {
                Ok(text) => return Ok((tier, text)),
                // The cloud tier is the only one with an in-call fallback.
                Err(e) if tier == RecognitionTier::CloudApi && e.is_provider_failure() => {
                    warn!(tier = tier.as_str(), error = %e, "cloud recognition failed, retrying on the built-in tier");
                    last_error = Some(e);
                },
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            SpeechError::Unavailable("no recognition tier configured".to_string())
        }))
    }
}
