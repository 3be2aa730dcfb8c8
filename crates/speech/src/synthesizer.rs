//! Text-to-speech resolution
//!
//! Resolves a prompt to playable audio through an ordered set of tiers:
//! cache, then cloud, then on-device. Any tier failure is converted into
//! "try the next tier"; the caller sees an error only when every tier is
//! exhausted.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use domain::VoiceProfile;

use crate::cache::AudioCache;
use crate::capability::Capabilities;
use crate::error::SpeechError;
use crate::ports::{AudioSink, SynthesisBackend};
use crate::types::{AudioData, SynthesisSource};

/// Resolved audio for one prompt, bound to a playback sink
#[derive(Clone)]
pub struct AudioHandle {
    audio: AudioData,
    source: SynthesisSource,
    sink: Arc<dyn AudioSink>,
}

impl std::fmt::Debug for AudioHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioHandle")
            .field("source", &self.source)
            .field("size_bytes", &self.audio.size_bytes())
            .finish_non_exhaustive()
    }
}

impl AudioHandle {
    /// The resolved audio payload
    #[must_use]
    pub const fn audio(&self) -> &AudioData {
        &self.audio
    }

    /// Which tier produced the audio
    #[must_use]
    pub const fn source(&self) -> SynthesisSource {
        self.source
    }

    /// Play the audio to completion
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` when the sink fails.
    pub async fn play(&self) -> Result<(), SpeechError> {
        self.sink.play(&self.audio).await
    }

    /// Stop playback in progress
    pub fn stop(&self) {
        self.sink.stop();
    }
}

/// Cache-first TTS resolver over ordered fallback tiers
pub struct SpeechSynthesizer {
    cache: Arc<AudioCache>,
    backends: Vec<Box<dyn SynthesisBackend>>,
    sink: Arc<dyn AudioSink>,
    capabilities: Capabilities,
}

impl std::fmt::Debug for SpeechSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechSynthesizer")
            .field("backends", &self.backends.len())
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

impl SpeechSynthesizer {
    /// Create a synthesizer over an ordered list of backends
    ///
    /// Backends are tried in the given order after the cache; put cloud
    /// tiers before on-device ones.
    #[must_use]
    pub fn new(
        cache: Arc<AudioCache>,
        backends: Vec<Box<dyn SynthesisBackend>>,
        sink: Arc<dyn AudioSink>,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            cache,
            backends,
            sink,
            capabilities,
        }
    }

    /// Resolve a prompt to playable audio
    ///
    /// Empty prompts resolve to a silent no-op handle rather than an
    /// error; the session layer calls this unconditionally per word.
    ///
    /// The cache is consulted for cloud voices only. On-device voices
    /// are synthesized live and their output never enters the cache, so
    /// a lookup keyed on such a profile could never hit.
    ///
    /// # Errors
    ///
    /// Returns the last tier's error when every tier fails, or
    /// `SpeechError::Unavailable` when no tier was eligible at all.
    #[instrument(skip(self, profile), fields(voice = %profile.provider_voice_id))]
    pub async fn synthesize(
        &self,
        text: &str,
        profile: &VoiceProfile,
    ) -> Result<AudioHandle, SpeechError> {
        if text.trim().is_empty() {
            debug!("empty prompt; resolving to silence");
            return Ok(self.handle(AudioData::new(Vec::new(), crate::types::AudioFormat::Wav), SynthesisSource::OnDevice));
        }

        if !profile.is_on_device()
            && let Some(audio) = self.cache.get(text, &profile.id).await
        {
            info!("prompt served from audio cache");
            return Ok(self.handle(audio, SynthesisSource::Cache));
        }

        let mut last_error: Option<SpeechError> = None;

        for backend in &self.backends {
            let source = backend.source();
            if !self.eligible(source, profile) {
                continue;
            }
            if !backend.is_available().await {
                debug!(?source, "synthesis tier not available, skipping");
                continue;
            }

            match backend.synthesize(text, &profile.provider_voice_id).await {
                Ok(audio) => {
                    info!(?source, size = audio.size_bytes(), "prompt synthesized");
                    if source == SynthesisSource::Cloud {
                        self.cache.put(text, &profile.id, &audio).await;
                    }
                    return Ok(self.handle(audio, source));
                },
                Err(e) if e.is_provider_failure() => {
                    warn!(?source, error = %e, "synthesis tier failed, trying next");
                    last_error = Some(e);
                },
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| SpeechError::Unavailable("no synthesis tier configured".to_string())))
    }

    /// Stop any playback in progress
    pub fn stop(&self) {
        self.sink.stop();
    }

    fn eligible(&self, source: SynthesisSource, profile: &VoiceProfile) -> bool {
        match source {
            SynthesisSource::Cache => false,
            SynthesisSource::Cloud => !profile.is_on_device(),
            SynthesisSource::OnDevice => self.capabilities.builtin_synthesis,
        }
    }

    fn handle(&self, audio: AudioData, source: SynthesisSource) -> AudioHandle {
        AudioHandle {
            audio,
            source,
            sink: self.sink.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::cache::AudioCacheConfig;
    use crate::sink::NullAudioSink;
    use crate::types::AudioFormat;

    mod doubles {
        use std::collections::HashMap;

        use parking_lot::RwLock;

        use super::*;
        use crate::ports::BlobStore;

        #[derive(Debug, Default)]
        pub struct MemoryStore {
            blobs: RwLock<HashMap<String, Vec<u8>>>,
        }

        #[async_trait]
        impl BlobStore for MemoryStore {
            async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SpeechError> {
                Ok(self.blobs.read().get(key).cloned())
            }

            async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), SpeechError> {
                self.blobs.write().insert(key.to_string(), value);
                Ok(())
            }

            async fn delete(&self, key: &str) -> Result<(), SpeechError> {
                self.blobs.write().remove(key);
                Ok(())
            }

            async fn keys(&self) -> Result<Vec<String>, SpeechError> {
                Ok(self.blobs.read().keys().cloned().collect())
            }
        }
    }

    /// Scripted synthesis tier
    struct ScriptedBackend {
        source: SynthesisSource,
        available: bool,
        fail: bool,
        calls: AtomicU32,
    }

    impl ScriptedBackend {
        fn ok(source: SynthesisSource) -> Self {
            Self {
                source,
                available: true,
                fail: false,
                calls: AtomicU32::new(0),
            }
        }

        fn failing(source: SynthesisSource) -> Self {
            Self {
                fail: true,
                ..Self::ok(source)
            }
        }

        fn unavailable(source: SynthesisSource) -> Self {
            Self {
                available: false,
                ..Self::ok(source)
            }
        }
    }

    #[async_trait]
    impl SynthesisBackend for ScriptedBackend {
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
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SpeechError::SynthesisFailed("scripted failure".to_string()))
            } else {
                let tag = match self.source {
                    SynthesisSource::Cloud => b"cloud".to_vec(),
                    _ => b"local".to_vec(),
                };
                Ok(AudioData::new(tag, AudioFormat::Mp3))
            }
        }
    }

    fn cache() -> Arc<AudioCache> {
        Arc::new(AudioCache::new(
            Arc::new(doubles::MemoryStore::default()),
            AudioCacheConfig::default(),
        ))
    }

    fn synthesizer(
        backends: Vec<Box<dyn SynthesisBackend>>,
        capabilities: Capabilities,
    ) -> SpeechSynthesizer {
        SpeechSynthesizer::new(cache(), backends, Arc::new(NullAudioSink), capabilities)
    }

    fn cloud_profile() -> VoiceProfile {
        VoiceProfile::cloud("fr-celine", "celine-v2")
    }

    #[tokio::test]
    async fn cloud_tier_resolves_and_fills_the_cache() {
        let synth = synthesizer(
            vec![Box::new(ScriptedBackend::ok(SynthesisSource::Cloud))],
            Capabilities::none(),
        );

        let first = synth.synthesize("chat", &cloud_profile()).await.unwrap();
        assert_eq!(first.source(), SynthesisSource::Cloud);

        let second = synth.synthesize("chat", &cloud_profile()).await.unwrap();
        assert_eq!(second.source(), SynthesisSource::Cache);
        assert_eq!(second.audio().data(), b"cloud");
    }

    #[tokio::test]
    async fn cloud_failure_falls_back_to_on_device() {
        let synth = synthesizer(
            vec![
                Box::new(ScriptedBackend::failing(SynthesisSource::Cloud)),
                Box::new(ScriptedBackend::ok(SynthesisSource::OnDevice)),
            ],
            Capabilities::all(),
        );

        let handle = synth.synthesize("chat", &cloud_profile()).await.unwrap();
        assert_eq!(handle.source(), SynthesisSource::OnDevice);
    }

    #[tokio::test]
    async fn on_device_output_is_not_cached() {
        let synth = synthesizer(
            vec![
                Box::new(ScriptedBackend::failing(SynthesisSource::Cloud)),
                Box::new(ScriptedBackend::ok(SynthesisSource::OnDevice)),
            ],
            Capabilities::all(),
        );
        synth.synthesize("chat", &cloud_profile()).await.unwrap();

        assert_eq!(synth.cache.stats().entries, 0);
    }

    #[tokio::test]
    async fn on_device_tier_is_skipped_without_the_capability() {
        let local = ScriptedBackend::ok(SynthesisSource::OnDevice);
        let synth = synthesizer(
            vec![
                Box::new(ScriptedBackend::failing(SynthesisSource::Cloud)),
                Box::new(local),
            ],
            Capabilities::none(),
        );

        let err = synth.synthesize("chat", &cloud_profile()).await.unwrap_err();
        assert!(matches!(err, SpeechError::SynthesisFailed(_)));
    }

    #[tokio::test]
    async fn on_device_voice_skips_cloud_and_cache() {
        let synth = synthesizer(
            vec![
                Box::new(ScriptedBackend::ok(SynthesisSource::Cloud)),
                Box::new(ScriptedBackend::ok(SynthesisSource::OnDevice)),
            ],
            Capabilities::all(),
        );

        let profile = VoiceProfile::on_device("fr-local", "fr");
        let handle = synth.synthesize("chat", &profile).await.unwrap();
        assert_eq!(handle.source(), SynthesisSource::OnDevice);
        assert_eq!(synth.cache.stats().entries, 0);
    }

    #[tokio::test]
    async fn unavailable_tiers_are_skipped_silently() {
        let synth = synthesizer(
            vec![
                Box::new(ScriptedBackend::unavailable(SynthesisSource::Cloud)),
                Box::new(ScriptedBackend::ok(SynthesisSource::OnDevice)),
            ],
            Capabilities::all(),
        );

        let handle = synth.synthesize("chat", &cloud_profile()).await.unwrap();
        assert_eq!(handle.source(), SynthesisSource::OnDevice);
    }

    #[tokio::test]
    async fn all_tiers_failing_surfaces_the_last_error() {
        let synth = synthesizer(
            vec![
                Box::new(ScriptedBackend::failing(SynthesisSource::Cloud)),
                Box::new(ScriptedBackend::failing(SynthesisSource::OnDevice)),
            ],
            Capabilities::all(),
        );

        let err = synth.synthesize("chat", &cloud_profile()).await.unwrap_err();
        assert!(matches!(err, SpeechError::SynthesisFailed(_)));
    }

    #[tokio::test]
    async fn no_backends_at_all_reports_unavailable() {
        let synth = synthesizer(Vec::new(), Capabilities::none());
        let err = synth.synthesize("chat", &cloud_profile()).await.unwrap_err();
        assert!(matches!(err, SpeechError::Unavailable(_)));
    }

    #[tokio::test]
    async fn empty_prompt_resolves_to_silence() {
        let synth = synthesizer(Vec::new(), Capabilities::none());
        let handle = synth.synthesize("   ", &cloud_profile()).await.unwrap();
        assert!(handle.audio().is_empty());
        assert!(handle.play().await.is_ok());
    }
}
