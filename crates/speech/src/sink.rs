//! Audio playback sinks

use async_trait::async_trait;
use tracing::debug;

use crate::error::SpeechError;
use crate::ports::AudioSink;
use crate::types::AudioData;

/// Sink that discards audio immediately
///
/// Used in headless deployments and in tests, where synthesized prompts
/// must still resolve without an output device.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudioSink;

#[async_trait]
impl AudioSink for NullAudioSink {
    async fn play(&self, audio: &AudioData) -> Result<(), SpeechError> {
        debug!(size = audio.size_bytes(), format = ?audio.format(), "discarding audio playback");
        Ok(())
    }

    fn stop(&self) {}
}
