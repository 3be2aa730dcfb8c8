//! Voice profile value object

use serde::{Deserialize, Serialize};

/// Which kind of synthesis backend a voice belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceBackend {
    /// Cloud TTS provider voice
    CloudTts,
    /// On-device synthesis engine voice
    OnDeviceTts,
}

/// A voice selected by the caller for one session
///
/// `id` identifies the voice for caching purposes; `provider_voice_id` is
/// what the backend itself understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProfile {
    /// Stable voice identifier used in cache keys
    pub id: String,
    /// Backend kind this voice belongs to
    pub backend: VoiceBackend,
    /// Provider-specific voice identifier
    pub provider_voice_id: String,
}

impl VoiceProfile {
    /// Create a cloud TTS voice profile
    pub fn cloud(id: impl Into<String>, provider_voice_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            backend: VoiceBackend::CloudTts,
            provider_voice_id: provider_voice_id.into(),
        }
    }

    /// Create an on-device voice profile
    pub fn on_device(id: impl Into<String>, provider_voice_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            backend: VoiceBackend::OnDeviceTts,
            provider_voice_id: provider_voice_id.into(),
        }
    }

    /// Check whether this profile uses the on-device engine as its primary
    #[must_use]
    pub const fn is_on_device(&self) -> bool {
        matches!(self.backend, VoiceBackend::OnDeviceTts)
    }
}
