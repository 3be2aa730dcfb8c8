//! Types for speech processing
//!
//! Audio containers, tier tags, and the per-listen recognition attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported audio formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 format (cloud TTS output)
    Mp3,
    /// WAV format (on-device synthesis, microphone clips)
    Wav,
    /// OGG container
    Ogg,
}

impl AudioFormat {
    /// Get the MIME type for this audio format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
        }
    }

    /// Get the file extension for this audio format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
        }
    }
}

/// Container for audio data with its format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    data: Vec<u8>,
    format: AudioFormat,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the audio format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Get the MIME type for this audio
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Size of the audio payload in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Where a synthesized prompt came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisSource {
    /// Served from the audio cache
    Cache,
    /// Fetched from the cloud TTS provider
    Cloud,
    /// Synthesized live on-device
    OnDevice,
}

/// Recognition backend tiers, in descending preference order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionTier {
    /// Offline streaming model
    OfflineModel,
    /// Cloud transcription API
    CloudApi,
    /// Platform built-in recognizer
    Builtin,
}

impl RecognitionTier {
    /// Stable string form for logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OfflineModel => "offline_model",
            Self::CloudApi => "cloud_api",
            Self::Builtin => "builtin",
        }
    }
}

/// One resolved listening action
///
/// Created per `listen()` call and discarded after verification; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionAttempt {
    /// When the listen was requested
    pub requested_at: DateTime<Utc>,
    /// Which tier produced the hypothesis
    pub backend: RecognitionTier,
    /// Hypothesis exactly as the backend reported it
    pub raw_text: String,
    /// Hypothesis normalized for matching
    pub normalized_text: String,
}

impl RecognitionAttempt {
    /// Build an attempt from a backend hypothesis
    #[must_use]
    pub fn new(backend: RecognitionTier, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let normalized_text = domain::phonetics::normalize(&raw_text);
        Self {
            requested_at: Utc::now(),
            backend,
            raw_text,
            normalized_text,
        }
    }

    /// Override the request timestamp (set when capture started)
    #[must_use]
    pub const fn with_requested_at(mut self, requested_at: DateTime<Utc>) -> Self {
        self.requested_at = requested_at;
        self
    }

    /// Check if the hypothesis carries no usable content
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalized_text.is_empty()
    }
}
