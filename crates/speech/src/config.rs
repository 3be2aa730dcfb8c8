//! Speech configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the speech pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Cloud TTS provider; absent means the cloud tier is skipped
    pub cloud_tts: Option<CloudTtsConfig>,
    /// Cloud transcription provider; absent means that tier is skipped
    pub cloud_stt: Option<CloudSttConfig>,
    /// On-device synthesis engine
    #[serde(default)]
    pub on_device: OnDeviceTtsConfig,
    /// Capture timing
    #[serde(default)]
    pub capture: CaptureConfig,
}

impl SpeechConfig {
    /// Validate all configured sections
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(tts) = &self.cloud_tts {
            tts.validate()?;
        }
        if let Some(stt) = &self.cloud_stt {
            stt.validate()?;
        }
        self.capture.validate()
    }
}

/// Cloud text-to-speech provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudTtsConfig {
    /// Base URL of the provider, without a trailing slash
    pub base_url: String,
    /// Bearer token, when the provider requires one
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub timeout_ms: u64,
}

impl CloudTtsConfig {
    /// Validate provider settings
    pub fn validate(&self) -> Result<(), String> {
        validate_base_url("cloud_tts", &self.base_url)
    }
}

/// Cloud speech-to-text provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudSttConfig {
    /// Base URL of the provider, without a trailing slash
    pub base_url: String,
    /// Bearer token, when the provider requires one
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub timeout_ms: u64,
    /// Language hint forwarded to the provider (ISO 639-1)
    #[serde(default)]
    pub language: Option<String>,
}

impl CloudSttConfig {
    /// Validate provider settings
    pub fn validate(&self) -> Result<(), String> {
        validate_base_url("cloud_stt", &self.base_url)
    }
}

/// On-device synthesis engine settings
///
/// The fallback tier always speaks with this fixed voice, rate and pitch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnDeviceTtsConfig {
    /// Synthesizer executable (absolute path or on PATH)
    pub executable_path: PathBuf,
    /// Engine voice / language selector
    pub voice: String,
    /// Speaking rate in words per minute
    pub rate_wpm: u32,
    /// Pitch adjustment (0-99)
    pub pitch: u32,
}

impl Default for OnDeviceTtsConfig {
    fn default() -> Self {
        Self {
            executable_path: PathBuf::from("espeak-ng"),
            voice: "fr".to_string(),
            rate_wpm: 140,
            pitch: 50,
        }
    }
}

/// Capture timing settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Duration of the fixed clip uploaded to the cloud transcriber
    #[serde(default = "default_record_duration_ms")]
    pub record_duration_ms: u64,
    /// Overall deadline for one `listen()` call
    #[serde(default = "default_listen_timeout_ms")]
    pub listen_timeout_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            record_duration_ms: default_record_duration_ms(),
            listen_timeout_ms: default_listen_timeout_ms(),
        }
    }
}

impl CaptureConfig {
    /// Validate capture timing
    pub fn validate(&self) -> Result<(), String> {
        if self.record_duration_ms == 0 {
            return Err("capture.record_duration_ms must be positive".to_string());
        }
        if self.listen_timeout_ms == 0 {
            return Err("capture.listen_timeout_ms must be positive".to_string());
        }
        Ok(())
    }
}

const fn default_request_timeout_ms() -> u64 {
    10_000
}

const fn default_record_duration_ms() -> u64 {
    3_000
}

const fn default_listen_timeout_ms() -> u64 {
    5_000
}

fn validate_base_url(section: &str, base_url: &str) -> Result<(), String> {
    if base_url.is_empty() {
        return Err(format!("{section}.base_url must not be empty"));
    }
    if base_url.ends_with('/') {
        return Err(format!("{section}.base_url must not end with a slash"));
    }
    Ok(())
}
