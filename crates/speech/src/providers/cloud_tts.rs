//! Cloud text-to-speech backend
//!
//! Speaks to an HTTP provider exposing `POST /v1/synthesize`: JSON
//! `{text, voice_id}` in, JSON `{audio}` with a base64-encoded MP3
//! payload out.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::CloudTtsConfig;
use crate::error::SpeechError;
use crate::ports::SynthesisBackend;
use crate::types::{AudioData, AudioFormat, SynthesisSource};

/// HTTP adapter for the cloud synthesis tier
#[derive(Debug, Clone)]
pub struct CloudTtsBackend {
    client: Client,
    config: CloudTtsConfig,
}

/// Synthesis request body
#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    voice_id: &'a str,
}

/// Synthesis response body
#[derive(Debug, Deserialize)]
struct SynthesisResponse {
    /// Base64-encoded MP3 payload
    audio: String,
}

impl CloudTtsBackend {
    /// Create the backend from provider settings
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` when the settings are invalid
    /// or the HTTP client cannot be built.
    pub fn new(config: CloudTtsConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn synthesize_url(&self) -> String {
        format!("{}/v1/synthesize", self.config.base_url)
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }
}

#[async_trait]
impl SynthesisBackend for CloudTtsBackend {
    fn source(&self) -> SynthesisSource {
        SynthesisSource::Cloud
    }

    async fn is_available(&self) -> bool {
        true
    }

    #[instrument(skip(self, text), fields(text_len = text.len(), voice = %provider_voice_id))]
    async fn synthesize(
        &self,
        text: &str,
        provider_voice_id: &str,
    ) -> Result<AudioData, SpeechError> {
        let request = SynthesisRequest {
            text,
            voice_id: provider_voice_id,
        };

        let response = self
            .client
            .post(self.synthesize_url())
            .bearer_auth(self.api_key())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SpeechError::SynthesisFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let body: SynthesisResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::MalformedResponse(format!("failed to parse response: {e}")))?;

        let bytes = BASE64
            .decode(&body.audio)
            .map_err(|e| SpeechError::MalformedResponse(format!("invalid base64 audio: {e}")))?;

        if bytes.is_empty() {
            return Err(SpeechError::MalformedResponse(
                "provider returned an empty audio payload".to_string(),
            ));
        }

        debug!(audio_size = bytes.len(), "cloud synthesis complete");
        Ok(AudioData::new(bytes, AudioFormat::Mp3))
    }
}
