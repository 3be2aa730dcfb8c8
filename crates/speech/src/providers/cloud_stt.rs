//! Cloud speech-to-text backend
//!
//! Records a fixed-duration clip from the microphone and posts it as a
//! raw body to `POST /v1/audio/transcriptions`; the provider answers with
//! JSON `{ "text": ... }`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::{CaptureConfig, CloudSttConfig};
use crate::error::SpeechError;
use crate::ports::{MicrophoneStream, RecognitionBackend};
use crate::types::RecognitionTier;

/// HTTP adapter for the cloud transcription tier
#[derive(Debug, Clone)]
pub struct CloudSttBackend {
    client: Client,
    config: CloudSttConfig,
    capture: CaptureConfig,
}

/// Transcription response body
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl CloudSttBackend {
    /// Create the backend from provider and capture settings
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` when the settings are invalid
    /// or the HTTP client cannot be built.
    pub fn new(config: CloudSttConfig, capture: CaptureConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        capture.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            config,
            capture,
        })
    }

    fn transcription_url(&self) -> String {
        match &self.config.language {
            Some(language) => format!(
                "{}/v1/audio/transcriptions?language={language}",
                self.config.base_url
            ),
            None => format!("{}/v1/audio/transcriptions", self.config.base_url),
        }
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }
}

#[async_trait]
impl RecognitionBackend for CloudSttBackend {
    fn tier(&self) -> RecognitionTier {
        RecognitionTier::CloudApi
    }

    async fn is_available(&self) -> bool {
        true
    }

    #[instrument(skip(self, mic))]
    async fn recognize(&self, mic: &mut dyn MicrophoneStream) -> Result<String, SpeechError> {
        let clip = mic
            .record(Duration::from_millis(self.capture.record_duration_ms))
            .await?;
        if clip.is_empty() {
            return Err(SpeechError::RecognitionFailed(
                "captured clip is empty".to_string(),
            ));
        }

        debug!(clip_size = clip.size_bytes(), "uploading clip for transcription");
        let mime_type = clip.mime_type();

        let response = self
            .client
            .post(self.transcription_url())
            .bearer_auth(self.api_key())
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .body(clip.into_data())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SpeechError::RecognitionFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let transcription: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::MalformedResponse(format!("failed to parse response: {e}")))?;

        debug!(text_len = transcription.text.len(), "transcription complete");
        Ok(transcription.text)
    }
}
