//! On-device synthesis over the espeak-ng CLI
//!
//! The fallback tier: always speaks with the configured voice, rate and
//! pitch, regardless of the voice the caller asked for. Text goes in on
//! stdin, WAV comes out on stdout.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use crate::config::OnDeviceTtsConfig;
use crate::error::SpeechError;
use crate::ports::SynthesisBackend;
use crate::types::{AudioData, AudioFormat, SynthesisSource};

/// espeak-ng CLI adapter for the on-device synthesis tier
#[derive(Debug, Clone)]
pub struct EspeakSynthesis {
    config: OnDeviceTtsConfig,
}

impl EspeakSynthesis {
    /// Create the adapter from engine settings
    #[must_use]
    pub const fn new(config: OnDeviceTtsConfig) -> Self {
        Self { config }
    }

    async fn run_espeak(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let mut cmd = Command::new(&self.config.executable_path);
        cmd.arg("-v")
            .arg(&self.config.voice)
            .arg("-s")
            .arg(self.config.rate_wpm.to_string())
            .arg("-p")
            .arg(self.config.pitch.to_string())
            .arg("--stdout")
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("running espeak-ng: {:?}", cmd);

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpeechError::Unavailable(format!(
                    "espeak-ng not found at '{}'",
                    self.config.executable_path.display()
                ))
            } else {
                SpeechError::SynthesisFailed(format!("failed to run espeak-ng: {e}"))
            }
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await.map_err(|e| {
                SpeechError::SynthesisFailed(format!("failed to write to espeak-ng stdin: {e}"))
            })?;
        }

        let output = child.wait_with_output().await.map_err(|e| {
            SpeechError::SynthesisFailed(format!("failed to wait for espeak-ng: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("espeak-ng failed: {}", stderr);
            return Err(SpeechError::SynthesisFailed(format!(
                "espeak-ng exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        if output.stdout.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "espeak-ng produced no output".to_string(),
            ));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl SynthesisBackend for EspeakSynthesis {
    fn source(&self) -> SynthesisSource {
        SynthesisSource::OnDevice
    }

    async fn is_available(&self) -> bool {
        let path = &self.config.executable_path;
        if path.is_absolute() {
            return path.exists();
        }
        Command::new(path)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success())
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(
        &self,
        text: &str,
        _provider_voice_id: &str,
    ) -> Result<AudioData, SpeechError> {
        if text.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "cannot synthesize empty text".to_string(),
            ));
        }

        let wav = self.run_espeak(text).await?;
        debug!(audio_size = wav.len(), "on-device synthesis complete");
        Ok(AudioData::new(wav, AudioFormat::Wav))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config_for(executable: &str) -> OnDeviceTtsConfig {
        OnDeviceTtsConfig {
            executable_path: PathBuf::from(executable),
            voice: "fr".to_string(),
            rate_wpm: 140,
            pitch: 50,
        }
    }

    #[tokio::test]
    async fn missing_executable_is_unavailable() {
        let backend = EspeakSynthesis::new(config_for("/nonexistent/espeak-ng"));
        assert!(!backend.is_available().await);

        let err = backend.synthesize("chat", "fr").await.unwrap_err();
        assert!(matches!(err, SpeechError::Unavailable(_)));
    }

    #[tokio::test]
    async fn empty_text_is_rejected_without_spawning() {
        let backend = EspeakSynthesis::new(config_for("/nonexistent/espeak-ng"));
        let err = backend.synthesize("", "fr").await.unwrap_err();
        assert!(matches!(err, SpeechError::SynthesisFailed(_)));
    }

    /// Fake engine: drains stdin, emits a fixed payload on stdout
    #[cfg(unix)]
    fn fake_engine(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("fake-espeak");
        std::fs::write(&path, format!("#!/bin/sh\ncat > /dev/null\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn engine_stdout_becomes_wav_audio() {
        let dir = tempfile::tempdir().unwrap();
        let exe = fake_engine(&dir, "printf 'RIFFdata'");
        let mut config = config_for("unused");
        config.executable_path = exe;

        let backend = EspeakSynthesis::new(config);
        assert!(backend.is_available().await);

        let audio = backend.synthesize("chat", "fr").await.unwrap();
        assert_eq!(audio.format(), AudioFormat::Wav);
        assert_eq!(audio.data(), b"RIFFdata");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn engine_failure_is_a_synthesis_failure() {
        let dir = tempfile::tempdir().unwrap();
        let exe = fake_engine(&dir, "echo 'no voice' >&2; exit 1");
        let mut config = config_for("unused");
        config.executable_path = exe;

        let err = EspeakSynthesis::new(config)
            .synthesize("chat", "fr")
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::SynthesisFailed(_)));
        assert!(err.to_string().contains("no voice"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn silent_engine_output_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let exe = fake_engine(&dir, "true");
        let mut config = config_for("unused");
        config.executable_path = exe;

        let err = EspeakSynthesis::new(config)
            .synthesize("chat", "fr")
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::SynthesisFailed(_)));
    }

    #[test]
    fn reports_the_on_device_tier() {
        let backend = EspeakSynthesis::new(OnDeviceTtsConfig::default());
        assert_eq!(backend.source(), SynthesisSource::OnDevice);
    }
}
