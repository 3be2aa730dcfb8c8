//! Audio output through an external player process
//!
//! Prompts are piped to a CLI player on stdin (`mpg123` for MP3, `aplay`
//! for WAV by default). `play` resolves when the player exits; `stop`
//! kills the player in flight.

use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use speech::ports::AudioSink;
use speech::{AudioData, AudioFormat, SpeechError};

/// Player command lines per audio format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Command and arguments for MP3 payloads, reading from stdin
    #[serde(default = "default_mp3_player")]
    pub mp3_player: Vec<String>,
    /// Command and arguments for WAV payloads, reading from stdin
    #[serde(default = "default_wav_player")]
    pub wav_player: Vec<String>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            mp3_player: default_mp3_player(),
            wav_player: default_wav_player(),
        }
    }
}

fn default_mp3_player() -> Vec<String> {
    vec!["mpg123".to_string(), "-q".to_string(), "-".to_string()]
}

fn default_wav_player() -> Vec<String> {
    vec!["aplay".to_string(), "-q".to_string(), "-".to_string()]
}

impl PlaybackConfig {
    fn command_for(&self, format: AudioFormat) -> &[String] {
        match format {
            AudioFormat::Mp3 => &self.mp3_player,
            AudioFormat::Wav | AudioFormat::Ogg => &self.wav_player,
        }
    }
}

/// Sink spawning an external player per prompt
///
/// Only one player runs at a time: a new `play` kills the player it
/// displaces, and the displaced call resolves as if stopped.
#[derive(Debug)]
pub struct ProcessAudioSink {
    config: PlaybackConfig,
    /// Player currently running, tagged with its playback generation
    playing: Mutex<Option<(u64, Child)>>,
    generation: AtomicU64,
}

impl ProcessAudioSink {
    /// Create a sink from player settings
    #[must_use]
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            playing: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl AudioSink for ProcessAudioSink {
    async fn play(&self, audio: &AudioData) -> Result<(), SpeechError> {
        if audio.is_empty() {
            return Ok(());
        }

        let command = self.config.command_for(audio.format());
        let (program, args) = command.split_first().ok_or_else(|| {
            SpeechError::Configuration("player command is empty".to_string())
        })?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpeechError::Unavailable(format!("cannot run {program}: {e}")))?;

        debug!(%program, size = audio.size_bytes(), "playing audio");

        if let Some(mut stdin) = child.stdin.take() {
            // A killed player closes the pipe early; that is not a failure.
            if let Err(e) = stdin.write_all(audio.data()).await {
                debug!(error = %e, "player closed its input early");
            }
        }

        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some((_, mut displaced)) = self.playing.lock().replace((generation, child)) {
            debug!("displacing a running player");
            if let Err(e) = displaced.start_kill() {
                warn!(error = %e, "failed to kill displaced player");
            }
        }

        // Poll the slot rather than holding a lock across the wait, so
        // `stop` can take the child out from under us.
        loop {
            {
                let mut slot = self.playing.lock();
                match slot.as_mut() {
                    Some((owner, child)) if *owner == generation => match child.try_wait() {
                        Ok(Some(status)) => {
                            *slot = None;
                            if status.success() {
                                return Ok(());
                            }
                            return Err(SpeechError::Unavailable(format!(
                                "player exited with status {status}"
                            )));
                        },
                        Ok(None) => {},
                        Err(e) => {
                            *slot = None;
                            return Err(SpeechError::Unavailable(format!(
                                "cannot wait for player: {e}"
                            )));
                        },
                    },
                    // Stopped, or displaced by a newer playback.
                    _ => return Ok(()),
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    fn stop(&self) {
        if let Some((_, mut child)) = self.playing.lock().take() {
            debug!("stopping audio playback");
            if let Err(e) = child.start_kill() {
                warn!(error = %e, "failed to kill player");
            }
        }
    }
}
