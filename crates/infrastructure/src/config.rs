//! Application configuration
//!
//! Loaded from an optional `config` TOML file with `PARLONS_`-prefixed
//! environment overrides (e.g. `PARLONS_SPEECH__CAPTURE__LISTEN_TIMEOUT_MS`).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use application::SessionConfig;
use speech::cache::AudioCacheConfig;
use speech::config::SpeechConfig;

use crate::audio::PlaybackConfig;

/// Cache persistence settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory for the persistent audio cache; in-memory when absent
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Speech pipeline settings
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Audio cache sizing
    #[serde(default)]
    pub cache: AudioCacheConfig,

    /// Session pacing and matching
    #[serde(default)]
    pub session: SessionConfig,

    /// External player commands
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Cache persistence
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Returns `config::ConfigError` when a source cannot be read, a value
    /// cannot be deserialized, or validation fails.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a named file plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns `config::ConfigError` when a source cannot be read, a value
    /// cannot be deserialized, or validation fails.
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("PARLONS")
                    .separator("__")
                    .try_parsing(true),
            );

        let app_config: Self = builder.build()?.try_deserialize()?;
        app_config
            .validate()
            .map_err(config::ConfigError::Message)?;
        Ok(app_config)
    }

    /// Validate all sections
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        self.speech.validate()?;
        if self.cache.capacity == 0 {
            return Err("cache.capacity must be positive".to_string());
        }
        if self.cache.eviction_batch == 0 {
            return Err("cache.eviction_batch must be positive".to_string());
        }
        Ok(())
    }
}
