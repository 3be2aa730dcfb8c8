//! Speech I/O for Parlons
//!
//! Turns text into spoken audio and spoken audio into text across
//! unreliable, heterogeneous backends:
//! - `SpeechSynthesizer` - cache-first TTS with cloud and on-device tiers
//! - `SpeechRecognizer` - STT with offline-model, cloud and built-in tiers
//! - `AudioCache` - content-addressed, capacity-bounded audio cache
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` defines the backend, microphone, sink and store traits
//! - `providers` contains concrete adapters (cloud HTTP, espeak CLI, tier
//!   wrappers over injected model/engine ports)
//! - the two resolvers iterate an explicit ordered list of tagged backends
//!   and convert every tier failure into "try the next tier"
//!
//! # Example
//!
//! ```ignore
//! use speech::{SpeechSynthesizer, AudioCache, NullAudioSink};
//!
//! let synthesizer = SpeechSynthesizer::new(cache, backends, sink, capabilities);
//! let handle = synthesizer.synthesize("chat", &profile).await?;
//! handle.play().await?;
//! ```

pub mod cache;
pub mod capability;
pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod recognizer;
pub mod sink;
pub mod synthesizer;
pub mod types;

pub use cache::{AudioCache, AudioCacheConfig, CacheStats};
pub use capability::Capabilities;
pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::{
    AudioSink, BlobStore, Microphone, MicrophoneStream, RecognitionBackend, StreamingModel,
    SynthesisBackend, SystemRecognition,
};
pub use recognizer::SpeechRecognizer;
pub use sink::NullAudioSink;
pub use synthesizer::{AudioHandle, SpeechSynthesizer};
pub use types::{AudioData, AudioFormat, RecognitionAttempt, RecognitionTier, SynthesisSource};
