//! Infrastructure for Parlons
//!
//! Everything that touches the host system: configuration loading, blob
//! stores backing the audio cache, audio output through an external
//! player, and platform capability detection.

pub mod audio;
pub mod config;
pub mod detect;
pub mod store;
pub mod telemetry;

pub use audio::{PlaybackConfig, ProcessAudioSink};
pub use config::AppConfig;
pub use detect::detect_capabilities;
pub use store::{FileBlobStore, MemoryBlobStore};
pub use telemetry::init_tracing;
