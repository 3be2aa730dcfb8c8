//! Concrete backend adapters
//!
//! - `cloud_tts` / `cloud_stt` - HTTP providers
//! - `espeak` - on-device synthesis over the espeak-ng CLI
//! - `offline` - streaming-model recognition tier
//! - `builtin` - platform built-in recognition tier

pub mod builtin;
pub mod cloud_stt;
pub mod cloud_tts;
pub mod espeak;
pub mod offline;

pub use builtin::BuiltinRecognition;
pub use cloud_stt::CloudSttBackend;
pub use cloud_tts::CloudTtsBackend;
pub use espeak::EspeakSynthesis;
pub use offline::OfflineModelBackend;
