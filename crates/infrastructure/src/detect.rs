//! Platform capability detection
//!
//! Probed once at startup by the composition root and injected into the
//! resolvers; nothing queries the platform ad hoc afterwards.

use tracing::info;

use speech::Capabilities;
use speech::config::OnDeviceTtsConfig;
use speech::ports::SynthesisBackend;
use speech::providers::EspeakSynthesis;

/// Probe which speech facilities this host provides
///
/// On-device synthesis is detected by probing the configured engine
/// executable. Recognition has no host-provided engine on server
/// platforms; pass `has_system_recognition` when a platform recognizer
/// adapter is wired in.
pub async fn detect_capabilities(
    on_device: &OnDeviceTtsConfig,
    has_system_recognition: bool,
) -> Capabilities {
    let builtin_synthesis = EspeakSynthesis::new(on_device.clone()).is_available().await;

    let capabilities = Capabilities {
        builtin_synthesis,
        builtin_recognition: has_system_recognition,
    };
    info!(?capabilities, "platform capabilities detected");
    capabilities
}
