//! Tracing subscriber wiring
//!
//! Called once by the embedding binary; honors `RUST_LOG` and falls back
//! to a sensible default filter.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info,speech=debug,application=debug";

/// Install the global tracing subscriber
///
/// Safe to call once per process; a second call is a no-op because the
/// global default is already set.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
