//! Structured logging setup for the binary.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber, honouring `RUST_LOG` when set.
///
/// Safe to call more than once; later calls are no-ops.
pub fn initialize() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
