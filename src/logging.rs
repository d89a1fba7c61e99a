//! Logging setup.
//!
//! Structured logging via the `tracing` crate. Library code only emits
//! events; this helper wires a subscriber for binaries and tests that want
//! the store's debug/warn output on stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize a stderr subscriber filtered by `RUST_LOG` (default: info).
///
/// Safe to call more than once; later calls are no-ops, so tests can each
/// call it without coordinating.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = Registry::default()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
