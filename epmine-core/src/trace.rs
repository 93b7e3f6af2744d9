//! Tracing bootstrap.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber with the default `info` filter.
/// Idempotent: repeated calls (e.g. from parallel tests) are no-ops.
pub fn init() {
    init_with_filter("info");
}

/// Install the global subscriber. `RUST_LOG` overrides `default_filter`.
pub fn init_with_filter(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
