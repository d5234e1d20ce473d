//! Telemetry helpers for structured logging.

use tracing_subscriber::EnvFilter;

/// Install a tracing subscriber tuned for pool diagnostics if none is set.
///
/// `RUST_LOG` takes precedence; without it the filter defaults to
/// `workpool=info`. Worker thread names (`<prefix>-<n>`) are included in
/// the output so lifecycle events can be followed per agent. Library users
/// normally install their own subscriber; tests and examples call this.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("workpool=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .try_init();
}
