//! Diagnostic output initialization.
//!
//! stdout belongs to the invocation result, nothing else. All tracing
//! output is pinned to an explicit stderr writer, and the default filter
//! is `off` so a run is silent unless the caller opts in via the
//! `EXECUTOR_LOG` environment variable (standard env-filter syntax, e.g.
//! `EXECUTOR_LOG=executor=debug`).
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the diagnostic filter.
pub const LOG_ENV_VAR: &str = "EXECUTOR_LOG";

/// Installs the process-wide subscriber. Call once, before any work.
///
/// Returns quietly if a subscriber is already installed (tests install
/// their own).
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
