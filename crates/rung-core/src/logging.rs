//! Structured logging hooks.
//!
//! With the `tracing` feature the engine emits `trace!` per rung and `debug!`
//! per simulation, validation, and staged-run row; failing rows are `warn!`.
//! Without it no logging code is compiled in.
//!
//! The `tracing-json` feature adds [`init_json_logging`] for hosts that want
//! line-delimited JSON output filtered by `RUST_LOG`.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

/// Install a global JSON subscriber filtered by `RUST_LOG`.
///
/// Returns `false` when a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = init_json_logging();
        assert!(!init_json_logging());
    }
}
