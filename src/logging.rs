//! Tracing setup
//!
//! Events go to stderr so command output on stdout stays clean. `RUST_LOG`
//! overrides the default, which only shows this crate's warnings.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "budget_guard=warn";

/// Initializes the global tracing subscriber once per process.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // another subscriber may already be installed, e.g. by a test harness
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
