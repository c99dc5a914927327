// --- File: crates/bookify_common/src/logging.rs ---
//! Logging utilities for the Bookify application.
//!
//! Provides a single place to initialize the tracing subscriber so the
//! backend binary and integration tests configure logging the same way.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default log level (INFO).
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// Respects `RUST_LOG` when set; otherwise logs the `bookify` crates at the
/// given level. Safe to call more than once (later calls are no-ops).
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("bookify={}", level).parse().expect("valid directive"));

    // try_init: a global subscriber may already be installed (e.g. in tests)
    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
