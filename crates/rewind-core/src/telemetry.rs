//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Rewind tracing/logging system.
///
/// Reads the `REWIND_LOG` environment variable for per-subsystem log
/// levels. Format: `REWIND_LOG=rewind_analysis=debug,rewind_core=warn`
///
/// Falls back to `warn` if `REWIND_LOG` is not set or is invalid.
///
/// This function is idempotent — calling it multiple times is safe.
pub fn init() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("REWIND_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
