//! Diagnostic logging to stderr.
//!
//! Command output goes to stdout; everything emitted through `tracing` goes to stderr so
//! that `report --json` and friends stay pipeable.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "RATTENDANCE_LOG";

/// Install the global subscriber. `RATTENDANCE_LOG` wins over `default_level`; a second
/// call is a no-op.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
