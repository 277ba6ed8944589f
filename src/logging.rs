//! Logging setup for the `crawlurl` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the caller.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks the level for this crate.
pub fn init_logging(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "warn,crawlurl=debug",
        _ => "warn,crawlurl=trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!(verbosity, "crawlurl logging initialized");
}
