//! Logging setup
//!
//! Verbosity count maps to a level: 0 = error, 1 = info, 2+ = debug.
//! `RUST_LOG` wins when it is set.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

/// Install the global subscriber. Logs go to stderr, stdout carries the snapshot.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity).to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
