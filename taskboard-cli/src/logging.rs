//! Tracing subscriber setup

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// The filter directive for the given flags and configured level.
///
/// `--debug` always wins; otherwise `RUST_LOG` is consulted by [`init`]
/// before this value is used.
pub fn default_directive(debug: bool, quiet: bool, log_level: &str) -> String {
    if debug {
        "debug".to_string()
    } else if quiet {
        "warn".to_string()
    } else {
        log_level.to_string()
    }
}

fn build_filter(debug: bool, quiet: bool, log_level: &str) -> EnvFilter {
    let directive = default_directive(debug, quiet, log_level);
    if debug {
        return EnvFilter::new(directive);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

/// Install the global subscriber, writing to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(debug: bool, quiet: bool, log_level: &str) {
    let filter = build_filter(debug, quiet, log_level);
    let _ = Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(false),
        )
        .try_init();
}
