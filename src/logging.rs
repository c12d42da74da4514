//! Logging setup for the command-line host

use std::io::IsTerminal;

/// Environment variable checked before `RUST_LOG`
pub const LOG_ENV: &str = "BUNDLE_COPY_LOG";

/// Install the global tracing subscriber
///
/// Filter priority: `BUNDLE_COPY_LOG`, then `RUST_LOG`, then `debug` when
/// `debug` is set and `warn` otherwise. Logs go to stderr so they never mix
/// with the verbose copy listing on stdout.
///
/// Calling this twice leaves the first subscriber in place.
pub fn init(debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(debug)
                .with_ansi(std::io::stderr().is_terminal())
                .without_time(),
        )
        .try_init();
}

fn default_directive(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "warn"
    }
}
