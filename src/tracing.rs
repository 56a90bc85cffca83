//! Logging for the `csview` binary
//!
//! stdout carries only the table, info report or JSON, so it can be piped.
//! Diagnostics go to two places:
//! - stderr, at `warn` unless `RUST_LOG` says otherwise (`RUST_LOG=debug`,
//!   or `RUST_LOG=csview::csv=trace` for per-line reader events)
//! - a daily file under [`crate::config_paths::logs_dir`] at `debug`, so a bad
//!   read can be inspected after the fact without rerunning
//!
//! The library itself only emits events; it never installs a subscriber.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::{ensure_logs_dir, LOG_FILE_PREFIX};

/// Install the stderr and log-file layers
///
/// A missing or unwritable log directory only disables the file layer.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match ensure_logs_dir() {
        Ok(logs_dir) => Some(
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX))
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new("csview=debug")),
        ),
        Err(e) => {
            eprintln!("csview: file logging disabled: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
