//! Logging and tracing configuration
//!
//! The CLI uses stdout for the wizard itself, so logs always go to stderr,
//! and optionally to a file in the data directory.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::LoggingConfig;
use super::paths;

/// Name of the log file inside the log directory
const LOG_FILE: &str = "kalkulator.log";

/// Initialize tracing for the CLI
///
/// Logs are controlled by the `RUST_LOG` environment variable, falling back
/// to the configured filter. When file logging is enabled the returned guard
/// must be held until exit so buffered lines are flushed.
pub fn init_cli(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let file_writer = if config.file {
        match paths::ensure_log_dir() {
            Ok(Some(dir)) => Some(tracing_appender::non_blocking(
                tracing_appender::rolling::never(dir, LOG_FILE),
            )),
            Ok(None) => None,
            Err(e) => {
                eprintln!("Warning: Could not create log directory: {}", e);
                None
            }
        }
    } else {
        None
    };

    match file_writer {
        Some((writer, guard)) => {
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();

            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}

/// Get the path to the log file
pub fn log_file_path() -> Option<PathBuf> {
    paths::log_dir().map(|d| d.join(LOG_FILE))
}
