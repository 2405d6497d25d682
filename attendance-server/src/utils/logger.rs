//! Logging Infrastructure
//!
//! `RUST_LOG` wins over the configured level. With a log directory the
//! output goes to a daily rolling file instead of stdout.

use std::path::Path;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "attendance-server";

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger with optional JSON format and file output
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    let file_writer = log_dir
        .map(Path::new)
        .filter(|p| p.exists())
        .map(|p| tracing_appender::rolling::daily(p, LOG_FILE_PREFIX));

    let result = match (json.unwrap_or(false), file_writer) {
        (true, Some(writer)) => builder.json().with_writer(writer).try_init(),
        (true, None) => builder.json().try_init(),
        (false, Some(writer)) => builder.with_ansi(false).with_writer(writer).try_init(),
        (false, None) => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logger();
        init_logger_with_file(Some("debug"), Some(true), None);
    }
}
