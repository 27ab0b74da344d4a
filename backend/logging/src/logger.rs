//! Structured Logger
//!
//! Wraps `tracing` with a rolling NDJSON file and an optional console layer.
//! Both outputs pass through [`Redacting`].

use std::path::Path;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::redact::Redacting;

/// Where log lines go besides the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Human-readable lines on stderr as well. Stdout stays free for results.
    ConsoleAndFile,
    /// File only, for when a full-screen UI owns the terminal.
    FileOnly,
}

/// Initialize the global structured logger.
///
/// `RUST_LOG` wins over `level`. Calling this twice is harmless. Fails only
/// when the log directory cannot be created.
pub fn init_logger<P: AsRef<Path>>(log_dir: P, level: &str, output: LogOutput) -> Result<(), InitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Writes `textlift.log.YYYY-MM-DD`
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("textlift.log")
        .build(log_dir)?;
    let file_layer = fmt::layer()
        .json()
        .with_writer(Redacting::new(file_appender))
        .with_ansi(false);

    let console_layer = (output == LogOutput::ConsoleAndFile).then(|| {
        fmt::layer()
            .with_writer(Redacting::new(std::io::stderr))
            .with_target(false)
            .with_ansi(true)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
    Ok(())
}
