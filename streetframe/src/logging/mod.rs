//! Tracing subscriber setup.
//!
//! Logs go to stderr with local timestamps and, when a file is configured,
//! to that file through a non-blocking writer. `RUST_LOG` overrides the
//! configured level.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use tracing_appender::non_blocking::WorkerGuard;

/// Errors from logging setup.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Unrecognised level name.
    #[error("Invalid log level '{0}'")]
    InvalidLevel(String),

    /// The log file could not be opened.
    #[error("Cannot open log file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber was already installed.
    #[error("Logging already initialised: {0}")]
    AlreadyInitialized(String),
}

/// Minimum level that is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(LoggingError::InvalidLevel(s.to_string())),
        }
    }
}

/// Logging setup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Optional file receiving a copy of every log line.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Default filter directive: the configured level for this workspace's
    /// crates, warnings for dependencies.
    pub fn filter_directive(&self) -> String {
        format!(
            "warn,streetframe={level},streetframe_cli={level}",
            level = self.level
        )
    }
}

/// Installs the global subscriber.
///
/// Keep the returned guard alive for the life of the program; dropping it
/// flushes and stops the file writer.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    let timer = LocalTime::new(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
    ));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer.clone())
        .with_target(false);

    let (file_layer, guard) = match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::File {
                    path: path.clone(),
                    source,
                })?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_timer(timer)
                .with_ansi(false)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(level = %config.level, file = ?config.file, "Logging initialised");
    Ok(guard)
}
