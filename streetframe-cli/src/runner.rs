//! Shared setup for commands that do real work.

use std::path::{Path, PathBuf};

use streetframe::config::ConfigFile;
use streetframe::logging::{init_logging, LogLevel, WorkerGuard};

use crate::error::CliError;

/// Loaded configuration plus the logging guard for one CLI invocation.
pub struct CliRunner {
    config: ConfigFile,
    config_path: PathBuf,
    _log_guard: Option<WorkerGuard>,
}

impl CliRunner {
    /// Loads configuration from `config_path` and installs logging.
    ///
    /// `verbose` forces the debug level regardless of the file.
    pub fn new(config_path: &Path, verbose: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load_from(config_path)?;

        let mut logging = config.logging_config();
        if verbose {
            logging.level = LogLevel::Debug;
        }
        let log_guard = init_logging(&logging)?;

        Ok(Self {
            config,
            config_path: config_path.to_path_buf(),
            _log_guard: log_guard,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Logs the command being run and where its settings came from.
    pub fn log_startup(&self, command: &str) {
        tracing::info!(
            command,
            version = env!("CARGO_PKG_VERSION"),
            config = %self.config_path.display(),
            "Starting streetframe"
        );
    }
}
