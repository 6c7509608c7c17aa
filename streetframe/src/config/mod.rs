//! INI configuration file.
//!
//! Settings live in `~/.config/streetframe/config.ini` (the platform config
//! directory on other systems):
//!
//! ```ini
//! [provider]
//! google_api_key = ...
//! quota_host = https://example.com
//! graph_file = /path/to/panoramas.json
//!
//! [search]
//! radius_meters = 100
//! outdoor_only = true
//! probe_scale = 2.0
//! strategy = vector
//! neighbor_count = 2
//!
//! [imagery]
//! width = 640
//! height = 640
//!
//! [logging]
//! level = info
//! file = /path/to/streetframe.log
//! ```
//!
//! Missing keys take their defaults. Every value is validated on load with
//! the same rules `config set` applies.

mod file;
mod keys;

pub use file::{
    ConfigFile, ImagerySettings, LoggingSettings, ProviderSettings, SearchSettings,
};
pub use keys::ConfigKey;

use std::path::PathBuf;

use thiserror::Error;

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "streetframe";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Errors from reading, writing or editing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("Config file I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid INI.
    #[error("Config file {path} is malformed: {message}")]
    Parse { path: PathBuf, message: String },

    /// The key is not a known `section.key` name.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// A value failed validation.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Directory holding the configuration file.
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Path of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}
