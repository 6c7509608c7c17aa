//! Typed view of the configuration file.

use std::path::{Path, PathBuf};

use ini::Ini;

use crate::imagery::{ImageSize, MAX_IMAGE_SIZE};
use crate::logging::{LogLevel, LoggingConfig};
use crate::sector::{Strategy, DEFAULT_PROBE_SCALE};
use crate::walker::{WalkerConfig, DEFAULT_NEIGHBOR_COUNT, DEFAULT_SEARCH_RADIUS_METERS};

use super::{config_file_path, ConfigError, ConfigKey};

/// `[provider]` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderSettings {
    /// Google Maps Platform API key.
    pub google_api_key: Option<String>,
    /// Usage service host for quota checks.
    pub quota_host: Option<String>,
    /// Panorama graph JSON used for offline walks.
    pub graph_file: Option<PathBuf>,
}

/// `[search]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub radius_meters: f64,
    pub outdoor_only: bool,
    pub probe_scale: f64,
    pub strategy: Strategy,
    pub neighbor_count: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
            outdoor_only: true,
            probe_scale: DEFAULT_PROBE_SCALE,
            strategy: Strategy::default(),
            neighbor_count: DEFAULT_NEIGHBOR_COUNT,
        }
    }
}

/// `[imagery]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagerySettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ImagerySettings {
    fn default() -> Self {
        Self {
            width: MAX_IMAGE_SIZE,
            height: MAX_IMAGE_SIZE,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggingSettings {
    pub level: LogLevel,
    pub file: Option<PathBuf>,
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub provider: ProviderSettings,
    pub search: SearchSettings,
    pub imagery: ImagerySettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Loads the default configuration file, or defaults if it does not
    /// exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Loads a configuration file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| match e {
            ini::Error::Io(source) => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
            ini::Error::Parse(parse) => ConfigError::Parse {
                path: path.to_path_buf(),
                message: parse.to_string(),
            },
        })?;

        Self::from_ini(&ini)
    }

    /// Parses configuration from INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|section| section.get(key.key_name()));
            if let Some(value) = value {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Saves to the default configuration file, creating its directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Saves to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        self.to_ini().write_to_file(path).map_err(io_error)?;

        tracing::debug!(path = %path.display(), "Saved config file");
        Ok(())
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }
        ini
    }

    /// Walker settings from the `[search]` section.
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig::default()
            .with_search_radius(self.search.radius_meters)
            .with_outdoor_only(self.search.outdoor_only)
            .with_probe_scale(self.search.probe_scale)
            .with_strategy(self.search.strategy)
    }

    /// Image size from the `[imagery]` section.
    pub fn image_size(&self) -> ImageSize {
        ImageSize::new(self.imagery.width, self.imagery.height)
    }

    /// Logging settings from the `[logging]` section.
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.logging.level,
            file: self.logging.file.clone(),
        }
    }
}
