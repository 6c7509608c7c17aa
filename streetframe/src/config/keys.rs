//! Addressable configuration keys.
//!
//! Each key knows its section, how to render its current value and how to
//! validate and apply a new one. File loading goes through the same
//! [`ConfigKey::set`] as the `config set` command.

use std::path::PathBuf;
use std::str::FromStr;

use crate::imagery::MAX_IMAGE_SIZE;
use crate::logging::LogLevel;
use crate::sector::Strategy;
use crate::walker::MAX_NEIGHBOR_COUNT;

use super::{ConfigError, ConfigFile};

/// A `section.key` configuration entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    ProviderGoogleApiKey,
    ProviderQuotaHost,
    ProviderGraphFile,
    SearchRadiusMeters,
    SearchOutdoorOnly,
    SearchProbeScale,
    SearchStrategy,
    SearchNeighborCount,
    ImageryWidth,
    ImageryHeight,
    LoggingLevel,
    LoggingFile,
}

impl ConfigKey {
    /// All keys in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::ProviderGoogleApiKey,
            ConfigKey::ProviderQuotaHost,
            ConfigKey::ProviderGraphFile,
            ConfigKey::SearchRadiusMeters,
            ConfigKey::SearchOutdoorOnly,
            ConfigKey::SearchProbeScale,
            ConfigKey::SearchStrategy,
            ConfigKey::SearchNeighborCount,
            ConfigKey::ImageryWidth,
            ConfigKey::ImageryHeight,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingFile,
        ]
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::ProviderGoogleApiKey
            | ConfigKey::ProviderQuotaHost
            | ConfigKey::ProviderGraphFile => "provider",
            ConfigKey::SearchRadiusMeters
            | ConfigKey::SearchOutdoorOnly
            | ConfigKey::SearchProbeScale
            | ConfigKey::SearchStrategy
            | ConfigKey::SearchNeighborCount => "search",
            ConfigKey::ImageryWidth | ConfigKey::ImageryHeight => "imagery",
            ConfigKey::LoggingLevel | ConfigKey::LoggingFile => "logging",
        }
    }

    /// Key name within the section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::ProviderGoogleApiKey => "google_api_key",
            ConfigKey::ProviderQuotaHost => "quota_host",
            ConfigKey::ProviderGraphFile => "graph_file",
            ConfigKey::SearchRadiusMeters => "radius_meters",
            ConfigKey::SearchOutdoorOnly => "outdoor_only",
            ConfigKey::SearchProbeScale => "probe_scale",
            ConfigKey::SearchStrategy => "strategy",
            ConfigKey::SearchNeighborCount => "neighbor_count",
            ConfigKey::ImageryWidth => "width",
            ConfigKey::ImageryHeight => "height",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingFile => "file",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ProviderGoogleApiKey => {
                config.provider.google_api_key.clone().unwrap_or_default()
            }
            ConfigKey::ProviderQuotaHost => config.provider.quota_host.clone().unwrap_or_default(),
            ConfigKey::ProviderGraphFile => path_text(&config.provider.graph_file),
            ConfigKey::SearchRadiusMeters => config.search.radius_meters.to_string(),
            ConfigKey::SearchOutdoorOnly => config.search.outdoor_only.to_string(),
            ConfigKey::SearchProbeScale => config.search.probe_scale.to_string(),
            ConfigKey::SearchStrategy => config.search.strategy.to_string(),
            ConfigKey::SearchNeighborCount => config.search.neighbor_count.to_string(),
            ConfigKey::ImageryWidth => config.imagery.width.to_string(),
            ConfigKey::ImageryHeight => config.imagery.height.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.to_string(),
            ConfigKey::LoggingFile => path_text(&config.logging.file),
        }
    }

    /// Validates `value` and applies it.
    ///
    /// An empty value clears optional keys.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        match self {
            ConfigKey::ProviderGoogleApiKey => config.provider.google_api_key = optional(value),
            ConfigKey::ProviderQuotaHost => {
                let is_url = value.starts_with("http://") || value.starts_with("https://");
                if !value.is_empty() && !is_url {
                    return Err(invalid("must start with http:// or https://"));
                }
                config.provider.quota_host = optional(value);
            }
            ConfigKey::ProviderGraphFile => {
                config.provider.graph_file = optional(value).map(PathBuf::from);
            }
            ConfigKey::SearchRadiusMeters => {
                config.search.radius_meters =
                    positive(value).ok_or_else(|| invalid(POSITIVE_REASON))?;
            }
            ConfigKey::SearchOutdoorOnly => {
                config.search.outdoor_only =
                    parse_bool(value).ok_or_else(|| invalid("must be true or false"))?;
            }
            ConfigKey::SearchProbeScale => {
                config.search.probe_scale =
                    positive(value).ok_or_else(|| invalid(POSITIVE_REASON))?;
            }
            ConfigKey::SearchStrategy => {
                config.search.strategy =
                    Strategy::from_str(value).map_err(|e| invalid(&e.to_string()))?;
            }
            ConfigKey::SearchNeighborCount => {
                config.search.neighbor_count = neighbor_count(value).ok_or_else(|| {
                    invalid(&format!("must be an integer from 0 to {}", MAX_NEIGHBOR_COUNT))
                })?;
            }
            ConfigKey::ImageryWidth => {
                config.imagery.width = image_side(value).ok_or_else(|| invalid(SIDE_REASON))?;
            }
            ConfigKey::ImageryHeight => {
                config.imagery.height = image_side(value).ok_or_else(|| invalid(SIDE_REASON))?;
            }
            ConfigKey::LoggingLevel => {
                config.logging.level = LogLevel::from_str(value)
                    .map_err(|_| invalid("must be trace, debug, info, warn or error"))?;
            }
            ConfigKey::LoggingFile => config.logging.file = optional(value).map(PathBuf::from),
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

const POSITIVE_REASON: &str = "must be a positive number";
const SIDE_REASON: &str = "must be an integer from 1 to 640";

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn path_text(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

fn positive(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn neighbor_count(value: &str) -> Option<usize> {
    value
        .parse::<usize>()
        .ok()
        .filter(|count| *count <= MAX_NEIGHBOR_COUNT)
}

fn image_side(value: &str) -> Option<u32> {
    value
        .parse::<u32>()
        .ok()
        .filter(|side| (1..=MAX_IMAGE_SIZE).contains(side))
}
