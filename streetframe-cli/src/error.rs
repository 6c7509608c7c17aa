//! CLI error type.

use std::fmt;

use streetframe::config::ConfigError;
use streetframe::frames::FrameError;
use streetframe::logging::LoggingError;
use streetframe::provider::ProviderError;
use streetframe::quota::QuotaError;
use streetframe::walker::WalkError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Missing or inconsistent settings.
    Config(String),

    /// The configuration file could not be read or written.
    ConfigFile(ConfigError),

    /// Logging could not be set up.
    Logging(LoggingError),

    /// A provider could not be set up, or its data could not be loaded.
    Provider(ProviderError),

    /// The adjacency walk failed.
    Walk(WalkError),

    /// Frame planning failed.
    Frames(FrameError),

    /// The quota service could not be used.
    Quota(QuotaError),

    /// Results could not be written as JSON.
    Output(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Logging(e) => write!(f, "Failed to set up logging: {}", e),
            CliError::Provider(e) => write!(f, "Provider error: {}", e),
            CliError::Walk(e) => write!(f, "Walk failed: {}", e),
            CliError::Frames(e) => write!(f, "Frame planning failed: {}", e),
            CliError::Quota(e) => write!(f, "Quota check failed: {}", e),
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::ConfigFile(e) => Some(e),
            CliError::Logging(e) => Some(e),
            CliError::Provider(e) => Some(e),
            CliError::Walk(e) => Some(e),
            CliError::Frames(e) => Some(e),
            CliError::Quota(e) => Some(e),
            CliError::Output(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Provider(e)
    }
}

impl From<WalkError> for CliError {
    fn from(e: WalkError) -> Self {
        CliError::Walk(e)
    }
}

impl From<FrameError> for CliError {
    fn from(e: FrameError) -> Self {
        CliError::Frames(e)
    }
}

impl From<QuotaError> for CliError {
    fn from(e: QuotaError) -> Self {
        CliError::Quota(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("no graph file".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("no graph file"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_walk_error() {
        let err: CliError = WalkError::InvalidOrientation("up".to_string()).into();
        assert!(matches!(err, CliError::Walk(_)));
        assert!(err.source().is_some());
    }
}
