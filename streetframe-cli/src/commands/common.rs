//! Common types and utilities shared across CLI commands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::Serialize;
use streetframe::config::ConfigFile;
use streetframe::provider::PanoramaGraph;
use streetframe::quota::QuotaKind;
use streetframe::sector::Strategy;
use streetframe::walker::{Orientation, WalkerConfig, MAX_NEIGHBOR_COUNT};

use crate::error::CliError;

/// Sector membership strategy for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum StrategyArg {
    /// Dot products against the boundary direction vectors
    Vector,
    /// Wrap-aware comparison of headings against the boundaries
    HeadingRange,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Vector => Strategy::VectorDotProduct,
            StrategyArg::HeadingRange => Strategy::HeadingRange,
        }
    }
}

/// Where the subject sits relative to the panoramas searched for.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum OrientationArg {
    /// Subject is left of them: search the right sector
    LeftOf,
    /// Subject is right of them: search the left sector
    RightOf,
    /// Subject faces them: search left, then right
    FrontOf,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::LeftOf => Orientation::LeftOf,
            OrientationArg::RightOf => Orientation::RightOf,
            OrientationArg::FrontOf => Orientation::FrontOf,
        }
    }
}

/// Quota counter selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum QuotaKindArg {
    /// Geocoding requests left
    GeocodingUsage,
    /// Concurrent sessions left
    MaxSessions,
}

impl From<QuotaKindArg> for QuotaKind {
    fn from(arg: QuotaKindArg) -> Self {
        match arg {
            QuotaKindArg::GeocodingUsage => QuotaKind::GeocodingUsage,
            QuotaKindArg::MaxSessions => QuotaKind::MaxSessions,
        }
    }
}

/// Panorama search options shared by `walk` and `frames`.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Panorama graph JSON file (overrides provider.graph_file)
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Search radius in meters for nearest-panorama lookups
    #[arg(long, value_name = "METERS")]
    pub radius: Option<f64>,

    /// Sector membership strategy
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Multiplier on the subject-reference distance for boundary probes
    #[arg(long, value_name = "SCALE")]
    pub probe_scale: Option<f64>,

    /// Consider indoor panoramas too
    #[arg(long)]
    pub include_indoor: bool,
}

/// Resolve walker settings from CLI args and config.
pub fn resolve_walker_config(args: &SearchArgs, config: &ConfigFile) -> WalkerConfig {
    // CLI takes precedence, then config
    let mut walker = config.walker_config();
    if let Some(radius) = args.radius {
        walker = walker.with_search_radius(radius);
    }
    if let Some(strategy) = args.strategy {
        walker = walker.with_strategy(strategy.into());
    }
    if let Some(scale) = args.probe_scale {
        walker = walker.with_probe_scale(scale);
    }
    if args.include_indoor {
        walker = walker.with_outdoor_only(false);
    }
    walker
}

/// Load the panorama graph named on the command line or in config.
pub fn resolve_graph(
    cli_graph: Option<PathBuf>,
    config: &ConfigFile,
) -> Result<PanoramaGraph, CliError> {
    let path = cli_graph
        .or_else(|| config.provider.graph_file.clone())
        .ok_or_else(|| {
            CliError::Config(
                "No panorama graph configured. \
                 Set graph_file in config.ini or use --graph"
                    .to_string(),
            )
        })?;

    Ok(PanoramaGraph::from_path(&path)?)
}

/// Resolve the Google API key from CLI args and config.
pub fn resolve_api_key(
    cli_api_key: Option<String>,
    config: &ConfigFile,
) -> Result<String, CliError> {
    cli_api_key
        .or_else(|| config.provider.google_api_key.clone())
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            CliError::Config(
                "A Google Maps API key is required. \
                 Set google_api_key in config.ini or use --google-api-key"
                    .to_string(),
            )
        })
}

/// Parse a `--count` value, capped at [`MAX_NEIGHBOR_COUNT`].
pub fn parse_neighbor_count(value: &str) -> Result<usize, String> {
    let range = || format!("expected an integer from 0 to {}", MAX_NEIGHBOR_COUNT);
    let count: usize = value.parse().map_err(|_| range())?;
    if count > MAX_NEIGHBOR_COUNT {
        return Err(range());
    }
    Ok(count)
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let mut config = ConfigFile::default();
        config.search.radius_meters = 40.0;
        config.search.probe_scale = 3.0;

        let args = SearchArgs {
            radius: Some(15.0),
            strategy: Some(StrategyArg::HeadingRange),
            include_indoor: true,
            ..SearchArgs::default()
        };
        let walker = resolve_walker_config(&args, &config);

        assert_eq!(walker.search_radius_meters, 15.0);
        assert_eq!(walker.probe_scale, 3.0);
        assert_eq!(walker.strategy, Strategy::HeadingRange);
        assert!(!walker.outdoor_only);
    }

    #[test]
    fn test_missing_graph_is_config_error() {
        let result = resolve_graph(None, &ConfigFile::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_neighbor_count_bounds() {
        assert_eq!(parse_neighbor_count("0"), Ok(0));
        assert_eq!(
            parse_neighbor_count(&MAX_NEIGHBOR_COUNT.to_string()),
            Ok(MAX_NEIGHBOR_COUNT)
        );
        assert!(parse_neighbor_count(&(MAX_NEIGHBOR_COUNT + 1).to_string()).is_err());
        assert!(parse_neighbor_count("18446744073709551615").is_err());
        assert!(parse_neighbor_count("-2").is_err());
    }

    #[test]
    fn test_api_key_precedence() {
        let mut config = ConfigFile::default();
        config.provider.google_api_key = Some("from-file".to_string());

        let key = resolve_api_key(Some("from-cli".to_string()), &config).unwrap();
        assert_eq!(key, "from-cli");
        assert_eq!(resolve_api_key(None, &config).unwrap(), "from-file");
        assert!(resolve_api_key(None, &ConfigFile::default()).is_err());
    }
}
