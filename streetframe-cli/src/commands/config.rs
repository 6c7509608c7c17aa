//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path` commands
//! for viewing and modifying configuration settings from the command line.

use std::path::Path;

use clap::Subcommand;
use console::style;
use streetframe::config::{ConfigError, ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., search.radius_meters)
        key: String,
    },

    /// Set a configuration value (an empty value clears optional keys)
    Set {
        /// Configuration key in format section.key (e.g., search.radius_meters)
        key: String,

        /// Value to set
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand against the file at `path`.
pub fn run(command: ConfigCommands, path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key, path),
        ConfigCommands::Set { key, value } => run_set(&key, &value, path),
        ConfigCommands::List => run_list(path),
        ConfigCommands::Path => run_path(path),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_: ConfigError| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'streetframe config list' to see available keys.",
            key
        ))
    })
}

/// Get a configuration value.
fn run_get(key: &str, path: &Path) -> Result<(), CliError> {
    let config_key = parse_key(key)?;
    let config = ConfigFile::load_from(path).unwrap_or_default();
    let value = config_key.get(&config);

    if value.is_empty() {
        println!("(not set)");
    } else {
        println!("{}", value);
    }

    Ok(())
}

/// Set a configuration value.
fn run_set(key: &str, value: &str, path: &Path) -> Result<(), CliError> {
    let config_key = parse_key(key)?;

    let mut config = ConfigFile::load_from(path).unwrap_or_default();
    config_key
        .set(&mut config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    config.save_to(path)?;

    println!("Set {} = {}", config_key.name(), value);

    Ok(())
}

/// List all configuration settings.
fn run_list(path: &Path) -> Result<(), CliError> {
    let config = ConfigFile::load_from(path).unwrap_or_default();

    println!("{}", style("Configuration Settings").bold());
    println!("======================");
    println!();

    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();

        if section != current_section {
            if !current_section.is_empty() {
                println!();
            }
            println!("[{}]", style(section).cyan());
            current_section = section;
        }

        let value = key.get(&config);
        let key_name = key.key_name();

        if value.is_empty() {
            println!("  {} = {}", key_name, style("(not set)").dim());
        } else {
            println!("  {} = {}", key_name, value);
        }
    }

    Ok(())
}

/// Show the configuration file path.
fn run_path(path: &Path) -> Result<(), CliError> {
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        run_set("search.neighbor_count", "4", &path).unwrap();
        run_set("provider.graph_file", "/data/street.json", &path).unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.search.neighbor_count, 4);
        assert_eq!(
            config.provider.graph_file.as_deref(),
            Some(Path::new("/data/street.json"))
        );
    }

    #[test]
    fn test_set_rejects_bad_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        let result = run_set("imagery.width", "4096", &path);
        assert!(matches!(result, Err(CliError::Config(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_get("search.colour", &dir.path().join("config.ini"));

        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("config list")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
