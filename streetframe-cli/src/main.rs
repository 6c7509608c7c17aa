//! Streetframe CLI - Command-line interface
//!
//! Finds the street-level panoramas beside a point and plans the images that
//! frame a place.
//!
//! Usage:
//!     streetframe walk 40.7128,-74.0060 40.7130,-74.0050 front-of --count 2
//!     streetframe classify 40.7128,-74.0060 40.7130,-74.0050 --heading 10
//!     streetframe frames ChIJN1t_tDeuEmsRUsoyG83frY4
//!     streetframe config set provider.graph_file ~/street.json

mod commands;
mod error;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;
use streetframe::config::config_file_path;
use streetframe::coord::GeoPoint;

use commands::classify::ClassifyArgs;
use commands::common::{
    parse_neighbor_count, OrientationArg, QuotaKindArg, SearchArgs, StrategyArg,
};
use commands::config::ConfigCommands;
use commands::frames::FramesArgs;
use commands::quota::QuotaArgs;
use commands::walk::WalkArgs;
use error::CliError;
use runner::CliRunner;

/// Streetframe - find the panoramas to the left, right and front of a place
#[derive(Parser)]
#[command(name = "streetframe")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file to use instead of the default
    #[arg(long = "config", global = true, value_name = "FILE")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the panorama graph beside a subject point
    Walk {
        /// Subject point as lat,lng
        #[arg(allow_hyphen_values = true)]
        subject: GeoPoint,

        /// Point of interest as lat,lng; fixes the reference heading
        #[arg(allow_hyphen_values = true)]
        reference: GeoPoint,

        /// Where the subject sits relative to the panoramas sought
        #[arg(value_enum)]
        orientation: OrientationArg,

        /// Number of panoramas to look for (default: search.neighbor_count)
        #[arg(short = 'n', long, value_parser = parse_neighbor_count)]
        count: Option<usize>,

        #[command(flatten)]
        search: SearchArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the sectors around a subject and classify headings or points
    Classify {
        /// Subject point as lat,lng
        #[arg(allow_hyphen_values = true)]
        subject: GeoPoint,

        /// Point of interest as lat,lng
        #[arg(allow_hyphen_values = true)]
        reference: GeoPoint,

        /// Heading from the subject to classify (repeatable)
        #[arg(long = "heading", allow_hyphen_values = true)]
        headings: Vec<f64>,

        /// Point to classify, as lat,lng (repeatable)
        #[arg(long = "point", allow_hyphen_values = true)]
        points: Vec<GeoPoint>,

        /// Sector membership strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Multiplier on the subject-reference distance for boundary probes
        #[arg(long)]
        probe_scale: Option<f64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Plan the main, left and right images and map for a place
    Frames {
        /// Place id to geocode
        #[arg(required_unless_present = "at")]
        place_id: Option<String>,

        /// Use this point as the place instead of geocoding
        #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
        at: Option<GeoPoint>,

        /// Google Maps API key (overrides provider.google_api_key)
        #[arg(long)]
        google_api_key: Option<String>,

        #[command(flatten)]
        search: SearchArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check remaining usage quota
    Quota {
        /// Counter to check; all counters when omitted
        #[arg(value_enum)]
        kind: Option<QuotaKindArg>,

        /// Usage service host (overrides provider.quota_host)
        #[arg(long)]
        host: Option<String>,

        /// Consume one unit of the counter before reporting
        #[arg(long, requires = "kind")]
        decrement: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// View or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config_file.unwrap_or_else(config_file_path);
    let verbose = cli.verbose;
    let runner = || CliRunner::new(&config_path, verbose);

    match cli.command {
        // Config commands must work even when the file is invalid
        Commands::Config(command) => commands::config::run(command, &config_path),
        Commands::Walk {
            subject,
            reference,
            orientation,
            count,
            search,
            json,
        } => commands::walk::run(
            &runner()?,
            WalkArgs {
                subject,
                reference,
                orientation,
                count,
                search,
                json,
            },
        ),
        Commands::Classify {
            subject,
            reference,
            headings,
            points,
            strategy,
            probe_scale,
            json,
        } => commands::classify::run(
            &runner()?,
            ClassifyArgs {
                subject,
                reference,
                headings,
                points,
                strategy,
                probe_scale,
                json,
            },
        ),
        Commands::Frames {
            place_id,
            at,
            google_api_key,
            search,
            json,
        } => commands::frames::run(
            &runner()?,
            FramesArgs {
                place_id,
                at,
                google_api_key,
                search,
                json,
            },
        ),
        Commands::Quota {
            kind,
            host,
            decrement,
            json,
        } => commands::quota::run(
            &runner()?,
            QuotaArgs {
                kind,
                host,
                decrement,
                json,
            },
        ),
    }
}
