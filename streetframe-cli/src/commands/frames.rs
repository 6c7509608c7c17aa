//! Frames command - plan the image set that frames a place.

use console::style;
use streetframe::coord::GeoPoint;
use streetframe::frames::{Frame, FrameOptions, FramePlanner};
use streetframe::imagery::ImageUrlBuilder;
use streetframe::provider::{GoogleGeocoder, ReqwestClient};

use super::common::{print_json, resolve_api_key, resolve_graph, resolve_walker_config, SearchArgs};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the frames command.
pub struct FramesArgs {
    /// Place to geocode; ignored when `at` is given.
    pub place_id: Option<String>,
    pub at: Option<GeoPoint>,
    pub google_api_key: Option<String>,
    pub search: SearchArgs,
    pub json: bool,
}

/// Run the frames command.
pub fn run(runner: &CliRunner, args: FramesArgs) -> Result<(), CliError> {
    runner.log_startup("frames");
    let config = runner.config();

    let api_key = resolve_api_key(args.google_api_key, config)?;
    let graph = resolve_graph(args.search.graph.clone(), config)?;
    let options = FrameOptions {
        size: config.image_size(),
        neighbor_count: config.search.neighbor_count,
        ..FrameOptions::default()
    };

    let geocoder = GoogleGeocoder::new(ReqwestClient::new()?, api_key.clone());
    let planner = FramePlanner::new(geocoder, graph, ImageUrlBuilder::new(api_key))
        .with_walker_config(resolve_walker_config(&args.search, config))
        .with_options(options);

    let frames = match (args.at, args.place_id) {
        (Some(point), _) => planner.plan_at(point)?,
        (None, Some(place_id)) => planner.plan(&place_id)?,
        (None, None) => {
            return Err(CliError::Config(
                "Give a place id or a point with --at".to_string(),
            ))
        }
    };

    if args.json {
        return print_json(&frames);
    }

    println!("{} {}", style("Frames for").bold(), frames.reference);
    println!();
    print_frame("Main", Some(&frames.main));
    print_frame("Left", frames.left.as_ref());
    print_frame("Right", frames.right.as_ref());
    println!("{}", style("Map").bold());
    println!("  {}", frames.map_url);

    Ok(())
}

fn print_frame(label: &str, frame: Option<&Frame>) {
    println!("{}", style(label).bold());
    match frame {
        Some(frame) => {
            println!(
                "  {}  {}  heading {:.1}°",
                style(&frame.pano_id).green(),
                frame.point,
                frame.heading
            );
            println!("  {}", frame.image_url);
        }
        None => println!("  {}", style("(no panorama found)").yellow()),
    }
    println!();
}
