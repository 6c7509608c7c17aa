//! Walk command - find panoramas beside a subject point.

use console::style;
use streetframe::coord::GeoPoint;
use streetframe::walker::{AdjacentPanoramaWalker, Orientation, WalkRequest};

use super::common::{print_json, resolve_graph, resolve_walker_config, OrientationArg, SearchArgs};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the walk command.
pub struct WalkArgs {
    pub subject: GeoPoint,
    pub reference: GeoPoint,
    pub orientation: OrientationArg,
    pub count: Option<usize>,
    pub search: SearchArgs,
    pub json: bool,
}

/// Run the walk command.
pub fn run(runner: &CliRunner, args: WalkArgs) -> Result<(), CliError> {
    runner.log_startup("walk");
    let config = runner.config();

    let graph = resolve_graph(args.search.graph.clone(), config)?;
    let walker_config = resolve_walker_config(&args.search, config);
    let count = args.count.unwrap_or(config.search.neighbor_count);
    let orientation = Orientation::from(args.orientation);

    let walker = AdjacentPanoramaWalker::new(graph).with_config(walker_config);
    let request = WalkRequest::new(args.subject, args.reference, orientation, count);
    let result = walker.walk(&request)?;

    if args.json {
        return print_json(&result);
    }

    println!(
        "{} {} from {} toward {}",
        style("Walk").bold(),
        style(orientation).cyan(),
        args.subject,
        args.reference
    );
    println!();

    for (slot, location) in result.locations.iter().enumerate() {
        match location {
            Some(pano) => println!("  [{}] {}  {}", slot + 1, style(&pano.pano_id).green(), pano.point),
            None => println!("  [{}] {}", slot + 1, style("(none)").dim()),
        }
    }

    println!();
    let summary = format!("Found {} of {}", result.count, result.requested());
    if result.is_complete() {
        println!("{}", style(summary).green());
    } else {
        println!("{}", style(summary).yellow());
    }

    Ok(())
}
