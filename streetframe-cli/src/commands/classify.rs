//! Classify command - show which sector headings and points fall into.

use console::style;
use serde::Serialize;
use streetframe::coord::{normalize_heading, GeoPoint};
use streetframe::sector::{Candidate, Sector, SectorClassifier};

use super::common::{print_json, StrategyArg};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the classify command.
pub struct ClassifyArgs {
    pub subject: GeoPoint,
    pub reference: GeoPoint,
    pub headings: Vec<f64>,
    pub points: Vec<GeoPoint>,
    pub strategy: Option<StrategyArg>,
    pub probe_scale: Option<f64>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SectorBounds {
    sector: &'static str,
    lower: f64,
    upper: f64,
}

#[derive(Debug, Serialize)]
struct Classification {
    candidate: String,
    /// `None` on a boundary or for a point at the subject.
    sector: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct ClassifyReport {
    reference_heading: f64,
    strategy: String,
    probe_distance_meters: f64,
    sectors: Vec<SectorBounds>,
    candidates: Vec<Classification>,
}

/// Run the classify command.
pub fn run(runner: &CliRunner, args: ClassifyArgs) -> Result<(), CliError> {
    runner.log_startup("classify");
    let config = runner.config();

    let strategy = args
        .strategy
        .map(Into::into)
        .unwrap_or(config.search.strategy);
    let probe_scale = args.probe_scale.unwrap_or(config.search.probe_scale);
    if !(probe_scale.is_finite() && probe_scale > 0.0) {
        return Err(CliError::Config(format!(
            "Probe scale must be positive, got {}",
            probe_scale
        )));
    }

    let classifier = SectorClassifier::new(args.subject, args.reference, strategy, probe_scale);
    let report = build_report(&classifier, &args.headings, &args.points);

    if args.json {
        return print_json(&report);
    }

    println!(
        "Reference heading {:.2}°  ({}, probe {:.1} m)",
        report.reference_heading, report.strategy, report.probe_distance_meters
    );
    println!();
    for bounds in &report.sectors {
        println!(
            "  {:<6} {:>7.2}° .. {:>7.2}°",
            style(bounds.sector).bold(),
            bounds.lower,
            bounds.upper
        );
    }

    if !report.candidates.is_empty() {
        println!();
        for entry in &report.candidates {
            let sector = match entry.sector {
                Some(name) => style(name).green().to_string(),
                None => style("(boundary)").yellow().to_string(),
            };
            println!("  {:<28} {}", entry.candidate, sector);
        }
    }

    Ok(())
}

fn build_report(
    classifier: &SectorClassifier,
    headings: &[f64],
    points: &[GeoPoint],
) -> ClassifyReport {
    let sectors = classifier.sectors();

    let bounds = Sector::ALL
        .into_iter()
        .map(|sector| {
            let (lower, upper) = sectors.bounds(sector);
            SectorBounds {
                sector: sector.as_str(),
                lower,
                upper,
            }
        })
        .collect();

    let heading_entries = headings.iter().map(|&heading| Classification {
        candidate: format!("heading {}", normalize_heading(heading)),
        sector: classifier
            .classify(Candidate::Heading(heading))
            .map(|s| s.as_str()),
    });
    let point_entries = points.iter().map(|&point| Classification {
        candidate: format!("point {}", point),
        sector: classifier.classify(Candidate::Point(point)).map(|s| s.as_str()),
    });

    ClassifyReport {
        reference_heading: sectors.reference_heading(),
        strategy: classifier.strategy().to_string(),
        probe_distance_meters: classifier.probe_distance_meters(),
        sectors: bounds,
        candidates: heading_entries.chain(point_entries).collect(),
    }
}
