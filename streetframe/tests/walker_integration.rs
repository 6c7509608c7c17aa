//! Integration tests for the adjacency walk.
//!
//! These tests load a small street from a JSON panorama graph and walk it
//! through the public API, including the retry and cache decorators:
//! - left, right and front walks along a north-south street
//! - walks that run off the end of the street
//! - indoor panoramas and failed subject lookups
//!
//! Run with: `cargo test --test walker_integration`

use std::io::Write;

use streetframe::coord::GeoPoint;
use streetframe::provider::{
    CachingProvider, PanoramaGraph, PanoramaProvider, RetryPolicy, RetryingProvider,
};
use streetframe::sector::Strategy;
use streetframe::walker::{
    AdjacentPanoramaWalker, Orientation, WalkError, WalkRequest, WalkerConfig,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// A street running north-south along the prime meridian, one panorama
/// roughly every 11 m, with an indoor panorama beside the middle one.
const STREET_JSON: &str = r#"{
  "panoramas": [
    {"id": "mid", "location": {"lat": 0.0, "lng": 0.0},
     "links": [{"pano_id": "n1", "heading": 0.0}, {"pano_id": "s1", "heading": 180.0}]},
    {"id": "n1", "location": {"lat": 0.0001, "lng": 0.0},
     "links": [{"pano_id": "mid", "heading": 180.0}, {"pano_id": "n2", "heading": 0.0}]},
    {"id": "n2", "location": {"lat": 0.0002, "lng": 0.0},
     "links": [{"pano_id": "n1", "heading": 180.0}, {"pano_id": "n3", "heading": 0.0}]},
    {"id": "n3", "location": {"lat": 0.0003, "lng": 0.0},
     "links": [{"pano_id": "n2", "heading": 180.0}]},
    {"id": "s1", "location": {"lat": -0.0001, "lng": 0.0},
     "links": [{"pano_id": "mid", "heading": 0.0}, {"pano_id": "s2", "heading": 180.0}]},
    {"id": "s2", "location": {"lat": -0.0002, "lng": 0.0},
     "links": [{"pano_id": "s1", "heading": 0.0}]},
    {"id": "cafe", "location": {"lat": 0.0, "lng": 0.00001},
     "links": [], "indoor": true}
  ]
}"#;

/// The place the subject faces: due east of the street.
const EAST: GeoPoint = GeoPoint::new(0.0, 0.001);

const SUBJECT: GeoPoint = GeoPoint::new(0.0, 0.0);

fn load_street() -> PanoramaGraph {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(STREET_JSON.as_bytes()).unwrap();
    PanoramaGraph::from_path(file.path()).unwrap()
}

fn ids(result: &streetframe::walker::AdjacencyResult) -> Vec<Option<&str>> {
    result
        .locations
        .iter()
        .map(|slot| slot.as_ref().map(|p| p.pano_id.as_str()))
        .collect()
}

fn walk<P: PanoramaProvider>(
    walker: &AdjacentPanoramaWalker<P>,
    orientation: Orientation,
    count: usize,
) -> streetframe::walker::AdjacencyResult {
    walker
        .walk(&WalkRequest::new(SUBJECT, EAST, orientation, count))
        .unwrap()
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_graph_loads_from_file() {
    let graph = load_street();
    assert_eq!(graph.len(), 7);
    assert_eq!(graph.panorama_by_id("n2").unwrap().links.len(), 2);
}

#[test]
fn test_right_of_walks_north() {
    let walker = AdjacentPanoramaWalker::new(load_street());
    let result = walk(&walker, Orientation::RightOf, 3);

    assert_eq!(ids(&result), vec![Some("n1"), Some("n2"), Some("n3")]);
    assert!(result.is_complete());
}

#[test]
fn test_left_of_walks_south() {
    let walker = AdjacentPanoramaWalker::new(load_street());
    let result = walk(&walker, Orientation::LeftOf, 2);

    assert_eq!(ids(&result), vec![Some("s1"), Some("s2")]);
}

#[test]
fn test_walk_stops_at_end_of_street() {
    let walker = AdjacentPanoramaWalker::new(load_street());
    let result = walk(&walker, Orientation::LeftOf, 4);

    assert_eq!(ids(&result), vec![Some("s1"), Some("s2"), None, None]);
    assert_eq!(result.count, 2);
    assert!(!result.is_complete());
}

#[test]
fn test_front_of_splits_both_ways() {
    let walker = AdjacentPanoramaWalker::new(load_street());
    let result = walk(&walker, Orientation::FrontOf, 4);

    assert_eq!(
        ids(&result),
        vec![Some("n1"), Some("n2"), Some("s1"), Some("s2")]
    );
    assert_eq!(result.count, 4);
}

#[test]
fn test_heading_range_strategy_agrees_on_straight_street() {
    let walker = AdjacentPanoramaWalker::new(load_street())
        .with_config(WalkerConfig::default().with_strategy(Strategy::HeadingRange));
    let result = walk(&walker, Orientation::FrontOf, 2);

    assert_eq!(ids(&result), vec![Some("n1"), Some("s1")]);
}

#[test]
fn test_indoor_panorama_is_skipped_for_subject() {
    // The cafe is closer to this subject than the street panorama
    let subject = GeoPoint::new(0.0, 0.000009);
    let walker = AdjacentPanoramaWalker::new(load_street());
    let result = walker
        .walk(&WalkRequest::new(subject, EAST, Orientation::RightOf, 1))
        .unwrap();

    assert_eq!(ids(&result), vec![Some("n1")]);
}

#[test]
fn test_subject_without_panorama_fails() {
    let walker = AdjacentPanoramaWalker::new(load_street());
    let far_away = GeoPoint::new(10.0, 10.0);
    let result = walker.walk(&WalkRequest::new(far_away, EAST, Orientation::LeftOf, 2));

    assert!(matches!(result, Err(WalkError::PanoramaNotFound { .. })));
}

#[test]
fn test_decorated_provider_gives_same_result() {
    let provider = CachingProvider::new(RetryingProvider::new(
        load_street(),
        RetryPolicy::exponential(3),
    ));
    let walker = AdjacentPanoramaWalker::new(provider);

    let first = walk(&walker, Orientation::FrontOf, 4);
    let second = walk(&walker, Orientation::FrontOf, 4);
    let plain = walk(&AdjacentPanoramaWalker::new(load_street()), Orientation::FrontOf, 4);

    assert_eq!(first, plain);
    assert_eq!(second, plain);
    assert!(walker.provider().entry_count() > 0);
}
