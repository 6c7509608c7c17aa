//! Walk inputs, configuration and results.

use serde::Serialize;

use crate::coord::GeoPoint;
use crate::sector::{Strategy, DEFAULT_PROBE_SCALE};

use super::Orientation;

/// Default provider search radius around each hop point, in meters.
pub const DEFAULT_SEARCH_RADIUS_METERS: f64 = 100.0;

/// Default number of adjacent panoramas to look for.
pub const DEFAULT_NEIGHBOR_COUNT: usize = 2;

/// Largest number of adjacent panoramas a single walk may ask for.
pub const MAX_NEIGHBOR_COUNT: usize = 64;

/// Walker tuning.
///
/// Search radius and the outdoor filter are handed to the provider; the
/// walker itself never interprets them.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkerConfig {
    /// Radius for nearest-panorama lookups.
    pub search_radius_meters: f64,
    /// Ignore indoor panoramas.
    pub outdoor_only: bool,
    /// Probe distance multiplier for boundary vectors.
    pub probe_scale: f64,
    /// Sector membership strategy.
    pub strategy: Strategy,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            search_radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
            outdoor_only: true,
            probe_scale: DEFAULT_PROBE_SCALE,
            strategy: Strategy::default(),
        }
    }
}

impl WalkerConfig {
    /// Set the search radius.
    pub fn with_search_radius(mut self, meters: f64) -> Self {
        self.search_radius_meters = meters;
        self
    }

    /// Set the outdoor-only filter.
    pub fn with_outdoor_only(mut self, outdoor_only: bool) -> Self {
        self.outdoor_only = outdoor_only;
        self
    }

    /// Set the probe distance multiplier.
    pub fn with_probe_scale(mut self, scale: f64) -> Self {
        self.probe_scale = scale;
        self
    }

    /// Set the membership strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// One walk.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkRequest {
    /// Point the sectors are anchored at.
    pub subject: GeoPoint,
    /// Point of interest; only used to derive the reference heading.
    pub reference: GeoPoint,
    /// Where the subject sits relative to the panoramas sought.
    pub orientation: Orientation,
    /// Number of result slots.
    pub neighbor_count: usize,
}

impl WalkRequest {
    pub fn new(
        subject: GeoPoint,
        reference: GeoPoint,
        orientation: Orientation,
        neighbor_count: usize,
    ) -> Self {
        Self {
            subject,
            reference,
            orientation,
            neighbor_count,
        }
    }
}

/// A discovered panorama.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjacentPanorama {
    pub pano_id: String,
    pub point: GeoPoint,
}

/// Output of a walk.
///
/// `locations` has one slot per requested neighbour, in discovery order;
/// `count` is the number of filled slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjacencyResult {
    pub locations: Vec<Option<AdjacentPanorama>>,
    pub count: usize,
}

impl AdjacencyResult {
    pub(crate) fn from_slots(locations: Vec<Option<AdjacentPanorama>>) -> Self {
        let count = locations.iter().filter(|slot| slot.is_some()).count();
        Self { locations, count }
    }

    /// Filled slots in slot order.
    pub fn found(&self) -> impl Iterator<Item = &AdjacentPanorama> {
        self.locations.iter().flatten()
    }

    /// Number of slots requested.
    pub fn requested(&self) -> usize {
        self.locations.len()
    }

    /// Whether every slot was filled.
    pub fn is_complete(&self) -> bool {
        self.count == self.requested()
    }
}
