//! Adjacent panorama walker.
//!
//! Finds panoramas to the left, right or front of a subject by walking the
//! provider's panorama link graph one hop at a time. The reference axis
//! (subject → reference point) is fixed for the whole walk, and every
//! sector test is made relative to the original subject, not to the
//! panorama currently being visited.
//!
//! # Orientation
//!
//! The orientation names where the *subject* sits relative to the panoramas
//! being searched for:
//!
//! | Orientation | Sector searched |
//! |-------------|-----------------|
//! | `LeftOf`    | Right           |
//! | `RightOf`   | Left            |
//! | `FrontOf`   | Left for the first `N / 2` slots, then Right |
//!
//! # Example
//!
//! ```
//! use streetframe::coord::GeoPoint;
//! use streetframe::provider::{PanoramaGraph, PanoramaRecord};
//! use streetframe::walker::{AdjacentPanoramaWalker, Orientation, WalkRequest};
//!
//! let graph = PanoramaGraph::new()
//!     .with_panorama(PanoramaRecord::new("here", GeoPoint::new(0.0, 0.0)).with_link("north", 0.0))
//!     .with_panorama(PanoramaRecord::new("north", GeoPoint::new(0.0002, 0.0)));
//!
//! let walker = AdjacentPanoramaWalker::new(graph);
//! let request = WalkRequest::new(
//!     GeoPoint::new(0.0, 0.0),
//!     GeoPoint::new(0.0, 1.0),
//!     Orientation::RightOf,
//!     1,
//! );
//!
//! let result = walker.walk(&request).unwrap();
//! assert_eq!(result.count, 1);
//! ```

mod error;
mod phase;
mod types;
mod walk;

pub use error::WalkError;
pub use types::{
    AdjacencyResult, AdjacentPanorama, WalkRequest, WalkerConfig, DEFAULT_NEIGHBOR_COUNT,
    DEFAULT_SEARCH_RADIUS_METERS, MAX_NEIGHBOR_COUNT,
};
pub use walk::AdjacentPanoramaWalker;

use std::fmt;
use std::str::FromStr;

use crate::sector::Sector;

/// Where the subject sits relative to the panoramas being searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Subject is to the left; search the Right sector.
    LeftOf,
    /// Subject is to the right; search the Left sector.
    RightOf,
    /// Subject is in front; search Left then Right.
    FrontOf,
}

impl Orientation {
    /// All orientations.
    pub const ALL: [Orientation; 3] = [Orientation::LeftOf, Orientation::RightOf, Orientation::FrontOf];

    /// The sector searched by a single-sided walk.
    ///
    /// `FrontOf` searches both sides; this returns the sector of its first
    /// phase.
    pub fn target_sector(self) -> Sector {
        match self {
            Orientation::LeftOf => Sector::Right,
            Orientation::RightOf | Orientation::FrontOf => Sector::Left,
        }
    }

    /// Name used in configuration and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::LeftOf => "left-of",
            Orientation::RightOf => "right-of",
            Orientation::FrontOf => "front-of",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "leftof" => Ok(Orientation::LeftOf),
            "rightof" => Ok(Orientation::RightOf),
            "frontof" => Ok(Orientation::FrontOf),
            _ => Err(WalkError::InvalidOrientation(s.to_string())),
        }
    }
}
