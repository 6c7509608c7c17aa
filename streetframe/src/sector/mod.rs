//! Directional sector classification.
//!
//! Given a reference heading (the bearing from a subject point toward a point
//! of interest), the circle around the subject is split into four 90° sectors:
//!
//! ```text
//!                    reference heading
//!                           │
//!               b3 ╲      Front      ╱ b0
//!                   ╲               ╱
//!             Left   ●  subject  ●   Right
//!                   ╱               ╲
//!               b2 ╱      Back       ╲ b1
//! ```
//!
//! Boundary `b0` sits 45° clockwise of the reference heading and each further
//! boundary another 90° on. Consecutive boundary pairs bound the sectors:
//! `(b0, b1)` Right, `(b1, b2)` Back, `(b2, b3)` Left, `(b3, b0)` Front.
//!
//! Two membership tests are provided, selected by [`Strategy`]:
//!
//! - **Heading range** ([`SectorSet::contains_heading`]): wrap-aware
//!   comparison of a candidate heading against a boundary pair.
//! - **Vector dot product** ([`SectorVectors::contains_point`]): a candidate
//!   point lies inside a sector when its displacement from the subject has a
//!   positive dot product with both bounding direction vectors.
//!
//! [`SectorClassifier`] wraps both behind a single interface.

mod classifier;
mod vector;

pub use classifier::{Candidate, SectorClassifier, DEFAULT_PROBE_SCALE, MIN_PROBE_DISTANCE_METERS};
pub use vector::SectorVectors;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::coord::normalize_heading;

/// Angular width of every sector in degrees.
pub const SECTOR_WIDTH_DEG: f64 = 90.0;

/// Offset of the first boundary from the reference heading in degrees.
pub const FIRST_BOUNDARY_OFFSET_DEG: f64 = 45.0;

/// Errors raised when parsing classifier arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectorError {
    /// The sector or orientation name is not recognised.
    #[error("Invalid orientation '{0}': expected front, right, back or left")]
    InvalidOrientation(String),

    /// The strategy name is not recognised.
    #[error("Invalid strategy '{0}': expected heading-range or vector")]
    InvalidStrategy(String),
}

/// One of the four 90° sectors around a subject point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sector {
    /// Centred 90° clockwise of the reference heading.
    Right,
    /// Centred opposite the reference heading.
    Back,
    /// Centred 90° counter-clockwise of the reference heading.
    Left,
    /// Centred on the reference heading.
    Front,
}

impl Sector {
    /// All sectors in boundary order, starting at `b0`.
    pub const ALL: [Sector; 4] = [Sector::Right, Sector::Back, Sector::Left, Sector::Front];

    /// Index of the boundary that opens this sector.
    #[inline]
    pub fn lower_index(self) -> usize {
        match self {
            Sector::Right => 0,
            Sector::Back => 1,
            Sector::Left => 2,
            Sector::Front => 3,
        }
    }

    /// Index of the boundary that closes this sector.
    #[inline]
    pub fn upper_index(self) -> usize {
        (self.lower_index() + 1) % 4
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Right => "right",
            Sector::Back => "back",
            Sector::Left => "left",
            Sector::Front => "front",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sector {
    type Err = SectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "right" => Ok(Sector::Right),
            "back" => Ok(Sector::Back),
            "left" => Ok(Sector::Left),
            "front" => Ok(Sector::Front),
            _ => Err(SectorError::InvalidOrientation(s.to_string())),
        }
    }
}

/// Membership test used by [`SectorClassifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Wrap-aware heading comparison against a boundary pair.
    HeadingRange,
    /// Dot products against the two bounding direction vectors.
    #[default]
    VectorDotProduct,
}

impl Strategy {
    /// Name used in configuration files and CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::HeadingRange => "heading-range",
            Strategy::VectorDotProduct => "vector",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = SectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heading-range" | "heading_range" | "heading" => Ok(Strategy::HeadingRange),
            "vector" | "vector-dot-product" | "dot" => Ok(Strategy::VectorDotProduct),
            _ => Err(SectorError::InvalidStrategy(s.to_string())),
        }
    }
}

/// The four sector boundaries derived from a reference heading.
///
/// Recomputed per search; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorSet {
    reference_heading: f64,
    boundaries: [f64; 4],
}

/// Computes the sector boundaries for a reference heading.
///
/// `boundaries[0] = reference + 45°` and every further boundary adds 90°,
/// all modulo 360.
pub fn compute_sector_boundaries(reference_heading: f64) -> SectorSet {
    SectorSet::from_reference_heading(reference_heading)
}

impl SectorSet {
    /// Builds the boundary set for a reference heading in either the
    /// `[0, 360)` or `[-180, 180)` convention.
    pub fn from_reference_heading(reference_heading: f64) -> Self {
        let reference_heading = normalize_heading(reference_heading);
        let first = normalize_heading(reference_heading + FIRST_BOUNDARY_OFFSET_DEG);

        let mut boundaries = [first; 4];
        for (i, boundary) in boundaries.iter_mut().enumerate().skip(1) {
            *boundary = normalize_heading(first + SECTOR_WIDTH_DEG * i as f64);
        }

        Self {
            reference_heading,
            boundaries,
        }
    }

    /// The normalized reference heading these boundaries were derived from.
    pub fn reference_heading(&self) -> f64 {
        self.reference_heading
    }

    /// Boundary headings `[b0, b1, b2, b3]`, each in `[0, 360)`.
    pub fn boundaries(&self) -> [f64; 4] {
        self.boundaries
    }

    /// The `(lower, upper)` boundary pair of a sector.
    pub fn bounds(&self, sector: Sector) -> (f64, f64) {
        (
            self.boundaries[sector.lower_index()],
            self.boundaries[sector.upper_index()],
        )
    }

    /// Heading-range membership test.
    ///
    /// The candidate is normalized to `[0, 360)` and must lie strictly after
    /// the lower bound and strictly before the upper bound. When the upper
    /// bound has wrapped past 360 the range is split into
    /// `(lower, 360]` and `[0, upper)`. A heading exactly on a boundary
    /// belongs to no sector.
    pub fn contains_heading(&self, sector: Sector, heading: f64) -> bool {
        let heading = normalize_heading(heading);
        let (lower, upper) = self.bounds(sector);

        if upper < lower {
            (heading > lower && heading <= 360.0) || (heading >= 0.0 && heading < upper)
        } else {
            heading > lower && heading < upper
        }
    }

    /// The sector a heading falls into, or `None` when it sits exactly on a
    /// boundary.
    pub fn classify_heading(&self, heading: f64) -> Option<Sector> {
        Sector::ALL
            .into_iter()
            .find(|sector| self.contains_heading(*sector, heading))
    }
}
