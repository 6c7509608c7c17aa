//! Dot-product sector membership.
//!
//! Each boundary heading is turned into a direction vector by offsetting the
//! subject point along that heading and taking the displacement. A candidate
//! point lies in the sector bounded by two consecutive vectors `V1`, `V2`
//! (90° apart) exactly when `dot(V1, c) > 0` and `dot(V2, c) > 0`, which
//! needs no wrap-around arithmetic.
//!
//! Displacements are `(Δlng · cos(lat₀), Δlat)` in degrees. The cosine factor
//! keeps the local east and north axes at the same scale, so boundary vectors
//! stay 90° apart away from the equator.

use crate::coord::{offset, wrap_longitude, GeoPoint};

use super::{Sector, SectorSet};

/// A planar displacement from the subject point.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Displacement {
    /// Eastward component (scaled longitude delta).
    east: f64,
    /// Northward component (latitude delta).
    north: f64,
}

impl Displacement {
    fn between(origin: GeoPoint, point: GeoPoint, lng_scale: f64) -> Self {
        Self {
            east: wrap_longitude(point.lng - origin.lng) * lng_scale,
            north: point.lat - origin.lat,
        }
    }

    #[inline]
    fn dot(self, other: Displacement) -> f64 {
        self.east * other.east + self.north * other.north
    }
}

/// Boundary direction vectors anchored at a fixed subject point.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorVectors {
    origin: GeoPoint,
    lng_scale: f64,
    boundaries: [Displacement; 4],
}

impl SectorVectors {
    /// Builds the four boundary vectors by offsetting `origin` by
    /// `probe_distance_meters` along each boundary heading of `sectors`.
    pub fn new(origin: GeoPoint, sectors: &SectorSet, probe_distance_meters: f64) -> Self {
        let lng_scale = origin.lat.to_radians().cos();
        let boundaries = sectors.boundaries().map(|heading| {
            let probe = offset(origin, probe_distance_meters, heading);
            Displacement::between(origin, probe, lng_scale)
        });

        Self {
            origin,
            lng_scale,
            boundaries,
        }
    }

    /// The subject point every vector is anchored at.
    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Dot-product membership test for a candidate point.
    ///
    /// A candidate coincident with the origin has no direction and belongs
    /// to no sector.
    pub fn contains_point(&self, sector: Sector, candidate: GeoPoint) -> bool {
        let c = Displacement::between(self.origin, candidate, self.lng_scale);
        let v1 = self.boundaries[sector.lower_index()];
        let v2 = self.boundaries[sector.upper_index()];

        v1.dot(c) > 0.0 && v2.dot(c) > 0.0
    }

    /// The sector a candidate point falls into, if any.
    pub fn classify_point(&self, candidate: GeoPoint) -> Option<Sector> {
        Sector::ALL
            .into_iter()
            .find(|sector| self.contains_point(*sector, candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sector::compute_sector_boundaries;

    const SUBJECT: GeoPoint = GeoPoint::new(0.0, 0.0);

    fn east_facing() -> SectorVectors {
        SectorVectors::new(SUBJECT, &compute_sector_boundaries(90.0), 200.0)
    }

    #[test]
    fn test_candidates_in_each_sector() {
        let vectors = east_facing();
        // Reference due east: front is east, right is south
        let cases = [
            (GeoPoint::new(0.0, 0.001), Sector::Front),
            (GeoPoint::new(-0.001, 0.0), Sector::Right),
            (GeoPoint::new(0.0, -0.001), Sector::Back),
            (GeoPoint::new(0.001, 0.0), Sector::Left),
        ];
        for (candidate, expected) in cases {
            assert_eq!(vectors.classify_point(candidate), Some(expected));
        }
    }

    #[test]
    fn test_origin_belongs_to_no_sector() {
        assert_eq!(east_facing().classify_point(SUBJECT), None);
    }

    #[test]
    fn test_b3_boundary_splits_front_and_left() {
        // North-east is the b3 boundary (45°) for an east reference
        let vectors = east_facing();
        let just_front = offset(SUBJECT, 50.0, 46.0);
        let just_left = offset(SUBJECT, 50.0, 44.0);

        assert!(vectors.contains_point(Sector::Front, just_front));
        assert!(!vectors.contains_point(Sector::Left, just_front));
        assert!(vectors.contains_point(Sector::Left, just_left));
        assert!(!vectors.contains_point(Sector::Front, just_left));
    }

    #[test]
    fn test_high_latitude_sectors_do_not_overlap() {
        let origin = GeoPoint::new(60.0, 10.0);
        let vectors = SectorVectors::new(origin, &compute_sector_boundaries(0.0), 100.0);

        // 40° east of north is Front; without longitude scaling it would
        // also satisfy the Right test
        let candidate = offset(origin, 30.0, 40.0);
        assert!(vectors.contains_point(Sector::Front, candidate));
        assert!(!vectors.contains_point(Sector::Right, candidate));
    }

    #[test]
    fn test_vectors_across_antimeridian() {
        let origin = GeoPoint::new(0.0, 179.9999);
        let vectors = SectorVectors::new(origin, &compute_sector_boundaries(90.0), 100.0);
        let east = offset(origin, 50.0, 90.0);
        assert!(east.lng < 0.0);
        assert_eq!(vectors.classify_point(east), Some(Sector::Front));
    }
}
