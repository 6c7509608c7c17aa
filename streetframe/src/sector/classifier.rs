//! Strategy-selectable sector classifier.

use crate::coord::{bearing, distance, offset, GeoPoint};

use super::{Sector, SectorSet, SectorVectors, Strategy};

/// Default multiplier applied to the subject→reference distance to obtain
/// the probe distance for boundary vectors.
pub const DEFAULT_PROBE_SCALE: f64 = 2.0;

/// Lower bound for the probe distance, used when subject and reference
/// (nearly) coincide.
pub const MIN_PROBE_DISTANCE_METERS: f64 = 10.0;

/// Something whose direction from the subject can be classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Candidate {
    /// A heading from the subject, in either sign convention.
    Heading(f64),
    /// A point whose direction is measured from the subject.
    Point(GeoPoint),
}

/// Classifies candidates into sectors around a fixed subject point.
///
/// Stateless after construction and `Sync`, so a single classifier can be
/// shared between concurrent walks.
#[derive(Debug, Clone)]
pub struct SectorClassifier {
    origin: GeoPoint,
    sectors: SectorSet,
    vectors: SectorVectors,
    probe_distance_meters: f64,
    strategy: Strategy,
}

impl SectorClassifier {
    /// Creates a classifier around `subject` whose reference heading points
    /// at `reference`.
    ///
    /// The probe distance is `probe_scale × distance(subject, reference)`,
    /// floored at [`MIN_PROBE_DISTANCE_METERS`].
    pub fn new(subject: GeoPoint, reference: GeoPoint, strategy: Strategy, probe_scale: f64) -> Self {
        let probe_distance = probe_scale * distance(subject, reference);
        Self::from_heading(subject, bearing(subject, reference), probe_distance, strategy)
    }

    /// Creates a classifier from an explicit reference heading.
    pub fn from_heading(
        subject: GeoPoint,
        reference_heading: f64,
        probe_distance_meters: f64,
        strategy: Strategy,
    ) -> Self {
        let probe_distance_meters = probe_distance_meters.max(MIN_PROBE_DISTANCE_METERS);
        let sectors = SectorSet::from_reference_heading(reference_heading);
        let vectors = SectorVectors::new(subject, &sectors, probe_distance_meters);

        Self {
            origin: subject,
            sectors,
            vectors,
            probe_distance_meters,
            strategy,
        }
    }

    /// The fixed subject point.
    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// The sector boundaries in use.
    pub fn sectors(&self) -> &SectorSet {
        &self.sectors
    }

    /// The membership strategy in use.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Distance at which boundary vectors are probed.
    pub fn probe_distance_meters(&self) -> f64 {
        self.probe_distance_meters
    }

    /// Tests whether a candidate lies in `sector`.
    ///
    /// A point candidate coincident with the subject has no direction and is
    /// never inside any sector.
    pub fn contains(&self, sector: Sector, candidate: Candidate) -> bool {
        match (self.strategy, candidate) {
            (Strategy::HeadingRange, Candidate::Heading(heading)) => {
                self.sectors.contains_heading(sector, heading)
            }
            (Strategy::HeadingRange, Candidate::Point(point)) => {
                point != self.origin
                    && self
                        .sectors
                        .contains_heading(sector, bearing(self.origin, point))
            }
            (Strategy::VectorDotProduct, Candidate::Heading(heading)) => {
                let point = offset(self.origin, self.probe_distance_meters, heading);
                self.vectors.contains_point(sector, point)
            }
            (Strategy::VectorDotProduct, Candidate::Point(point)) => {
                self.vectors.contains_point(sector, point)
            }
        }
    }

    /// The sector a candidate falls into, if any.
    pub fn classify(&self, candidate: Candidate) -> Option<Sector> {
        Sector::ALL
            .into_iter()
            .find(|sector| self.contains(*sector, candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::heading_difference;

    const SUBJECT: GeoPoint = GeoPoint::new(0.0, 0.0);
    const REFERENCE_EAST: GeoPoint = GeoPoint::new(0.0, 0.001);

    fn classifier(strategy: Strategy) -> SectorClassifier {
        SectorClassifier::new(SUBJECT, REFERENCE_EAST, strategy, DEFAULT_PROBE_SCALE)
    }

    #[test]
    fn test_reference_heading_from_points() {
        let c = classifier(Strategy::HeadingRange);
        assert!((c.sectors().reference_heading() - 90.0).abs() < 1e-9);
        // 0.001° of longitude at the equator is ~111 m
        assert!((c.probe_distance_meters() - 222.64).abs() < 0.1);
    }

    #[test]
    fn test_probe_distance_floor() {
        let c = SectorClassifier::new(SUBJECT, SUBJECT, Strategy::VectorDotProduct, DEFAULT_PROBE_SCALE);
        assert_eq!(c.probe_distance_meters(), MIN_PROBE_DISTANCE_METERS);
    }

    #[test]
    fn test_both_strategies_classify_headings() {
        for strategy in [Strategy::HeadingRange, Strategy::VectorDotProduct] {
            let c = classifier(strategy);
            assert_eq!(c.classify(Candidate::Heading(90.0)), Some(Sector::Front), "{}", strategy);
            assert_eq!(c.classify(Candidate::Heading(200.0)), Some(Sector::Right), "{}", strategy);
            assert_eq!(c.classify(Candidate::Heading(-90.0)), Some(Sector::Back), "{}", strategy);
            assert_eq!(c.classify(Candidate::Heading(10.0)), Some(Sector::Left), "{}", strategy);
        }
    }

    #[test]
    fn test_both_strategies_classify_points() {
        for strategy in [Strategy::HeadingRange, Strategy::VectorDotProduct] {
            let c = classifier(strategy);
            let south = offset(SUBJECT, 15.0, 180.0);
            let north_west = offset(SUBJECT, 15.0, 330.0);
            assert_eq!(c.classify(Candidate::Point(south)), Some(Sector::Right), "{}", strategy);
            assert_eq!(c.classify(Candidate::Point(north_west)), Some(Sector::Left), "{}", strategy);
        }
    }

    #[test]
    fn test_subject_point_is_never_classified() {
        for strategy in [Strategy::HeadingRange, Strategy::VectorDotProduct] {
            assert_eq!(classifier(strategy).classify(Candidate::Point(SUBJECT)), None);
        }
    }

    mod property_tests {
        use super::*;
        use crate::sector::Strategy;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_strategies_agree_away_from_boundaries(
                lat in -70.0..70.0_f64,
                lng in -179.0..179.0_f64,
                reference_heading in 0.0..360.0_f64,
                heading in 0.0..360.0_f64,
                meters in 5.0..500.0_f64
            ) {
                let subject = GeoPoint::new(lat, lng);
                let sectors = SectorSet::from_reference_heading(reference_heading);
                prop_assume!(sectors
                    .boundaries()
                    .iter()
                    .all(|b| heading_difference(*b, heading) > 0.5));

                let by_heading = SectorClassifier::from_heading(
                    subject, reference_heading, 100.0, Strategy::HeadingRange,
                );
                let by_vector = SectorClassifier::from_heading(
                    subject, reference_heading, 100.0, Strategy::VectorDotProduct,
                );
                let candidate = offset(subject, meters, heading);

                let expected = by_heading.classify(Candidate::Heading(heading));
                prop_assert!(expected.is_some());
                prop_assert_eq!(by_heading.classify(Candidate::Point(candidate)), expected);
                prop_assert_eq!(by_vector.classify(Candidate::Point(candidate)), expected);
                prop_assert_eq!(by_vector.classify(Candidate::Heading(heading)), expected);
            }
        }
    }
}
