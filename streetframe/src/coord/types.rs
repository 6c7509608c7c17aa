//! Geographic point type and coordinate errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;

/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;

/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;

/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Errors that can occur when constructing coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude outside [-90, 90].
    #[error("Invalid latitude: {0} (must be between -90 and 90)")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180].
    #[error("Invalid longitude: {0} (must be between -180 and 180)")]
    InvalidLongitude(f64),

    /// Text could not be parsed as `lat,lng`.
    #[error("Invalid point '{0}': expected 'lat,lng'")]
    Unparseable(String),
}

/// A WGS84 latitude/longitude pair in degrees.
///
/// Field names follow the provider's JSON shape (`lat`, `lng`) so records
/// deserialize without renaming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a point without range checks.
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a point, rejecting out-of-range latitude or longitude.
    pub fn validated(lat: f64, lng: f64) -> Result<Self, CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lng) {
            return Err(CoordError::InvalidLongitude(lng));
        }
        Ok(Self { lat, lng })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.7},{:.7}", self.lat, self.lng)
    }
}

impl std::str::FromStr for GeoPoint {
    type Err = CoordError;

    /// Parses `"lat,lng"` (whitespace around either number is allowed).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| CoordError::Unparseable(s.to_string()))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| CoordError::Unparseable(s.to_string()))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| CoordError::Unparseable(s.to_string()))?;
        Self::validated(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_accepts_bounds() {
        assert!(GeoPoint::validated(90.0, 180.0).is_ok());
        assert!(GeoPoint::validated(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_validated_rejects_latitude() {
        assert_eq!(
            GeoPoint::validated(90.5, 0.0),
            Err(CoordError::InvalidLatitude(90.5))
        );
    }

    #[test]
    fn test_validated_rejects_longitude() {
        assert_eq!(
            GeoPoint::validated(0.0, -181.0),
            Err(CoordError::InvalidLongitude(-181.0))
        );
    }

    #[test]
    fn test_parse_point() {
        let point: GeoPoint = "40.7128, -74.0060".parse().unwrap();
        assert_eq!(point, GeoPoint::new(40.7128, -74.0060));
    }

    #[test]
    fn test_parse_point_rejects_garbage() {
        assert!(matches!(
            "north".parse::<GeoPoint>(),
            Err(CoordError::Unparseable(_))
        ));
        assert!(matches!(
            "1.0,abc".parse::<GeoPoint>(),
            Err(CoordError::Unparseable(_))
        ));
        assert!(matches!(
            "95.0,0.0".parse::<GeoPoint>(),
            Err(CoordError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let point = GeoPoint::new(51.5074, -0.1278);
        let parsed: GeoPoint = point.to_string().parse().unwrap();
        assert!((parsed.lat - point.lat).abs() < 1e-7);
        assert!((parsed.lng - point.lng).abs() < 1e-7);
    }
}
