//! Geodesic primitives
//!
//! Provides the spherical-earth bearing, distance and destination-point
//! calculations that the sector classifier and panorama walker consume.
//!
//! All calculations use a sphere of radius [`EARTH_RADIUS_METERS`], the same
//! model the street-level imagery provider uses for its own heading values,
//! so headings computed here line up with link headings reported by the
//! provider.
//!
//! # Heading Convention
//!
//! Headings are degrees clockwise from true north. Internally every heading
//! is kept in `[0, 360)`; [`to_signed_heading`] converts to the provider's
//! `[-180, 180)` convention at the boundary.

mod types;

pub use types::{CoordError, GeoPoint, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Mean earth radius in metres used by every spherical calculation.
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Normalizes a heading to `[0, 360)`.
#[inline]
pub fn normalize_heading(heading: f64) -> f64 {
    let normalized = heading.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Converts a heading to the signed `[-180, 180)` convention.
#[inline]
pub fn to_signed_heading(heading: f64) -> f64 {
    let normalized = normalize_heading(heading);
    if normalized >= 180.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

/// Smallest absolute angle between two headings, in `[0, 180]`.
#[inline]
pub fn heading_difference(a: f64, b: f64) -> f64 {
    let diff = normalize_heading(a - b);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Wraps a longitude to `[-180, 180)`.
#[inline]
pub fn wrap_longitude(lng: f64) -> f64 {
    to_signed_heading(lng)
}

/// Initial great-circle bearing from `from` to `to`.
///
/// Returns degrees in `[0, 360)`, where 0 = North, 90 = East. Identical
/// points yield 0.
pub fn bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlng = (to.lng - from.lng).to_radians();

    let y = dlng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();

    normalize_heading(y.atan2(x).to_degrees())
}

/// Great-circle distance in metres (haversine formula).
pub fn distance(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlng = (to.lng - from.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

/// Destination point reached by travelling `distance_meters` from `from`
/// along the great circle leaving at `heading`.
pub fn offset(from: GeoPoint, distance_meters: f64, heading: f64) -> GeoPoint {
    let angular = distance_meters / EARTH_RADIUS_METERS;
    let heading = heading.to_radians();
    let lat1 = from.lat.to_radians();
    let lng1 = from.lng.to_radians();

    let sin_lat = lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * heading.cos();
    let dlng = (heading.sin() * angular.sin() * lat1.cos()).atan2(angular.cos() - lat1.sin() * sin_lat);

    GeoPoint::new(
        sin_lat.clamp(-1.0, 1.0).asin().to_degrees(),
        wrap_longitude((lng1 + dlng).to_degrees()),
    )
}
