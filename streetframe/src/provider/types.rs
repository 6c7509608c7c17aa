//! Provider-facing records, traits and errors.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coord::GeoPoint;

/// Errors that can occur when talking to the imagery/geocoding provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// No panorama matched the query.
    #[error("Panorama not found: {0}")]
    NotFound(String),

    /// HTTP transport or status failure.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The request timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The response body could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The geocoder answered with a non-OK status.
    #[error("Geocoding failed with status {0}")]
    Geocode(GeocodeStatus),

    /// Reading provider data from disk failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl ProviderError {
    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::HttpError(_) | ProviderError::Timeout(_))
    }
}

/// A directed edge from one panorama to a neighbouring panorama.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanoramaLink {
    /// Identifier of the neighbouring panorama.
    #[serde(alias = "pano")]
    pub pano_id: String,
    /// Heading from the owning panorama toward the neighbour, in degrees.
    pub heading: f64,
}

impl PanoramaLink {
    /// Creates a link.
    pub fn new(pano_id: impl Into<String>, heading: f64) -> Self {
        Self {
            pano_id: pano_id.into(),
            heading,
        }
    }
}

/// A panorama and its outgoing links as reported by the provider.
///
/// Link order is not meaningful; at most four links are expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanoramaRecord {
    /// Panorama identifier.
    #[serde(alias = "pano")]
    pub id: String,
    /// Capture location.
    pub location: GeoPoint,
    /// Outgoing links to adjacent panoramas.
    #[serde(default)]
    pub links: Vec<PanoramaLink>,
}

impl PanoramaRecord {
    /// Creates a record without links.
    pub fn new(id: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            location,
            links: Vec::new(),
        }
    }

    /// Adds an outgoing link.
    pub fn with_link(mut self, pano_id: impl Into<String>, heading: f64) -> Self {
        self.links.push(PanoramaLink::new(pano_id, heading));
        self
    }
}

/// Street-level panorama lookups.
///
/// Implementations own their transport, search configuration and retry
/// behaviour; callers see only records or errors.
pub trait PanoramaProvider: Send + Sync {
    /// Returns the panorama closest to `point` within `radius_meters`.
    ///
    /// When `outdoor_only` is set, indoor panoramas are ignored.
    fn nearest_panorama(
        &self,
        point: GeoPoint,
        radius_meters: f64,
        outdoor_only: bool,
    ) -> Result<PanoramaRecord, ProviderError>;

    /// Returns the panorama with the given identifier.
    fn panorama_by_id(&self, id: &str) -> Result<PanoramaRecord, ProviderError>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

impl<P: PanoramaProvider + ?Sized> PanoramaProvider for &P {
    fn nearest_panorama(
        &self,
        point: GeoPoint,
        radius_meters: f64,
        outdoor_only: bool,
    ) -> Result<PanoramaRecord, ProviderError> {
        (**self).nearest_panorama(point, radius_meters, outdoor_only)
    }

    fn panorama_by_id(&self, id: &str) -> Result<PanoramaRecord, ProviderError> {
        (**self).panorama_by_id(id)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: PanoramaProvider + ?Sized> PanoramaProvider for Arc<P> {
    fn nearest_panorama(
        &self,
        point: GeoPoint,
        radius_meters: f64,
        outdoor_only: bool,
    ) -> Result<PanoramaRecord, ProviderError> {
        (**self).nearest_panorama(point, radius_meters, outdoor_only)
    }

    fn panorama_by_id(&self, id: &str) -> Result<PanoramaRecord, ProviderError> {
        (**self).panorama_by_id(id)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: PanoramaProvider + ?Sized> PanoramaProvider for Box<P> {
    fn nearest_panorama(
        &self,
        point: GeoPoint,
        radius_meters: f64,
        outdoor_only: bool,
    ) -> Result<PanoramaRecord, ProviderError> {
        (**self).nearest_panorama(point, radius_meters, outdoor_only)
    }

    fn panorama_by_id(&self, id: &str) -> Result<PanoramaRecord, ProviderError> {
        (**self).panorama_by_id(id)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Geocoder response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeocodeStatus {
    /// At least one result was returned.
    Ok,
    /// The request was valid but matched nothing.
    ZeroResults,
    /// The account is over its request quota.
    OverQueryLimit,
    /// The request was refused (usually a key problem).
    RequestDenied,
    /// The request was malformed.
    InvalidRequest,
    /// Server-side failure; a retry may succeed.
    UnknownError,
}

impl GeocodeStatus {
    /// Parses the provider's status string. Unrecognised values map to
    /// [`GeocodeStatus::UnknownError`].
    pub fn from_api(status: &str) -> Self {
        match status {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "INVALID_REQUEST" => Self::InvalidRequest,
            _ => Self::UnknownError,
        }
    }

    /// The provider's status string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for GeocodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Precision of a geocoded location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    /// Precise street address.
    Rooftop,
    /// Interpolated between two precise points.
    RangeInterpolated,
    /// Centre of a polyline or polygon.
    GeometricCenter,
    /// Approximate location.
    Approximate,
    /// Any value this version does not know about.
    #[serde(other)]
    Unknown,
}

/// A successfully geocoded place.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    /// Geocoded location.
    pub location: GeoPoint,
    /// Precision of `location`, when reported.
    pub location_type: Option<LocationType>,
    /// Provider status (always [`GeocodeStatus::Ok`] for returned results).
    pub status: GeocodeStatus,
}

/// Resolves place identifiers to locations.
pub trait Geocoder: Send + Sync {
    /// Geocodes a place identifier.
    ///
    /// Non-OK statuses such as `ZERO_RESULTS` and `OVER_QUERY_LIMIT` fail
    /// with [`ProviderError::Geocode`].
    fn geocode(&self, place_id: &str) -> Result<GeocodeResult, ProviderError>;
}

impl<G: Geocoder + ?Sized> Geocoder for Arc<G> {
    fn geocode(&self, place_id: &str) -> Result<GeocodeResult, ProviderError> {
        (**self).geocode(place_id)
    }
}
