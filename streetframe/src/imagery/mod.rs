//! Street View Static and Static Maps request URLs.
//!
//! Builds unsigned image URLs for a frame set. Nothing here performs a
//! request; the URLs are handed to whoever downloads the images.
//!
//! # Zoom and field of view
//!
//! Interactive panoramas are positioned with a zoom level while the static
//! API takes a horizontal field of view. They relate as
//! `fov = 180 / 2^zoom`, so zoom 0 is 180° and zoom 1 is 90°.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::coord::{normalize_heading, GeoPoint};

/// Street View Static API endpoint.
pub const STREET_VIEW_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/streetview";

/// Static Maps API endpoint.
pub const STATIC_MAP_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Largest width or height either static API accepts, in pixels.
pub const MAX_IMAGE_SIZE: u32 = 640;

/// Largest Static Maps zoom level.
pub const MAX_MAP_ZOOM: u8 = 21;

/// Default Static Maps pixel density multiplier.
pub const DEFAULT_MAP_SCALE: u8 = 2;

/// Errors raised while building image URLs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImageryError {
    /// Width or height outside `1..=640`.
    #[error("Invalid image size {width}x{height}: each side must be 1..={max}", max = MAX_IMAGE_SIZE)]
    InvalidSize { width: u32, height: u32 },

    /// Pitch outside `-90..=90`.
    #[error("Invalid pitch {0}: must be between -90 and 90")]
    InvalidPitch(f64),

    /// Map zoom outside `0..=21`.
    #[error("Invalid map zoom {0}: must be 0..={max}", max = MAX_MAP_ZOOM)]
    InvalidZoom(u8),

    /// Map scale other than 1 or 2.
    #[error("Invalid map scale {0}: must be 1 or 2")]
    InvalidScale(u8),

    /// No API key configured.
    #[error("No API key configured")]
    MissingApiKey,

    /// Unrecognised map type name.
    #[error("Invalid map type '{0}': expected roadmap, satellite, terrain or hybrid")]
    InvalidMapType(String),

    /// The endpoint could not be parsed as a URL.
    #[error("Invalid endpoint '{0}'")]
    InvalidEndpoint(String),
}

/// Converts an interactive panorama zoom level to a field of view in degrees.
#[inline]
pub fn zoom_to_fov(zoom: f64) -> f64 {
    180.0 / 2f64.powf(zoom)
}

/// Pixel dimensions of a requested image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn validate(self) -> Result<Self, ImageryError> {
        let valid = |side: u32| (1..=MAX_IMAGE_SIZE).contains(&side);
        if valid(self.width) && valid(self.height) {
            Ok(self)
        } else {
            Err(ImageryError::InvalidSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::new(MAX_IMAGE_SIZE, MAX_IMAGE_SIZE)
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Static Maps base layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapType {
    #[default]
    Roadmap,
    Satellite,
    Terrain,
    Hybrid,
}

impl MapType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapType::Roadmap => "roadmap",
            MapType::Satellite => "satellite",
            MapType::Terrain => "terrain",
            MapType::Hybrid => "hybrid",
        }
    }
}

impl FromStr for MapType {
    type Err = ImageryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "roadmap" => Ok(MapType::Roadmap),
            "satellite" => Ok(MapType::Satellite),
            "terrain" => Ok(MapType::Terrain),
            "hybrid" => Ok(MapType::Hybrid),
            _ => Err(ImageryError::InvalidMapType(s.to_string())),
        }
    }
}

/// A Street View Static image of one panorama.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetViewImageRequest {
    pub pano_id: String,
    /// Camera heading in degrees, either sign convention.
    pub heading: f64,
    /// Camera pitch in degrees, `-90..=90`.
    pub pitch: f64,
    /// Horizontal field of view in degrees.
    pub fov: f64,
    pub size: ImageSize,
}

impl StreetViewImageRequest {
    /// Creates a level (pitch 0) request with a field of view derived from
    /// `zoom`.
    pub fn new(pano_id: impl Into<String>, heading: f64, zoom: f64) -> Self {
        Self {
            pano_id: pano_id.into(),
            heading,
            pitch: 0.0,
            fov: zoom_to_fov(zoom),
            size: ImageSize::default(),
        }
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }
}

/// A Static Maps snapshot centred on a point.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMapRequest {
    pub center: GeoPoint,
    pub zoom: u8,
    pub size: ImageSize,
    /// Pixel density multiplier, 1 or 2.
    pub scale: u8,
    pub map_type: MapType,
}

impl StaticMapRequest {
    pub fn new(center: GeoPoint, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            size: ImageSize::default(),
            scale: DEFAULT_MAP_SCALE,
            map_type: MapType::default(),
        }
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_scale(mut self, scale: u8) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_map_type(mut self, map_type: MapType) -> Self {
        self.map_type = map_type;
        self
    }
}

/// Builds image URLs carrying an API key.
///
/// Query values are URL-encoded; signing is left to the caller.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    api_key: String,
    street_view_endpoint: String,
    static_map_endpoint: String,
}

impl ImageUrlBuilder {
    /// Creates a builder using the public endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            street_view_endpoint: STREET_VIEW_ENDPOINT.to_string(),
            static_map_endpoint: STATIC_MAP_ENDPOINT.to_string(),
        }
    }

    /// Overrides both endpoints' shared base, e.g. for a signing proxy.
    ///
    /// `base` replaces `https://maps.googleapis.com/maps/api`.
    pub fn with_base(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.street_view_endpoint = format!("{}/streetview", base);
        self.static_map_endpoint = format!("{}/staticmap", base);
        self
    }

    /// Street View Static URL for a panorama.
    pub fn street_view_url(&self, request: &StreetViewImageRequest) -> Result<String, ImageryError> {
        let size = request.size.validate()?;
        if !(-90.0..=90.0).contains(&request.pitch) {
            return Err(ImageryError::InvalidPitch(request.pitch));
        }

        self.build(
            &self.street_view_endpoint,
            &[
                ("size", size.to_string()),
                ("pano", request.pano_id.clone()),
                ("fov", format_degrees(request.fov)),
                ("heading", format_degrees(normalize_heading(request.heading))),
                ("pitch", format_degrees(request.pitch)),
            ],
        )
    }

    /// Static Maps URL for a snapshot.
    pub fn static_map_url(&self, request: &StaticMapRequest) -> Result<String, ImageryError> {
        let size = request.size.validate()?;
        if request.zoom > MAX_MAP_ZOOM {
            return Err(ImageryError::InvalidZoom(request.zoom));
        }
        if !matches!(request.scale, 1 | 2) {
            return Err(ImageryError::InvalidScale(request.scale));
        }

        self.build(
            &self.static_map_endpoint,
            &[
                ("size", size.to_string()),
                ("center", format!("{},{}", request.center.lat, request.center.lng)),
                ("zoom", request.zoom.to_string()),
                ("scale", request.scale.to_string()),
                ("maptype", request.map_type.as_str().to_string()),
            ],
        )
    }

    fn build(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String, ImageryError> {
        if self.api_key.trim().is_empty() {
            return Err(ImageryError::MissingApiKey);
        }

        let mut url = reqwest::Url::parse(endpoint)
            .map_err(|_| ImageryError::InvalidEndpoint(endpoint.to_string()))?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("key", &self.api_key);
        Ok(url.into())
    }
}

/// Formats an angle with at most two decimals, trimming trailing zeros.
fn format_degrees(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder::new("test_key")
    }

    #[test]
    fn test_zoom_to_fov() {
        assert_eq!(zoom_to_fov(0.0), 180.0);
        assert_eq!(zoom_to_fov(1.0), 90.0);
        assert_eq!(zoom_to_fov(2.0), 45.0);
        assert!((zoom_to_fov(0.8) - 103.38).abs() < 0.01);
    }

    #[test]
    fn test_format_degrees() {
        assert_eq!(format_degrees(90.0), "90");
        assert_eq!(format_degrees(103.3934), "103.39");
        assert_eq!(format_degrees(12.5), "12.5");
        assert_eq!(format_degrees(-0.001), "0");
        assert_eq!(format_degrees(-10.0), "-10");
    }

    #[test]
    fn test_street_view_url() {
        let request = StreetViewImageRequest::new("pano_123", 90.0, 1.0)
            .with_size(ImageSize::new(640, 480));
        let url = builder().street_view_url(&request).unwrap();
        assert_eq!(
            url,
            "https://maps.googleapis.com/maps/api/streetview?size=640x480&pano=pano_123&fov=90&heading=90&pitch=0&key=test_key"
        );
    }

    #[test]
    fn test_street_view_url_normalizes_heading() {
        let request = StreetViewImageRequest::new("p", -90.0, 0.0);
        let url = builder().street_view_url(&request).unwrap();
        assert!(url.contains("heading=270&"));
        assert!(url.contains("fov=180&"));
    }

    #[test]
    fn test_street_view_url_encodes_pano_id() {
        let request = StreetViewImageRequest::new("a&b c", 0.0, 0.0);
        let url = builder().street_view_url(&request).unwrap();
        assert!(url.contains("pano=a%26b+c&"));
    }

    #[test]
    fn test_street_view_rejects_bad_size_and_pitch() {
        let too_wide = StreetViewImageRequest::new("p", 0.0, 0.0).with_size(ImageSize::new(641, 100));
        assert_eq!(
            builder().street_view_url(&too_wide),
            Err(ImageryError::InvalidSize {
                width: 641,
                height: 100
            })
        );

        let zero = StreetViewImageRequest::new("p", 0.0, 0.0).with_size(ImageSize::new(100, 0));
        assert!(matches!(
            builder().street_view_url(&zero),
            Err(ImageryError::InvalidSize { .. })
        ));

        let tilted = StreetViewImageRequest::new("p", 0.0, 0.0).with_pitch(95.0);
        assert_eq!(builder().street_view_url(&tilted), Err(ImageryError::InvalidPitch(95.0)));
    }

    #[test]
    fn test_static_map_url() {
        let request = StaticMapRequest::new(GeoPoint::new(51.5, -0.125), 17);
        let url = builder().static_map_url(&request).unwrap();
        assert_eq!(
            url,
            "https://maps.googleapis.com/maps/api/staticmap?size=640x640&center=51.5%2C-0.125&zoom=17&scale=2&maptype=roadmap&key=test_key"
        );
    }

    #[test]
    fn test_static_map_validation() {
        let center = GeoPoint::new(0.0, 0.0);
        assert_eq!(
            builder().static_map_url(&StaticMapRequest::new(center, 22)),
            Err(ImageryError::InvalidZoom(22))
        );
        assert_eq!(
            builder().static_map_url(&StaticMapRequest::new(center, 10).with_scale(3)),
            Err(ImageryError::InvalidScale(3))
        );
    }

    #[test]
    fn test_missing_api_key() {
        let request = StaticMapRequest::new(GeoPoint::new(0.0, 0.0), 10);
        assert_eq!(
            ImageUrlBuilder::new("").static_map_url(&request),
            Err(ImageryError::MissingApiKey)
        );
    }

    #[test]
    fn test_with_base() {
        let request = StaticMapRequest::new(GeoPoint::new(0.0, 0.0), 10)
            .with_map_type(MapType::Satellite);
        let url = builder()
            .with_base("http://localhost:8080/maps/")
            .static_map_url(&request)
            .unwrap();
        assert!(url.starts_with("http://localhost:8080/maps/staticmap?"));
        assert!(url.contains("maptype=satellite"));
    }

    #[test]
    fn test_map_type_parsing() {
        assert_eq!("Hybrid".parse::<MapType>().unwrap(), MapType::Hybrid);
        assert!(matches!(
            "moon".parse::<MapType>(),
            Err(ImageryError::InvalidMapType(_))
        ));
    }
}
