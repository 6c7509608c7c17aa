//! Google Maps Platform geocoding adapter.
//!
//! Resolves place identifiers (as produced by address autocomplete) to
//! coordinates via the Geocoding API. Requires an API key with the
//! Geocoding API enabled.
//!
//! # API Endpoint
//!
//! `https://maps.googleapis.com/maps/api/geocode/json?place_id={PLACE_ID}&key={API_KEY}`
//!
//! The response carries a top-level `status` string. Anything other than
//! `OK` is surfaced as [`ProviderError::Geocode`].

use serde::Deserialize;

use crate::coord::GeoPoint;
use crate::provider::{
    GeocodeResult, GeocodeStatus, Geocoder, HttpClient, LocationType, ProviderError,
};

/// Default Geocoding API endpoint.
pub const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeEntry>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeEntry {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: GeoPoint,
    #[serde(default)]
    location_type: Option<LocationType>,
}

/// Geocoder backed by the Google Geocoding API.
///
/// # Example
///
/// ```no_run
/// use streetframe::provider::{Geocoder, GoogleGeocoder, ReqwestClient};
///
/// let client = ReqwestClient::new().unwrap();
/// let geocoder = GoogleGeocoder::new(client, "YOUR_API_KEY".to_string());
/// let result = geocoder.geocode("ChIJN1t_tDeuEmsRUsoyG83frY4");
/// ```
pub struct GoogleGeocoder<C: HttpClient> {
    http_client: C,
    api_key: String,
    endpoint: String,
}

impl<C: HttpClient> GoogleGeocoder<C> {
    /// Creates a geocoder using the public endpoint.
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client for making requests
    /// * `api_key` - Valid Google Maps Platform API key
    pub fn new(http_client: C, api_key: String) -> Self {
        Self {
            http_client,
            api_key,
            endpoint: GEOCODE_ENDPOINT.to_string(),
        }
    }

    /// Overrides the endpoint (for proxies and tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Builds the request URL with URL-encoded query parameters.
    fn build_url(&self, place_id: &str) -> Result<String, ProviderError> {
        reqwest::Url::parse_with_params(
            &self.endpoint,
            &[("place_id", place_id), ("key", self.api_key.as_str())],
        )
        .map(String::from)
        .map_err(|e| ProviderError::InvalidRequest(format!("{}: {}", self.endpoint, e)))
    }
}

impl<C: HttpClient> Geocoder for GoogleGeocoder<C> {
    fn geocode(&self, place_id: &str) -> Result<GeocodeResult, ProviderError> {
        if place_id.trim().is_empty() {
            return Err(ProviderError::InvalidRequest("empty place id".to_string()));
        }

        let url = self.build_url(place_id)?;
        let body = self.http_client.get(&url)?;
        let response: GeocodeResponse = serde_json::from_slice(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("geocode response: {}", e)))?;

        let status = GeocodeStatus::from_api(&response.status);
        if status != GeocodeStatus::Ok {
            tracing::warn!(
                place_id,
                status = %status,
                message = response.error_message.as_deref().unwrap_or(""),
                "Geocoding request failed"
            );
            return Err(ProviderError::Geocode(status));
        }

        let entry = response
            .results
            .into_iter()
            .next()
            .ok_or(ProviderError::Geocode(GeocodeStatus::ZeroResults))?;

        tracing::debug!(
            place_id,
            location = %entry.geometry.location,
            "Geocoded place"
        );

        Ok(GeocodeResult {
            location: entry.geometry.location,
            location_type: entry.geometry.location_type,
            status,
        })
    }
}
