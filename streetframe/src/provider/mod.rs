//! Provider capability interfaces and adapters.
//!
//! The walker consumes panorama data through [`PanoramaProvider`] and the
//! frame planner resolves places through [`Geocoder`]. Adapters:
//!
//! - [`GoogleGeocoder`]: Geocoding API over an injected [`HttpClient`]
//! - [`PanoramaGraph`]: deterministic in-memory link graph (JSON loadable)
//! - [`RetryingProvider`]: retries transient failures per [`RetryPolicy`]
//! - [`CachingProvider`]: memoises by-id lookups
//!
//! Decorators compose:
//!
//! ```
//! use streetframe::provider::{CachingProvider, PanoramaGraph, RetryPolicy, RetryingProvider};
//!
//! let provider = CachingProvider::new(RetryingProvider::new(
//!     PanoramaGraph::new(),
//!     RetryPolicy::exponential(3),
//! ));
//! ```

mod cache;
mod google;
mod graph;
mod http;
mod retry;
mod types;

pub use cache::{CachingProvider, DEFAULT_CACHE_CAPACITY};
pub use google::{GoogleGeocoder, GEOCODE_ENDPOINT};
pub use graph::PanoramaGraph;
pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use retry::{
    RetryPolicy, RetryingProvider, DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_INITIAL_DELAY_MS,
    DEFAULT_MAX_DELAY_SECS,
};
pub use types::{
    GeocodeResult, GeocodeStatus, Geocoder, LocationType, PanoramaLink, PanoramaProvider,
    PanoramaRecord, ProviderError,
};

#[cfg(test)]
pub use http::tests::MockHttpClient;
