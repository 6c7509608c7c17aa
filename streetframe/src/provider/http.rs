//! HTTP client abstraction for testability

use std::time::Duration;

use super::types::ProviderError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the response body.
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError>;

    /// Performs an HTTP PUT request with an empty body and returns the
    /// response body.
    fn put(&self, url: &str) -> Result<Vec<u8>, ProviderError>;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                ProviderError::HttpError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    fn execute(
        &self,
        request: reqwest::blocking::RequestBuilder,
        url: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        let response = request
            .header("Accept", "application/json")
            .send()
            .map_err(|e| map_reqwest_error(e, url))?;

        if !response.status().is_success() {
            return Err(ProviderError::HttpError(format!(
                "HTTP {} from {}",
                response.status(),
                redact_key(url)
            )));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| ProviderError::HttpError(format!("Failed to read response: {}", e)))
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTP client")
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        self.execute(self.client.get(url), url)
    }

    fn put(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        self.execute(self.client.put(url), url)
    }
}

fn map_reqwest_error(error: reqwest::Error, url: &str) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(redact_key(url))
    } else {
        ProviderError::HttpError(format!("Request failed: {}", error.without_url()))
    }
}

/// Strips the value of the `key` query parameter so API keys never reach logs.
fn redact_key(url: &str) -> String {
    let start = ["?key=", "&key="]
        .iter()
        .filter_map(|marker| url.find(marker).map(|i| i + marker.len()))
        .min();
    match start {
        Some(value_start) => {
            let value_end = url[value_start..]
                .find('&')
                .map(|i| value_start + i)
                .unwrap_or(url.len());
            format!("{}REDACTED{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}
