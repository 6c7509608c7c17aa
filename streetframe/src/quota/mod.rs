//! Remaining-quota checks against the usage service.
//!
//! The usage service exposes one counter per quota kind:
//!
//! | Kind             | Endpoint                       | Field                                 |
//! |------------------|--------------------------------|---------------------------------------|
//! | Geocoding usage  | `{host}/api/v0/geocoding-usage`| `geocoding_usage.remaining_requests`  |
//! | Max sessions     | `{host}/api/v0/max-sessions`   | `max_sessions.remaining_sessions`     |
//!
//! Checks never fail: an unreachable service or unreadable body reads as no
//! remaining quota. Decrements report failures to the caller.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::provider::{HttpClient, ProviderError};

/// Remaining count at or below which a quota is reported as almost exceeded.
pub const ALMOST_EXCEEDED_THRESHOLD: u64 = 5;

/// Errors from quota operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuotaError {
    /// No usage service host configured.
    #[error("No quota host configured")]
    MissingHost,

    /// Unrecognised quota kind name.
    #[error("Invalid quota kind '{0}': expected geocoding-usage or max-sessions")]
    InvalidKind(String),

    /// The usage service request failed.
    #[error("Quota service request failed: {0}")]
    Provider(#[from] ProviderError),
}

/// A counter kept by the usage service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuotaKind {
    /// Geocoding requests left.
    GeocodingUsage,
    /// Concurrent sessions left.
    MaxSessions,
}

impl QuotaKind {
    pub const ALL: [QuotaKind; 2] = [QuotaKind::GeocodingUsage, QuotaKind::MaxSessions];

    /// Path segment under `/api/v0/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotaKind::GeocodingUsage => "geocoding-usage",
            QuotaKind::MaxSessions => "max-sessions",
        }
    }

    fn json_path(&self) -> (&'static str, &'static str) {
        match self {
            QuotaKind::GeocodingUsage => ("geocoding_usage", "remaining_requests"),
            QuotaKind::MaxSessions => ("max_sessions", "remaining_sessions"),
        }
    }
}

impl fmt::Display for QuotaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuotaKind {
    type Err = QuotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "geocoding-usage" | "geocoding" => Ok(QuotaKind::GeocodingUsage),
            "max-sessions" | "sessions" => Ok(QuotaKind::MaxSessions),
            _ => Err(QuotaError::InvalidKind(s.to_string())),
        }
    }
}

/// Result of a quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaStatus {
    pub remaining: u64,
    pub exceeded: bool,
    pub almost_exceeded: bool,
}

impl QuotaStatus {
    pub fn from_remaining(remaining: u64) -> Self {
        Self {
            remaining,
            exceeded: remaining == 0,
            almost_exceeded: (1..=ALMOST_EXCEEDED_THRESHOLD).contains(&remaining),
        }
    }
}

/// Client for the usage service.
pub struct QuotaClient<C: HttpClient> {
    http_client: C,
    host: String,
}

impl<C: HttpClient> QuotaClient<C> {
    /// Creates a client for the service at `host` (scheme and authority,
    /// e.g. `https://example.com`).
    pub fn new(http_client: C, host: impl Into<String>) -> Result<Self, QuotaError> {
        let host = host.into().trim().trim_end_matches('/').to_string();
        if host.is_empty() {
            return Err(QuotaError::MissingHost);
        }
        Ok(Self { http_client, host })
    }

    fn endpoint(&self, kind: QuotaKind) -> String {
        format!("{}/api/v0/{}", self.host, kind.as_str())
    }

    /// Reads the remaining count for `kind`.
    pub fn check(&self, kind: QuotaKind) -> QuotaStatus {
        let remaining = match self.http_client.get(&self.endpoint(kind)) {
            Ok(body) => parse_remaining(kind, &body).unwrap_or_else(|| {
                tracing::warn!(kind = %kind, "Unreadable quota response");
                0
            }),
            Err(e) => {
                tracing::warn!(kind = %kind, error = %e, "Quota check failed");
                0
            }
        };

        let status = QuotaStatus::from_remaining(remaining);
        tracing::debug!(
            kind = %kind,
            remaining = status.remaining,
            exceeded = status.exceeded,
            "Checked quota"
        );
        status
    }

    /// Consumes one unit of `kind`.
    pub fn decrement(&self, kind: QuotaKind) -> Result<(), QuotaError> {
        let url = format!("{}?action=decrement", self.endpoint(kind));
        self.http_client.put(&url)?;
        tracing::debug!(kind = %kind, "Decremented quota");
        Ok(())
    }
}

fn parse_remaining(kind: QuotaKind, body: &[u8]) -> Option<u64> {
    let (section, field) = kind.json_path();
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get(section)?.get(field)?.as_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockHttpClient;

    fn client(mock: MockHttpClient) -> QuotaClient<MockHttpClient> {
        QuotaClient::new(mock, "https://quota.test/").unwrap()
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(
            QuotaStatus::from_remaining(0),
            QuotaStatus {
                remaining: 0,
                exceeded: true,
                almost_exceeded: false
            }
        );
        assert!(QuotaStatus::from_remaining(1).almost_exceeded);
        assert!(QuotaStatus::from_remaining(5).almost_exceeded);
        let plenty = QuotaStatus::from_remaining(6);
        assert!(!plenty.exceeded && !plenty.almost_exceeded);
    }

    #[test]
    fn test_check_geocoding_usage() {
        let quota = client(MockHttpClient::json(
            r#"{"geocoding_usage": {"remaining_requests": 42}}"#,
        ));
        let status = quota.check(QuotaKind::GeocodingUsage);
        assert_eq!(status.remaining, 42);
        assert!(!status.exceeded);
        assert_eq!(
            quota.http_client.requests(),
            vec!["GET https://quota.test/api/v0/geocoding-usage".to_string()]
        );
    }

    #[test]
    fn test_check_max_sessions() {
        let quota = client(MockHttpClient::json(
            r#"{"max_sessions": {"remaining_sessions": 3}}"#,
        ));
        let status = quota.check(QuotaKind::MaxSessions);
        assert_eq!(status.remaining, 3);
        assert!(status.almost_exceeded);
    }

    #[test]
    fn test_check_wrong_shape_is_exceeded() {
        let quota = client(MockHttpClient::json(
            r#"{"max_sessions": {"remaining_sessions": 3}}"#,
        ));
        assert!(quota.check(QuotaKind::GeocodingUsage).exceeded);
    }

    #[test]
    fn test_check_transport_failure_is_exceeded() {
        let quota = client(MockHttpClient::new(Err(ProviderError::HttpError(
            "connection refused".to_string(),
        ))));
        assert_eq!(quota.check(QuotaKind::MaxSessions), QuotaStatus::from_remaining(0));
    }

    #[test]
    fn test_decrement() {
        let quota = client(MockHttpClient::json("{}"));
        quota.decrement(QuotaKind::MaxSessions).unwrap();
        assert_eq!(
            quota.http_client.requests(),
            vec!["PUT https://quota.test/api/v0/max-sessions?action=decrement".to_string()]
        );
    }

    #[test]
    fn test_decrement_failure_is_reported() {
        let quota = client(MockHttpClient::new(Err(ProviderError::Timeout(
            "quota".to_string(),
        ))));
        assert!(matches!(
            quota.decrement(QuotaKind::GeocodingUsage),
            Err(QuotaError::Provider(ProviderError::Timeout(_)))
        ));
    }

    #[test]
    fn test_missing_host() {
        assert!(matches!(
            QuotaClient::new(MockHttpClient::json("{}"), "  "),
            Err(QuotaError::MissingHost)
        ));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("geocoding_usage".parse::<QuotaKind>().unwrap(), QuotaKind::GeocodingUsage);
        assert_eq!("Max-Sessions".parse::<QuotaKind>().unwrap(), QuotaKind::MaxSessions);
        assert!("credits".parse::<QuotaKind>().is_err());
    }
}
