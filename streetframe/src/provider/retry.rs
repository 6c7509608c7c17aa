//! Retry policy and a retrying provider decorator.
//!
//! The walker never retries on its own; transient transport failures are
//! absorbed here, inside the provider stack.
//!
//! # Example
//!
//! ```
//! use streetframe::provider::{PanoramaGraph, RetryPolicy, RetryingProvider};
//!
//! let provider = RetryingProvider::new(PanoramaGraph::new(), RetryPolicy::exponential(3));
//! ```

use std::time::Duration;

use crate::coord::GeoPoint;
use crate::provider::{PanoramaProvider, PanoramaRecord, ProviderError};

/// Default initial delay for exponential backoff (100ms).
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 100;

/// Default maximum delay for exponential backoff (30 seconds).
pub const DEFAULT_MAX_DELAY_SECS: u64 = 30;

/// Default multiplier for exponential backoff.
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

/// How a provider call handles transient failures.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum RetryPolicy {
    /// No retries - fail immediately on error.
    #[default]
    None,

    /// Fixed number of attempts with constant delay between them.
    Fixed {
        /// Maximum number of attempts (including the initial attempt).
        max_attempts: u32,
        /// Delay between retry attempts.
        delay: Duration,
    },

    /// Exponential backoff, capped at `max_delay`.
    ExponentialBackoff {
        /// Maximum number of attempts (including the initial attempt).
        max_attempts: u32,
        /// Delay after the first failure.
        initial_delay: Duration,
        /// Maximum delay cap.
        max_delay: Duration,
        /// Multiplier applied to the delay after each failure.
        multiplier: f64,
    },
}

impl RetryPolicy {
    /// Exponential backoff with the default delays
    /// ([`DEFAULT_INITIAL_DELAY_MS`], [`DEFAULT_MAX_DELAY_SECS`],
    /// [`DEFAULT_BACKOFF_MULTIPLIER`]).
    pub fn exponential(max_attempts: u32) -> Self {
        Self::ExponentialBackoff {
            max_attempts,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
            max_delay: Duration::from_secs(DEFAULT_MAX_DELAY_SECS),
            multiplier: DEFAULT_BACKOFF_MULTIPLIER,
        }
    }

    /// Fixed-delay policy.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self::Fixed {
            max_attempts,
            delay,
        }
    }

    /// Delay before retry number `attempt` (1-based), or `None` once the
    /// attempts are exhausted.
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        match self {
            Self::None => None,
            Self::Fixed {
                max_attempts,
                delay,
            } => (attempt < *max_attempts).then_some(*delay),
            Self::ExponentialBackoff {
                max_attempts,
                initial_delay,
                max_delay,
                multiplier,
            } => {
                if attempt >= *max_attempts {
                    return None;
                }
                let factor = multiplier.powi(attempt.saturating_sub(1) as i32);
                let delay_ms = initial_delay.as_millis() as f64 * factor;
                let capped = delay_ms.min(max_delay.as_millis() as f64);
                Some(Duration::from_millis(capped as u64))
            }
        }
    }

    /// Maximum number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        match self {
            Self::None => 1,
            Self::Fixed { max_attempts, .. } => *max_attempts,
            Self::ExponentialBackoff { max_attempts, .. } => *max_attempts,
        }
    }
}

/// Provider decorator that retries transient failures.
///
/// Only [`ProviderError::is_transient`] errors are retried; `NotFound` and
/// malformed responses fail immediately.
pub struct RetryingProvider<P> {
    inner: P,
    policy: RetryPolicy,
}

impl<P: PanoramaProvider> RetryingProvider<P> {
    /// Wraps `inner` with the given policy.
    pub fn new(inner: P, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// The policy in use.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn with_retry<T>(
        &self,
        operation: &str,
        mut call: impl FnMut() -> Result<T, ProviderError>,
    ) -> Result<T, ProviderError> {
        let mut attempt = 1;
        loop {
            match call() {
                Err(e) if e.is_transient() => match self.policy.delay_for_attempt(attempt) {
                    Some(delay) => {
                        tracing::warn!(
                            provider = self.inner.name(),
                            operation,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "Transient provider failure, retrying"
                        );
                        std::thread::sleep(delay);
                        attempt += 1;
                    }
                    None => return Err(e),
                },
                other => return other,
            }
        }
    }
}

impl<P: PanoramaProvider> PanoramaProvider for RetryingProvider<P> {
    fn nearest_panorama(
        &self,
        point: GeoPoint,
        radius_meters: f64,
        outdoor_only: bool,
    ) -> Result<PanoramaRecord, ProviderError> {
        self.with_retry("nearest_panorama", || {
            self.inner.nearest_panorama(point, radius_meters, outdoor_only)
        })
    }

    fn panorama_by_id(&self, id: &str) -> Result<PanoramaRecord, ProviderError> {
        self.with_retry("panorama_by_id", || self.inner.panorama_by_id(id))
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
