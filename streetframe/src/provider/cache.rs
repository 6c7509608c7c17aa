//! Memoising provider decorator backed by moka.
//!
//! Panorama records are immutable for the lifetime of a run, so by-id
//! lookups are cached. Nearest-panorama queries are passed through since
//! their answer depends on radius and filter as well as the point.

use moka::sync::Cache as MokaCache;

use crate::coord::GeoPoint;
use crate::provider::{PanoramaProvider, PanoramaRecord, ProviderError};

/// Default number of panorama records kept in memory.
pub const DEFAULT_CACHE_CAPACITY: u64 = 1024;

/// Provider decorator that caches successful `panorama_by_id` results.
///
/// Failures are never cached.
pub struct CachingProvider<P> {
    inner: P,
    cache: MokaCache<String, PanoramaRecord>,
}

impl<P: PanoramaProvider> CachingProvider<P> {
    /// Wraps `inner` with a cache of [`DEFAULT_CACHE_CAPACITY`] records.
    pub fn new(inner: P) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// Wraps `inner` with a cache bounded to `capacity` records.
    pub fn with_capacity(inner: P, capacity: u64) -> Self {
        Self {
            inner,
            cache: MokaCache::builder().max_capacity(capacity).build(),
        }
    }

    /// Number of cached records.
    ///
    /// Reflects pending inserts only after moka's maintenance has run.
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl<P: PanoramaProvider> PanoramaProvider for CachingProvider<P> {
    fn nearest_panorama(
        &self,
        point: GeoPoint,
        radius_meters: f64,
        outdoor_only: bool,
    ) -> Result<PanoramaRecord, ProviderError> {
        let record = self.inner.nearest_panorama(point, radius_meters, outdoor_only)?;
        self.cache.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn panorama_by_id(&self, id: &str) -> Result<PanoramaRecord, ProviderError> {
        if let Some(record) = self.cache.get(id) {
            tracing::trace!(pano_id = id, "Panorama cache hit");
            return Ok(record);
        }

        let record = self.inner.panorama_by_id(id)?;
        self.cache.insert(id.to_string(), record.clone());
        Ok(record)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::provider::PanoramaGraph;

    struct CountingProvider {
        graph: PanoramaGraph,
        by_id_calls: AtomicU32,
    }

    impl PanoramaProvider for CountingProvider {
        fn nearest_panorama(
            &self,
            point: GeoPoint,
            radius_meters: f64,
            outdoor_only: bool,
        ) -> Result<PanoramaRecord, ProviderError> {
            self.graph.nearest_panorama(point, radius_meters, outdoor_only)
        }

        fn panorama_by_id(&self, id: &str) -> Result<PanoramaRecord, ProviderError> {
            self.by_id_calls.fetch_add(1, Ordering::SeqCst);
            self.graph.panorama_by_id(id)
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn provider() -> CachingProvider<CountingProvider> {
        let graph = PanoramaGraph::new()
            .with_panorama(PanoramaRecord::new("a", GeoPoint::new(0.0, 0.0)))
            .with_panorama(PanoramaRecord::new("b", GeoPoint::new(0.0, 0.001)));
        CachingProvider::new(CountingProvider {
            graph,
            by_id_calls: AtomicU32::new(0),
        })
    }

    #[test]
    fn test_by_id_is_memoised() {
        let provider = provider();
        assert_eq!(provider.panorama_by_id("b").unwrap().id, "b");
        assert_eq!(provider.panorama_by_id("b").unwrap().id, "b");
        assert_eq!(provider.inner.by_id_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_nearest_result_warms_cache() {
        let provider = provider();
        provider
            .nearest_panorama(GeoPoint::new(0.0, 0.0), 10.0, true)
            .unwrap();
        assert_eq!(provider.panorama_by_id("a").unwrap().id, "a");
        assert_eq!(provider.inner.by_id_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let provider = provider();
        assert!(provider.panorama_by_id("missing").is_err());
        assert!(provider.panorama_by_id("missing").is_err());
        assert_eq!(provider.inner.by_id_calls.load(Ordering::SeqCst), 2);
        assert_eq!(provider.entry_count(), 0);
    }
}
