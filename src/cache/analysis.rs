//! Session-lifetime memoization of per-symbol analyses.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use super::stats::{CacheStats, Counters};
use crate::service::AnalysisFetcher;
use crate::store::poisoned;
use crate::types::records::AnalysisRecord;
use crate::ScreenerResult;

/// Holds one [`AnalysisRecord`] per symbol for as long as the cache lives.
///
/// Keys are exact, case-sensitive symbols. Entries never expire and are
/// never revalidated. Failures are not cached: the next call retries.
pub struct AnalysisCache {
    fetcher: Arc<dyn AnalysisFetcher>,
    entries: Mutex<HashMap<String, AnalysisRecord>>,
    counters: Counters,
}

impl AnalysisCache {
    pub fn new(fetcher: Arc<dyn AnalysisFetcher>) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    /// Returns the stored analysis for `symbol`, fetching it on first use.
    pub async fn get_or_fetch(&self, symbol: &str) -> ScreenerResult<AnalysisRecord> {
        if let Some(record) = self.get(symbol) {
            debug!(symbol, "analysis served from cache");
            self.counters.hit();
            return Ok(record);
        }

        self.counters.miss();
        debug!(symbol, "fetching analysis");

        // Lock is not held across the fetch; a concurrent call for the same
        // symbol fetches independently and the last insert wins.
        let record = match self.fetcher.fetch_analysis(symbol).await {
            Ok(record) => record,
            Err(e) => {
                self.counters.failure();
                let err = e.into_analysis(symbol);
                warn!(symbol, error = %err, "analysis fetch failed");
                return Err(err);
            }
        };

        self.entries
            .lock()
            .map_err(|_| poisoned("analysis cache"))?
            .insert(symbol.to_string(), record.clone());

        Ok(record)
    }

    /// Stored analysis for `symbol`, without fetching.
    pub fn get(&self, symbol: &str) -> Option<AnalysisRecord> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(symbol).cloned())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns cache counters.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScreenerError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct MockAnalyst {
        fail: AtomicBool,
        calls: AtomicUsize,
    }

    impl MockAnalyst {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AnalysisFetcher for MockAnalyst {
        async fn fetch_analysis(&self, symbol: &str) -> ScreenerResult<AnalysisRecord> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail.load(Ordering::SeqCst) {
                return Err(ScreenerError::other("503 Service Unavailable"));
            }
            Ok(AnalysisRecord::new(symbol, format!("analysis #{n} for {symbol}")))
        }
    }

    #[tokio::test]
    async fn test_first_call_fetches_then_memoizes() {
        let analyst = Arc::new(MockAnalyst::default());
        let cache = AnalysisCache::new(analyst.clone());

        let first = cache.get_or_fetch("AAPL").await.unwrap();
        let second = cache.get_or_fetch("AAPL").await.unwrap();
        let third = cache.get_or_fetch("AAPL").await.unwrap();

        assert_eq!(analyst.calls(), 1);
        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(first.analysis_text(), Some("analysis #1 for AAPL"));
    }

    #[tokio::test]
    async fn test_keys_are_case_sensitive() {
        let analyst = Arc::new(MockAnalyst::default());
        let cache = AnalysisCache::new(analyst.clone());

        cache.get_or_fetch("AAPL").await.unwrap();
        cache.get_or_fetch("aapl").await.unwrap();

        assert_eq!(analyst.calls(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let analyst = Arc::new(MockAnalyst::default());
        analyst.fail.store(true, Ordering::SeqCst);
        let cache = AnalysisCache::new(analyst.clone());

        let err = cache.get_or_fetch("TSLA").await.unwrap_err();
        assert!(matches!(err, ScreenerError::Analysis { ref symbol, .. } if symbol == "TSLA"));
        assert!(!cache.contains("TSLA"));

        analyst.fail.store(false, Ordering::SeqCst);
        let record = cache.get_or_fetch("TSLA").await.unwrap();

        assert_eq!(analyst.calls(), 2);
        assert_eq!(record.symbol, "TSLA");
        assert!(cache.contains("TSLA"));
    }

    #[tokio::test]
    async fn test_stats() {
        let analyst = Arc::new(MockAnalyst::default());
        let cache = AnalysisCache::new(analyst);

        cache.get_or_fetch("AAPL").await.unwrap();
        cache.get_or_fetch("AAPL").await.unwrap();
        cache.get_or_fetch("MSFT").await.unwrap();

        let stats = cache.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.failures, 0);
    }

    #[test]
    fn test_get_does_not_fetch() {
        let analyst = Arc::new(MockAnalyst::default());
        let cache = AnalysisCache::new(analyst.clone());

        assert!(cache.get("AAPL").is_none());
        assert!(cache.is_empty());
        assert_eq!(analyst.calls(), 0);
    }
}
