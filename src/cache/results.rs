//! Time-bounded cache for bulk screening results.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use super::stats::{CacheStats, Counters};
use crate::service::ScreeningFetcher;
use crate::store::KeyValueStore;
use crate::types::records::ResultSet;
use crate::{ScreenerError, ScreenerResult};

/// Store key holding the persisted `{data, timestamp}` entry.
pub const RESULTS_KEY: &str = "screenerResults";

/// Validity of a persisted result set, in hours.
pub const FRESHNESS_WINDOW_HOURS: i64 = 24;

/// Source of "now". Swappable so the freshness window can be tested.
pub type Clock = fn() -> DateTime<Utc>;

/// Load-or-fetch cache for the screening result set.
///
/// A persisted entry younger than [`FRESHNESS_WINDOW_HOURS`] is served
/// without touching the network. Every successful fetch overwrites the
/// persisted entry in one write; a failed fetch leaves it untouched.
///
/// Store access and the in-memory current set share one lock, so the
/// persisted entry and [`current`](Self::current) always name the same
/// result set. The lock is never held while a fetch is pending; concurrent
/// loads each fetch and the last to finish wins.
pub struct ResultCache {
    fetcher: Arc<dyn ScreeningFetcher>,
    store: Arc<dyn KeyValueStore>,
    tickers: Vec<String>,
    clock: Clock,
    current: Mutex<Option<ResultSet>>,
    counters: Counters,
}

impl ResultCache {
    /// Creates a cache over `store` that fetches through `fetcher`.
    pub fn new(fetcher: Arc<dyn ScreeningFetcher>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            fetcher,
            store,
            tickers: Vec::new(),
            clock: Utc::now,
            current: Mutex::new(None),
            counters: Counters::default(),
        }
    }

    /// Restricts fetches to `tickers`. Empty means the service default.
    #[must_use]
    pub fn with_tickers(mut self, tickers: Vec<String>) -> Self {
        self.tickers = tickers;
        self
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// The freshness window as a duration.
    pub fn freshness_window() -> Duration {
        Duration::hours(FRESHNESS_WINDOW_HOURS)
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Returns the result set, from the store when fresh or from the service.
    ///
    /// With `force_refresh` the persisted entry is ignored and the service is
    /// always called. Fetch failures surface as [`ScreenerError::Fetch`];
    /// unreadable persisted entries count as a miss.
    pub async fn load(&self, force_refresh: bool) -> ScreenerResult<ResultSet> {
        if !force_refresh {
            if let Some(cached) = self.serve_fresh() {
                debug!(records = cached.len(), "serving screening results from cache");
                self.counters.hit();
                return Ok(cached);
            }
        }

        self.counters.miss();
        info!(
            force_refresh,
            filters = self.tickers.len(),
            "fetching screening results"
        );

        let records = match self.fetcher.fetch_screening(&self.tickers).await {
            Ok(records) => records,
            Err(e) => {
                self.counters.failure();
                let err = e.into_fetch();
                warn!(error = %err, "screening fetch failed, keeping persisted entry");
                return Err(err);
            }
        };

        // Persisted timestamps have millisecond precision.
        let now = (self.clock)();
        let fetched_at = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);
        let set = ResultSet::new(records, fetched_at);
        self.commit(&set);

        info!(records = set.len(), "screening results refreshed");
        Ok(set)
    }

    /// The result set most recently produced by [`load`](Self::load).
    pub fn current(&self) -> Option<ResultSet> {
        self.lock_current().clone()
    }

    /// Timestamp of the current result set.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.current().map(|set| set.timestamp)
    }

    /// The persisted entry regardless of age, if it can be read.
    pub fn persisted_entry(&self) -> Option<ResultSet> {
        match self.read_persisted() {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable persisted entry");
                None
            }
        }
    }

    /// Whether `set` is inside the freshness window right now.
    pub fn is_fresh(&self, set: &ResultSet) -> bool {
        set.is_fresh((self.clock)(), Self::freshness_window())
    }

    /// Returns cache counters.
    pub fn stats(&self) -> CacheStats {
        let size = self.current().map(|set| set.len()).unwrap_or(0);
        self.counters.snapshot(size)
    }

    fn read_persisted(&self) -> ScreenerResult<Option<ResultSet>> {
        let raw = match self.store.get(RESULTS_KEY)? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        serde_json::from_str::<ResultSet>(&raw)
            .map(Some)
            .map_err(|e| ScreenerError::CacheRead(e.to_string()))
    }

    fn read_fresh(&self) -> Option<ResultSet> {
        let entry = self.persisted_entry()?;
        if self.is_fresh(&entry) {
            Some(entry)
        } else {
            debug!(timestamp = %entry.timestamp, "persisted screening results expired");
            None
        }
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<ResultSet>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads a fresh persisted entry and makes it current in one step.
    fn serve_fresh(&self) -> Option<ResultSet> {
        let mut current = self.lock_current();
        let cached = self.read_fresh()?;
        *current = Some(cached.clone());
        Some(cached)
    }

    /// Persists `set` and makes it current in one step.
    fn commit(&self, set: &ResultSet) {
        let mut current = self.lock_current();
        self.persist(set);
        *current = Some(set.clone());
    }

    fn persist(&self, set: &ResultSet) {
        let outcome = serde_json::to_string(set)
            .map_err(ScreenerError::from)
            .and_then(|encoded| self.store.set(RESULTS_KEY, &encoded));

        if let Err(e) = outcome {
            warn!(error = %e, "failed to persist screening results");
        }
    }
}
