//! Integration tests for the screening result cache over a SQLite store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arc_screener::cache::{ResultCache, RESULTS_KEY};
use arc_screener::service::ScreeningFetcher;
use arc_screener::store::{KeyValueStore, SqliteStore};
use arc_screener::types::records::{ResultSet, ScreeningRecord};
use arc_screener::{ScreenerError, ScreenerResult};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;
use tempfile::TempDir;

struct CountingFetcher {
    symbol: &'static str,
    calls: AtomicUsize,
}

impl CountingFetcher {
    fn new(symbol: &'static str) -> Arc<Self> {
        Arc::new(Self {
            symbol,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScreeningFetcher for CountingFetcher {
    async fn fetch_screening(&self, _tickers: &[String]) -> ScreenerResult<Vec<ScreeningRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![ScreeningRecord::new(self.symbol).with_price(200.0)])
    }
}

struct FailingFetcher;

#[async_trait]
impl ScreeningFetcher for FailingFetcher {
    async fn fetch_screening(&self, _tickers: &[String]) -> ScreenerResult<Vec<ScreeningRecord>> {
        Err(ScreenerError::Fetch("Failed to fetch data".to_string()))
    }
}

fn create_store() -> (Arc<SqliteStore>, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = SqliteStore::open(&dir.path().join("store.db")).expect("Failed to open store");
    (Arc::new(store), dir)
}

fn write_raw(store: &SqliteStore, value: serde_json::Value) {
    store
        .set(RESULTS_KEY, &value.to_string())
        .expect("Failed to write entry");
}

fn write_entry(store: &SqliteStore, symbol: &str, age: Duration) {
    let ts = (Utc::now() - age).timestamp_millis();
    write_raw(
        store,
        json!({"data": [{"symbol": symbol, "current_price": 150}], "timestamp": ts}),
    );
}

#[tokio::test]
async fn test_recent_entry_returned_unchanged_without_fetch() {
    let (store, _dir) = create_store();
    write_entry(&store, "AAPL", Duration::milliseconds(1000));
    let fetcher = CountingFetcher::new("GOOG");
    let cache = ResultCache::new(fetcher.clone(), store);

    let set = cache.load(false).await.unwrap();

    assert_eq!(set.records, vec![ScreeningRecord::new("AAPL").with_price(150.0)]);
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_entries_inside_window_never_fetch() {
    for age_minutes in [0, 1, 60, 12 * 60, 23 * 60 + 59] {
        let (store, _dir) = create_store();
        write_entry(&store, "AAPL", Duration::minutes(age_minutes));
        let fetcher = CountingFetcher::new("GOOG");
        let cache = ResultCache::new(fetcher.clone(), store);

        let set = cache.load(false).await.unwrap();

        assert_eq!(set.records[0].symbol, "AAPL", "age {age_minutes}m");
        assert_eq!(fetcher.calls(), 0, "age {age_minutes}m");
    }
}

#[tokio::test]
async fn test_entries_outside_window_fetch_once() {
    for age_hours in [24, 25, 48, 24 * 30] {
        let (store, _dir) = create_store();
        write_entry(&store, "AAPL", Duration::hours(age_hours));
        let fetcher = CountingFetcher::new("GOOG");
        let cache = ResultCache::new(fetcher.clone(), store.clone());
        let before = Utc::now();

        let set = cache.load(false).await.unwrap();

        assert_eq!(fetcher.calls(), 1, "age {age_hours}h");
        assert_eq!(set.records[0].symbol, "GOOG");
        assert!(set.timestamp >= before - Duration::seconds(1));

        let persisted: ResultSet =
            serde_json::from_str(&store.get(RESULTS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(persisted.records[0].symbol, "GOOG");
    }
}

#[tokio::test]
async fn test_force_refresh_always_fetches() {
    let (store, _dir) = create_store();
    write_entry(&store, "AAPL", Duration::zero());
    let fetcher = CountingFetcher::new("MSFT");
    let cache = ResultCache::new(fetcher.clone(), store);

    assert_eq!(cache.load(false).await.unwrap().records[0].symbol, "AAPL");
    assert_eq!(fetcher.calls(), 0);

    assert_eq!(cache.load(true).await.unwrap().records[0].symbol, "MSFT");
    assert_eq!(cache.load(true).await.unwrap().records[0].symbol, "MSFT");
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_fetched_set_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.db");

    {
        let store = Arc::new(SqliteStore::open(&path).unwrap());
        let cache = ResultCache::new(CountingFetcher::new("NVDA"), store);
        cache.load(false).await.unwrap();
    }

    let store = Arc::new(SqliteStore::open(&path).unwrap());
    let fetcher = CountingFetcher::new("AMD");
    let cache = ResultCache::new(fetcher.clone(), store);

    let set = cache.load(false).await.unwrap();
    assert_eq!(set.records[0].symbol, "NVDA");
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_malformed_entries_degrade_to_fetch() {
    let entries = [
        json!("not an object"),
        json!({"data": [{"symbol": "AAPL"}]}),
        json!({"timestamp": 1_700_000_000_000i64}),
        json!({"data": [{"current_price": 10}], "timestamp": 1_700_000_000_000i64}),
        json!({"data": "AAPL", "timestamp": "yesterday"}),
    ];

    for entry in entries {
        let (store, _dir) = create_store();
        write_raw(&store, entry.clone());
        let fetcher = CountingFetcher::new("GOOG");
        let cache = ResultCache::new(fetcher.clone(), store);

        let set = cache.load(false).await.unwrap();

        assert_eq!(fetcher.calls(), 1, "entry {entry}");
        assert_eq!(set.records[0].symbol, "GOOG");
    }
}

#[tokio::test]
async fn test_failed_fetch_leaves_store_untouched() {
    let (store, _dir) = create_store();
    write_entry(&store, "AAPL", Duration::hours(30));
    let before = store.get(RESULTS_KEY).unwrap();
    let cache = ResultCache::new(Arc::new(FailingFetcher), store.clone());

    let err = cache.load(false).await.unwrap_err();

    assert!(matches!(err, ScreenerError::Fetch(_)));
    assert_eq!(store.get(RESULTS_KEY).unwrap(), before);

    let err = cache.load(true).await.unwrap_err();
    assert!(matches!(err, ScreenerError::Fetch(_)));
    assert_eq!(store.get(RESULTS_KEY).unwrap(), before);
}
