//! Delegate traits consumed by the caches.

use async_trait::async_trait;

use crate::types::records::{AnalysisRecord, ScreeningRecord};
use crate::ScreenerResult;

/// Produces bulk screening results.
///
/// Implementations own their timeout and retry policy; callers impose none.
#[async_trait]
pub trait ScreeningFetcher: Send + Sync {
    /// Screens `tickers`, or the service's default universe when empty.
    async fn fetch_screening(&self, tickers: &[String]) -> ScreenerResult<Vec<ScreeningRecord>>;

    /// Checks whether the service answers at all.
    async fn is_available(&self) -> bool {
        true
    }
}

/// Produces the narrative analysis for a single symbol.
#[async_trait]
pub trait AnalysisFetcher: Send + Sync {
    async fn fetch_analysis(&self, symbol: &str) -> ScreenerResult<AnalysisRecord>;
}

/// Trims the filter list and drops empty entries.
pub(crate) fn normalize_tickers(tickers: &[String]) -> Vec<String> {
    tickers
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
