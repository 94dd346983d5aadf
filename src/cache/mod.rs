//! Result caches in front of the scoring service.
//!
//! Two independent caches with different freshness rules:
//!
//! - [`ResultCache`]: bulk screening results, persisted in a
//!   [`KeyValueStore`](crate::store::KeyValueStore) and valid for 24 hours
//! - [`AnalysisCache`]: per-symbol analyses, memoized for the process
//!   lifetime, never expired or revalidated

mod analysis;
mod results;
mod stats;

pub use analysis::AnalysisCache;
pub use results::{Clock, ResultCache, FRESHNESS_WINDOW_HOURS, RESULTS_KEY};
pub use stats::CacheStats;
