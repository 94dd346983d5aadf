//! Remote scoring service delegates.
//!
//! The caches only see the [`ScreeningFetcher`] and [`AnalysisFetcher`]
//! traits; [`HttpScreeningService`] implements both against the HTTP API.

mod base;
mod http;

pub use base::{AnalysisFetcher, ScreeningFetcher};
pub use http::HttpScreeningService;
