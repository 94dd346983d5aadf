//! HTTP client for the screening/analysis service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use super::base::{normalize_tickers, AnalysisFetcher, ScreeningFetcher};
use crate::types::config::ServiceConfig;
use crate::types::records::{AnalysisRecord, ScreeningRecord};
use crate::{ScreenerError, ScreenerResult};

const USER_AGENT_VALUE: &str = concat!("arc-screener/", env!("CARGO_PKG_VERSION"));

/// Client for `GET /screen`, `GET /analyze/{symbol}` and `GET /health`.
#[derive(Debug, Clone)]
pub struct HttpScreeningService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScreeningService {
    /// Creates a client for `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> ScreenerResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| ScreenerError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the `[service]` configuration.
    pub fn from_config(config: &ServiceConfig) -> ScreenerResult<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base_url}/analyze/{symbol}` with the symbol as one encoded segment.
    fn analysis_url(&self, symbol: &str) -> ScreenerResult<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ScreenerError::config(format!("invalid service URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ScreenerError::config("service URL cannot carry a path"))?
            .pop_if_empty()
            .push("analyze")
            .push(symbol);
        Ok(url)
    }
}

#[async_trait]
impl ScreeningFetcher for HttpScreeningService {
    async fn fetch_screening(&self, tickers: &[String]) -> ScreenerResult<Vec<ScreeningRecord>> {
        let url = format!("{}/screen", self.base_url);
        let query: Vec<(&str, String)> = normalize_tickers(tickers)
            .into_iter()
            .map(|t| ("tickers", t))
            .collect();
        debug!(url = %url, filters = query.len(), "fetching screening results");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ScreenerError::Fetch(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScreenerError::Fetch(format!(
                "Failed to fetch data: HTTP {status}"
            )));
        }

        response
            .json::<Vec<ScreeningRecord>>()
            .await
            .map_err(|e| ScreenerError::Fetch(format!("invalid screening payload: {e}")))
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        self.client
            .get(&url)
            .send()
            .await
            .map(|response| response.status().is_success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl AnalysisFetcher for HttpScreeningService {
    async fn fetch_analysis(&self, symbol: &str) -> ScreenerResult<AnalysisRecord> {
        let url = self
            .analysis_url(symbol)
            .map_err(|e| e.into_analysis(symbol))?;
        debug!(url = %url, "fetching analysis");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScreenerError::analysis(symbol, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScreenerError::analysis(
                symbol,
                format!("Analysis failed: HTTP {status}"),
            ));
        }

        response
            .json::<AnalysisRecord>()
            .await
            .map_err(|e| ScreenerError::analysis(symbol, format!("invalid analysis payload: {e}")))
    }
}
