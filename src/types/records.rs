//! Screening and analysis records as delivered by the scoring service.
//!
//! Every metric is optional: an absent field is a valid state, not an error.
//! Fields this crate does not know about are kept in `extra` so a record
//! survives a persist/restore cycle unchanged.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Text shown when an analysis payload carries no usable narrative.
pub const NO_ANALYSIS_TEXT: &str = "No analysis available.";

/// Latest computed metrics for one traded symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningRecord {
    /// Ticker symbol, unique within a result set.
    pub symbol: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,

    /// Derived metrics (score, P/FCF, IV rank, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_metrics: Option<CalculatedMetrics>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peg_ratio: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_on_equity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_to_equity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_volatility: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv_short: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv_term_structure_ratio: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insider_net_shares: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_low: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_mean: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_high: Option<f64>,

    /// Any other field sent by the service.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScreeningRecord {
    /// Creates a record with only a symbol set.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            current_price: None,
            calculated_metrics: None,
            peg_ratio: None,
            return_on_equity: None,
            debt_to_equity: None,
            historical_volatility: None,
            iv_short: None,
            iv_term_structure_ratio: None,
            insider_net_shares: None,
            target_low: None,
            target_mean: None,
            target_high: None,
            extra: Map::new(),
        }
    }

    /// Sets the current price.
    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    /// Sets the composite score.
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.metrics_mut().score = Some(score);
        self
    }

    /// Sets the price to free cash flow ratio.
    #[must_use]
    pub fn with_p_fcf(mut self, p_fcf: f64) -> Self {
        self.metrics_mut().p_fcf = Some(p_fcf);
        self
    }

    fn metrics_mut(&mut self) -> &mut CalculatedMetrics {
        self.calculated_metrics
            .get_or_insert_with(CalculatedMetrics::default)
    }

    /// Composite score, if the service computed one.
    pub fn score(&self) -> Option<f64> {
        self.calculated_metrics.as_ref().and_then(|m| m.score)
    }

    /// Price to free cash flow, if known.
    pub fn p_fcf(&self) -> Option<f64> {
        self.calculated_metrics.as_ref().and_then(|m| m.p_fcf)
    }

    /// Implied volatility rank (0..1), if known.
    pub fn iv_rank(&self) -> Option<f64> {
        self.calculated_metrics.as_ref().and_then(|m| m.iv_rank)
    }
}

/// Metrics derived by the scoring service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatedMetrics {
    /// Composite score on a 0-100 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_fcf: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv_rank: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A full screening output plus the instant its fetch completed.
///
/// Serialized as `{"data": [...], "timestamp": <epoch millis>}`, which is
/// also the persisted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(rename = "data")]
    pub records: Vec<ScreeningRecord>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl ResultSet {
    pub fn new(records: Vec<ScreeningRecord>, timestamp: DateTime<Utc>) -> Self {
        Self { records, timestamp }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Time elapsed between the fetch and `now`. Negative if the timestamp
    /// lies in the future.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.timestamp)
    }

    /// Whether the set is still inside `window` at `now` (strictly less).
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.age(now) < window
    }
}

/// Generated narrative for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub symbol: String,

    /// Usually markdown text; any other JSON shape means "no analysis".
    #[serde(default)]
    pub analysis: Value,
}

impl AnalysisRecord {
    pub fn new(symbol: impl Into<String>, analysis: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            analysis: Value::String(analysis.into()),
        }
    }

    /// The narrative, only when the payload is a string.
    pub fn analysis_text(&self) -> Option<&str> {
        self.analysis.as_str()
    }

    /// The narrative or the "no analysis" placeholder.
    pub fn display_text(&self) -> &str {
        self.analysis_text().unwrap_or(NO_ANALYSIS_TEXT)
    }
}
