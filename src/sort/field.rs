//! Sort keys and value resolution.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::columns::Column;
use crate::types::records::ScreeningRecord;
use crate::ScreenerError;

const METRICS_PREFIXES: [&str; 2] = ["calculated_metrics.", "metrics."];

/// Fields stored under `calculated_metrics`.
const METRIC_FIELDS: [&str; 3] = ["score", "p_fcf", "iv_rank"];

/// Reference to the record field used as a sort key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPath {
    /// Field on the record itself, e.g. `current_price`.
    Top(String),
    /// Field nested under `calculated_metrics`, e.g. `score`.
    Metric(String),
}

impl FieldPath {
    pub fn top(name: impl Into<String>) -> Self {
        Self::Top(name.into())
    }

    pub fn metric(name: impl Into<String>) -> Self {
        Self::Metric(name.into())
    }

    /// `calculated_metrics.score`, the default sort key.
    pub fn score() -> Self {
        Self::metric("score")
    }

    /// Resolves this field on `record`.
    ///
    /// Missing, null and non-numeric values resolve to `Number(0.0)`; only
    /// `symbol` and string-valued extra fields resolve to text.
    pub fn resolve<'a>(&self, record: &'a ScreeningRecord) -> FieldValue<'a> {
        match self {
            Self::Top(name) => match name.as_str() {
                "symbol" => FieldValue::Text(&record.symbol),
                "current_price" => FieldValue::number(record.current_price),
                "peg_ratio" => FieldValue::number(record.peg_ratio),
                "return_on_equity" => FieldValue::number(record.return_on_equity),
                "debt_to_equity" => FieldValue::number(record.debt_to_equity),
                "historical_volatility" => FieldValue::number(record.historical_volatility),
                "iv_short" => FieldValue::number(record.iv_short),
                "iv_term_structure_ratio" => FieldValue::number(record.iv_term_structure_ratio),
                "insider_net_shares" => FieldValue::number(record.insider_net_shares),
                "target_low" => FieldValue::number(record.target_low),
                "target_mean" => FieldValue::number(record.target_mean),
                "target_high" => FieldValue::number(record.target_high),
                other => FieldValue::from_extra(&record.extra, other),
            },
            Self::Metric(name) => {
                let Some(metrics) = record.calculated_metrics.as_ref() else {
                    return FieldValue::number(None);
                };
                match name.as_str() {
                    "score" => FieldValue::number(metrics.score),
                    "p_fcf" => FieldValue::number(metrics.p_fcf),
                    "iv_rank" => FieldValue::number(metrics.iv_rank),
                    other => FieldValue::from_extra(&metrics.extra, other),
                }
            }
        }
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        Self::score()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top(name) => write!(f, "{name}"),
            Self::Metric(name) => write!(f, "calculated_metrics.{name}"),
        }
    }
}

impl FromStr for FieldPath {
    type Err = ScreenerError;

    /// Accepts column aliases (`price`, `roe`), dotted nested paths
    /// (`calculated_metrics.p_fcf`) and raw field names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ScreenerError::config("empty sort key"));
        }

        if let Ok(column) = s.parse::<Column>() {
            return Ok(column.field_path());
        }

        for prefix in METRICS_PREFIXES {
            if let Some(name) = s.strip_prefix(prefix) {
                if name.is_empty() {
                    return Err(ScreenerError::config(format!("invalid sort key '{s}'")));
                }
                return Ok(Self::metric(name));
            }
        }

        if METRIC_FIELDS.contains(&s) {
            Ok(Self::metric(s))
        } else {
            Ok(Self::top(s))
        }
    }
}

/// A resolved sort value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl<'a> FieldValue<'a> {
    /// Absent numbers rank as zero. `-0.0` is folded into `0.0` so both
    /// compare equal under a total order.
    fn number(value: Option<f64>) -> Self {
        let n = value.unwrap_or(0.0);
        Self::Number(if n == 0.0 { 0.0 } else { n })
    }

    fn from_extra(extra: &'a Map<String, Value>, name: &str) -> Self {
        match extra.get(name) {
            Some(Value::String(text)) => Self::Text(text),
            Some(value) => Self::number(value.as_f64()),
            None => Self::number(None),
        }
    }

    /// Natural ascending order. Numbers sort before text so the order stays
    /// total on fields with mixed content.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}
