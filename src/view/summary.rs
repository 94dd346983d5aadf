//! Headline figures shown above the results table.

use crate::types::records::ScreeningRecord;

/// Tickers screened, top score and average P/FCF.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSummary {
    pub tickers_screened: usize,

    /// Highest score, absent scores counting as zero. `None` for an empty set.
    pub top_score: Option<f64>,

    /// Sum of P/FCF over all records divided by the number of records with a
    /// non-zero P/FCF. `None` when no record has one.
    pub avg_p_fcf: Option<f64>,
}

impl ScreenSummary {
    pub fn from_records(records: &[ScreeningRecord]) -> Self {
        let top_score = records
            .iter()
            .map(|r| r.score().unwrap_or(0.0))
            .reduce(f64::max);

        let total: f64 = records.iter().filter_map(ScreeningRecord::p_fcf).sum();
        let counted = records
            .iter()
            .filter(|r| r.p_fcf().is_some_and(|v| v != 0.0))
            .count();
        let avg_p_fcf = (counted > 0).then(|| total / counted as f64);

        Self {
            tickers_screened: records.len(),
            top_score,
            avg_p_fcf,
        }
    }
}
