//! Orchestrates the caches and the sort engine for one dashboard session.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::info;

use super::summary::ScreenSummary;
use crate::cache::{AnalysisCache, ResultCache};
use crate::sort::{FieldPath, SortEngine, SortState};
use crate::types::records::{AnalysisRecord, ScreeningRecord};
use crate::ScreenerResult;

/// One-shot notice raised when an analysis cannot be produced.
pub const ANALYSIS_FAILED_NOTICE: &str = "Failed to generate analysis";

/// Read-only copy of everything the view needs to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// Result rows in display order.
    pub rows: Vec<ScreeningRecord>,
    pub sort: SortState,
    /// Analysis shown in the detail view, if open.
    pub analysis: Option<AnalysisRecord>,
    /// Symbol whose analysis is being fetched.
    pub analyzing: Option<String>,
    pub loading: bool,
    /// Message of the last failed screening load.
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct ViewState {
    rows: Vec<ScreeningRecord>,
    sort: SortState,
    analysis: Option<AnalysisRecord>,
    analyzing: Option<String>,
    /// Loads started and not yet finished.
    pending_loads: usize,
    error: Option<String>,
    last_updated: Option<DateTime<Utc>>,
    notice: Option<String>,
}

/// Screening view plus analysis detail view.
///
/// Every mutation replaces the affected part of the state under one lock;
/// the lock is never held while a fetch is pending.
pub struct Dashboard {
    results: ResultCache,
    analyses: AnalysisCache,
    state: Mutex<ViewState>,
}

impl Dashboard {
    pub fn new(results: ResultCache, analyses: AnalysisCache) -> Self {
        Self {
            results,
            analyses,
            state: Mutex::new(ViewState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn results(&self) -> &ResultCache {
        &self.results
    }

    pub fn analyses(&self) -> &AnalysisCache {
        &self.analyses
    }

    /// Loads the result set and orders it with the active sort state.
    ///
    /// On failure the error message is recorded and the rows from the last
    /// successful load stay on screen. The snapshot reports loading until
    /// every overlapping refresh has finished.
    pub async fn refresh(&self, force_refresh: bool) -> ScreenerResult<()> {
        {
            let mut state = self.state();
            state.pending_loads += 1;
            state.error = None;
        }

        let outcome = self.results.load(force_refresh).await;

        let mut state = self.state();
        state.pending_loads = state.pending_loads.saturating_sub(1);
        match outcome {
            Ok(set) => {
                state.rows = SortEngine::apply(&set.records, &state.sort);
                state.last_updated = Some(set.timestamp);
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Applies a click on the column sorting by `key`.
    pub fn click_column(&self, key: FieldPath) -> SortState {
        let mut state = self.state();
        let (rows, sort) = SortEngine::sort(&state.rows, key, &state.sort);
        info!(key = %sort.key, direction = %sort.direction, "sorted results");
        state.rows = rows;
        state.sort = sort.clone();
        sort
    }

    /// Opens the analysis for `symbol`, fetching it on first request.
    ///
    /// A failure leaves the analysis cache untouched and raises
    /// [`ANALYSIS_FAILED_NOTICE`].
    pub async fn analyze(&self, symbol: &str) -> ScreenerResult<AnalysisRecord> {
        self.state().analyzing = Some(symbol.to_string());

        let outcome = self.analyses.get_or_fetch(symbol).await;

        let mut state = self.state();
        state.analyzing = None;
        match outcome {
            Ok(record) => {
                state.analysis = Some(record.clone());
                Ok(record)
            }
            Err(e) => {
                state.notice = Some(ANALYSIS_FAILED_NOTICE.to_string());
                Err(e)
            }
        }
    }

    /// Closes the detail view.
    pub fn close_analysis(&self) {
        self.state().analysis = None;
    }

    /// Returns and clears the pending notice.
    pub fn take_notice(&self) -> Option<String> {
        self.state().notice.take()
    }

    pub fn sort_state(&self) -> SortState {
        self.state().sort.clone()
    }

    pub fn summary(&self) -> ScreenSummary {
        ScreenSummary::from_records(&self.state().rows)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let state = self.state();
        DashboardSnapshot {
            rows: state.rows.clone(),
            sort: state.sort.clone(),
            analysis: state.analysis.clone(),
            analyzing: state.analyzing.clone(),
            loading: state.pending_loads > 0,
            error: state.error.clone(),
            last_updated: state.last_updated,
        }
    }
}
