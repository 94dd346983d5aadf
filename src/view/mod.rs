//! Render boundary: formatted cells, summary figures and the dashboard
//! state handed to whatever draws it.

mod dashboard;
pub mod format;
mod summary;
mod table;

pub use dashboard::{Dashboard, DashboardSnapshot, ANALYSIS_FAILED_NOTICE};
pub use summary::ScreenSummary;
pub use table::render_table;
