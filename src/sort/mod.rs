//! Column-driven ordering of screening results.
//!
//! ## Components
//!
//! - **FieldPath**: addresses a top-level or `calculated_metrics` field
//! - **SortEngine**: stable, direction-toggling sort over partially missing data
//! - **Column**: the dashboard's table columns and their sort keys

mod columns;
mod engine;
mod field;

pub use columns::Column;
pub use engine::{SortDirection, SortEngine, SortState};
pub use field::{FieldPath, FieldValue};
