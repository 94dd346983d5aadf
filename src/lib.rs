//! # Arc Screener
//!
//! Client-side result cache and presentation ordering for the Arc equity
//! screening dashboard.
//!
//! Sits between the remote scoring service and a tabular view: bulk
//! screening results are persisted for 24 hours, per-symbol analyses are
//! memoized for the session, and results are ordered by a stable,
//! direction-toggling sort.
//!
//! ## Modules
//!
//! - [`cache`] - Screening result cache and analysis memoization
//! - [`sort`] - Sort engine, field paths and table columns
//! - [`service`] - Fetch delegates and the HTTP client
//! - [`store`] - Durable key-value store (memory, SQLite)
//! - [`view`] - Dashboard orchestration and cell formatting
//! - [`cli`] - Command line interface
//! - [`types`] - Shared types

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod service;
pub mod sort;
pub mod store;
pub mod types;
pub mod view;

pub use types::config::Config;
pub use types::errors::{ScreenerError, ScreenerResult};
