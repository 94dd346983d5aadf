//! Shared types: records, configuration and errors.

pub mod config;
pub mod errors;
pub mod records;
