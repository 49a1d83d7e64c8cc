#![forbid(unsafe_code)]

//! Core domain model and business logic for the Treinolog workout log.
//!
//! This crate provides:
//! - Domain types (records, ordinal scales, deployment variants)
//! - Entry validation
//! - CSV persistence with atomic rewrites
//! - Aggregate views (per-type stats, chronological series)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod log;
pub mod stats;

// Re-export commonly used types
pub use error::{Error, Result, ValidationError};
pub use types::*;
pub use config::Config;
pub use store::{CsvStore, LogStore};
pub use log::WorkoutLog;
pub use stats::{aggregate_by_type, chronological_series};
