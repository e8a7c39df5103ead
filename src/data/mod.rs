//! Data acquisition and preprocessing module
//!
//! Provides file ingestion, the normalized price table, and ML datasets.

pub mod ingest;
mod dataset;
mod table;

pub use dataset::{Dataset, Split, FEATURE_NAMES};
pub use table::{DailyBar, PriceTable, TableError};
