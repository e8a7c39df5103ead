//! # Stock ML - Exploratory Analysis of Historical Stock Prices
//!
//! This library ingests a historical daily stock-price table (CSV, optionally
//! inside a ZIP archive), normalizes it, renders descriptive charts, and fits
//! two baseline regressors predicting the adjusted closing price from
//! same-day features.
//!
//! ## Modules
//!
//! - `data` - Ingestion, the normalized price table, and ML datasets
//! - `models` - Linear regression and Random Forest implementations
//! - `metrics` - Regression evaluation metrics
//! - `plot` - Chart rendering over the normalized table

pub mod data;
pub mod metrics;
pub mod models;
pub mod plot;

pub use data::{DailyBar, Dataset, PriceTable, Split};
pub use metrics::RegressionReport;
pub use models::{LinearRegression, RandomForest};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::ingest::read_table;
    pub use crate::data::{DailyBar, Dataset, PriceTable, Split};
    pub use crate::metrics::RegressionReport;
    pub use crate::models::{ForestConfig, LinearRegression, RandomForest};
}
