//! Model evaluation metrics module

mod regression;

pub use regression::RegressionReport;
