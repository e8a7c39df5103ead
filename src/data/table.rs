//! Normalized price table
//!
//! The in-memory representation of one historical price series: a row per
//! trading day, created once from the uploaded source and mutated in place
//! by normalization.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::io::Read;
use thiserror::Error;
use tracing::debug;

/// Columns the source table must provide, in addition to the leading date.
const REQUIRED_COLUMNS: [&str; 6] = ["Open", "High", "Low", "Close", "Adj Close", "Volume"];

/// Errors that can occur while building or normalizing the table
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Missing expected column: {0}")]
    MissingColumn(String),

    #[error("Unparseable date value: {0:?}")]
    BadDate(String),

    #[error("Unparseable numeric value {value:?} in column {column}")]
    BadNumber { column: String, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One trading day of the price series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: f64,
    /// Days since the Unix epoch, for plot backends that need a numeric axis.
    /// Filled in by [`PriceTable::normalize`].
    pub numeric_date: f64,
}

impl DailyBar {
    pub fn year(&self) -> f64 {
        self.date.year() as f64
    }

    pub fn month(&self) -> f64 {
        self.date.month() as f64
    }

    pub fn day(&self) -> f64 {
        self.date.day() as f64
    }
}

/// Normalized price table: a row per trading day, sorted ascending by date
/// after [`PriceTable::normalize`] has run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceTable {
    pub bars: Vec<DailyBar>,
}

impl PriceTable {
    /// Parse a delimited table from a reader.
    ///
    /// The source is expected to carry a leading date column (commonly
    /// unnamed in exported data) plus Open, High, Low, Close, Adj Close and
    /// Volume. An empty or placeholder first header is renamed to `Date`.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let mut headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if let Some(first) = headers.first_mut() {
            if first.is_empty() || first.starts_with("Unnamed") {
                *first = "Date".to_string();
            }
        }

        let column = |name: &str| -> Result<usize, TableError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| TableError::MissingColumn(name.to_string()))
        };

        let date_idx = column("Date")?;
        let mut numeric_idx = [0usize; 6];
        for (slot, name) in numeric_idx.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = column(name)?;
        }

        let mut bars = Vec::new();

        for result in csv_reader.records() {
            let record = result?;

            let date_raw = record.get(date_idx).unwrap_or("");
            let date = parse_date(date_raw)?;

            let mut values = [0.0f64; 6];
            for (value, (&idx, name)) in values
                .iter_mut()
                .zip(numeric_idx.iter().zip(REQUIRED_COLUMNS))
            {
                let raw = record.get(idx).unwrap_or("");
                *value = raw.trim().parse().map_err(|_| TableError::BadNumber {
                    column: name.to_string(),
                    value: raw.to_string(),
                })?;
            }

            let [open, high, low, close, adj_close, volume] = values;
            bars.push(DailyBar {
                date,
                open,
                high,
                low,
                close,
                adj_close,
                volume,
                numeric_date: 0.0,
            });
        }

        debug!(rows = bars.len(), "parsed price table");
        Ok(Self { bars })
    }

    /// Normalize the table in place: sort rows ascending by date, rescale
    /// volume to millions of shares, and derive the numeric date column.
    ///
    /// Row count is preserved.
    pub fn normalize(&mut self) {
        self.bars.sort_by_key(|b| b.date);

        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        for bar in &mut self.bars {
            bar.volume /= 1e6;
            bar.numeric_date = (bar.date - epoch).num_days() as f64;
        }
    }

    pub fn n_rows(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// First and last trading day, once the table is non-empty.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}

/// Parse a date value in the formats commonly found in exported price data.
fn parse_date(raw: &str) -> Result<NaiveDate, TableError> {
    let trimmed = raw.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }

    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    Err(TableError::BadDate(raw.to_string()))
}
