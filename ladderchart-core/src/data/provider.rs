//! Bar source trait and structured error types.
//!
//! The engine never fetches data itself. A `BarSource` hands it a validated,
//! date-ordered bar sequence for one symbol and an inclusive date range;
//! remote download and download caching live outside this crate.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::Bar;
use crate::error::EngineError;

/// Structured error types for data loading.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no bar data for symbol '{symbol}' (looked for {path})")]
    NotFound { symbol: String, path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("no bars for '{symbol}' between {start} and {end}")]
    EmptyRange {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("bad bar data for '{symbol}': {source}")]
    InvalidBars {
        symbol: String,
        #[source]
        source: EngineError,
    },
}

/// Trait for bar sources (CSV files, in-memory fixtures, remote adapters).
pub trait BarSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Daily bars for `symbol` with `start <= date <= end`, strictly
    /// increasing and non-empty.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>, DataError>;
}

/// Shared range filtering and validation for sources that read whole files.
pub(crate) fn select_range(
    symbol: &str,
    bars: Vec<Bar>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Bar>, DataError> {
    if start > end {
        return Err(DataError::InvalidRange { start, end });
    }

    let selected: Vec<Bar> = bars
        .into_iter()
        .filter(|b| b.date >= start && b.date <= end)
        .collect();

    if selected.is_empty() {
        return Err(DataError::EmptyRange {
            symbol: symbol.to_string(),
            start,
            end,
        });
    }

    crate::domain::validate_bars(&selected).map_err(|source| DataError::InvalidBars {
        symbol: symbol.to_string(),
        source,
    })?;

    Ok(selected)
}
