//! CSV bar store: one `<SYMBOL>.csv` file per symbol in a directory.
//!
//! Expected header: `date,open,high,low,close[,volume]` with ISO dates
//! (`YYYY-MM-DD`). Capitalised headers as written by common download tools
//! (`Date,Open,High,Low,Close,Volume`) are accepted too. Rows must already be
//! in increasing date order; they are never re-sorted.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use super::provider::{select_range, BarSource, DataError};
use crate::domain::Bar;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date")]
    date: NaiveDate,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Volume", default)]
    volume: Option<f64>,
}

impl From<CsvRow> for Bar {
    fn from(row: CsvRow) -> Self {
        Bar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume.map(|v| v.max(0.0).round() as u64).unwrap_or(0),
        }
    }
}

/// Reads bars from `<dir>/<SYMBOL>.csv`.
#[derive(Debug, Clone)]
pub struct CsvBarSource {
    dir: PathBuf,
}

impl CsvBarSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol.to_uppercase()))
    }

    /// Read every row of a CSV file, in file order.
    pub fn read_file(path: &Path) -> Result<Vec<Bar>, DataError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
        let mut bars = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            bars.push(row?.into());
        }
        debug!(path = %path.display(), rows = bars.len(), "read bar file");
        Ok(bars)
    }
}

impl BarSource for CsvBarSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::NotFound {
                symbol: symbol.to_string(),
                path,
            });
        }

        let bars = Self::read_file(&path)?;
        let selected = select_range(symbol, bars, start, end)?;
        info!(symbol, bars = selected.len(), %start, %end, "loaded bars");
        Ok(selected)
    }
}
