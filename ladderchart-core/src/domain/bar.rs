//! Daily OHLCV bar and bar-sequence validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Daily OHLC bar for one symbol.
///
/// Produced once by the data source and never mutated afterwards. `volume` is
/// carried through to the chart but takes no part in any computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: u64,
}

impl Bar {
    /// Returns true if any OHLC field is NaN or infinite.
    pub fn is_void(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite())
    }

    /// Basic OHLC sanity check: positive prices, high >= open/close >= low.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.low > 0.0
    }
}

/// Validate a bar sequence against the input contract.
///
/// The sequence must be non-empty, strictly increasing by date (which also
/// rules out duplicates) and every bar must pass [`Bar::is_sane`]. Gaps
/// between dates are allowed.
pub fn validate_bars(bars: &[Bar]) -> Result<(), EngineError> {
    if bars.is_empty() {
        return Err(EngineError::EmptyInput);
    }

    for (index, bar) in bars.iter().enumerate() {
        if !bar.is_sane() {
            return Err(EngineError::InvalidBars {
                index,
                reason: format!(
                    "insane OHLC on {}: open={} high={} low={} close={}",
                    bar.date, bar.open, bar.high, bar.low, bar.close
                ),
            });
        }
        if index > 0 && bars[index - 1].date >= bar.date {
            return Err(EngineError::InvalidBars {
                index,
                reason: format!(
                    "date {} does not follow {} (dates must strictly increase)",
                    bar.date,
                    bars[index - 1].date
                ),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
            volume: 50_000,
        }
    }

    #[test]
    fn bar_is_sane() {
        assert!(sample_bar().is_sane());
    }

    #[test]
    fn bar_detects_void() {
        let mut bar = sample_bar();
        bar.open = f64::NAN;
        assert!(bar.is_void());
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_detects_insane_high_low() {
        let mut bar = sample_bar();
        bar.high = 97.0;
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_rejects_non_positive_prices() {
        let mut bar = sample_bar();
        bar.low = 0.0;
        assert!(!bar.is_sane());
    }

    #[test]
    fn validate_rejects_empty() {
        assert_eq!(validate_bars(&[]), Err(EngineError::EmptyInput));
    }

    #[test]
    fn validate_rejects_duplicate_dates() {
        let bars = vec![sample_bar(), sample_bar()];
        let err = validate_bars(&bars).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBars { index: 1, .. }));
    }

    #[test]
    fn validate_accepts_gaps() {
        let mut later = sample_bar();
        later.date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert!(validate_bars(&[sample_bar(), later]).is_ok());
    }

    #[test]
    fn bar_volume_defaults_when_absent() {
        let json = r#"{"date":"2024-01-02","open":1.0,"high":2.0,"low":0.5,"close":1.5}"#;
        let bar: Bar = serde_json::from_str(json).unwrap();
        assert_eq!(bar.volume, 0);
        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }
}
