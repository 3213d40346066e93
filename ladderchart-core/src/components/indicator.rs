//! Indicator trait and the computed indicator bundle.
//!
//! Indicators are pure functions: close series in, aligned series out. They
//! are computed once per load; nothing recomputes incrementally.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::EngineError;
use crate::indicators::MacdLines;
use crate::series::Series;

/// Trait for single-output indicators.
///
/// # Look-ahead contamination guard
/// No output value at bar t may depend on price data from bar t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "ema_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of bars before the indicator produces defined output.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the whole close series.
    ///
    /// The result has exactly the input's index.
    fn compute(&self, close: &Series) -> Result<Series, EngineError>;
}

/// Every series derived from one bar sequence: EMAs keyed by span, the MACD
/// pair and RSI. All share the bar index and are read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorBundle {
    emas: BTreeMap<usize, Series>,
    macd: MacdLines,
    rsi: Series,
}

impl IndicatorBundle {
    /// Assemble a bundle, checking that every series shares the RSI index.
    pub fn new(
        emas: BTreeMap<usize, Series>,
        macd: MacdLines,
        rsi: Series,
    ) -> Result<Self, EngineError> {
        rsi.ensure_aligned(&macd.macd)?;
        rsi.ensure_aligned(&macd.signal)?;
        for series in emas.values() {
            rsi.ensure_aligned(series)?;
        }
        Ok(Self { emas, macd, rsi })
    }

    pub fn index(&self) -> &[NaiveDate] {
        self.rsi.dates()
    }

    /// EMA series for a span, if it was computed.
    pub fn ema(&self, span: usize) -> Option<&Series> {
        self.emas.get(&span)
    }

    /// Like [`ema`](Self::ema) but failing with `MissingIndicator`.
    pub fn require_ema(&self, span: usize) -> Result<&Series, EngineError> {
        self.ema(span)
            .ok_or(EngineError::MissingIndicator { span })
    }

    /// Computed EMA spans in ascending order.
    pub fn ema_spans(&self) -> impl Iterator<Item = usize> + '_ {
        self.emas.keys().copied()
    }

    pub fn macd(&self) -> &Series {
        &self.macd.macd
    }

    pub fn macd_signal(&self) -> &Series {
        &self.macd.signal
    }

    pub fn macd_lines(&self) -> &MacdLines {
        &self.macd
    }

    pub fn rsi(&self) -> &Series {
        &self.rsi
    }

    /// Look up a series by name: `ema_<span>`, `macd`, `macd_signal`, `rsi`.
    pub fn get(&self, name: &str) -> Option<&Series> {
        match name {
            "macd" => Some(self.macd()),
            "macd_signal" => Some(self.macd_signal()),
            "rsi" => Some(self.rsi()),
            _ => name
                .strip_prefix("ema_")
                .and_then(|span| span.parse().ok())
                .and_then(|span| self.ema(span)),
        }
    }

    /// Number of series stored.
    pub fn len(&self) -> usize {
        self.emas.len() + 3
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
