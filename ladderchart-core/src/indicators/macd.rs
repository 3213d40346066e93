//! MACD (Moving Average Convergence Divergence).
//!
//! MACD      = EMA(close, fast_span) - EMA(close, slow_span)
//! Signal    = EMA(MACD, signal_span)
//! Histogram = MACD - Signal
//!
//! All three lines share the close index. With the adjust=false EMA there is
//! no warmup gap, so a fully defined close series yields fully defined lines.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, EngineError};
use crate::indicators::ema::ema;
use crate::series::Series;

/// MACD spans. Defaults are the conventional 12/26/9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MacdParams {
    pub fast_span: usize,
    pub slow_span: usize,
    pub signal_span: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_span: 12,
            slow_span: 26,
            signal_span: 9,
        }
    }
}

impl MacdParams {
    pub fn validate(&self) -> Result<(), EngineError> {
        require_positive("macd.fast_span", self.fast_span)?;
        require_positive("macd.slow_span", self.slow_span)?;
        require_positive("macd.signal_span", self.signal_span)?;
        if self.fast_span >= self.slow_span {
            return Err(EngineError::invalid(
                "macd.fast_span",
                format!(
                    "must be < slow_span ({} >= {})",
                    self.fast_span, self.slow_span
                ),
            ));
        }
        Ok(())
    }
}

/// MACD line and its signal line.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub macd: Series,
    pub signal: Series,
}

impl MacdLines {
    /// MACD minus signal, undefined wherever either line is.
    ///
    /// Fails with `MisalignedSeries` if the lines were built over different
    /// indices.
    pub fn histogram(&self) -> Result<Series, EngineError> {
        self.macd.zip_with(&self.signal, |m, s| m - s)
    }
}

/// MACD calculator bound to a validated parameter set.
#[derive(Debug, Clone, Copy)]
pub struct Macd {
    params: MacdParams,
}

impl Macd {
    pub fn new(params: MacdParams) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> MacdParams {
        self.params
    }

    pub fn compute(&self, close: &Series) -> Result<MacdLines, EngineError> {
        let fast = ema(close, self.params.fast_span)?;
        let slow = ema(close, self.params.slow_span)?;
        let macd = fast.zip_with(&slow, |f, s| f - s)?;
        let signal = ema(&macd, self.params.signal_span)?;
        Ok(MacdLines { macd, signal })
    }
}

/// MACD with the default 12/26/9 spans.
pub fn macd(close: &Series) -> Result<MacdLines, EngineError> {
    Macd::new(MacdParams::default())?.compute(close)
}
