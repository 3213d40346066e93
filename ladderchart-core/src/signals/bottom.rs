//! Bottom-reversal detector: oversold RSI plus a fresh MACD upward cross.
//!
//! Fires at bar i (i > 0) when all hold:
//! - rsi[i] < threshold
//! - macd[i] > signal[i]
//! - macd[i-1] < signal[i-1]
//!
//! Inequalities are strict. Any undefined term suppresses the signal at that
//! bar. Only one prior bar is compared; there is no multi-bar confirmation.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::EngineError;
use crate::series::Series;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BottomSignalDetector {
    rsi_threshold: f64,
}

impl Default for BottomSignalDetector {
    fn default() -> Self {
        Self {
            rsi_threshold: Self::DEFAULT_RSI_THRESHOLD,
        }
    }
}

impl BottomSignalDetector {
    pub const DEFAULT_RSI_THRESHOLD: f64 = 30.0;

    /// Detector with a custom oversold cutoff, which must lie strictly
    /// inside (0, 100).
    pub fn new(rsi_threshold: f64) -> Result<Self, EngineError> {
        if !(rsi_threshold > 0.0 && rsi_threshold < 100.0) {
            return Err(EngineError::invalid(
                "rsi_threshold",
                format!("must be in (0, 100), got {rsi_threshold}"),
            ));
        }
        Ok(Self { rsi_threshold })
    }

    pub fn rsi_threshold(&self) -> f64 {
        self.rsi_threshold
    }

    /// Per-bar boolean column: true where the composite condition holds.
    pub fn mask(
        &self,
        rsi: &Series,
        macd: &Series,
        signal: &Series,
    ) -> Result<Vec<bool>, EngineError> {
        rsi.ensure_aligned(macd)?;
        rsi.ensure_aligned(signal)?;

        let mask = (0..rsi.len())
            .map(|i| i > 0 && self.fires_at(rsi, macd, signal, i))
            .collect();
        Ok(mask)
    }

    /// Dates of all bars where the condition holds, ascending.
    pub fn detect(
        &self,
        rsi: &Series,
        macd: &Series,
        signal: &Series,
    ) -> Result<Vec<NaiveDate>, EngineError> {
        let mask = self.mask(rsi, macd, signal)?;
        let dates: Vec<NaiveDate> = rsi
            .dates()
            .iter()
            .zip(mask)
            .filter_map(|(date, hit)| hit.then_some(*date))
            .collect();

        debug!(
            signals = dates.len(),
            bars = rsi.len(),
            rsi_threshold = self.rsi_threshold,
            "bottom signal scan complete"
        );
        Ok(dates)
    }

    fn fires_at(&self, rsi: &Series, macd: &Series, signal: &Series, i: usize) -> bool {
        let (Some(r), Some(m_cur), Some(s_cur), Some(m_prev), Some(s_prev)) = (
            rsi.get(i),
            macd.get(i),
            signal.get(i),
            macd.get(i - 1),
            signal.get(i - 1),
        ) else {
            return false;
        };

        r < self.rsi_threshold && m_cur > s_cur && m_prev < s_prev
    }
}

/// Bottom signals with the default RSI threshold of 30.
pub fn detect_bottom_signals(
    rsi: &Series,
    macd: &Series,
    signal: &Series,
) -> Result<Vec<NaiveDate>, EngineError> {
    BottomSignalDetector::default().detect(rsi, macd, signal)
}

/// Boolean signal column with the default RSI threshold of 30.
pub fn bottom_signal_mask(
    rsi: &Series,
    macd: &Series,
    signal: &Series,
) -> Result<Vec<bool>, EngineError> {
    BottomSignalDetector::default().mask(rsi, macd, signal)
}
