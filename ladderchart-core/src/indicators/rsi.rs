//! Relative Strength Index (RSI), simple-average form.
//!
//! delta[t] = close[t] - close[t-1] (undefined at t = 0)
//! avg_gain / avg_loss = rolling mean of max(delta, 0) / max(-delta, 0)
//! over the trailing `period` deltas.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (first defined value at index `period`).
//! Edge cases: avg_loss == 0 and avg_gain > 0 → 100;
//! avg_loss == 0 and avg_gain == 0 → undefined (no movement in the window).

use crate::components::indicator::Indicator;
use crate::error::{require_positive, EngineError};
use crate::indicators::sma::rolling_mean;
use crate::series::Series;

/// Default RSI window.
pub const DEFAULT_RSI_PERIOD: usize = 14;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Result<Self, EngineError> {
        require_positive("rsi_period", period)?;
        Ok(Self {
            period,
            name: format!("rsi_{period}"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, close: &Series) -> Result<Series, EngineError> {
        rsi(close, self.period)
    }
}

/// RSI of a close series over a rolling window of `period` deltas.
pub fn rsi(close: &Series, period: usize) -> Result<Series, EngineError> {
    require_positive("rsi_period", period)?;

    let values = close.values();
    let mut gains = vec![None; values.len()];
    let mut losses = vec![None; values.len()];
    for i in 1..values.len() {
        if let (Some(prev), Some(curr)) = (values[i - 1], values[i]) {
            let delta = curr - prev;
            gains[i] = Some(delta.max(0.0));
            losses[i] = Some((-delta).max(0.0));
        }
    }

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    let result = avg_gain
        .iter()
        .zip(avg_loss.iter())
        .map(|(g, l)| match (g, l) {
            (Some(g), Some(l)) => rsi_from_averages(*g, *l),
            _ => None,
        })
        .collect();

    Ok(close.with_values(result))
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain > 0.0 {
            Some(100.0)
        } else {
            None
        }
    } else {
        Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
    }
}
