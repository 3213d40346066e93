//! Exponential Moving Average (EMA), "adjust=false" form.
//!
//! alpha = 2 / (span + 1)
//! Seed: EMA[0] = value[0] (no SMA seed, no bias correction).
//! Recursive: EMA[t] = EMA[t-1] + alpha * (value[t] - EMA[t-1])
//! Lookback: 0, defined from the first bar.
//!
//! Undefined inputs: leading `None`s stay `None` and the seed is the first
//! defined value. A `None` after the seed yields `None` at that position and
//! the recurrence resumes from the last defined EMA.

use crate::components::indicator::Indicator;
use crate::error::{require_positive, EngineError};
use crate::series::Series;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Result<Self, EngineError> {
        require_positive("span", span)?;
        Ok(Self {
            span,
            name: format!("ema_{span}"),
        })
    }

    pub fn span(&self) -> usize {
        self.span
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, close: &Series) -> Result<Series, EngineError> {
        ema(close, self.span)
    }
}

/// EMA of an arbitrary series at the given span.
///
/// Used for the EMA ladder over closes and for the MACD signal line over the
/// MACD line.
pub fn ema(series: &Series, span: usize) -> Result<Series, EngineError> {
    require_positive("span", span)?;
    if series.is_empty() {
        return Err(EngineError::invalid("series", "cannot smooth an empty series"));
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev: Option<f64> = None;
    let values = series
        .values()
        .iter()
        .map(|v| {
            let x = (*v)?;
            // prev + alpha * (x - prev) keeps a constant input exactly constant
            let next = match prev {
                None => x,
                Some(p) => p + alpha * (x - p),
            };
            prev = Some(next);
            Some(next)
        })
        .collect();

    Ok(series.with_values(values))
}
