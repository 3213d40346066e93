//! Indicator precomputation.
//!
//! All indicators are computed once from the close series and collected into
//! an `IndicatorBundle`. Nothing is recomputed per bar or incrementally.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::components::indicator::{Indicator, IndicatorBundle};
use crate::error::EngineError;
use crate::indicators::{Ema, Macd, MacdParams, Rsi};
use crate::series::Series;

/// Compute the EMA ladder, MACD pair and RSI over a close series.
pub fn compute_bundle(
    close: &Series,
    ema_spans: &BTreeSet<usize>,
    macd_params: MacdParams,
    rsi_period: usize,
) -> Result<IndicatorBundle, EngineError> {
    if close.is_empty() {
        return Err(EngineError::EmptyInput);
    }

    let ladder = ema_spans
        .iter()
        .map(|&span| Ema::new(span))
        .collect::<Result<Vec<_>, _>>()?;

    let mut emas = BTreeMap::new();
    for indicator in &ladder {
        let series = compute_checked(indicator, close)?;
        emas.insert(indicator.span(), series);
    }

    let rsi = compute_checked(&Rsi::new(rsi_period)?, close)?;
    let macd = Macd::new(macd_params)?.compute(close)?;

    debug!(
        bars = close.len(),
        emas = emas.len(),
        rsi_defined = rsi.defined_count(),
        "indicators precomputed"
    );

    IndicatorBundle::new(emas, macd, rsi)
}

/// Warmup length: the longest lookback across indicators.
pub fn compute_warmup(indicators: &[&dyn Indicator]) -> usize {
    indicators.iter().map(|i| i.lookback()).max().unwrap_or(0)
}

fn compute_checked(indicator: &dyn Indicator, close: &Series) -> Result<Series, EngineError> {
    let series = indicator.compute(close)?;
    debug_assert_eq!(
        series.len(),
        close.len(),
        "indicator '{}' produced {} values for {} bars",
        indicator.name(),
        series.len(),
        close.len()
    );
    Ok(series)
}
