//! End-to-end analysis of one symbol's bars.
//!
//! bars → close series → indicator bundle → bottom signals → render bundle.
//! Each stage is a pure function of the previous one, so running the
//! pipeline twice on the same input gives a bit-identical result.

use chrono::NaiveDate;
use tracing::{info, info_span};

use crate::chart::{assemble, RenderBundle};
use crate::components::indicator::{Indicator, IndicatorBundle};
use crate::config::EngineConfig;
use crate::domain::{validate_bars, Bar};
use crate::engine::precompute::{compute_bundle, compute_warmup};
use crate::error::EngineError;
use crate::fingerprint::BundleFingerprint;
use crate::indicators::{Ema, Rsi};
use crate::series::Series;

/// Everything computed for one load.
#[derive(Debug, Clone)]
pub struct ChartAnalysis {
    pub bundle: IndicatorBundle,
    /// Dates where the bottom-reversal condition holds, ascending.
    pub signal_dates: Vec<NaiveDate>,
    pub render: RenderBundle,
    /// Bars before every indicator is defined.
    pub warmup_bars: usize,
}

impl ChartAnalysis {
    pub fn fingerprint(&self) -> BundleFingerprint {
        BundleFingerprint::of(&self.render)
    }
}

/// Run the full pipeline over a validated bar sequence.
pub fn analyze(
    symbol: &str,
    bars: &[Bar],
    config: &EngineConfig,
) -> Result<ChartAnalysis, EngineError> {
    let span = info_span!("analyze", symbol, bars = bars.len());
    let _guard = span.enter();

    config.validate()?;
    validate_bars(bars)?;

    let close = Series::closes(bars);
    let bundle = compute_bundle(&close, &config.ema_spans, config.macd, config.rsi_period)?;

    let detector = config.detector()?;
    let signal_dates = detector.detect(bundle.rsi(), bundle.macd(), bundle.macd_signal())?;

    let render = assemble(symbol, bars, &bundle, &signal_dates, &config.chart)?;

    let rsi = Rsi::new(config.rsi_period)?;
    let ladder = config
        .ema_spans
        .iter()
        .map(|&s| Ema::new(s))
        .collect::<Result<Vec<_>, _>>()?;
    let mut indicators: Vec<&dyn Indicator> = ladder.iter().map(|e| e as &dyn Indicator).collect();
    indicators.push(&rsi);
    let warmup_bars = compute_warmup(&indicators).min(bars.len());

    info!(
        first = %bars[0].date,
        last = %bars[bars.len() - 1].date,
        signals = signal_dates.len(),
        warmup_bars,
        "analysis complete"
    );

    Ok(ChartAnalysis {
        bundle,
        signal_dates,
        render,
        warmup_bars,
    })
}
