//! Look-ahead contamination tests for every indicator and the detector.
//!
//! No value at bar t may depend on price data from bar t+1 or later.
//!
//! Method: compute on a truncated series (bars 0..100) and the full series
//! (bars 0..200). Bars 0..100 must be identical between both runs. Any
//! difference means future data is leaking into past values.

use chrono::NaiveDate;
use ladderchart_core::components::Indicator;
use ladderchart_core::domain::Bar;
use ladderchart_core::indicators::{Ema, Macd, MacdParams, Rsi};
use ladderchart_core::{analyze, BottomSignalDetector, EngineConfig, Series};

/// Generate N bars of synthetic OHLCV data with realistic variation.
fn make_test_bars(n: usize) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let mut bars = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price += change;
        price = price.max(10.0);

        let open = price - 0.5;
        let close = price + 0.3;
        bars.push(Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high: open.max(close) + 2.0,
            low: open.min(close) - 2.0,
            close,
            volume: 1000 + (i as u64 * 100),
        });
    }

    bars
}

fn assert_prefix_equal(label: &str, truncated: &Series, full: &Series) {
    assert_eq!(truncated.len(), 100, "{label}: truncated length mismatch");
    assert_eq!(full.len(), 200, "{label}: full length mismatch");
    for i in 0..truncated.len() {
        assert_eq!(
            truncated.get(i),
            full.get(i),
            "{label}: look-ahead contamination at bar {i}"
        );
    }
}

fn assert_no_lookahead(indicator: &dyn Indicator, full_bars: &[Bar]) {
    let full = indicator.compute(&Series::closes(full_bars)).unwrap();
    let truncated = indicator.compute(&Series::closes(&full_bars[..100])).unwrap();
    assert_prefix_equal(indicator.name(), &truncated, &full);
}

#[test]
fn lookahead_ema() {
    let bars = make_test_bars(200);
    for span in [5, 10, 20, 60, 120] {
        assert_no_lookahead(&Ema::new(span).unwrap(), &bars);
    }
}

#[test]
fn lookahead_rsi() {
    let bars = make_test_bars(200);
    assert_no_lookahead(&Rsi::new(14).unwrap(), &bars);
    assert_no_lookahead(&Rsi::new(7).unwrap(), &bars);
}

#[test]
fn lookahead_macd() {
    let bars = make_test_bars(200);
    let macd = Macd::new(MacdParams::default()).unwrap();
    let full = macd.compute(&Series::closes(&bars)).unwrap();
    let truncated = macd.compute(&Series::closes(&bars[..100])).unwrap();

    assert_prefix_equal("macd", &truncated.macd, &full.macd);
    assert_prefix_equal("macd_signal", &truncated.signal, &full.signal);
}

#[test]
fn lookahead_detector() {
    let bars = make_test_bars(200);
    let detector = BottomSignalDetector::new(45.0).unwrap();
    let run = |bars: &[Bar]| {
        let close = Series::closes(bars);
        let lines = Macd::new(MacdParams::default()).unwrap().compute(&close).unwrap();
        let rsi = Rsi::new(14).unwrap().compute(&close).unwrap();
        detector.mask(&rsi, &lines.macd, &lines.signal).unwrap()
    };

    let full = run(&bars);
    let truncated = run(&bars[..100]);
    assert_eq!(truncated[..], full[..100]);
}

#[test]
fn lookahead_pipeline_signals() {
    let bars = make_test_bars(200);
    let config = EngineConfig::default();
    let full = analyze("TEST", &bars, &config).unwrap();
    let truncated = analyze("TEST", &bars[..100], &config).unwrap();

    let cutoff = bars[99].date;
    let full_prefix: Vec<NaiveDate> = full
        .signal_dates
        .iter()
        .copied()
        .filter(|d| *d <= cutoff)
        .collect();
    assert_eq!(truncated.signal_dates, full_prefix);
}
