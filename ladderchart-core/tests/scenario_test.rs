//! End-to-end scenarios for the ladder pipeline.
//!
//! 1. Sharp decline then rebound: RSI goes oversold, one bottom signal fires
//!    on the first rebound bar.
//! 2. Flat series: EMAs equal the constant, MACD and signal are zero, RSI is
//!    undefined throughout, no signal.
//! 3. Error paths: zero span, missing chart span, empty input.
//! 4. Idempotence: two runs give bit-identical output.

use chrono::NaiveDate;
use ladderchart_core::chart::ChartLayout;
use ladderchart_core::components::IndicatorBundle;
use ladderchart_core::engine::compute_bundle;
use ladderchart_core::indicators::{ema, MacdParams};
use ladderchart_core::{analyze, assemble, Bar, EngineConfig, EngineError, Series};
use std::collections::BTreeSet;

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let base = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 0.5,
                low: open.min(close) - 0.5,
                close,
                volume: 10_000,
            }
        })
        .collect()
}

/// 40 bars falling linearly from 100 to 50, then 5 bars rebounding to 80.
fn decline_then_rebound() -> Vec<f64> {
    let mut closes: Vec<f64> = (0..40).map(|i| 100.0 - 50.0 * i as f64 / 39.0).collect();
    closes.extend([56.0, 62.0, 68.0, 74.0, 80.0]);
    closes
}

// ──────────────────────────────────────────────
// Scenario 1: decline then rebound
// ──────────────────────────────────────────────

#[test]
fn decline_drives_rsi_oversold() {
    let bars = bars_from_closes(&decline_then_rebound());
    let analysis = analyze("TEST", &bars, &EngineConfig::default()).unwrap();
    let rsi = analysis.bundle.rsi();

    for i in 14..40 {
        let v = rsi.get(i).expect("RSI defined after 14 deltas");
        assert!(v < 30.0, "RSI at bar {i} should be oversold, got {v}");
    }
    for i in 0..14 {
        assert!(rsi.get(i).is_none(), "RSI should be undefined at bar {i}");
    }
}

#[test]
fn rebound_fires_exactly_one_signal_at_its_start() {
    let bars = bars_from_closes(&decline_then_rebound());
    let analysis = analyze("TEST", &bars, &EngineConfig::default()).unwrap();

    assert_eq!(analysis.signal_dates, vec![bars[40].date]);
    assert_eq!(analysis.render.signals.len(), 1);
    assert_eq!(analysis.render.signals[0].date, bars[40].date);
    assert_eq!(analysis.render.signals[0].price, 56.0);

    // MACD was below its signal line at the end of the decline and above it
    // on the first rebound bar.
    let macd = analysis.bundle.macd();
    let signal = analysis.bundle.macd_signal();
    assert!(macd.get(39).unwrap() < signal.get(39).unwrap());
    assert!(macd.get(40).unwrap() > signal.get(40).unwrap());
}

// ──────────────────────────────────────────────
// Scenario 2: flat series
// ──────────────────────────────────────────────

#[test]
fn flat_series_is_quiet() {
    let bars = bars_from_closes(&[42.0; 30]);
    let analysis = analyze("FLAT", &bars, &EngineConfig::default()).unwrap();
    let bundle = &analysis.bundle;

    for span in [5, 10, 20, 60, 120] {
        let series = bundle.ema(span).unwrap();
        assert!(
            series.values().iter().all(|v| *v == Some(42.0)),
            "EMA{span} should equal the constant"
        );
    }
    assert!(bundle.macd().values().iter().all(|v| *v == Some(0.0)));
    assert!(bundle.macd_signal().values().iter().all(|v| *v == Some(0.0)));
    assert_eq!(bundle.rsi().defined_count(), 0);
    assert!(analysis.signal_dates.is_empty());
    assert!(analysis.render.signals.is_empty());
}

// ──────────────────────────────────────────────
// Scenario 3: error paths
// ──────────────────────────────────────────────

#[test]
fn ema_span_zero_is_invalid_parameter() {
    let close = Series::closes(&bars_from_closes(&[1.0, 2.0, 3.0]));
    assert!(matches!(
        ema(&close, 0),
        Err(EngineError::InvalidParameter { .. })
    ));
}

#[test]
fn assembling_uncomputed_span_is_missing_indicator() {
    let bars = bars_from_closes(&decline_then_rebound());
    let close = Series::closes(&bars);
    let spans: BTreeSet<usize> = [5, 10, 20].into_iter().collect();
    let bundle: IndicatorBundle =
        compute_bundle(&close, &spans, MacdParams::default(), 14).unwrap();

    let layout = ChartLayout::fast_slow(&[5, 10, 15], &[20]);
    assert_eq!(
        assemble("TEST", &bars, &bundle, &[], &layout).unwrap_err(),
        EngineError::MissingIndicator { span: 15 }
    );
}

#[test]
fn pipeline_reports_missing_chart_span() {
    let bars = bars_from_closes(&decline_then_rebound());
    let config = EngineConfig {
        ema_spans: [5, 10, 20].into_iter().collect(),
        ..EngineConfig::default()
    };
    // default layout asks for 60 and 120
    assert_eq!(
        analyze("TEST", &bars, &config).unwrap_err(),
        EngineError::MissingIndicator { span: 60 }
    );
}

#[test]
fn empty_bars_are_empty_input() {
    assert_eq!(
        analyze("TEST", &[], &EngineConfig::default()).unwrap_err(),
        EngineError::EmptyInput
    );
}

#[test]
fn unordered_bars_are_rejected() {
    let mut bars = bars_from_closes(&[10.0, 11.0, 12.0]);
    bars.swap(1, 2);
    assert!(matches!(
        analyze("TEST", &bars, &EngineConfig::default()),
        Err(EngineError::InvalidBars { .. })
    ));
}

// ──────────────────────────────────────────────
// Scenario 4: idempotence
// ──────────────────────────────────────────────

#[test]
fn pipeline_is_idempotent() {
    let bars = bars_from_closes(&decline_then_rebound());
    let config = EngineConfig::default();
    let first = analyze("TEST", &bars, &config).unwrap();
    let second = analyze("TEST", &bars, &config).unwrap();

    assert_eq!(first.render, second.render);
    assert_eq!(first.bundle, second.bundle);
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn fingerprint_changes_with_parameters() {
    let bars = bars_from_closes(&decline_then_rebound());
    let base = analyze("TEST", &bars, &EngineConfig::default()).unwrap();
    let config = EngineConfig {
        rsi_period: 10,
        ..EngineConfig::default()
    };
    let other = analyze("TEST", &bars, &config).unwrap();
    assert_ne!(base.fingerprint(), other.fingerprint());
}
