//! Chart data assembly.
//!
//! Packages bars, grouped moving averages and signal markers into a
//! `RenderBundle` for an external renderer. Only lookup and projection
//! happen here; every number was computed upstream.

pub mod layout;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::components::IndicatorBundle;
use crate::domain::{Bar, Symbol};
use crate::error::EngineError;
use crate::series::Series;
use crate::signals::SignalEvent;

pub use layout::{ChartLayout, MaGroup};

/// One moving-average line, labelled for the legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaTrace {
    pub span: usize,
    pub label: String,
    pub series: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderGroup {
    pub name: String,
    pub color: Option<String>,
    pub traces: Vec<MaTrace>,
}

/// MACD and RSI sub-chart data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscillatorPanes {
    pub macd: Series,
    pub macd_signal: Series,
    pub histogram: Series,
    pub rsi: Series,
}

/// Everything a renderer needs to draw the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderBundle {
    pub symbol: Symbol,
    pub title: String,
    pub bars: Vec<Bar>,
    pub groups: Vec<RenderGroup>,
    pub oscillators: Option<OscillatorPanes>,
    pub signals: Vec<SignalEvent>,
}

impl RenderBundle {
    pub fn group(&self, name: &str) -> Option<&RenderGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// First trace with the given span across all groups.
    pub fn trace(&self, span: usize) -> Option<&MaTrace> {
        self.groups
            .iter()
            .flat_map(|g| g.traces.iter())
            .find(|t| t.span == span)
    }
}

/// Chart title for a symbol.
pub fn chart_title(symbol: &str) -> String {
    format!("{symbol} EMA ladder + bottom signals")
}

/// Build the render bundle.
///
/// Fails with `MissingIndicator` if the layout asks for a span the bundle
/// does not hold, `MisalignedSeries` if the bundle was computed over other
/// bars, and `UnknownTimestamp` if a signal date is not a bar date. Signal
/// dates may arrive in any order; the emitted events are ascending with no
/// repeated date.
pub fn assemble(
    symbol: &str,
    bars: &[Bar],
    bundle: &IndicatorBundle,
    signal_dates: &[NaiveDate],
    layout: &ChartLayout,
) -> Result<RenderBundle, EngineError> {
    if bars.is_empty() {
        return Err(EngineError::EmptyInput);
    }
    let aligned = bundle.index().len() == bars.len()
        && bundle.index().iter().zip(bars).all(|(d, b)| *d == b.date);
    if !aligned {
        return Err(EngineError::MisalignedSeries {
            left: bars.len(),
            right: bundle.index().len(),
        });
    }

    let groups = layout
        .groups
        .iter()
        .map(|group| {
            let traces = group
                .spans
                .iter()
                .map(|&span| {
                    Ok(MaTrace {
                        span,
                        label: format!("EMA{span}"),
                        series: bundle.require_ema(span)?.clone(),
                    })
                })
                .collect::<Result<Vec<_>, EngineError>>()?;
            Ok(RenderGroup {
                name: group.name.clone(),
                color: group.color.clone(),
                traces,
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    let oscillators = if layout.include_oscillators {
        Some(OscillatorPanes {
            macd: bundle.macd().clone(),
            macd_signal: bundle.macd_signal().clone(),
            histogram: bundle.macd_lines().histogram()?,
            rsi: bundle.rsi().clone(),
        })
    } else {
        None
    };

    // Bar positions in ascending order, each at most once.
    let mut positions = BTreeSet::new();
    for &date in signal_dates {
        let i = bars
            .binary_search_by_key(&date, |b| b.date)
            .map_err(|_| EngineError::UnknownTimestamp { date })?;
        positions.insert(i);
    }
    let signals: Vec<SignalEvent> = positions
        .into_iter()
        .map(|i| SignalEvent {
            date: bars[i].date,
            price: bars[i].close,
        })
        .collect();

    Ok(RenderBundle {
        symbol: symbol.to_string(),
        title: chart_title(symbol),
        bars: bars.to_vec(),
        groups,
        oscillators,
        signals,
    })
}
