//! LadderChart Core — EMA ladder, MACD, RSI and bottom-reversal signals.
//!
//! This crate turns one symbol's daily bars into chart-ready data:
//! - Domain types (bars) and the index-aligned `Series`
//! - Indicators: EMA (adjust=false), MACD/signal, simple-average RSI
//! - Bottom-reversal detector: oversold RSI + fresh MACD upward cross
//! - Chart assembly with caller-configured moving-average groups
//! - TOML configuration, CSV bar source, output fingerprinting
//!
//! Everything is synchronous and pure; no stage keeps state between calls.

pub mod chart;
pub mod components;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod indicators;
pub mod series;
pub mod signals;

pub use chart::{assemble, ChartLayout, MaGroup, RenderBundle};
pub use components::{Indicator, IndicatorBundle};
pub use config::{ConfigError, EngineConfig};
pub use domain::Bar;
pub use engine::{analyze, ChartAnalysis};
pub use error::EngineError;
pub use series::Series;
pub use signals::{detect_bottom_signals, BottomSignalDetector, SignalEvent};
