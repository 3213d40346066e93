//! Signal detection.
//!
//! Detectors are stateless: each call evaluates every bar from its own values
//! and the immediately preceding bar's, and returns timestamps in ascending
//! order. Turning timestamps into priced events happens in the chart
//! assembler.

pub mod bottom;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use bottom::{bottom_signal_mask, detect_bottom_signals, BottomSignalDetector};

/// A detected event placed on the chart: the bar's date and its close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub date: NaiveDate,
    pub price: f64,
}
