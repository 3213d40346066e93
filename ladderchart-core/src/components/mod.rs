//! Component seams shared by the indicator and signal stages.

pub mod indicator;

pub use indicator::{Indicator, IndicatorBundle};
