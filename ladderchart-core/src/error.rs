//! Engine error taxonomy.
//!
//! Every error is raised synchronously by the call that detects it. Nothing in
//! the engine retries or substitutes defaults; callers fix their input and
//! call again. Undefined values inside a `Series` are not errors.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("empty input: bar sequence has no bars")]
    EmptyInput,

    #[error("missing indicator: no EMA series computed for span {span}")]
    MissingIndicator { span: usize },

    #[error("invalid bar at index {index}: {reason}")]
    InvalidBars { index: usize, reason: String },

    #[error("misaligned series: index of {left} entries does not match index of {right} entries")]
    MisalignedSeries { left: usize, right: usize },

    #[error("timestamp {date} is not part of the bar index")]
    UnknownTimestamp { date: NaiveDate },
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Check that a span/period parameter is at least 1.
pub(crate) fn require_positive(name: &'static str, value: usize) -> Result<(), EngineError> {
    if value < 1 {
        return Err(EngineError::invalid(name, format!("must be >= 1, got {value}")));
    }
    Ok(())
}
