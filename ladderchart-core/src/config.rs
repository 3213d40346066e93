//! Engine configuration, loadable from TOML.
//!
//! Every field is optional in the file; omitted fields take the defaults
//! (EMA spans 5/10/20/60/120, MACD 12/26/9, RSI 14 with an oversold cutoff
//! of 30, fast/slow ladder grouping).
//!
//! ```toml
//! ema_spans = [5, 10, 20, 60, 120]
//! rsi_period = 14
//! rsi_threshold = 30.0
//!
//! [macd]
//! fast_span = 12
//! slow_span = 26
//! signal_span = 9
//!
//! [[chart.groups]]
//! name = "fast"
//! spans = [5, 10, 20]
//! color = "blue"
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::ChartLayout;
use crate::error::{require_positive, EngineError};
use crate::indicators::rsi::DEFAULT_RSI_PERIOD;
use crate::indicators::MacdParams;
use crate::signals::BottomSignalDetector;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] EngineError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Spans of the EMA ladder to compute.
    pub ema_spans: BTreeSet<usize>,
    pub macd: MacdParams,
    pub rsi_period: usize,
    /// Oversold cutoff for the bottom-signal detector.
    pub rsi_threshold: f64,
    pub chart: ChartLayout,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ema_spans: [5, 10, 20, 60, 120].into_iter().collect(),
            macd: MacdParams::default(),
            rsi_period: DEFAULT_RSI_PERIOD,
            rsi_threshold: BottomSignalDetector::DEFAULT_RSI_THRESHOLD,
            chart: ChartLayout::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Check every parameter rule up front.
    ///
    /// Chart spans that are not in `ema_spans` are not rejected here; the
    /// assembler reports them as `MissingIndicator`.
    pub fn validate(&self) -> Result<(), EngineError> {
        for &span in &self.ema_spans {
            require_positive("ema_spans", span)?;
        }
        self.macd.validate()?;
        require_positive("rsi_period", self.rsi_period)?;
        BottomSignalDetector::new(self.rsi_threshold)?;
        self.chart.validate()?;
        Ok(())
    }

    pub fn detector(&self) -> Result<BottomSignalDetector, EngineError> {
        BottomSignalDetector::new(self.rsi_threshold)
    }
}
