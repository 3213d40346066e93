//! Presentation grouping of moving averages.
//!
//! Which spans are drawn together, and with what colour hint, is caller
//! configuration. The defaults reproduce the classic two-ladder chart: a fast
//! blue ladder (5/10/20) and a slow orange ladder (60/120).

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, EngineError};

/// One visual group of moving averages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaGroup {
    pub name: String,
    pub spans: Vec<usize>,
    #[serde(default)]
    pub color: Option<String>,
}

impl MaGroup {
    pub fn new(name: impl Into<String>, spans: impl Into<Vec<usize>>) -> Self {
        Self {
            name: name.into(),
            spans: spans.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartLayout {
    /// Groups in drawing order.
    pub groups: Vec<MaGroup>,
    /// Carry the MACD and RSI panes in the render bundle.
    pub include_oscillators: bool,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            groups: vec![
                MaGroup::new("fast", [5, 10, 20]).with_color("blue"),
                MaGroup::new("slow", [60, 120]).with_color("orange"),
            ],
            include_oscillators: true,
        }
    }
}

impl ChartLayout {
    /// Layout with a fast and a slow group and no colour hints.
    pub fn fast_slow(fast_spans: &[usize], slow_spans: &[usize]) -> Self {
        Self {
            groups: vec![
                MaGroup::new("fast", fast_spans),
                MaGroup::new("slow", slow_spans),
            ],
            include_oscillators: true,
        }
    }

    /// Every span referenced by any group.
    pub fn spans(&self) -> BTreeSet<usize> {
        self.groups
            .iter()
            .flat_map(|g| g.spans.iter().copied())
            .collect()
    }

    /// Group names must be non-empty and unique; spans must be >= 1.
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut seen = HashSet::new();
        for group in &self.groups {
            if group.name.trim().is_empty() {
                return Err(EngineError::invalid("chart.groups.name", "must not be empty"));
            }
            if !seen.insert(group.name.as_str()) {
                return Err(EngineError::invalid(
                    "chart.groups.name",
                    format!("duplicate group '{}'", group.name),
                ));
            }
            for &span in &group.spans {
                require_positive("chart.groups.spans", span)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_fast_and_slow_ladders() {
        let layout = ChartLayout::default();
        assert_eq!(layout.groups.len(), 2);
        assert_eq!(layout.groups[0].name, "fast");
        assert_eq!(layout.groups[0].spans, vec![5, 10, 20]);
        assert_eq!(layout.groups[0].color.as_deref(), Some("blue"));
        assert_eq!(layout.groups[1].spans, vec![60, 120]);
        assert_eq!(layout.spans().into_iter().collect::<Vec<_>>(), vec![5, 10, 20, 60, 120]);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn duplicate_group_names_are_rejected() {
        let layout = ChartLayout {
            groups: vec![MaGroup::new("fast", [5]), MaGroup::new("fast", [10])],
            include_oscillators: false,
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn zero_span_is_rejected() {
        let layout = ChartLayout::fast_slow(&[0], &[60]);
        assert!(matches!(
            layout.validate(),
            Err(EngineError::InvalidParameter { .. })
        ));
    }
}
