//! Index-aligned numeric series.
//!
//! A `Series` pairs a shared date index with one value per date. Positions
//! without enough history hold `None`; a series never stores NaN as a
//! stand-in for "no data yet". Every series derived from one bar sequence
//! clones the same `Arc` index, so alignment checks are usually a pointer
//! comparison.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesRepr")]
pub struct Series {
    index: Arc<[NaiveDate]>,
    values: Vec<Option<f64>>,
}

/// Wire form of a `Series`, checked by [`Series::new`] on the way in.
#[derive(Deserialize)]
struct SeriesRepr {
    index: Arc<[NaiveDate]>,
    values: Vec<Option<f64>>,
}

impl TryFrom<SeriesRepr> for Series {
    type Error = EngineError;

    fn try_from(repr: SeriesRepr) -> Result<Self, Self::Error> {
        Series::new(repr.index, repr.values)
    }
}

impl Series {
    /// Build a series from an index and values of the same length.
    pub fn new(index: Arc<[NaiveDate]>, values: Vec<Option<f64>>) -> Result<Self, EngineError> {
        if index.len() != values.len() {
            return Err(EngineError::MisalignedSeries {
                left: index.len(),
                right: values.len(),
            });
        }
        Ok(Self { index, values })
    }

    /// Close-price column of a bar sequence, indexed by bar date.
    pub fn closes(bars: &[Bar]) -> Self {
        Self {
            index: bars.iter().map(|b| b.date).collect(),
            values: bars.iter().map(|b| Some(b.close)).collect(),
        }
    }

    /// New series over the same index. Caller guarantees equal length.
    pub(crate) fn with_values(&self, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(values.len(), self.index.len());
        Self {
            index: Arc::clone(&self.index),
            values,
        }
    }

    pub fn index(&self) -> &Arc<[NaiveDate]> {
        &self.index
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Value at a position; `None` if undefined or out of bounds.
    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied().flatten()
    }

    /// Value at a date; `None` if undefined or the date is not indexed.
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.index
            .binary_search(&date)
            .ok()
            .and_then(|i| self.get(i))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of defined positions.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Position of the first defined value.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(|v| v.is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.index.iter().copied().zip(self.values.iter().copied())
    }

    /// True when both series carry the same dates in the same order.
    pub fn is_aligned_with(&self, other: &Series) -> bool {
        Arc::ptr_eq(&self.index, &other.index) || self.index == other.index
    }

    pub(crate) fn ensure_aligned(&self, other: &Series) -> Result<(), EngineError> {
        if self.is_aligned_with(other) {
            Ok(())
        } else {
            Err(EngineError::MisalignedSeries {
                left: self.len(),
                right: other.len(),
            })
        }
    }

    /// Pointwise combination; undefined wherever either side is undefined.
    pub fn zip_with(
        &self,
        other: &Series,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Series, EngineError> {
        self.ensure_aligned(other)?;
        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) => Some(f(*a, *b)),
                _ => None,
            })
            .collect();
        Ok(self.with_values(values))
    }
}
