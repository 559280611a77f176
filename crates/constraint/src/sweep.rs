//! Wing-loading sweep shared by every constraint curve.

use serde::Serialize;
use sizing_core::linspace;

use crate::ConstraintError;

/// Ascending, strictly positive wing-loading samples (kg/m²).
///
/// `revision` increments on every change so curves can record which sweep they were
/// computed against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WingLoadingSweep {
    values: Vec<f64>,
    revision: u64,
}

impl WingLoadingSweep {
    pub fn new(values: Vec<f64>) -> Result<Self, ConstraintError> {
        validate(&values)?;
        Ok(Self {
            values,
            revision: 0,
        })
    }

    /// Linear sweep from `min` to `max` with `samples` points.
    pub fn linear(min: f64, max: f64, samples: usize) -> Result<Self, ConstraintError> {
        Self::new(linspace(min, max, samples))
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.values[0]
    }

    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the samples, bumping the revision.
    pub(crate) fn replace(&mut self, values: Vec<f64>) -> Result<(), ConstraintError> {
        validate(&values)?;
        self.values = values;
        self.revision += 1;
        Ok(())
    }

    /// Stretch the sweep so its upper bound reaches `wing_loading`, keeping the minimum and
    /// sample count. Returns `true` when the sweep changed.
    pub(crate) fn extend_to(&mut self, wing_loading: f64) -> bool {
        if wing_loading <= self.max() {
            return false;
        }
        self.values = linspace(self.min(), wing_loading, self.values.len());
        self.revision += 1;
        true
    }

    /// Index of the sample closest to `wing_loading`; the first one wins on ties.
    pub fn nearest_index(&self, wing_loading: f64) -> usize {
        nearest_index(&self.values, wing_loading)
    }
}

pub(crate) fn nearest_index(values: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_gap = f64::INFINITY;
    for (idx, v) in values.iter().enumerate() {
        let gap = (v - target).abs();
        if gap < best_gap {
            best = idx;
            best_gap = gap;
        }
    }
    best
}

fn validate(values: &[f64]) -> Result<(), ConstraintError> {
    if values.len() < 2 {
        return Err(ConstraintError::SweepTooShort(values.len()));
    }
    if let Some(bad) = values.iter().find(|v| !(**v > 0.0 && v.is_finite())) {
        return Err(ConstraintError::SweepNonPositive(*bad));
    }
    if let Some(index) = values.windows(2).position(|w| w[1] <= w[0]) {
        return Err(ConstraintError::SweepNotAscending { index: index + 1 });
    }
    Ok(())
}
