//! Gross-weight sensitivity to mission cruise range.

use rayon::prelude::*;
use serde::Serialize;
use sizing_core::linspace;
use tracing::{info, warn};

use crate::estimator::{WeightEstimator, WeightSolveResult};
use crate::mission::MissionProfile;
use crate::WeightError;

pub const DEFAULT_RANGE_SAMPLES: usize = 15;

/// One sample of a range sweep. Failed solves keep their error.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSample {
    pub range: f64,
    pub outcome: Result<WeightSolveResult, WeightError>,
}

impl RangeSample {
    pub fn gross_weight(&self) -> Option<f64> {
        self.outcome.as_ref().ok().map(|r| r.gross_weight)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeStudy {
    pub samples: Vec<RangeSample>,
}

impl RangeStudy {
    pub fn ranges(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.range).collect()
    }

    /// Gross weight per range; `None` where the solve failed.
    pub fn gross_weights(&self) -> Vec<Option<f64>> {
        self.samples.iter().map(RangeSample::gross_weight).collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = (f64, &WeightError)> {
        self.samples
            .iter()
            .filter_map(|s| s.outcome.as_ref().err().map(|e| (s.range, e)))
    }

    pub fn all_converged(&self) -> bool {
        self.samples.iter().all(|s| s.outcome.is_ok())
    }
}

/// Serializable row of a range study.
#[derive(Debug, Clone, Serialize)]
pub struct RangeRow {
    pub range: f64,
    pub gross_weight: Option<f64>,
    pub error: Option<String>,
}

impl From<&RangeSample> for RangeRow {
    fn from(sample: &RangeSample) -> Self {
        Self {
            range: sample.range,
            gross_weight: sample.gross_weight(),
            error: sample.outcome.as_ref().err().map(|e| e.to_string()),
        }
    }
}

/// Solve the template mission at `samples` cruise ranges evenly spaced over
/// `[low, high]`, overwriting every cruise leg's range. Samples run in parallel on
/// independent profile copies and come back in range order.
pub fn range_study(
    estimator: &WeightEstimator,
    template: &MissionProfile,
    low: f64,
    high: f64,
    samples: usize,
) -> Result<RangeStudy, WeightError> {
    if samples == 0 {
        return Err(WeightError::InvalidSweep("sample count must be positive".into()));
    }
    if !(low >= 0.0 && high >= low && high.is_finite()) {
        return Err(WeightError::InvalidSweep(format!(
            "bounds must satisfy 0 <= low <= high (got {low}..{high})"
        )));
    }
    if !template.has_cruise() {
        return Err(WeightError::InvalidSweep(
            "template mission has no cruise leg".into(),
        ));
    }

    let samples: Vec<RangeSample> = linspace(low, high, samples)
        .into_par_iter()
        .map(|range| {
            let profile = template.with_cruise_range(range);
            RangeSample {
                range,
                outcome: estimator.solve_gross_weight(&profile),
            }
        })
        .collect();

    for sample in &samples {
        if let Err(err) = &sample.outcome {
            warn!(range = sample.range, error = %err, "range sample failed");
        }
    }
    info!(samples = samples.len(), low, high, "range study complete");

    Ok(RangeStudy { samples })
}
