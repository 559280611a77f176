//! Classical fuel-fraction weight sizing: empty-weight correlations, Breguet segment
//! fractions, the gross-weight fixed point, and range sweeps over it.

pub mod estimator;
pub mod mission;
pub mod solver;
pub mod sweep;
pub mod tables;

use thiserror::Error;

pub use estimator::{Airframe, WeightEstimator, WeightSolveResult};
pub use mission::{FuelFractionBreakdown, MissionLeg, MissionProfile};
pub use solver::{Residual, SolverSettings};
pub use sweep::{DEFAULT_RANGE_SAMPLES, RangeSample, RangeStudy, range_study};
pub use tables::{
    EmptyWeightCategory, EmptyWeightCorrelation, LiftToDragCategory, Propulsion,
    PropulsionFamily, Segment,
};

/// Errors surfaced by the weight estimator and its sweeps.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    #[error("{kind} `{name}` not recognized; options are: {options}")]
    UnknownName {
        kind: &'static str,
        name: String,
        options: String,
    },
    #[error("aircraft type not defined; call classify first")]
    AircraftTypeUndefined,
    #[error("L/D max type not defined; call classify first")]
    LiftToDragTypeUndefined,
    #[error("propulsion not defined; call set_propulsion first")]
    PropulsionUndefined,
    #[error("{name} must be {requirement} (got {value})")]
    InvalidInput {
        name: &'static str,
        requirement: &'static str,
        value: f64,
    },
    #[error("mission fuel fraction {fuel_fraction:.4} leaves no weight for structure, crew, or payload")]
    Infeasible { fuel_fraction: f64 },
    #[error("no feasible gross weight found up to {searched_to:.3e} (fuel fraction {fuel_fraction:.4})")]
    NoFeasibleBracket { fuel_fraction: f64, searched_to: f64 },
    #[error("gross weight did not converge after {iterations} iterations (last residual {residual:.3e})")]
    NotConverged { iterations: usize, residual: f64 },
    #[error("invalid range sweep: {0}")]
    InvalidSweep(String),
}

pub(crate) fn require(
    name: &'static str,
    value: f64,
    ok: bool,
    requirement: &'static str,
) -> Result<f64, WeightError> {
    if ok && value.is_finite() {
        Ok(value)
    } else {
        Err(WeightError::InvalidInput {
            name,
            requirement,
            value,
        })
    }
}
