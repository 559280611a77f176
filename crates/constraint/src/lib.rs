//! Constraint-diagram engine: required power loading versus wing loading per flight regime,
//! scalar wing-loading limits, and the optimum design point between two requirements.

pub mod diagram;
pub mod optimum;
pub mod regime;
pub mod sweep;

use thiserror::Error;

pub use diagram::{ConstraintDiagram, PowerLoadingCurve, ScalarRequirement};
pub use optimum::DesignPoint;
pub use regime::{Constraint, Regime, RegimeInputs, RunwaySurface, TakeoffInputs};
pub use sweep::WingLoadingSweep;

/// Errors surfaced by the constraint-diagram engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    #[error("wing-loading sweep needs at least two samples (got {0})")]
    SweepTooShort(usize),
    #[error("wing-loading sweep values must be positive and finite (got {0})")]
    SweepNonPositive(f64),
    #[error("wing-loading sweep must be strictly increasing (index {index})")]
    SweepNotAscending { index: usize },
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },
    #[error("takeoff surface `{name}` not recognized; options are: {options}")]
    UnknownSurface { name: String, options: String },
    #[error("constraint `{name}` not recognized; options are: {options}")]
    UnknownConstraint { name: String, options: String },
    #[error("constraint undetermined, please perform the {0} calculation first")]
    Undetermined(Constraint),
    #[error("{0} and {1} are both wing-loading limits and do not intersect; pick at least one curve constraint")]
    NoIntersection(Constraint, Constraint),
    #[error("{0} and {1} curves are not aligned with the wing-loading sweep")]
    Misaligned(Constraint, Constraint),
    #[error("{0} requirement is not implemented")]
    NotImplemented(&'static str),
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ConstraintError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConstraintError::NonPositive { name, value })
    }
}
