//! Aerodynamic configuration shared by the constraint and weight engines.

pub mod flow;
pub mod lift;
pub mod planform;
pub mod table;

use std::f64::consts::PI;

use serde::Serialize;
use thiserror::Error;

pub use lift::{FuselageSpillover, LiftSlopeInputs, wing_lift_curve_slope};
pub use planform::{Planform, PlanformUnit, oswald_efficiency};
pub use table::{CoefficientTable, PolarEstimate};

/// Errors surfaced while building aerodynamic inputs.
#[derive(Debug, Error)]
pub enum AeroError {
    #[error("aspect ratio must be positive (got {0})")]
    InvalidAspectRatio(f64),
    #[error("Oswald efficiency must lie in (0, 1] (got {0})")]
    InvalidOswaldEfficiency(f64),
    #[error("zero-lift drag coefficient must be non-negative (got {0})")]
    InvalidZeroLiftDrag(f64),
    #[error("propulsive efficiency must lie in (0, 1] (got {0})")]
    InvalidPropulsiveEfficiency(f64),
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },
    #[error("failed to read coefficient table: {0}")]
    Csv(#[from] csv::Error),
    #[error("coefficient table has no `{0}` column")]
    MissingColumn(String),
    #[error("column `{0}` length does not match the angle-of-attack column")]
    RaggedColumn(String),
    #[error("coefficient table has no rows")]
    EmptyTable,
    #[error("non-numeric value `{value}` in column `{column}`")]
    NonNumeric { column: String, value: String },
    #[error("lift-curve slope estimate needs 0 <= M < 1 (got {0})")]
    NotSubsonic(f64),
    #[error("fuselage spillover requested but `{0}` is not given")]
    MissingFuselageDimension(&'static str),
}

/// Secondary aerodynamic estimates reported alongside a constraint study.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AeroEstimates {
    /// Wing lift-curve slope (1/rad).
    pub lift_curve_slope: Option<f64>,
    pub polar: Option<PolarEstimate>,
}

/// Immutable-by-default aerodynamic inputs of a study.
///
/// The induced-drag factor is derived from the current aspect ratio and Oswald
/// efficiency on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AircraftAeroConfig {
    aspect_ratio: f64,
    oswald_efficiency: f64,
    cd0: f64,
    propulsive_efficiency: f64,
}

impl AircraftAeroConfig {
    pub fn new(
        aspect_ratio: f64,
        oswald_efficiency: f64,
        cd0: f64,
        propulsive_efficiency: f64,
    ) -> Result<Self, AeroError> {
        validate_aspect_ratio(aspect_ratio)?;
        validate_oswald(oswald_efficiency)?;
        if !(cd0 >= 0.0) {
            return Err(AeroError::InvalidZeroLiftDrag(cd0));
        }
        if !(propulsive_efficiency > 0.0 && propulsive_efficiency <= 1.0) {
            return Err(AeroError::InvalidPropulsiveEfficiency(propulsive_efficiency));
        }
        Ok(Self {
            aspect_ratio,
            oswald_efficiency,
            cd0,
            propulsive_efficiency,
        })
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn oswald_efficiency(&self) -> f64 {
        self.oswald_efficiency
    }

    pub fn cd0(&self) -> f64 {
        self.cd0
    }

    pub fn propulsive_efficiency(&self) -> f64 {
        self.propulsive_efficiency
    }

    /// Induced-drag factor k = 1/(π·AR·e).
    #[inline]
    pub fn induced_drag_factor(&self) -> f64 {
        1.0 / (PI * self.aspect_ratio * self.oswald_efficiency)
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) -> Result<(), AeroError> {
        validate_aspect_ratio(aspect_ratio)?;
        self.aspect_ratio = aspect_ratio;
        Ok(())
    }

    pub fn set_oswald_efficiency(&mut self, oswald_efficiency: f64) -> Result<(), AeroError> {
        validate_oswald(oswald_efficiency)?;
        self.oswald_efficiency = oswald_efficiency;
        Ok(())
    }
}

fn validate_aspect_ratio(value: f64) -> Result<(), AeroError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(AeroError::InvalidAspectRatio(value))
    }
}

fn validate_oswald(value: f64) -> Result<(), AeroError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(AeroError::InvalidOswaldEfficiency(value))
    }
}
