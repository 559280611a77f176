//! Subsonic wing lift-curve slope from the airfoil slope, planform, and Mach number.

use std::f64::consts::PI;

use serde::Serialize;
use tracing::debug;

use crate::AeroError;

/// Fuselage lift carry-over factor F applied to the exposed-wing slope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FuselageSpillover {
    /// F = 1.
    Ignored,
    /// F = 1.07·(1 + d/b)², capped at 0.98·Sref/Sexp.
    Fuselage { diameter: f64, span: f64 },
}

impl FuselageSpillover {
    /// Spillover from optional dimensions; both must be present when it is requested.
    pub fn requested(diameter: Option<f64>, span: Option<f64>) -> Result<Self, AeroError> {
        let diameter = diameter.ok_or(AeroError::MissingFuselageDimension("fuselage diameter"))?;
        let span = span.ok_or(AeroError::MissingFuselageDimension("span"))?;
        Ok(FuselageSpillover::Fuselage { diameter, span })
    }

    fn factor(self, exposed_ratio: f64) -> Result<f64, AeroError> {
        match self {
            FuselageSpillover::Ignored => Ok(1.0),
            FuselageSpillover::Fuselage { diameter, span } => {
                positive("fuselage diameter", diameter)?;
                positive("span", span)?;
                let f = 1.07 * (1.0 + diameter / span).powi(2);
                if f * exposed_ratio > 1.0 {
                    let capped = 0.98 / exposed_ratio;
                    debug!(uncapped = f, capped, "capped fuselage spillover factor");
                    Ok(capped)
                } else {
                    Ok(f)
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LiftSlopeInputs {
    pub aspect_ratio: f64,
    /// Sweep of the maximum-thickness line (degrees).
    pub max_thickness_sweep_deg: f64,
    pub mach: f64,
    /// Two-dimensional airfoil lift-curve slope (1/rad).
    pub airfoil_lift_slope: f64,
    /// Wing area outside the fuselage.
    pub exposed_area: f64,
    pub reference_area: f64,
    pub spillover: FuselageSpillover,
}

/// Wing lift-curve slope CLα (1/rad):
///
/// `2π·AR / (2 + sqrt(4 + AR²β²/η²·(1 + tan²Λ/β²))) · Sexp/Sref · F`
///
/// with `β = sqrt(1 − M²)` and `η = Clα/(2π/β)`. Only valid below Mach 1.
pub fn wing_lift_curve_slope(inputs: &LiftSlopeInputs) -> Result<f64, AeroError> {
    if !(inputs.aspect_ratio > 0.0 && inputs.aspect_ratio.is_finite()) {
        return Err(AeroError::InvalidAspectRatio(inputs.aspect_ratio));
    }
    if !(inputs.mach >= 0.0 && inputs.mach < 1.0) {
        return Err(AeroError::NotSubsonic(inputs.mach));
    }
    positive("airfoil lift slope", inputs.airfoil_lift_slope)?;
    positive("exposed wing area", inputs.exposed_area)?;
    positive("reference wing area", inputs.reference_area)?;

    let exposed_ratio = inputs.exposed_area / inputs.reference_area;
    let f = inputs.spillover.factor(exposed_ratio)?;

    let ar = inputs.aspect_ratio;
    let beta2 = 1.0 - inputs.mach * inputs.mach;
    let eta = inputs.airfoil_lift_slope / (2.0 * PI / beta2.sqrt());
    let tan_sweep = inputs.max_thickness_sweep_deg.to_radians().tan();
    let root = (4.0 + ar * ar * beta2 / (eta * eta) * (1.0 + tan_sweep * tan_sweep / beta2)).sqrt();

    Ok(2.0 * PI * ar / (2.0 + root) * exposed_ratio * f)
}

fn positive(name: &'static str, value: f64) -> Result<(), AeroError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(AeroError::NonPositive { name, value })
    }
}
