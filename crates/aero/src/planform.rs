//! Tapered-wing planform geometry and span-efficiency estimates.

use serde::Serialize;
use sizing_core::units;

use crate::AeroError;

/// Length unit a planform is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanformUnit {
    Metres,
    Feet,
}

/// Span and chord layout of an unswept tapered wing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Planform {
    pub unit: PlanformUnit,
    pub area: f64,
    pub span: f64,
    pub root_chord: f64,
    pub tip_chord: f64,
    pub mean_chord: f64,
}

impl Planform {
    /// Lay out a wing of reference area `area_m2` (always given in m²) with the supplied
    /// aspect ratio and taper ratio, reporting lengths in `unit`.
    pub fn tapered(
        area_m2: f64,
        aspect_ratio: f64,
        taper_ratio: f64,
        unit: PlanformUnit,
    ) -> Result<Self, AeroError> {
        if area_m2 <= 0.0 {
            return Err(AeroError::NonPositive {
                name: "wing area",
                value: area_m2,
            });
        }
        if aspect_ratio <= 0.0 {
            return Err(AeroError::InvalidAspectRatio(aspect_ratio));
        }
        if taper_ratio < 0.0 {
            return Err(AeroError::NonPositive {
                name: "taper ratio",
                value: taper_ratio,
            });
        }

        let area = match unit {
            PlanformUnit::Metres => area_m2,
            PlanformUnit::Feet => units::m_to_ft(units::m_to_ft(area_m2)),
        };
        let span = (aspect_ratio * area).sqrt();
        let root_chord = 2.0 * area / (span * (1.0 + taper_ratio));

        Ok(Self {
            unit,
            area,
            span,
            root_chord,
            tip_chord: taper_ratio * root_chord,
            mean_chord: area / span,
        })
    }
}

// Fuselage and zero-lift-drag corrections of the statistical span-efficiency method.
const FUSELAGE_FACTOR: f64 = 1.0 - 2.0 * 0.114 * 0.114;
const ZERO_LIFT_DRAG_FACTOR: f64 = 0.804;
// Compressibility factor; unity below M 0.3.
const MACH_FACTOR: f64 = 1.0;

/// Estimate the Oswald efficiency of a wing from its aspect ratio, taper ratio, and
/// quarter-chord sweep in degrees.
pub fn oswald_efficiency(aspect_ratio: f64, taper_ratio: f64, quarter_chord_sweep_deg: f64) -> f64 {
    let sweep = quarter_chord_sweep_deg.to_radians();
    let delta_taper = -0.357 + 0.45 * (0.0375 * sweep).exp();
    let theoretical = 1.0 / (1.0 + taper_polynomial(taper_ratio - delta_taper) * aspect_ratio);
    theoretical * FUSELAGE_FACTOR * ZERO_LIFT_DRAG_FACTOR * MACH_FACTOR
}

fn taper_polynomial(taper: f64) -> f64 {
    0.0524 * taper.powi(4) - 0.15 * taper.powi(3) + 0.1659 * taper.powi(2) - 0.0706 * taper
        + 0.0119
}
