//! Freestream quick-look helpers: Reynolds number, required lift, and Mach number.

use serde::Serialize;
use sizing_core::Atmosphere;
use sizing_core::constants::{MU_SEA_LEVEL, RHO_SEA_LEVEL, SPEED_OF_SOUND_SEA_LEVEL};

/// Reynolds number above which the boundary layer is treated as turbulent.
pub const TRANSITION_REYNOLDS: f64 = 5.0e5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlowRegime {
    Laminar,
    Turbulent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReynoldsNumber {
    pub value: f64,
    pub regime: FlowRegime,
}

/// Reynolds number ρVl/μ, defaulting to sea-level air when `air` is `None`.
pub fn reynolds_number(speed: f64, length: f64, air: Option<(f64, f64)>) -> ReynoldsNumber {
    let (density, viscosity) = air.unwrap_or((RHO_SEA_LEVEL, MU_SEA_LEVEL));
    let value = density * speed * length / viscosity;
    let regime = if value < TRANSITION_REYNOLDS {
        FlowRegime::Laminar
    } else {
        FlowRegime::Turbulent
    };
    ReynoldsNumber { value, regime }
}

/// Lift coefficient needed to carry `mass_kg` at `speed` on a wing of `area_m2`.
pub fn required_lift_coefficient(
    mass_kg: f64,
    speed: f64,
    area_m2: f64,
    atmosphere: &Atmosphere,
) -> f64 {
    mass_kg * atmosphere.gravity / (atmosphere.dynamic_pressure(speed) * area_m2)
}

/// Gas properties for a non-standard speed of sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasState {
    pub temperature_k: f64,
    pub gamma: f64,
    /// Universal gas constant (J/(mol·K)).
    pub gas_constant: f64,
    /// Molar mass (kg/mol).
    pub molar_mass: f64,
}

impl Default for GasState {
    fn default() -> Self {
        Self {
            temperature_k: 293.15,
            gamma: 1.4,
            gas_constant: 8.31,
            molar_mass: 0.028_97,
        }
    }
}

impl GasState {
    pub fn speed_of_sound(&self) -> f64 {
        (self.temperature_k * self.gamma * self.gas_constant / self.molar_mass).sqrt()
    }
}

/// Mach number at `speed`, using the sea-level speed of sound unless a gas state is given.
pub fn mach_number(speed: f64, gas: Option<&GasState>) -> f64 {
    let a = gas
        .map(GasState::speed_of_sound)
        .unwrap_or(SPEED_OF_SOUND_SEA_LEVEL);
    speed / a
}
