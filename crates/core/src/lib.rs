//! Core units, constants, and shared primitives for the classical sizing workspace.

use serde::{Deserialize, Serialize};

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Gravitational acceleration used by the sizing relations (m/s²).
    pub const G0: f64 = 9.807;
    /// Sea-level air density used as the default study density (kg/m³).
    pub const RHO_SEA_LEVEL: f64 = 1.23;
    /// Dynamic viscosity of sea-level air (Pa·s).
    pub const MU_SEA_LEVEL: f64 = 1.81e-5;
    /// Speed of sound at sea level (m/s).
    pub const SPEED_OF_SOUND_SEA_LEVEL: f64 = 343.0;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    /// Feet per nautical mile.
    pub const FEET_PER_NAUTICAL_MILE: f64 = 6_076.12;
    /// Shaft power of one brake horsepower (ft·lbf/s).
    pub const FOOT_POUNDS_PER_SECOND_PER_BHP: f64 = 550.0;
    /// Divisor taking SI specific fuel consumption (mg/(N·s)) to the Breguet exponent scale.
    pub const SI_FUEL_CONSUMPTION_DIVISOR: f64 = 10.0 * 1.0e6;
    /// Wing-loading conversion from lbf/ft² to kg/m².
    pub const LBF_FT2_TO_KG_M2: f64 = 4.88243;
    /// Feet to metres.
    pub const FT_TO_M: f64 = 0.3048;
    /// Divisor converting watt/kg power loading to watt/lbf.
    pub const KG_PER_LB_ROUNDED: f64 = 2.205;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::*;

    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert nautical miles to feet.
    #[inline]
    pub fn nautical_miles_to_feet(v: f64) -> f64 {
        v * FEET_PER_NAUTICAL_MILE
    }

    /// Convert hours to seconds.
    #[inline]
    pub fn hours_to_seconds(v: f64) -> f64 {
        v * SECONDS_PER_HOUR
    }

    /// Convert metres to feet.
    #[inline]
    pub fn m_to_ft(v: f64) -> f64 {
        v / FT_TO_M
    }

    /// Convert a wing loading in kg/m² to lbf/ft².
    #[inline]
    pub fn kg_m2_to_lbf_ft2(v: f64) -> f64 {
        v / LBF_FT2_TO_KG_M2
    }

    /// Convert a power loading in watt/kg to watt/lbf.
    #[inline]
    pub fn watt_per_kg_to_watt_per_lbf(v: f64) -> f64 {
        v / KG_PER_LB_ROUNDED
    }
}

/// Unit system a weight study is expressed in.
///
/// `Imperial` takes ranges in nautical miles, speeds in ft/s and weights in lbf.
/// `Si` takes ranges in kilometres, speeds in m/s and weights in kg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Imperial,
    Si,
}

impl UnitSystem {
    /// Convert a mission range (NM or km) to the length unit paired with the speed unit.
    pub fn range_to_length(self, range: f64) -> f64 {
        match self {
            UnitSystem::Imperial => units::nautical_miles_to_feet(range),
            UnitSystem::Si => units::km_to_m(range),
        }
    }

    /// Convert a tabulated specific fuel consumption to the per-second scale of the
    /// Breguet exponent.
    pub fn fuel_consumption_per_second(self, c: f64) -> f64 {
        match self {
            UnitSystem::Imperial => c / constants::SECONDS_PER_HOUR,
            UnitSystem::Si => c / constants::SI_FUEL_CONSUMPTION_DIVISOR,
        }
    }

    /// Short label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "imperial",
            UnitSystem::Si => "si",
        }
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "imperial" | "imp" => Ok(UnitSystem::Imperial),
            "si" | "metric" => Ok(UnitSystem::Si),
            other => Err(format!(
                "unit system `{other}` not recognized; options are: imperial, si"
            )),
        }
    }
}

/// Fixed atmospheric state shared by a constraint study.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    /// Air density (kg/m³).
    pub density: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
}

impl Atmosphere {
    pub fn new(density: f64, gravity: f64) -> Self {
        Self { density, gravity }
    }

    /// Dynamic pressure ½ρV² at the given true airspeed.
    #[inline]
    pub fn dynamic_pressure(&self, speed: f64) -> f64 {
        0.5 * self.density * speed * speed
    }
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            density: constants::RHO_SEA_LEVEL,
            gravity: constants::G0,
        }
    }
}

/// Evenly spaced samples from `start` to `end` inclusive.
///
/// Returns an empty vector for zero samples and `[start]` for one.
pub fn linspace(start: f64, end: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
