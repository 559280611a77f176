//! Mission profiles: ordered cruise and loiter legs between the fixed takeoff/climb
//! prologue and the landing epilogue.

use serde::{Deserialize, Serialize};

/// Warm-up and takeoff weight fraction.
pub const TAKEOFF_FRACTION: f64 = 0.97;
/// Climb weight fraction.
pub const CLIMB_FRACTION: f64 = 0.985;
/// Landing weight fraction.
pub const LANDING_FRACTION: f64 = 0.995;
/// Reserve and trapped fuel allowance applied to the burned fraction.
pub const RESERVE_FACTOR: f64 = 1.06;

/// One mission leg. Ranges are NM (imperial) or km (SI); speeds ft/s or m/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MissionLeg {
    Cruise { range: f64, speed: f64 },
    Loiter { endurance_hours: f64, speed: f64 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionProfile {
    pub legs: Vec<MissionLeg>,
}

impl MissionProfile {
    pub fn new(legs: Vec<MissionLeg>) -> Self {
        Self { legs }
    }

    pub fn cruise(mut self, range: f64, speed: f64) -> Self {
        self.legs.push(MissionLeg::Cruise { range, speed });
        self
    }

    pub fn loiter(mut self, endurance_hours: f64, speed: f64) -> Self {
        self.legs.push(MissionLeg::Loiter {
            endurance_hours,
            speed,
        });
        self
    }

    /// Copy of the profile with every cruise range set to `range`. Loiter legs, speeds,
    /// and leg order are untouched.
    pub fn with_cruise_range(&self, range: f64) -> Self {
        let legs = self
            .legs
            .iter()
            .map(|leg| match *leg {
                MissionLeg::Cruise { speed, .. } => MissionLeg::Cruise { range, speed },
                loiter => loiter,
            })
            .collect();
        Self { legs }
    }

    pub fn has_cruise(&self) -> bool {
        self.legs
            .iter()
            .any(|leg| matches!(leg, MissionLeg::Cruise { .. }))
    }
}

/// Per-segment weight fractions of one mission evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelFractionBreakdown {
    /// Wi/Wi-1 in flight order, prologue and epilogue included.
    pub segment_fractions: Vec<f64>,
    /// Product of all segment fractions, W_final/W0.
    pub mission_weight_fraction: f64,
    /// Wf/W0 with reserves.
    pub fuel_fraction: f64,
}

impl FuelFractionBreakdown {
    pub(crate) fn from_legs(leg_fractions: Vec<f64>) -> Self {
        let mut segment_fractions = Vec::with_capacity(leg_fractions.len() + 3);
        segment_fractions.push(TAKEOFF_FRACTION);
        segment_fractions.push(CLIMB_FRACTION);
        segment_fractions.extend(leg_fractions);
        segment_fractions.push(LANDING_FRACTION);

        let mission_weight_fraction: f64 = segment_fractions.iter().product();
        Self {
            segment_fractions,
            mission_weight_fraction,
            fuel_fraction: RESERVE_FACTOR * (1.0 - mission_weight_fraction),
        }
    }
}
