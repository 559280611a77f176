//! Flight regimes, constraint names, and takeoff surfaces.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::ConstraintError;

/// Regimes that produce a power-loading curve over the wing-loading sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Regime {
    SustainedTurn,
    Cruise,
    Climb,
    Takeoff,
    Landing,
}

impl Regime {
    pub fn name(self) -> &'static str {
        match self {
            Regime::SustainedTurn => "sustained turn",
            Regime::Cruise => "cruise",
            Regime::Climb => "climb",
            Regime::Takeoff => "takeoff",
            Regime::Landing => "landing",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Requirements that can be paired in an optimum search: four curves and two scalar
/// wing-loading limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Constraint {
    SustainedTurn,
    Cruise,
    Climb,
    Takeoff,
    Stall,
    MaxRange,
}

impl Constraint {
    pub const ALL: [Constraint; 6] = [
        Constraint::SustainedTurn,
        Constraint::Cruise,
        Constraint::Climb,
        Constraint::Takeoff,
        Constraint::Stall,
        Constraint::MaxRange,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Constraint::SustainedTurn => "sustained turn",
            Constraint::Cruise => "cruise speed",
            Constraint::Climb => "climb rate",
            Constraint::Takeoff => "ground roll",
            Constraint::Stall => "stall",
            Constraint::MaxRange => "max range",
        }
    }

    /// Curve regime backing this constraint, if any.
    pub fn regime(self) -> Option<Regime> {
        match self {
            Constraint::SustainedTurn => Some(Regime::SustainedTurn),
            Constraint::Cruise => Some(Regime::Cruise),
            Constraint::Climb => Some(Regime::Climb),
            Constraint::Takeoff => Some(Regime::Takeoff),
            Constraint::Stall | Constraint::MaxRange => None,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Constraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match key.as_str() {
            "sustained turn" | "turn" => Ok(Constraint::SustainedTurn),
            "cruise speed" | "cruise" => Ok(Constraint::Cruise),
            "climb rate" | "climb" => Ok(Constraint::Climb),
            "ground roll" | "takeoff" => Ok(Constraint::Takeoff),
            "stall" => Ok(Constraint::Stall),
            "max range" => Ok(Constraint::MaxRange),
            _ => Err(ConstraintError::UnknownConstraint {
                name: s.to_string(),
                options: join_names(Constraint::ALL.iter().map(|c| c.name())),
            }),
        }
    }
}

/// Runway surfaces with tabulated rolling-friction coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RunwaySurface {
    DryConcrete,
    WetConcrete,
    IcyConcrete,
    HardTurf,
    FirmDirt,
    SoftTurf,
    WetGrass,
}

impl RunwaySurface {
    pub const ALL: [RunwaySurface; 7] = [
        RunwaySurface::DryConcrete,
        RunwaySurface::WetConcrete,
        RunwaySurface::IcyConcrete,
        RunwaySurface::HardTurf,
        RunwaySurface::FirmDirt,
        RunwaySurface::SoftTurf,
        RunwaySurface::WetGrass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RunwaySurface::DryConcrete => "dry concrete",
            RunwaySurface::WetConcrete => "wet concrete",
            RunwaySurface::IcyConcrete => "icy concrete",
            RunwaySurface::HardTurf => "hard turf",
            RunwaySurface::FirmDirt => "firm dirt",
            RunwaySurface::SoftTurf => "soft turf",
            RunwaySurface::WetGrass => "wet grass",
        }
    }

    /// Ground-roll friction coefficient μ.
    pub fn friction_coefficient(self) -> f64 {
        match self {
            RunwaySurface::DryConcrete => 0.04,
            RunwaySurface::WetConcrete => 0.05,
            RunwaySurface::IcyConcrete => 0.02,
            RunwaySurface::HardTurf => 0.05,
            RunwaySurface::FirmDirt => 0.04,
            RunwaySurface::SoftTurf => 0.07,
            RunwaySurface::WetGrass => 0.08,
        }
    }
}

impl fmt::Display for RunwaySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RunwaySurface {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        RunwaySurface::ALL
            .into_iter()
            .find(|surface| surface.name() == key)
            .ok_or_else(|| ConstraintError::UnknownSurface {
                name: s.to_string(),
                options: join_names(RunwaySurface::ALL.iter().map(|r| r.name())),
            })
    }
}

/// Takeoff ground-roll requirement inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TakeoffInputs {
    /// Maximum ground roll (m).
    pub ground_roll: f64,
    pub surface: RunwaySurface,
    /// Lift coefficient during the roll, high-lift devices deployed.
    pub cl_takeoff: f64,
    /// Drag coefficient during the roll, high-lift devices deployed.
    pub cd_takeoff: f64,
    pub cl_max: f64,
}

/// Inputs a curve was computed from, kept so the curve can be rebuilt on a new sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum RegimeInputs {
    SustainedTurn { load_factor: f64, speed: f64 },
    Cruise { speed: f64 },
    Climb { climb_rate: f64, climb_speed: f64 },
    Takeoff(TakeoffInputs),
}

impl RegimeInputs {
    pub fn regime(&self) -> Regime {
        match self {
            RegimeInputs::SustainedTurn { .. } => Regime::SustainedTurn,
            RegimeInputs::Cruise { .. } => Regime::Cruise,
            RegimeInputs::Climb { .. } => Regime::Climb,
            RegimeInputs::Takeoff(_) => Regime::Takeoff,
        }
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}
