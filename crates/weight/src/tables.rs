//! Statistical correlation tables keyed by aircraft category and propulsion type.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use sizing_core::UnitSystem;

use crate::WeightError;

/// Empty-weight power law We/W0 = a·W0^exponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmptyWeightCorrelation {
    pub a_imperial: f64,
    pub a_si: f64,
    /// Shared by both unit systems.
    pub exponent: f64,
}

impl EmptyWeightCorrelation {
    pub fn a(&self, units: UnitSystem) -> f64 {
        match units {
            UnitSystem::Imperial => self.a_imperial,
            UnitSystem::Si => self.a_si,
        }
    }
}

macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = WeightError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| WeightError::UnknownName {
                        kind: $label,
                        name: s.to_string(),
                        options: $name::ALL
                            .iter()
                            .map(|v| v.name())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

named_enum! {
    /// Empty-weight regression family.
    EmptyWeightCategory, "aircraft type" {
        GaMetalSingle => "GA-Metal-Single",
        GaMetalPistonTwin => "GA-Metal-PistonTwin",
        GaComposite => "GA-Composite",
        HomebuiltMetal => "Homebuilt-Metal",
        HomebuiltComposite => "Homebuilt-Composite",
        TurbopropTransport => "Turboprop Transport",
        JetTransport => "Jet Transport",
        BusinessJet => "Business Jet",
        MilitaryCargoBomber => "Military Cargo-Bomber",
        JetFighter => "Jet Fighter",
        JetTrainer => "Jet Trainer",
        SailplaneUnpowered => "Sailplane-Unpowered",
        SailplanePowered => "Sailplane-Powered",
        Ultralight => "Ultralight",
        Agricultural => "Agricultural",
        Aerobatic => "Aerobatic",
        FlyingBoat => "Flying Boat",
        UavJet => "UAV-Jet",
        UavProp => "UAV-Prop",
    }
}

impl EmptyWeightCategory {
    pub fn correlation(self) -> EmptyWeightCorrelation {
        use EmptyWeightCategory::*;
        let (a_imperial, a_si, exponent) = match self {
            GaMetalSingle => (1.250, 1.164, -0.090),
            GaMetalPistonTwin => (1.289, 1.210, -0.080),
            GaComposite => (0.878, 0.844, -0.050),
            HomebuiltMetal => (1.08, 1.015, -0.078),
            HomebuiltComposite => (0.766, 0.736, -0.05),
            TurbopropTransport => (0.975, 0.937, -0.05),
            JetTransport => (1.272, 1.202, -0.072),
            BusinessJet => (0.777, 0.761, -0.027),
            MilitaryCargoBomber => (0.737, 0.712, -0.043),
            JetFighter => (2.392, 2.158, -0.130),
            JetTrainer => (2.432, 2.160, -0.150),
            SailplaneUnpowered => (0.827, 0.795, -0.05),
            SailplanePowered => (0.876, 0.842, -0.05),
            Ultralight => (0.7, 0.673, -0.05),
            Agricultural => (1.205, 1.122, -0.09),
            Aerobatic => (0.783, 0.769, -0.023),
            FlyingBoat => (1.092, 1.050, -0.05),
            UavJet => (0.612, 0.589, -0.05),
            UavProp => (0.804, 0.767, -0.06),
        };
        EmptyWeightCorrelation {
            a_imperial,
            a_si,
            exponent,
        }
    }
}

named_enum! {
    /// Family used for the K_LD maximum lift-to-drag estimate.
    LiftToDragCategory, "L/D type" {
        CivilJets => "civil jets",
        MilitaryJets => "military jets",
        RetractableGearPropeller => "retractable landing gear propeller",
        FixedGearPropeller => "fixed landing gear propeller",
        HighAspectRatio => "high aspect ratio aircraft",
        Sailplanes => "sailplanes",
    }
}

impl LiftToDragCategory {
    /// K_LD in L/Dmax = K_LD·sqrt(AR / (Swet/Sref)).
    pub fn k_ld(self) -> f64 {
        match self {
            LiftToDragCategory::CivilJets => 15.5,
            LiftToDragCategory::MilitaryJets => 14.0,
            LiftToDragCategory::RetractableGearPropeller => 11.0,
            LiftToDragCategory::FixedGearPropeller => 9.0,
            LiftToDragCategory::HighAspectRatio => 13.0,
            LiftToDragCategory::Sailplanes => 15.0,
        }
    }
}

named_enum! {
    Propulsion, "propulsion" {
        Turbojet => "turbojet",
        LowBypassTurbofan => "low-bypass turbofan",
        HighBypassTurbofan => "high-bypass turbofan",
        PistonPropFixedPitch => "piston-prop fixed-pitch",
        PistonPropVariablePitch => "piston-prop variable-pitch",
        Turboprop => "turboprop",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PropulsionFamily {
    Jet,
    Prop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Segment {
    Cruise,
    Loiter,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Segment::Cruise => "cruise",
            Segment::Loiter => "loiter",
        })
    }
}

impl Propulsion {
    pub fn family(self) -> PropulsionFamily {
        match self {
            Propulsion::Turbojet | Propulsion::LowBypassTurbofan | Propulsion::HighBypassTurbofan => {
                PropulsionFamily::Jet
            }
            Propulsion::PistonPropFixedPitch
            | Propulsion::PistonPropVariablePitch
            | Propulsion::Turboprop => PropulsionFamily::Prop,
        }
    }

    /// Tabulated fuel consumption for the segment.
    ///
    /// Jets: thrust-specific, 1/hr (imperial) or mg/(N·s) (SI).
    /// Props: brake-specific, lb/hr/bhp (imperial) or mg/(W·s) (SI).
    pub fn tabulated_consumption(self, segment: Segment, units: UnitSystem) -> f64 {
        use Propulsion::*;
        let (cruise_imp, cruise_si, loiter_imp, loiter_si) = match self {
            Turbojet => (0.9, 25.5, 0.8, 22.7),
            LowBypassTurbofan => (0.8, 22.7, 0.7, 19.8),
            HighBypassTurbofan => (0.5, 14.1, 0.4, 11.3),
            PistonPropFixedPitch | PistonPropVariablePitch => (0.4, 0.068, 0.5, 0.085),
            Turboprop => (0.5, 0.085, 0.6, 0.101),
        };
        match (segment, units) {
            (Segment::Cruise, UnitSystem::Imperial) => cruise_imp,
            (Segment::Cruise, UnitSystem::Si) => cruise_si,
            (Segment::Loiter, UnitSystem::Imperial) => loiter_imp,
            (Segment::Loiter, UnitSystem::Si) => loiter_si,
        }
    }

    /// Propeller efficiency assumed when converting brake-specific consumption.
    pub fn propeller_efficiency(self, segment: Segment) -> f64 {
        match (self, segment) {
            (Propulsion::PistonPropFixedPitch, Segment::Loiter) => 0.7,
            _ => 0.8,
        }
    }
}
