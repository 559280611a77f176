//! Gross takeoff weight estimate by the fuel-fraction method.

use serde::Serialize;
use sizing_core::constants::FOOT_POUNDS_PER_SECOND_PER_BHP;
use sizing_core::{UnitSystem, units};
use tracing::info;

use crate::mission::{FuelFractionBreakdown, MissionLeg, MissionProfile};
use crate::solver::{self, SolverSettings};
use crate::tables::{
    EmptyWeightCategory, LiftToDragCategory, Propulsion, PropulsionFamily, Segment,
};
use crate::{WeightError, require};

/// De-rating applied to L/Dmax for the segment flown off the optimum.
const OFF_DESIGN_LD_FACTOR: f64 = 0.866;

/// Geometry and fixed weights of the concept being sized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Airframe {
    pub aspect_ratio: f64,
    /// Wetted area over reference wing area, Swet/Sref.
    pub wetted_area_ratio: f64,
    pub crew_weight: f64,
    pub payload_weight: f64,
}

impl Airframe {
    pub fn fixed_weight(&self) -> f64 {
        self.crew_weight + self.payload_weight
    }
}

/// Converged gross-weight estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightSolveResult {
    pub units: UnitSystem,
    pub gross_weight: f64,
    /// Wf/W0 including reserves.
    pub fuel_fraction: f64,
    /// Product of the segment weight fractions.
    pub mission_weight_fraction: f64,
    /// We/W0 at the converged gross weight.
    pub empty_weight_fraction: f64,
    pub iterations: usize,
}

impl WeightSolveResult {
    pub fn fuel_weight(&self) -> f64 {
        self.fuel_fraction * self.gross_weight
    }

    pub fn empty_weight(&self) -> f64 {
        self.empty_weight_fraction * self.gross_weight
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightEstimator {
    airframe: Airframe,
    units: UnitSystem,
    empty_weight: Option<EmptyWeightCategory>,
    lift_to_drag: Option<LiftToDragCategory>,
    propulsion: Option<Propulsion>,
    settings: SolverSettings,
}

impl WeightEstimator {
    pub fn new(airframe: Airframe) -> Result<Self, WeightError> {
        require(
            "aspect ratio",
            airframe.aspect_ratio,
            airframe.aspect_ratio > 0.0,
            "positive",
        )?;
        require(
            "wetted area ratio",
            airframe.wetted_area_ratio,
            airframe.wetted_area_ratio > 0.0,
            "positive",
        )?;
        require(
            "crew weight",
            airframe.crew_weight,
            airframe.crew_weight >= 0.0,
            "non-negative",
        )?;
        require(
            "payload weight",
            airframe.payload_weight,
            airframe.payload_weight >= 0.0,
            "non-negative",
        )?;
        require(
            "crew plus payload weight",
            airframe.fixed_weight(),
            airframe.fixed_weight() > 0.0,
            "positive",
        )?;
        Ok(Self {
            airframe,
            units: UnitSystem::default(),
            empty_weight: None,
            lift_to_drag: None,
            propulsion: None,
            settings: SolverSettings::default(),
        })
    }

    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }

    pub fn with_solver_settings(mut self, settings: SolverSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn airframe(&self) -> &Airframe {
        &self.airframe
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn set_units(&mut self, units: UnitSystem) {
        self.units = units;
    }

    pub fn propulsion(&self) -> Option<Propulsion> {
        self.propulsion
    }

    pub fn classification(&self) -> Option<(EmptyWeightCategory, LiftToDragCategory)> {
        self.empty_weight.zip(self.lift_to_drag)
    }

    pub fn classify(&mut self, empty_weight: EmptyWeightCategory, lift_to_drag: LiftToDragCategory) {
        self.empty_weight = Some(empty_weight);
        self.lift_to_drag = Some(lift_to_drag);
    }

    /// `classify` by category names; nothing changes unless both names are recognized.
    pub fn classify_by_name(&mut self, empty_weight: &str, lift_to_drag: &str) -> Result<(), WeightError> {
        let empty_weight: EmptyWeightCategory = empty_weight.parse()?;
        let lift_to_drag: LiftToDragCategory = lift_to_drag.parse()?;
        self.classify(empty_weight, lift_to_drag);
        Ok(())
    }

    pub fn set_propulsion(&mut self, propulsion: Propulsion) {
        self.propulsion = Some(propulsion);
    }

    pub fn set_propulsion_by_name(&mut self, propulsion: &str) -> Result<(), WeightError> {
        self.set_propulsion(propulsion.parse()?);
        Ok(())
    }

    /// We/W0 = a·W0^C for the classified aircraft type.
    pub fn empty_weight_fraction(&self, gross_weight: f64) -> Result<f64, WeightError> {
        let category = self.empty_weight.ok_or(WeightError::AircraftTypeUndefined)?;
        let correlation = category.correlation();
        Ok(correlation.a(self.units) * gross_weight.powf(correlation.exponent))
    }

    /// Specific fuel consumption in the tabulated per-hour (imperial) or mg-based (SI) scale.
    pub fn specific_fuel_consumption(&self, segment: Segment, speed: f64) -> Result<f64, WeightError> {
        let propulsion = self.propulsion.ok_or(WeightError::PropulsionUndefined)?;
        let tabulated = propulsion.tabulated_consumption(segment, self.units);
        Ok(match propulsion.family() {
            PropulsionFamily::Jet => tabulated,
            PropulsionFamily::Prop => {
                require("propeller segment speed", speed, speed > 0.0, "positive")?;
                let eta_p = propulsion.propeller_efficiency(segment);
                match self.units {
                    UnitSystem::Imperial => {
                        tabulated * speed / (FOOT_POUNDS_PER_SECOND_PER_BHP * eta_p)
                    }
                    UnitSystem::Si => tabulated * speed / eta_p,
                }
            }
        })
    }

    /// Segment lift-to-drag ratio from the K_LD wetted-aspect-ratio estimate.
    ///
    /// Props cruise at L/Dmax and loiter at 0.866·L/Dmax; jets the other way round.
    pub fn lift_to_drag(
        &self,
        aspect_ratio: f64,
        wetted_area_ratio: f64,
        segment: Segment,
    ) -> Result<f64, WeightError> {
        let propulsion = self.propulsion.ok_or(WeightError::PropulsionUndefined)?;
        let category = self.lift_to_drag.ok_or(WeightError::LiftToDragTypeUndefined)?;
        let ld_max = category.k_ld() * (aspect_ratio / wetted_area_ratio).sqrt();
        let at_max = match propulsion.family() {
            PropulsionFamily::Prop => segment == Segment::Cruise,
            PropulsionFamily::Jet => segment == Segment::Loiter,
        };
        Ok(if at_max {
            ld_max
        } else {
            OFF_DESIGN_LD_FACTOR * ld_max
        })
    }

    /// Breguet range fraction Wi/Wi-1 = exp(−R·C/(V·L/D)).
    pub fn segment_weight_fraction_cruise(
        &self,
        range: f64,
        speed: f64,
        aspect_ratio: f64,
        wetted_area_ratio: f64,
    ) -> Result<f64, WeightError> {
        require("cruise range", range, range >= 0.0, "non-negative")?;
        require("cruise speed", speed, speed > 0.0, "positive")?;
        let sfc = self.specific_fuel_consumption(Segment::Cruise, speed)?;
        let c = self.units.fuel_consumption_per_second(sfc);
        let ld = self.lift_to_drag(aspect_ratio, wetted_area_ratio, Segment::Cruise)?;
        let distance = self.units.range_to_length(range);
        Ok((-(distance * c) / (speed * ld)).exp())
    }

    /// Breguet endurance fraction Wi/Wi-1 = exp(−E·C/(L/D)), endurance in hours.
    pub fn segment_weight_fraction_loiter(
        &self,
        endurance_hours: f64,
        speed: f64,
        aspect_ratio: f64,
        wetted_area_ratio: f64,
    ) -> Result<f64, WeightError> {
        require(
            "loiter endurance",
            endurance_hours,
            endurance_hours >= 0.0,
            "non-negative",
        )?;
        require("loiter speed", speed, speed >= 0.0, "non-negative")?;
        let sfc = self.specific_fuel_consumption(Segment::Loiter, speed)?;
        let c = self.units.fuel_consumption_per_second(sfc);
        let ld = self.lift_to_drag(aspect_ratio, wetted_area_ratio, Segment::Loiter)?;
        let seconds = units::hours_to_seconds(endurance_hours);
        Ok((-(seconds * c) / ld).exp())
    }

    /// Fuel fraction Wf/W0 of the profile, with takeoff, climb, and landing fractions added
    /// around the legs and the reserve factor applied.
    pub fn mission_fuel_fraction(
        &self,
        profile: &MissionProfile,
    ) -> Result<FuelFractionBreakdown, WeightError> {
        if self.propulsion.is_none() {
            return Err(WeightError::PropulsionUndefined);
        }
        let ar = self.airframe.aspect_ratio;
        let swet = self.airframe.wetted_area_ratio;

        let legs = profile
            .legs
            .iter()
            .map(|leg| match *leg {
                MissionLeg::Cruise { range, speed } => {
                    self.segment_weight_fraction_cruise(range, speed, ar, swet)
                }
                MissionLeg::Loiter {
                    endurance_hours,
                    speed,
                } => self.segment_weight_fraction_loiter(endurance_hours, speed, ar, swet),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FuelFractionBreakdown::from_legs(legs))
    }

    /// Solve W0 = (W_crew + W_payload)/(1 − Wf/W0 − We/W0(W0)).
    pub fn solve_gross_weight(
        &self,
        profile: &MissionProfile,
    ) -> Result<WeightSolveResult, WeightError> {
        let category = self.empty_weight.ok_or(WeightError::AircraftTypeUndefined)?;
        let breakdown = self.mission_fuel_fraction(profile)?;
        let fuel_fraction = breakdown.fuel_fraction;
        if fuel_fraction >= 1.0 {
            return Err(WeightError::Infeasible { fuel_fraction });
        }

        let correlation = category.correlation();
        let a = correlation.a(self.units);
        let empty_fraction = |w0: f64| a * w0.powf(correlation.exponent);
        let fixed = self.airframe.fixed_weight();

        let solution = solver::solve(
            |w0| solver::weight_residual(fixed, fuel_fraction, empty_fraction(w0), w0),
            fixed,
            fuel_fraction,
            &self.settings,
        )?;

        let empty_weight_fraction = empty_fraction(solution.gross_weight);

        info!(
            gross_weight = solution.gross_weight,
            fuel_fraction,
            empty_weight_fraction,
            iterations = solution.iterations,
            units = self.units.label(),
            "solved gross takeoff weight"
        );

        Ok(WeightSolveResult {
            units: self.units,
            gross_weight: solution.gross_weight,
            fuel_fraction,
            mission_weight_fraction: breakdown.mission_weight_fraction,
            empty_weight_fraction,
            iterations: solution.iterations,
        })
    }
}
