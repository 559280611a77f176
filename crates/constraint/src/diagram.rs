//! The constraint diagram: per-regime power-loading curves on a shared wing-loading sweep.
//!
//! Every curve keeps the inputs it was computed from. Whenever the sweep or the aero
//! configuration changes, scalar limits are re-evaluated first (they may stretch the sweep)
//! and then every stored curve is rebuilt, so curves always align 1:1 with the sweep.

use std::collections::BTreeMap;
use std::f64::consts::SQRT_2;

use serde::Serialize;
use sizing_aero::AircraftAeroConfig;
use sizing_core::Atmosphere;
use tracing::{debug, info};

use crate::optimum::{self, DesignPoint};
use crate::regime::{Constraint, Regime, RegimeInputs, RunwaySurface, TakeoffInputs};
use crate::sweep::WingLoadingSweep;
use crate::{ConstraintError, require_positive};

/// Power loading (W/kg) for each sample of the sweep revision it was built on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerLoadingCurve {
    pub inputs: RegimeInputs,
    pub sweep_revision: u64,
    pub values: Vec<f64>,
}

/// A wing-loading limit that does not depend on the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ScalarRequirement {
    Stall {
        stall_speed: f64,
        cl_max: f64,
        wing_loading: f64,
    },
    MaxRange {
        cruise_speed: f64,
        wing_loading: f64,
    },
}

impl ScalarRequirement {
    pub fn wing_loading(&self) -> f64 {
        match self {
            ScalarRequirement::Stall { wing_loading, .. }
            | ScalarRequirement::MaxRange { wing_loading, .. } => *wing_loading,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConstraintDiagram {
    aero: AircraftAeroConfig,
    atmosphere: Atmosphere,
    sweep: WingLoadingSweep,
    curves: BTreeMap<Regime, PowerLoadingCurve>,
    stall: Option<ScalarRequirement>,
    max_range: Option<ScalarRequirement>,
    turn_thrust_floor: Option<f64>,
}

impl ConstraintDiagram {
    /// Fails when the atmosphere has a non-positive or non-finite density or gravity.
    pub fn new(
        aero: AircraftAeroConfig,
        atmosphere: Atmosphere,
        sweep: WingLoadingSweep,
    ) -> Result<Self, ConstraintError> {
        require_positive("air density", atmosphere.density)?;
        require_positive("gravitational acceleration", atmosphere.gravity)?;
        Ok(Self {
            aero,
            atmosphere,
            sweep,
            curves: BTreeMap::new(),
            stall: None,
            max_range: None,
            turn_thrust_floor: None,
        })
    }

    pub fn aero(&self) -> &AircraftAeroConfig {
        &self.aero
    }

    pub fn atmosphere(&self) -> &Atmosphere {
        &self.atmosphere
    }

    pub fn sweep(&self) -> &WingLoadingSweep {
        &self.sweep
    }

    pub fn wing_loading(&self) -> &[f64] {
        self.sweep.values()
    }

    pub fn curve(&self, regime: Regime) -> Option<&PowerLoadingCurve> {
        self.curves.get(&regime)
    }

    pub fn curves(&self) -> impl Iterator<Item = (Regime, &PowerLoadingCurve)> {
        self.curves.iter().map(|(r, c)| (*r, c))
    }

    pub fn stall(&self) -> Option<&ScalarRequirement> {
        self.stall.as_ref()
    }

    pub fn max_range(&self) -> Option<&ScalarRequirement> {
        self.max_range.as_ref()
    }

    /// Loading-independent minimum thrust-to-weight of the last sustained-turn request,
    /// 2·n·sqrt(CD0·k), kept for reference-line display.
    pub fn turn_thrust_floor(&self) -> Option<f64> {
        self.turn_thrust_floor
    }

    /// Replace the sweep and rebuild every stored requirement on it.
    pub fn set_wing_loading_sweep(&mut self, values: Vec<f64>) -> Result<(), ConstraintError> {
        self.sweep.replace(values)?;
        self.refresh();
        Ok(())
    }

    /// Swap the aero configuration and rebuild every stored requirement with the new `k`.
    pub fn set_aero(&mut self, aero: AircraftAeroConfig) {
        self.aero = aero;
        if let Some(RegimeInputs::SustainedTurn { load_factor, .. }) =
            self.curves.get(&Regime::SustainedTurn).map(|c| c.inputs)
        {
            self.turn_thrust_floor = Some(self.turn_floor(load_factor));
        }
        self.refresh();
    }

    pub fn sustained_turn(&mut self, load_factor: f64, speed: f64) -> Result<&[f64], ConstraintError> {
        require_positive("load factor", load_factor)?;
        require_positive("turn speed", speed)?;
        self.turn_thrust_floor = Some(self.turn_floor(load_factor));
        self.store(RegimeInputs::SustainedTurn { load_factor, speed })
    }

    pub fn cruise(&mut self, speed: f64) -> Result<&[f64], ConstraintError> {
        require_positive("cruise speed", speed)?;
        self.store(RegimeInputs::Cruise { speed })
    }

    pub fn climb(&mut self, climb_rate: f64, climb_speed: f64) -> Result<&[f64], ConstraintError> {
        require_positive("climb rate", climb_rate)?;
        require_positive("climb speed", climb_speed)?;
        self.store(RegimeInputs::Climb {
            climb_rate,
            climb_speed,
        })
    }

    pub fn takeoff(&mut self, inputs: TakeoffInputs) -> Result<&[f64], ConstraintError> {
        require_positive("ground roll distance", inputs.ground_roll)?;
        require_positive("maximum lift coefficient", inputs.cl_max)?;
        self.store(RegimeInputs::Takeoff(inputs))
    }

    /// Takeoff requirement with the surface given by name.
    pub fn takeoff_on(
        &mut self,
        ground_roll: f64,
        surface: &str,
        cl_takeoff: f64,
        cd_takeoff: f64,
        cl_max: f64,
    ) -> Result<&[f64], ConstraintError> {
        let surface: RunwaySurface = surface.parse()?;
        self.takeoff(TakeoffInputs {
            ground_roll,
            surface,
            cl_takeoff,
            cd_takeoff,
            cl_max,
        })
    }

    /// Landing requirements are not modelled.
    pub fn landing(&mut self) -> Result<&[f64], ConstraintError> {
        Err(ConstraintError::NotImplemented("landing"))
    }

    /// Stall wing loading ½ρV²·CLmax; stretches the sweep when it lies above the maximum.
    pub fn stall_requirement(&mut self, stall_speed: f64, cl_max: f64) -> Result<f64, ConstraintError> {
        require_positive("stall speed", stall_speed)?;
        require_positive("maximum lift coefficient", cl_max)?;
        let requirement = self.evaluate_stall(stall_speed, cl_max);
        self.stall = Some(requirement);
        if self.sweep.extend_to(requirement.wing_loading()) {
            self.on_sweep_extended("stall");
        }
        Ok(requirement.wing_loading())
    }

    /// Wing loading of best propeller range, q·sqrt(CD0/k); stretches the sweep like stall.
    pub fn max_range_requirement(&mut self, cruise_speed: f64) -> Result<f64, ConstraintError> {
        require_positive("cruise speed", cruise_speed)?;
        let requirement = self.evaluate_max_range(cruise_speed);
        self.max_range = Some(requirement);
        if self.sweep.extend_to(requirement.wing_loading()) {
            self.on_sweep_extended("max range");
        }
        Ok(requirement.wing_loading())
    }

    /// Design point where two requirements meet on the sweep.
    pub fn find_optimum(
        &self,
        first: Constraint,
        second: Constraint,
    ) -> Result<DesignPoint, ConstraintError> {
        let a = self.requirement(first)?;
        let b = self.requirement(second)?;
        let ws = self.sweep.values();

        let point = match (a, b) {
            (Requirement::Limit(_), Requirement::Limit(_)) => {
                return Err(ConstraintError::NoIntersection(first, second));
            }
            (Requirement::Limit(limit), Requirement::Curve(curve))
            | (Requirement::Curve(curve), Requirement::Limit(limit)) => {
                optimum::snap_to_limit(ws, curve, limit)
            }
            (Requirement::Curve(c1), Requirement::Curve(c2)) => {
                optimum::intersect_curves(ws, c1, c2)
            }
        }
        .ok_or(ConstraintError::Misaligned(first, second))?;
        info!(
            %first,
            %second,
            wing_loading = point.wing_loading,
            power_loading = point.power_loading,
            "constraint optimum"
        );
        Ok(point)
    }

    /// `find_optimum` with constraint names.
    pub fn find_optimum_by_name(
        &self,
        first: &str,
        second: &str,
    ) -> Result<DesignPoint, ConstraintError> {
        self.find_optimum(first.parse()?, second.parse()?)
    }

    fn requirement(&self, constraint: Constraint) -> Result<Requirement<'_>, ConstraintError> {
        let found = match constraint.regime() {
            Some(regime) => self
                .curves
                .get(&regime)
                .map(|c| Requirement::Curve(c.values.as_slice())),
            None => match constraint {
                Constraint::Stall => self.stall.map(|s| Requirement::Limit(s.wing_loading())),
                _ => self.max_range.map(|s| Requirement::Limit(s.wing_loading())),
            },
        };
        found.ok_or(ConstraintError::Undetermined(constraint))
    }

    fn store(&mut self, inputs: RegimeInputs) -> Result<&[f64], ConstraintError> {
        let regime = inputs.regime();
        let curve = self.evaluate(inputs);
        debug!(%regime, samples = curve.values.len(), "computed power-loading curve");
        self.curves.insert(regime, curve);
        Ok(&self.curves[&regime].values)
    }

    fn on_sweep_extended(&mut self, cause: &str) {
        info!(
            cause,
            max_wing_loading = self.sweep.max(),
            revision = self.sweep.revision(),
            "extended wing-loading sweep"
        );
        self.rebuild_curves();
    }

    fn refresh(&mut self) {
        if let Some(ScalarRequirement::Stall {
            stall_speed,
            cl_max,
            ..
        }) = self.stall
        {
            let requirement = self.evaluate_stall(stall_speed, cl_max);
            self.stall = Some(requirement);
            self.sweep.extend_to(requirement.wing_loading());
        }
        if let Some(ScalarRequirement::MaxRange { cruise_speed, .. }) = self.max_range {
            let requirement = self.evaluate_max_range(cruise_speed);
            self.max_range = Some(requirement);
            self.sweep.extend_to(requirement.wing_loading());
        }
        self.rebuild_curves();
    }

    fn rebuild_curves(&mut self) {
        let inputs: Vec<RegimeInputs> = self.curves.values().map(|c| c.inputs).collect();
        for input in inputs {
            let curve = self.evaluate(input);
            self.curves.insert(input.regime(), curve);
        }
    }

    fn turn_floor(&self, load_factor: f64) -> f64 {
        2.0 * load_factor * (self.aero.cd0() * self.aero.induced_drag_factor()).sqrt()
    }

    fn evaluate_stall(&self, stall_speed: f64, cl_max: f64) -> ScalarRequirement {
        ScalarRequirement::Stall {
            stall_speed,
            cl_max,
            wing_loading: self.atmosphere.dynamic_pressure(stall_speed) * cl_max,
        }
    }

    fn evaluate_max_range(&self, cruise_speed: f64) -> ScalarRequirement {
        let q = self.atmosphere.dynamic_pressure(cruise_speed);
        ScalarRequirement::MaxRange {
            cruise_speed,
            wing_loading: q * (self.aero.cd0() / self.aero.induced_drag_factor()).sqrt(),
        }
    }

    fn evaluate(&self, inputs: RegimeInputs) -> PowerLoadingCurve {
        let cd0 = self.aero.cd0();
        let k = self.aero.induced_drag_factor();
        let eta_p = self.aero.propulsive_efficiency();
        let rho = self.atmosphere.density;
        let ws = self.sweep.values();

        let values: Vec<f64> = match inputs {
            RegimeInputs::SustainedTurn { load_factor, speed } => {
                let q = self.atmosphere.dynamic_pressure(speed);
                let n2 = load_factor * load_factor;
                ws.iter()
                    .map(|&w| {
                        let tw = q * cd0 / w + w * k * n2 / q;
                        tw / eta_p * speed
                    })
                    .collect()
            }
            RegimeInputs::Cruise { speed } => {
                let q = self.atmosphere.dynamic_pressure(speed);
                ws.iter()
                    .map(|&w| {
                        let tw = q * cd0 / w + k * w / q;
                        tw / eta_p * speed
                    })
                    .collect()
            }
            RegimeInputs::Climb {
                climb_rate,
                climb_speed,
            } => {
                let q = self.atmosphere.dynamic_pressure(climb_speed);
                let gradient = climb_rate / climb_speed;
                ws.iter()
                    .map(|&w| {
                        let tw = gradient + q * cd0 / w + k * w / q;
                        tw / eta_p * climb_speed
                    })
                    .collect()
            }
            RegimeInputs::Takeoff(to) => {
                let mu = to.surface.friction_coefficient();
                let g = self.atmosphere.gravity;
                ws.iter()
                    .map(|&w| {
                        let v_stall = (2.0 * w / (rho * to.cl_max)).sqrt();
                        let v_lof = 1.1 * v_stall;
                        let q = self.atmosphere.dynamic_pressure(v_lof);
                        let acceleration = v_lof * v_lof / (2.0 * g * to.ground_roll);
                        let drag = q * to.cd_takeoff / w;
                        let friction = mu * (1.0 - q * to.cl_takeoff / w);
                        let tw = acceleration + drag + friction;
                        // √2 corrects for the accelerating roll.
                        tw / eta_p * v_lof * SQRT_2
                    })
                    .collect()
            }
        };

        PowerLoadingCurve {
            inputs,
            sweep_revision: self.sweep.revision(),
            values,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Requirement<'a> {
    Curve(&'a [f64]),
    Limit(f64),
}
