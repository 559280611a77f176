//! Conversion of study manifests into engines, and the study runners used by the CLIs.

use std::path::Path;

use sizing_aero::{
    AeroError, AeroEstimates, AircraftAeroConfig, CoefficientTable, FuselageSpillover,
    LiftSlopeInputs, PolarEstimate, oswald_efficiency, wing_lift_curve_slope,
};
use sizing_config::{
    ConfigError, ConstraintStudyConfig, LiftSlopeConfig, MissionLegConfig, SolverConfig,
    StudyConfig, WeightStudyConfig,
};
use sizing_constraint::{
    ConstraintDiagram, ConstraintError, TakeoffInputs, WingLoadingSweep,
};
use sizing_core::{Atmosphere, UnitSystem, constants};
use sizing_export::constraint::NamedOptimum;
use sizing_weight::{
    Airframe, DEFAULT_RANGE_SAMPLES, FuelFractionBreakdown, MissionLeg, MissionProfile,
    RangeStudy, SolverSettings, WeightError, WeightEstimator, WeightSolveResult, range_study,
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StudyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Aero(#[from] AeroError),
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
    #[error(transparent)]
    Weight(#[from] WeightError),
    #[error("{0}")]
    Units(String),
    #[error("study `{study}` has no [{section}] table")]
    MissingSection {
        study: String,
        section: &'static str,
    },
    #[error("constraint study needs either `oswald_efficiency` or a [constraint.planform] table")]
    MissingOswald,
    #[error("constraint study needs either `cd0` or `cd0_table`")]
    MissingDragEstimate,
}

/// Constraint diagram with every configured requirement evaluated.
#[derive(Debug, Clone)]
pub struct ConstraintStudy {
    pub diagram: ConstraintDiagram,
    pub optima: Vec<NamedOptimum>,
    pub estimates: AeroEstimates,
}

/// Weight estimate of a study's mission, with the optional range sweep.
#[derive(Debug, Clone)]
pub struct WeightStudy {
    pub result: WeightSolveResult,
    pub breakdown: FuelFractionBreakdown,
    pub range_study: Option<RangeStudy>,
}

pub fn load_study<P: AsRef<Path>>(path: P) -> Result<StudyConfig, StudyError> {
    Ok(sizing_config::load_study(path)?)
}

/// Aero configuration of a constraint study; the Oswald efficiency is estimated from the
/// planform and CD0 read off the coefficient table when not given.
pub fn aero_from_config(config: &ConstraintStudyConfig) -> Result<AircraftAeroConfig, StudyError> {
    let polar = polar_from_config(config)?;
    build_aero(config, polar.as_ref())
}

/// Polar figures of the study's coefficient table, if it names one.
pub fn polar_from_config(
    config: &ConstraintStudyConfig,
) -> Result<Option<PolarEstimate>, StudyError> {
    let Some(path) = &config.cd0_table else {
        return Ok(None);
    };
    let polar = CoefficientTable::from_path(path)?.polar_estimate()?;
    info!(
        table = %path.display(),
        cd0 = polar.zero_lift_drag,
        max_lift_to_drag = polar.max_lift_to_drag,
        "read coefficient table"
    );
    Ok(Some(polar))
}

/// Wing lift-curve slope for a `[constraint.lift_slope]` table.
pub fn lift_curve_slope_from_config(
    aspect_ratio: f64,
    config: &LiftSlopeConfig,
) -> Result<f64, StudyError> {
    let spillover = if config.fuselage_spillover {
        FuselageSpillover::requested(config.fuselage_diameter, config.span)?
    } else {
        FuselageSpillover::Ignored
    };
    Ok(wing_lift_curve_slope(&LiftSlopeInputs {
        aspect_ratio,
        max_thickness_sweep_deg: config.max_thickness_sweep_deg,
        mach: config.mach,
        airfoil_lift_slope: config.airfoil_lift_slope,
        exposed_area: config.exposed_area,
        reference_area: config.reference_area,
        spillover,
    })?)
}

fn build_aero(
    config: &ConstraintStudyConfig,
    polar: Option<&PolarEstimate>,
) -> Result<AircraftAeroConfig, StudyError> {
    let cd0 = match (config.cd0, polar) {
        (Some(cd0), _) => cd0,
        (None, Some(polar)) => polar.zero_lift_drag,
        (None, None) => return Err(StudyError::MissingDragEstimate),
    };
    let e = match (config.oswald_efficiency, config.planform) {
        (Some(e), _) => e,
        (None, Some(planform)) => oswald_efficiency(
            config.aspect_ratio,
            planform.taper_ratio,
            planform.quarter_chord_sweep_deg,
        ),
        (None, None) => return Err(StudyError::MissingOswald),
    };
    Ok(AircraftAeroConfig::new(
        config.aspect_ratio,
        e,
        cd0,
        config.propeller_efficiency,
    )?)
}

pub fn run_constraint_study(config: &ConstraintStudyConfig) -> Result<ConstraintStudy, StudyError> {
    let polar = polar_from_config(config)?;
    let aero = build_aero(config, polar.as_ref())?;
    let lift_curve_slope = config
        .lift_slope
        .as_ref()
        .map(|lift| lift_curve_slope_from_config(config.aspect_ratio, lift))
        .transpose()?;
    let atmosphere = Atmosphere::new(
        config.density.unwrap_or(constants::RHO_SEA_LEVEL),
        config.gravity.unwrap_or(constants::G0),
    );
    let sweep = WingLoadingSweep::linear(
        config.wing_loading.min,
        config.wing_loading.max,
        config.wing_loading.samples,
    )?;
    let mut diagram = ConstraintDiagram::new(aero, atmosphere, sweep)?;

    if let Some(turn) = config.sustained_turn {
        diagram.sustained_turn(turn.load_factor, turn.speed)?;
    }
    if let Some(cruise) = config.cruise {
        diagram.cruise(cruise.speed)?;
    }
    if let Some(climb) = config.climb {
        diagram.climb(climb.climb_rate, climb.climb_speed)?;
    }
    if let Some(takeoff) = &config.takeoff {
        diagram.takeoff(TakeoffInputs {
            ground_roll: takeoff.ground_roll,
            surface: takeoff.surface.parse()?,
            cl_takeoff: takeoff.cl_takeoff,
            cd_takeoff: takeoff.cd_takeoff,
            cl_max: takeoff.cl_max,
        })?;
    }
    if let Some(stall) = config.stall {
        diagram.stall_requirement(stall.stall_speed, stall.cl_max)?;
    }
    if let Some(max_range) = config.max_range {
        diagram.max_range_requirement(max_range.cruise_speed)?;
    }

    let optima = config
        .optimum
        .iter()
        .map(|pair| -> Result<NamedOptimum, StudyError> {
            let point = diagram.find_optimum_by_name(&pair.first, &pair.second)?;
            Ok(NamedOptimum {
                first: pair.first.clone(),
                second: pair.second.clone(),
                point,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ConstraintStudy {
        diagram,
        optima,
        estimates: AeroEstimates {
            lift_curve_slope,
            polar,
        },
    })
}

pub fn mission_from_config(legs: &[MissionLegConfig]) -> MissionProfile {
    MissionProfile::new(
        legs.iter()
            .map(|leg| match *leg {
                MissionLegConfig::Cruise { range, speed } => MissionLeg::Cruise { range, speed },
                MissionLegConfig::Loiter {
                    endurance_hours,
                    speed,
                } => MissionLeg::Loiter {
                    endurance_hours,
                    speed,
                },
            })
            .collect(),
    )
}

pub fn solver_settings(config: Option<SolverConfig>) -> SolverSettings {
    let defaults = SolverSettings::default();
    let Some(config) = config else {
        return defaults;
    };
    SolverSettings {
        initial_guess: config.initial_guess.unwrap_or(defaults.initial_guess),
        absolute_tolerance: config
            .absolute_tolerance
            .unwrap_or(defaults.absolute_tolerance),
        relative_tolerance: config
            .relative_tolerance
            .unwrap_or(defaults.relative_tolerance),
        max_iterations: config.max_iterations.unwrap_or(defaults.max_iterations),
        max_bracket_expansions: config
            .max_bracket_expansions
            .unwrap_or(defaults.max_bracket_expansions),
    }
}

/// Fully classified estimator for a weight study.
pub fn estimator_from_config(config: &WeightStudyConfig) -> Result<WeightEstimator, StudyError> {
    let units: UnitSystem = match &config.units {
        Some(name) => name.parse().map_err(StudyError::Units)?,
        None => UnitSystem::default(),
    };
    let mut estimator = WeightEstimator::new(Airframe {
        aspect_ratio: config.aspect_ratio,
        wetted_area_ratio: config.wetted_area_ratio,
        crew_weight: config.crew_weight,
        payload_weight: config.payload_weight,
    })?
    .with_units(units)
    .with_solver_settings(solver_settings(config.solver));
    estimator.classify_by_name(&config.empty_weight_category, &config.lift_to_drag_category)?;
    estimator.set_propulsion_by_name(&config.propulsion)?;
    Ok(estimator)
}

pub fn run_weight_study(config: &WeightStudyConfig) -> Result<WeightStudy, StudyError> {
    let estimator = estimator_from_config(config)?;
    let profile = mission_from_config(&config.mission);
    let breakdown = estimator.mission_fuel_fraction(&profile)?;
    let result = estimator.solve_gross_weight(&profile)?;

    let sweep_study = match config.range_sweep {
        Some(sweep) => Some(range_study(
            &estimator,
            &profile,
            sweep.low,
            sweep.high,
            sweep.samples.unwrap_or(DEFAULT_RANGE_SAMPLES),
        )?),
        None => None,
    };
    info!(
        gross_weight = result.gross_weight,
        sweep_samples = sweep_study.as_ref().map(|s| s.samples.len()).unwrap_or(0),
        "weight study complete"
    );

    Ok(WeightStudy {
        result,
        breakdown,
        range_study: sweep_study,
    })
}

/// Constraint table of a study, or an error naming the missing table.
pub fn constraint_section(study: &StudyConfig) -> Result<&ConstraintStudyConfig, StudyError> {
    study
        .constraint
        .as_ref()
        .ok_or_else(|| StudyError::MissingSection {
            study: study.name.clone(),
            section: "constraint",
        })
}

/// Weight table of a study, or an error naming the missing table.
pub fn weight_section(study: &StudyConfig) -> Result<&WeightStudyConfig, StudyError> {
    study
        .weight
        .as_ref()
        .ok_or_else(|| StudyError::MissingSection {
            study: study.name.clone(),
            section: "weight",
        })
}
