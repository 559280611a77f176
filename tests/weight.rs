use classical_sizing::physics::UnitSystem;
use classical_sizing::weight::solver::{Residual, SolverSettings, solve, weight_residual};
use classical_sizing::weight::{
    Airframe, EmptyWeightCategory, LiftToDragCategory, MissionLeg, MissionProfile, Propulsion,
    Segment, WeightError, WeightEstimator, range_study,
};

const CARGO_BOMBER_SPEED: f64 = 596.9;

fn cargo_bomber() -> WeightEstimator {
    let mut estimator = WeightEstimator::new(Airframe {
        aspect_ratio: 7.0,
        wetted_area_ratio: 5.5,
        crew_weight: 800.0,
        payload_weight: 10_000.0,
    })
    .expect("airframe");
    estimator
        .classify_by_name("Military Cargo-Bomber", "military jets")
        .expect("classify");
    estimator
        .set_propulsion_by_name("high-bypass turbofan")
        .expect("propulsion");
    estimator
}

fn cargo_bomber_mission(range: f64) -> MissionProfile {
    MissionProfile::default()
        .cruise(range, CARGO_BOMBER_SPEED)
        .loiter(3.0, CARGO_BOMBER_SPEED)
        .cruise(range, CARGO_BOMBER_SPEED)
        .loiter(0.3333, CARGO_BOMBER_SPEED)
}

fn light_single() -> WeightEstimator {
    let mut estimator = WeightEstimator::new(Airframe {
        aspect_ratio: 7.5,
        wetted_area_ratio: 4.0,
        crew_weight: 200.0,
        payload_weight: 400.0,
    })
    .expect("airframe");
    estimator.classify(
        EmptyWeightCategory::GaMetalSingle,
        LiftToDragCategory::FixedGearPropeller,
    );
    estimator.set_propulsion(Propulsion::PistonPropFixedPitch);
    estimator
}

#[test]
fn empty_legs_leave_only_fixed_segments() {
    let estimator = cargo_bomber();
    let profile = MissionProfile::default()
        .cruise(0.0, CARGO_BOMBER_SPEED)
        .loiter(0.0, CARGO_BOMBER_SPEED);
    let breakdown = estimator.mission_fuel_fraction(&profile).expect("fuel fraction");
    let expected = 1.06 * (1.0 - 0.97 * 0.985 * 0.995);
    assert!((breakdown.fuel_fraction - expected).abs() < 1e-12);
    assert_eq!(
        breakdown.segment_fractions,
        vec![0.97, 0.985, 1.0, 1.0, 0.995]
    );

    let none = estimator
        .mission_fuel_fraction(&MissionProfile::default())
        .expect("empty profile");
    assert!((none.fuel_fraction - expected).abs() < 1e-12);
}

#[test]
fn cargo_bomber_converges_to_its_own_fixed_point() {
    let estimator = cargo_bomber();
    let profile = cargo_bomber_mission(1500.0);

    let result = estimator.solve_gross_weight(&profile).expect("solve");
    assert!((result.fuel_fraction - 0.380_796_074_412_487_4).abs() < 1e-9);
    assert!(
        ((result.gross_weight - 66_639.426_69) / 66_639.426_69).abs() < 1e-6,
        "W0 = {}",
        result.gross_weight
    );

    let we = 0.737 * result.gross_weight.powf(-0.043);
    assert!((result.empty_weight_fraction - we).abs() < 1e-12);
    let recomputed = 10_800.0 / (1.0 - result.fuel_fraction - we);
    assert!((recomputed - result.gross_weight).abs() < 1e-3);
    assert!(result.iterations > 0);
    assert_eq!(result.units, UnitSystem::Imperial);
    assert!((result.fuel_weight() - result.fuel_fraction * result.gross_weight).abs() < 1e-9);
}

#[test]
fn excessive_fuel_fraction_is_infeasible() {
    let estimator = cargo_bomber();
    let profile = cargo_bomber_mission(20_000.0);
    match estimator.solve_gross_weight(&profile) {
        Err(WeightError::Infeasible { fuel_fraction }) => assert!(fuel_fraction > 1.0),
        other => panic!("expected infeasible, got {other:?}"),
    }
}

#[test]
fn propeller_rules_for_lift_to_drag_and_consumption() {
    let estimator = light_single();
    let ld_max = 9.0 * (7.5_f64 / 4.0).sqrt();

    let cruise = estimator.lift_to_drag(7.5, 4.0, Segment::Cruise).expect("L/D");
    let loiter = estimator.lift_to_drag(7.5, 4.0, Segment::Loiter).expect("L/D");
    assert!((cruise - ld_max).abs() < 1e-12);
    assert!((loiter - 0.866 * ld_max).abs() < 1e-12);

    let c_cruise = estimator
        .specific_fuel_consumption(Segment::Cruise, 220.0)
        .expect("sfc");
    let c_loiter = estimator
        .specific_fuel_consumption(Segment::Loiter, 150.0)
        .expect("sfc");
    assert!((c_cruise - 0.4 * 220.0 / (550.0 * 0.8)).abs() < 1e-12);
    // Fixed-pitch propellers loiter at 0.7 efficiency.
    assert!((c_loiter - 0.5 * 150.0 / (550.0 * 0.7)).abs() < 1e-12);

    let profile = MissionProfile::default().cruise(800.0, 220.0).loiter(0.75, 150.0);
    let breakdown = estimator.mission_fuel_fraction(&profile).expect("fuel");
    assert!((breakdown.fuel_fraction - 0.160_225_114_053_705_2).abs() < 1e-9);

    let result = estimator.solve_gross_weight(&profile).expect("solve");
    assert!((result.gross_weight - 2_664.738_607).abs() < 1e-3);
}

#[test]
fn jets_cruise_off_the_lift_to_drag_peak() {
    let estimator = cargo_bomber();
    let ld_max = 14.0 * (7.0_f64 / 5.5).sqrt();
    let cruise = estimator.lift_to_drag(7.0, 5.5, Segment::Cruise).expect("L/D");
    let loiter = estimator.lift_to_drag(7.0, 5.5, Segment::Loiter).expect("L/D");
    assert!((cruise - 0.866 * ld_max).abs() < 1e-12);
    assert!((loiter - ld_max).abs() < 1e-12);
    assert_eq!(
        estimator
            .specific_fuel_consumption(Segment::Cruise, 1.0)
            .expect("sfc"),
        0.5
    );
}

#[test]
fn si_ranges_are_kilometres() {
    let estimator = cargo_bomber().with_units(UnitSystem::Si);
    let fraction = estimator
        .segment_weight_fraction_cruise(1000.0, 250.0, 7.0, 5.5)
        .expect("segment");
    assert!((fraction - 0.999_587_735_477_096_2).abs() < 1e-12);

    let loiter = estimator
        .segment_weight_fraction_loiter(1.0, 250.0, 7.0, 5.5)
        .expect("segment");
    let ld_max = 14.0 * (7.0_f64 / 5.5).sqrt();
    assert!((loiter - (-3600.0 * 11.3e-7 / ld_max).exp()).abs() < 1e-12);
}

#[test]
fn empty_weight_fraction_uses_unit_specific_coefficient() {
    let mut estimator = cargo_bomber();
    let imperial = estimator.empty_weight_fraction(50_000.0).expect("We/W0");
    assert!((imperial - 0.737 * 50_000.0_f64.powf(-0.043)).abs() < 1e-12);

    estimator.set_units(UnitSystem::Si);
    let si = estimator.empty_weight_fraction(50_000.0).expect("We/W0");
    assert!((si - 0.712 * 50_000.0_f64.powf(-0.043)).abs() < 1e-12);
}

#[test]
fn prerequisites_are_reported() {
    let airframe = Airframe {
        aspect_ratio: 7.0,
        wetted_area_ratio: 5.5,
        crew_weight: 800.0,
        payload_weight: 10_000.0,
    };
    let mut estimator = WeightEstimator::new(airframe).expect("airframe");
    assert_eq!(
        estimator.empty_weight_fraction(10_000.0),
        Err(WeightError::AircraftTypeUndefined)
    );
    assert_eq!(
        estimator.specific_fuel_consumption(Segment::Cruise, 500.0),
        Err(WeightError::PropulsionUndefined)
    );
    assert_eq!(
        estimator.mission_fuel_fraction(&cargo_bomber_mission(100.0)),
        Err(WeightError::PropulsionUndefined)
    );

    estimator.set_propulsion(Propulsion::Turbojet);
    assert_eq!(
        estimator.lift_to_drag(7.0, 5.5, Segment::Cruise),
        Err(WeightError::LiftToDragTypeUndefined)
    );
    assert_eq!(
        estimator.solve_gross_weight(&cargo_bomber_mission(100.0)),
        Err(WeightError::AircraftTypeUndefined)
    );
}

#[test]
fn unknown_names_list_the_options() {
    let mut estimator = cargo_bomber();
    match estimator.classify_by_name("Zeppelin", "civil jets") {
        Err(WeightError::UnknownName { kind, name, options }) => {
            assert_eq!(kind, "aircraft type");
            assert_eq!(name, "Zeppelin");
            assert!(options.contains("Jet Fighter"));
        }
        other => panic!("unexpected {other:?}"),
    }
    // A failed classification leaves the previous one in place.
    assert_eq!(
        estimator.classification(),
        Some((
            EmptyWeightCategory::MilitaryCargoBomber,
            LiftToDragCategory::MilitaryJets
        ))
    );

    assert!(matches!(
        estimator.set_propulsion_by_name("ramjet"),
        Err(WeightError::UnknownName { kind: "propulsion", .. })
    ));
    assert_eq!(estimator.propulsion(), Some(Propulsion::HighBypassTurbofan));

    assert_eq!(
        "JET TRANSPORT".parse::<EmptyWeightCategory>(),
        Ok(EmptyWeightCategory::JetTransport)
    );
}

#[test]
fn invalid_airframe_and_legs_are_rejected() {
    assert!(matches!(
        WeightEstimator::new(Airframe {
            aspect_ratio: 0.0,
            wetted_area_ratio: 5.5,
            crew_weight: 800.0,
            payload_weight: 0.0,
        }),
        Err(WeightError::InvalidInput { name: "aspect ratio", .. })
    ));
    assert!(WeightEstimator::new(Airframe {
        aspect_ratio: 7.0,
        wetted_area_ratio: 5.5,
        crew_weight: 0.0,
        payload_weight: 0.0,
    })
    .is_err());

    let estimator = cargo_bomber();
    let negative = MissionProfile::new(vec![MissionLeg::Cruise {
        range: -10.0,
        speed: 500.0,
    }]);
    assert!(matches!(
        estimator.mission_fuel_fraction(&negative),
        Err(WeightError::InvalidInput { .. })
    ));
    let stalled = MissionProfile::default().cruise(100.0, 0.0);
    assert!(estimator.solve_gross_weight(&stalled).is_err());
}

#[test]
fn residual_flags_infeasible_trials() {
    assert_eq!(weight_residual(1000.0, 0.6, 0.5, 5000.0), Residual::Infeasible);
    assert_eq!(
        weight_residual(1000.0, 0.25, 0.25, 1500.0),
        Residual::Feasible(500.0)
    );

    // W = 1000 / 0.5 has its root at 2000, above the initial guess.
    let settings = SolverSettings {
        initial_guess: 500.0,
        ..SolverSettings::default()
    };
    let solution = solve(
        |w| weight_residual(1000.0, 0.25, 0.25, w),
        100.0,
        0.2,
        &settings,
    )
    .expect("solve");
    assert!((solution.gross_weight - 2000.0).abs() < 1e-5);

    let capped = SolverSettings {
        max_bracket_expansions: 3,
        ..SolverSettings::default()
    };
    assert!(matches!(
        solve(|_| Residual::Infeasible, 100.0, 0.9, &capped),
        Err(WeightError::NoFeasibleBracket { .. })
    ));
}

#[test]
fn range_study_keeps_order_and_reports_failures() {
    let estimator = cargo_bomber();
    let template = cargo_bomber_mission(1500.0);

    let study = range_study(&estimator, &template, 500.0, 2000.0, 4).expect("study");
    assert_eq!(study.ranges(), vec![500.0, 1000.0, 1500.0, 2000.0]);
    let weights: Vec<f64> = study
        .gross_weights()
        .into_iter()
        .map(|w| w.expect("converged"))
        .collect();
    let expected = [35_361.110_22, 47_126.872_87, 66_639.426_69, 103_843.151_5];
    for (w, e) in weights.iter().zip(expected) {
        assert!(((w - e) / e).abs() < 1e-6, "W0 = {w}, expected {e}");
    }
    assert!(study.all_converged());

    let stretched = range_study(&estimator, &template, 500.0, 20_000.0, 3).expect("study");
    let weights = stretched.gross_weights();
    assert!(weights[0].is_some());
    assert!(weights[2].is_none());
    let failures: Vec<f64> = stretched.failures().map(|(range, _)| range).collect();
    assert!(failures.contains(&20_000.0));
    assert!(!stretched.all_converged());

    // The template itself is never modified.
    assert_eq!(template, cargo_bomber_mission(1500.0));
}

#[test]
fn range_study_rejects_bad_bounds() {
    let estimator = cargo_bomber();
    let template = cargo_bomber_mission(1500.0);
    assert!(matches!(
        range_study(&estimator, &template, 500.0, 100.0, 5),
        Err(WeightError::InvalidSweep(_))
    ));
    assert!(matches!(
        range_study(&estimator, &template, 500.0, 1000.0, 0),
        Err(WeightError::InvalidSweep(_))
    ));
    let loiter_only = MissionProfile::default().loiter(1.0, 500.0);
    assert!(matches!(
        range_study(&estimator, &loiter_only, 500.0, 1000.0, 3),
        Err(WeightError::InvalidSweep(_))
    ));
}

#[test]
fn cruise_range_override_preserves_loiter_legs() {
    let profile = cargo_bomber_mission(1500.0).with_cruise_range(900.0);
    assert_eq!(
        profile.legs,
        vec![
            MissionLeg::Cruise { range: 900.0, speed: CARGO_BOMBER_SPEED },
            MissionLeg::Loiter { endurance_hours: 3.0, speed: CARGO_BOMBER_SPEED },
            MissionLeg::Cruise { range: 900.0, speed: CARGO_BOMBER_SPEED },
            MissionLeg::Loiter { endurance_hours: 0.3333, speed: CARGO_BOMBER_SPEED },
        ]
    );
}
