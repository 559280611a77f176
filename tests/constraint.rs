use classical_sizing::aero::{AircraftAeroConfig, oswald_efficiency};
use classical_sizing::constraint::optimum::{intersect_curves, snap_to_limit};
use classical_sizing::constraint::{
    Constraint, ConstraintDiagram, ConstraintError, Regime, RunwaySurface, TakeoffInputs,
    WingLoadingSweep,
};
use classical_sizing::physics::Atmosphere;

fn reference_aero() -> AircraftAeroConfig {
    let e = oswald_efficiency(7.0, 0.5, 0.0);
    AircraftAeroConfig::new(7.0, e, 0.02, 0.8).expect("aero")
}

fn diagram(min: f64, max: f64, samples: usize) -> ConstraintDiagram {
    let sweep = WingLoadingSweep::linear(min, max, samples).expect("sweep");
    ConstraintDiagram::new(reference_aero(), Atmosphere::default(), sweep).expect("diagram")
}

fn dry_takeoff() -> TakeoffInputs {
    TakeoffInputs {
        ground_roll: 30.0,
        surface: RunwaySurface::DryConcrete,
        cl_takeoff: 0.8,
        cd_takeoff: 0.05,
        cl_max: 1.4,
    }
}

#[test]
fn cruise_power_loading_matches_closed_form() {
    let mut d = diagram(10.0, 90.0, 9);
    let curve = d.cruise(60.0).expect("cruise").to_vec();

    // WS = 50 is the fifth sample of 10..90 in steps of 10.
    assert_eq!(d.wing_loading()[4], 50.0);
    let expected = 66.519_710_515_822_94;
    assert!(
        ((curve[4] - expected) / expected).abs() < 1e-6,
        "P/W = {}",
        curve[4]
    );

    let k = d.aero().induced_drag_factor();
    assert!((k - 0.058_869_088_541_857_94).abs() < 1e-12);
}

#[test]
fn turn_climb_and_takeoff_follow_their_formulas() {
    let mut d = diagram(20.0, 120.0, 6);
    let k = d.aero().induced_drag_factor();
    let ws = d.wing_loading().to_vec();

    let turn = d.sustained_turn(2.0, 25.0).expect("turn").to_vec();
    let q = 0.5 * 1.23 * 25.0 * 25.0;
    for (w, p) in ws.iter().zip(&turn) {
        let tw = q * 0.02 / w + w * k * 4.0 / q;
        assert!((p - tw / 0.8 * 25.0).abs() < 1e-9);
    }
    let floor = d.turn_thrust_floor().expect("floor");
    assert!((floor - 4.0 * (0.02 * k).sqrt()).abs() < 1e-12);

    let climb = d.climb(5.0, 20.0).expect("climb").to_vec();
    let q = 0.5 * 1.23 * 400.0;
    for (w, p) in ws.iter().zip(&climb) {
        let tw = 5.0 / 20.0 + q * 0.02 / w + k * w / q;
        assert!((p - tw / 0.8 * 20.0).abs() < 1e-9);
    }

    let takeoff = d.takeoff(dry_takeoff()).expect("takeoff").to_vec();
    for (w, p) in ws.iter().zip(&takeoff) {
        let v_lof = 1.1 * (2.0 * w / (1.23 * 1.4)).sqrt();
        let q = 0.5 * 1.23 * v_lof * v_lof;
        let tw = v_lof * v_lof / (2.0 * 9.807 * 30.0)
            + q * 0.05 / w
            + 0.04 * (1.0 - q * 0.8 / w);
        let expected = tw / 0.8 * v_lof * 2.0_f64.sqrt();
        assert!((p - expected).abs() < 1e-9);
    }
}

#[test]
fn each_surface_uses_its_friction_coefficient() {
    let table = [
        ("dry concrete", 0.04),
        ("wet concrete", 0.05),
        ("icy concrete", 0.02),
        ("hard turf", 0.05),
        ("firm dirt", 0.04),
        ("soft turf", 0.07),
        ("wet grass", 0.08),
    ];
    let mut baseline = diagram(20.0, 120.0, 5);
    let reference = baseline.takeoff(dry_takeoff()).expect("takeoff").to_vec();
    let ws = baseline.wing_loading().to_vec();

    for (name, mu) in table {
        let surface: RunwaySurface = name.parse().expect("surface");
        assert_eq!(surface.friction_coefficient(), mu, "{name}");

        let mut d = diagram(20.0, 120.0, 5);
        let curve = d
            .takeoff_on(30.0, name, 0.8, 0.05, 1.4)
            .expect("takeoff")
            .to_vec();
        // Only the friction term differs from the dry-concrete curve.
        for ((p, r), w) in curve.iter().zip(&reference).zip(&ws) {
            let v_lof = 1.1 * (2.0 * w / (1.23 * 1.4)).sqrt();
            let q = 0.5 * 1.23 * v_lof * v_lof;
            let delta = (mu - 0.04) * (1.0 - q * 0.8 / w) / 0.8 * v_lof * 2.0_f64.sqrt();
            assert!((p - r - delta).abs() < 1e-9, "{name}");
        }
    }

    let mut d = diagram(20.0, 120.0, 5);
    let err = d
        .takeoff_on(30.0, "lunar regolith", 0.8, 0.05, 1.4)
        .expect_err("unknown surface");
    match err {
        ConstraintError::UnknownSurface { name, options } => {
            assert_eq!(name, "lunar regolith");
            assert!(options.contains("wet grass"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(d.curve(Regime::Takeoff).is_none());
}

#[test]
fn stall_extends_sweep_and_rebuilds_curves() {
    let mut d = diagram(10.0, 150.0, 100);
    d.cruise(60.0).expect("cruise");
    d.climb(5.0, 20.0).expect("climb");
    let revision = d.sweep().revision();

    let ws_stall = d.stall_requirement(15.0, 1.4).expect("stall");
    assert!((ws_stall - 0.5 * 1.23 * 225.0 * 1.4).abs() < 1e-9);

    let sweep = d.sweep();
    assert_eq!(sweep.len(), 100);
    assert_eq!(sweep.min(), 10.0);
    assert_eq!(sweep.max(), ws_stall);
    assert!(sweep.revision() > revision);
    assert!(sweep.values().windows(2).all(|w| w[1] > w[0]));

    for (_, curve) in d.curves() {
        assert_eq!(curve.values.len(), d.wing_loading().len());
        assert_eq!(curve.sweep_revision, d.sweep().revision());
    }

    // A limit below the current maximum leaves the sweep untouched.
    let revision = d.sweep().revision();
    d.stall_requirement(5.0, 1.0).expect("low stall");
    assert_eq!(d.sweep().revision(), revision);
    assert_eq!(d.sweep().max(), ws_stall);
}

#[test]
fn max_range_limit_and_extension() {
    let mut d = diagram(10.0, 150.0, 50);
    d.cruise(30.0).expect("cruise");
    let k = d.aero().induced_drag_factor();
    let ws = d.max_range_requirement(30.0).expect("max range");
    let expected = 0.5 * 1.23 * 900.0 * (0.02 / k).sqrt();
    assert!((ws - expected).abs() < 1e-9);
    assert_eq!(d.sweep().max(), ws);
    assert_eq!(d.curve(Regime::Cruise).expect("cruise").values.len(), 50);
}

#[test]
fn replacing_sweep_recomputes_stored_curves() {
    let mut d = diagram(10.0, 90.0, 9);
    d.cruise(60.0).expect("cruise");
    d.set_wing_loading_sweep(vec![25.0, 50.0, 75.0]).expect("sweep");

    let curve = d.curve(Regime::Cruise).expect("cruise");
    assert_eq!(curve.values.len(), 3);
    let expected = 66.519_710_515_822_94;
    assert!(((curve.values[1] - expected) / expected).abs() < 1e-6);

    assert_eq!(
        d.set_wing_loading_sweep(vec![]),
        Err(ConstraintError::SweepTooShort(0))
    );
    assert_eq!(
        d.set_wing_loading_sweep(vec![10.0, -5.0]),
        Err(ConstraintError::SweepNonPositive(-5.0))
    );
    assert_eq!(
        d.set_wing_loading_sweep(vec![10.0, 30.0, 20.0]),
        Err(ConstraintError::SweepNotAscending { index: 2 })
    );
    assert_eq!(d.wing_loading(), &[25.0, 50.0, 75.0]);
}

#[test]
fn changing_aero_refreshes_curves_and_limits() {
    let mut d = diagram(10.0, 400.0, 40);
    d.cruise(60.0).expect("cruise");
    let ws_range = d.max_range_requirement(30.0).expect("range");
    let before = d.curve(Regime::Cruise).expect("cruise").values.clone();

    let higher_ar = AircraftAeroConfig::new(10.0, 0.8, 0.02, 0.8).expect("aero");
    d.set_aero(higher_ar);
    let after = &d.curve(Regime::Cruise).expect("cruise").values;
    assert_ne!(&before, after);

    let k = higher_ar.induced_drag_factor();
    let q = 0.5 * 1.23 * 3600.0;
    let w = d.wing_loading()[10];
    let expected = (q * 0.02 / w + k * w / q) / 0.8 * 60.0;
    assert!((after[10] - expected).abs() < 1e-9);

    let refreshed = d.max_range().expect("range").wing_loading();
    assert!(refreshed > ws_range);
}

#[test]
fn intersecting_synthetic_curves() {
    let ws = [10.0, 20.0, 30.0, 40.0, 50.0];
    let rising = [1.0, 2.0, 3.0, 4.0, 5.0];
    let falling = [5.0, 4.2, 3.2, 2.0, 1.0];
    let point = intersect_curves(&ws, &rising, &falling).expect("aligned curves");
    assert_eq!(point.sweep_index, 2);
    assert_eq!(point.wing_loading, 30.0);
    assert!((point.power_loading - 3.1).abs() < 1e-12);

    let snapped = snap_to_limit(&ws, &rising, 33.0).expect("aligned curve");
    assert_eq!(snapped.wing_loading, 33.0);
    assert_eq!(snapped.sweep_index, 2);
    assert_eq!(snapped.power_loading, 3.0);
}

#[test]
fn mismatched_or_empty_curves_have_no_intersection() {
    let ws = [10.0, 20.0, 30.0];
    assert_eq!(intersect_curves(&ws, &[1.0, 2.0], &[3.0, 2.0, 1.0]), None);
    assert_eq!(intersect_curves(&ws, &[1.0, 2.0, 3.0], &[3.0, 2.0]), None);
    assert_eq!(intersect_curves(&[], &[], &[]), None);
    assert_eq!(snap_to_limit(&ws, &[1.0, 2.0], 20.0), None);
    assert_eq!(snap_to_limit(&[], &[], 20.0), None);
}

#[test]
fn find_optimum_between_curves_and_limits() {
    let mut d = diagram(10.0, 150.0, 200);
    let cruise = d.cruise(60.0).expect("cruise").to_vec();
    let takeoff = d.takeoff(dry_takeoff()).expect("takeoff").to_vec();

    let point = d
        .find_optimum(Constraint::Cruise, Constraint::Takeoff)
        .expect("optimum");
    let gaps: Vec<f64> = cruise.iter().zip(&takeoff).map(|(a, b)| (a - b).abs()).collect();
    let best = gaps
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .expect("non-empty");
    assert_eq!(point.sweep_index, best);
    assert_eq!(point.wing_loading, d.wing_loading()[best]);
    assert!((point.power_loading - 0.5 * (cruise[best] + takeoff[best])).abs() < 1e-12);

    let ws_stall = d.stall_requirement(12.0, 1.4).expect("stall");
    let by_name = d.find_optimum_by_name("climb", "stall");
    assert!(matches!(
        by_name,
        Err(ConstraintError::Undetermined(Constraint::Climb))
    ));

    let snapped = d.find_optimum_by_name("cruise speed", "stall").expect("snap");
    assert_eq!(snapped.wing_loading, ws_stall);
    let cruise_now = &d.curve(Regime::Cruise).expect("cruise").values;
    assert_eq!(snapped.power_loading, cruise_now[d.sweep().nearest_index(ws_stall)]);

    d.max_range_requirement(30.0).expect("range");
    assert_eq!(
        d.find_optimum(Constraint::Stall, Constraint::MaxRange),
        Err(ConstraintError::NoIntersection(
            Constraint::Stall,
            Constraint::MaxRange
        ))
    );
}

#[test]
fn undetermined_and_unknown_constraints_are_errors() {
    let d = diagram(10.0, 150.0, 20);
    let err = d
        .find_optimum(Constraint::SustainedTurn, Constraint::Cruise)
        .expect_err("undetermined");
    assert_eq!(
        err.to_string(),
        "constraint undetermined, please perform the sustained turn calculation first"
    );

    match d.find_optimum_by_name("barrel roll", "cruise") {
        Err(ConstraintError::UnknownConstraint { name, options }) => {
            assert_eq!(name, "barrel roll");
            assert!(options.contains("ground roll"));
            assert!(options.contains("max range"));
        }
        other => panic!("unexpected {other:?}"),
    }

    assert_eq!(
        "ground_roll".parse::<Constraint>(),
        Ok(Constraint::Takeoff)
    );
    assert_eq!("Max-Range".parse::<Constraint>(), Ok(Constraint::MaxRange));
}

#[test]
fn landing_is_not_implemented_and_inputs_are_validated() {
    let mut d = diagram(10.0, 150.0, 20);
    assert_eq!(d.landing(), Err(ConstraintError::NotImplemented("landing")));
    assert!(matches!(
        d.cruise(0.0),
        Err(ConstraintError::NonPositive { .. })
    ));
    assert!(matches!(
        d.sustained_turn(-1.0, 20.0),
        Err(ConstraintError::NonPositive { .. })
    ));
    assert!(d.curves().next().is_none());
    assert!(WingLoadingSweep::linear(10.0, 20.0, 1).is_err());
}

#[test]
fn non_physical_atmosphere_is_rejected() {
    let sweep = WingLoadingSweep::linear(10.0, 50.0, 5).expect("sweep");
    for (density, gravity) in [(0.0, 9.807), (-1.23, 9.807), (f64::NAN, 9.807), (1.23, 0.0)] {
        let err = ConstraintDiagram::new(
            reference_aero(),
            Atmosphere::new(density, gravity),
            sweep.clone(),
        )
        .expect_err("non-physical atmosphere");
        assert!(
            matches!(err, ConstraintError::NonPositive { .. }),
            "density {density}, gravity {gravity}: {err}"
        );
    }

    let thin = ConstraintDiagram::new(reference_aero(), Atmosphere::new(0.9, 9.807), sweep)
        .expect("thin air");
    assert_eq!(thin.atmosphere().density, 0.9);
}
