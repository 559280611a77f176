use std::fs;

use classical_sizing::aero::AircraftAeroConfig;
use classical_sizing::constraint::{ConstraintDiagram, WingLoadingSweep};
use classical_sizing::export::{self, constraint, weight};
use classical_sizing::physics::Atmosphere;
use classical_sizing::study::{self, run_weight_study, weight_section};

#[test]
fn diagram_csv_leaves_undetermined_regimes_blank() {
    let aero = AircraftAeroConfig::new(7.0, 0.8, 0.02, 0.8).expect("aero");
    let sweep = WingLoadingSweep::linear(10.0, 100.0, 10).expect("sweep");
    let mut diagram =
        ConstraintDiagram::new(aero, Atmosphere::default(), sweep).expect("diagram");
    let cruise = diagram.cruise(60.0).expect("cruise").to_vec();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("diagram.csv");
    {
        let mut writer = export::writer_for_path(&path).expect("writer");
        constraint::write_diagram(&mut *writer, &diagram).expect("write");
    }

    let mut reader = csv::Reader::from_path(&path).expect("reader");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        constraint::HEADER.split(',').collect::<Vec<_>>()
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 10);
    for (row, expected) in rows.iter().zip(&cruise) {
        assert_eq!(&row[1], "");
        let value: f64 = row[2].parse().expect("cruise value");
        assert!((value - expected).abs() < 1e-6);
        assert_eq!(&row[3], "");
        assert_eq!(&row[4], "");
    }
    assert_eq!(&rows[0][0], "10.000000");
}

#[test]
fn diagram_summary_is_valid_json() {
    let config = study::load_study("data/studies/rc_dash.toml").expect("study");
    let outcome = study::run_constraint_study(config.constraint.as_ref().expect("constraint"))
        .expect("constraint study");

    let mut buffer: Vec<u8> = Vec::new();
    constraint::write_summary(
        &mut buffer,
        &config.name,
        &outcome.diagram,
        &outcome.estimates,
        &outcome.optima,
    )
    .expect("summary");
    let json: serde_json::Value = serde_json::from_slice(&buffer).expect("json");

    assert_eq!(json["study"], "RC dash trainer");
    assert_eq!(json["samples"], 100);
    assert_eq!(json["determined"].as_array().expect("determined").len(), 4);
    assert!(json["stall"]["Stall"]["wing_loading"].as_f64().expect("stall") > 150.0);
    assert!(json["max_range"].is_null());
    assert!(json["lift_curve_slope"].is_null());
    assert!(json["polar"].is_null());
    assert_eq!(json["optima"].as_array().expect("optima").len(), 2);
}

#[test]
fn range_sweep_csv_and_weight_summary() {
    let config = study::load_study("data/studies/cargo_bomber.toml").expect("study");
    let outcome = run_weight_study(weight_section(&config).expect("weight")).expect("solve");
    let sweep = outcome.range_study.as_ref().expect("sweep");

    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("range.csv");
    {
        let mut writer = export::writer_for_path(&csv_path).expect("writer");
        weight::write_range_study(&mut *writer, sweep).expect("write");
    }
    let text = fs::read_to_string(&csv_path).expect("read");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(weight::RANGE_HEADER));
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[0].starts_with("500.000000,"));
    assert!(rows.iter().all(|row| row.ends_with(',')));

    let mut buffer: Vec<u8> = Vec::new();
    weight::write_summary(
        &mut buffer,
        &config.name,
        &outcome.result,
        &outcome.breakdown,
        Some(sweep),
    )
    .expect("summary");
    let json: serde_json::Value = serde_json::from_slice(&buffer).expect("json");
    assert_eq!(json["units"], "imperial");
    let w0 = json["gross_weight"].as_f64().expect("gross weight");
    assert!((w0 - outcome.result.gross_weight).abs() < 1e-9);
    let fuel = json["fuel_weight"].as_f64().expect("fuel weight");
    assert!((fuel - outcome.result.fuel_weight()).abs() < 1e-9);
    assert_eq!(json["segment_fractions"].as_array().expect("fractions").len(), 7);
    assert_eq!(json["range_sweep"].as_array().expect("sweep").len(), 4);
    assert!(json["range_sweep"][0]["error"].is_null());
}

#[test]
fn failed_range_samples_export_their_error() {
    use classical_sizing::weight::{Airframe, MissionProfile, WeightEstimator, range_study};

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
    let template = MissionProfile::default().cruise(1000.0, 596.9).cruise(1000.0, 596.9);
    let study = range_study(&estimator, &template, 1000.0, 40_000.0, 2).expect("study");

    let mut buffer: Vec<u8> = Vec::new();
    weight::write_range_study(&mut buffer, &study).expect("write");
    let text = String::from_utf8(buffer).expect("utf8");
    let last = text.lines().last().expect("row");
    assert!(last.starts_with("40000.000000,,"), "{last}");
    assert!(last.contains("leaves no weight"));
}
