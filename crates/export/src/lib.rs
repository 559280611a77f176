//! Export helpers for CSV and JSON artifacts consumed by external plotting.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.6}")).unwrap_or_default()
}

pub mod constraint {
    use std::io::{self, Write};

    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use sizing_aero::AeroEstimates;
    use sizing_constraint::{ConstraintDiagram, DesignPoint, Regime, ScalarRequirement};

    use super::optional;

    pub const HEADER: &str = "wing_loading,sustained_turn,cruise,climb,takeoff";

    const CURVE_COLUMNS: [Regime; 4] = [
        Regime::SustainedTurn,
        Regime::Cruise,
        Regime::Climb,
        Regime::Takeoff,
    ];

    /// Write the diagram as one row per wing-loading sample; undetermined regimes stay blank.
    pub fn write_diagram(writer: &mut dyn Write, diagram: &ConstraintDiagram) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)?;
        let curves: Vec<Option<&[f64]>> = CURVE_COLUMNS
            .iter()
            .map(|regime| diagram.curve(*regime).map(|c| c.values.as_slice()))
            .collect();
        for (i, ws) in diagram.wing_loading().iter().enumerate() {
            write!(writer, "{ws:.6}")?;
            for curve in &curves {
                write!(writer, ",{}", optional(curve.map(|c| c[i])))?;
            }
            writeln!(writer)?;
        }
        writer.flush()
    }

    /// Named design point in a diagram summary.
    #[derive(Debug, Clone, Serialize)]
    pub struct NamedOptimum {
        pub first: String,
        pub second: String,
        pub point: DesignPoint,
    }

    #[derive(Serialize)]
    struct DiagramSummary<'a> {
        study: &'a str,
        aspect_ratio: f64,
        oswald_efficiency: f64,
        induced_drag_factor: f64,
        cd0: f64,
        propulsive_efficiency: f64,
        min_wing_loading: f64,
        max_wing_loading: f64,
        samples: usize,
        determined: Vec<&'static str>,
        stall: Option<ScalarRequirement>,
        max_range: Option<ScalarRequirement>,
        turn_thrust_floor: Option<f64>,
        #[serde(flatten)]
        estimates: &'a AeroEstimates,
        optima: &'a [NamedOptimum],
    }

    /// Write a JSON summary of the diagram state, the aero estimates, and any optima found.
    pub fn write_summary(
        writer: &mut dyn Write,
        study: &str,
        diagram: &ConstraintDiagram,
        estimates: &AeroEstimates,
        optima: &[NamedOptimum],
    ) -> io::Result<()> {
        let aero = diagram.aero();
        let summary = DiagramSummary {
            study,
            aspect_ratio: aero.aspect_ratio(),
            oswald_efficiency: aero.oswald_efficiency(),
            induced_drag_factor: aero.induced_drag_factor(),
            cd0: aero.cd0(),
            propulsive_efficiency: aero.propulsive_efficiency(),
            min_wing_loading: diagram.sweep().min(),
            max_wing_loading: diagram.sweep().max(),
            samples: diagram.sweep().len(),
            determined: diagram.curves().map(|(regime, _)| regime.name()).collect(),
            stall: diagram.stall().copied(),
            max_range: diagram.max_range().copied(),
            turn_thrust_floor: diagram.turn_thrust_floor(),
            estimates,
            optima,
        };
        to_writer_pretty(&mut *writer, &summary)?;
        writeln!(writer)?;
        writer.flush()
    }
}

pub mod weight {
    use std::io::{self, Write};

    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use sizing_weight::sweep::RangeRow;
    use sizing_weight::{FuelFractionBreakdown, RangeStudy, WeightSolveResult};

    use super::optional;

    pub const RANGE_HEADER: &str = "range,gross_weight,error";

    /// Write one row per range sample. Failed samples have a blank weight and their error.
    pub fn write_range_study(writer: &mut dyn Write, study: &RangeStudy) -> io::Result<()> {
        writeln!(writer, "{}", RANGE_HEADER)?;
        for sample in &study.samples {
            let row = RangeRow::from(sample);
            let error = row.error.unwrap_or_default().replace([',', '\n'], ";");
            writeln!(
                writer,
                "{:.6},{},{}",
                row.range,
                optional(row.gross_weight),
                error
            )?;
        }
        writer.flush()
    }

    #[derive(Serialize)]
    struct WeightSummary<'a> {
        study: &'a str,
        fuel_weight: f64,
        empty_weight: f64,
        #[serde(flatten)]
        result: &'a WeightSolveResult,
        segment_fractions: &'a [f64],
        range_sweep: Option<Vec<RangeRow>>,
    }

    /// Write a JSON summary of a gross-weight solve and an optional range study.
    pub fn write_summary(
        writer: &mut dyn Write,
        study: &str,
        result: &WeightSolveResult,
        breakdown: &FuelFractionBreakdown,
        range_study: Option<&RangeStudy>,
    ) -> io::Result<()> {
        let summary = WeightSummary {
            study,
            fuel_weight: result.fuel_weight(),
            empty_weight: result.empty_weight(),
            result,
            segment_fractions: &breakdown.segment_fractions,
            range_sweep: range_study.map(|s| s.samples.iter().map(RangeRow::from).collect()),
        };
        to_writer_pretty(&mut *writer, &summary)?;
        writeln!(writer)?;
        writer.flush()
    }
}
