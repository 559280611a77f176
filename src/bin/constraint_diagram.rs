use std::path::PathBuf;

use clap::Parser;
use classical_sizing::export::{self, constraint};
use classical_sizing::physics::units;
use classical_sizing::study::{self, constraint_section};

/// Evaluate the constraint diagram of a study manifest and report the requested optima.
#[derive(Parser, Debug)]
#[command(author, version, about = "Constraint diagram (power loading vs wing loading)")]
struct Cli {
    /// Study manifest (TOML or YAML)
    #[arg(long)]
    study: PathBuf,

    /// Diagram CSV output (use '-' for stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON summary output (use '-' for stdout)
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    classical_sizing::init_tracing();
    let cli = Cli::parse();

    let config = study::load_study(&cli.study)?;
    let section = constraint_section(&config)?;
    let result = study::run_constraint_study(section)?;
    let diagram = &result.diagram;

    let quiet = [&cli.output, &cli.summary]
        .iter()
        .any(|p| p.as_deref().is_some_and(|p| p.as_os_str() == "-"));
    if !quiet {
        println!("Study: {}", config.name);
        println!(
            "Wing-loading sweep: {:.3} .. {:.3} ({} samples)",
            diagram.sweep().min(),
            diagram.sweep().max(),
            diagram.sweep().len()
        );
        for (regime, _) in diagram.curves() {
            println!("  determined: {regime}");
        }
        if let Some(stall) = diagram.stall() {
            println!("  stall wing loading: {:.3}", stall.wing_loading());
        }
        if let Some(range) = diagram.max_range() {
            println!("  max-range wing loading: {:.3}", range.wing_loading());
        }
        if let Some(floor) = diagram.turn_thrust_floor() {
            println!("  sustained-turn T/W floor: {floor:.4}");
        }
        if let Some(polar) = &result.estimates.polar {
            println!(
                "  table CD0: {:.5}, L/D max {:.3} at {:.2} deg",
                polar.zero_lift_drag, polar.max_lift_to_drag, polar.alpha_at_max_lift_to_drag
            );
        }
        if let Some(slope) = result.estimates.lift_curve_slope {
            println!("  wing lift-curve slope: {slope:.5} 1/rad");
        }
        for optimum in &result.optima {
            let point = &optimum.point;
            println!(
                "Optimum {} x {}: W/S = {:.3} kg/m2 ({:.3} lbf/ft2), P/W = {:.3} W/kg ({:.3} W/lbf)",
                optimum.first,
                optimum.second,
                point.wing_loading,
                units::kg_m2_to_lbf_ft2(point.wing_loading),
                point.power_loading,
                units::watt_per_kg_to_watt_per_lbf(point.power_loading)
            );
        }
    }

    if let Some(path) = &cli.output {
        let mut writer = export::writer_for_path(path)?;
        constraint::write_diagram(&mut *writer, diagram)?;
    }
    if let Some(path) = &cli.summary {
        let mut writer = export::writer_for_path(path)?;
        constraint::write_summary(
            &mut *writer,
            &config.name,
            diagram,
            &result.estimates,
            &result.optima,
        )?;
    }
    Ok(())
}
