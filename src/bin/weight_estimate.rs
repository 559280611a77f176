use std::path::PathBuf;

use clap::Parser;
use classical_sizing::export::{self, weight};
use classical_sizing::study::{self, weight_section};

/// Size a study's mission by the fuel-fraction method and optionally sweep cruise range.
#[derive(Parser, Debug)]
#[command(author, version, about = "Gross takeoff weight estimate (fuel-fraction method)")]
struct Cli {
    /// Study manifest (TOML or YAML)
    #[arg(long)]
    study: PathBuf,

    /// Range-sweep CSV output (use '-' for stdout); requires [weight.range_sweep]
    #[arg(long)]
    sweep_output: Option<PathBuf>,

    /// JSON summary output (use '-' for stdout)
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    classical_sizing::init_tracing();
    let cli = Cli::parse();

    let config = study::load_study(&cli.study)?;
    let section = weight_section(&config)?;
    let outcome = study::run_weight_study(section)?;
    let result = &outcome.result;

    let quiet = [&cli.sweep_output, &cli.summary]
        .iter()
        .any(|p| p.as_deref().is_some_and(|p| p.as_os_str() == "-"));
    if !quiet {
        println!("Study: {} ({})", config.name, result.units.label());
        println!("Gross takeoff weight: {:.3}", result.gross_weight);
        println!("Fuel fraction Wf/W0: {:.6}", result.fuel_fraction);
        println!("Empty fraction We/W0: {:.6}", result.empty_weight_fraction);
        println!("Fuel weight: {:.3}", result.fuel_weight());
        println!("Empty weight: {:.3}", result.empty_weight());
        println!("Iterations: {}", result.iterations);
        if let Some(sweep) = &outcome.range_study {
            for sample in &sweep.samples {
                match &sample.outcome {
                    Ok(solved) => println!("  range {:.3}: {:.3}", sample.range, solved.gross_weight),
                    Err(err) => println!("  range {:.3}: failed ({err})", sample.range),
                }
            }
        }
    }

    if let Some(path) = &cli.sweep_output {
        let Some(sweep) = &outcome.range_study else {
            anyhow::bail!("study `{}` has no [weight.range_sweep] table", config.name);
        };
        let mut writer = export::writer_for_path(path)?;
        weight::write_range_study(&mut *writer, sweep)?;
    }
    if let Some(path) = &cli.summary {
        let mut writer = export::writer_for_path(path)?;
        weight::write_summary(
            &mut *writer,
            &config.name,
            result,
            &outcome.breakdown,
            outcome.range_study.as_ref(),
        )?;
    }
    Ok(())
}
