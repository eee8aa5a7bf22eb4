use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use statin_pd::logger::setup_log;
use statin_pd::{SimulationConfig, Simulator};

#[derive(Parser)]
#[command(name = "statin-sim")]
#[command(about = "Simulate the effect of daily simvastatin on circulating LDL cholesterol")]
#[command(version)]
struct Args {
    /// JSON configuration file; missing fields use the reference scenario
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the daily dose (mg/dL)
    #[arg(long)]
    dose: Option<f64>,

    /// Override the day cap
    #[arg(long)]
    max_days: Option<u32>,

    /// Log filter, e.g. `info` or `debug`; defaults to RUST_LOG
    #[arg(long)]
    log_level: Option<String>,

    /// What to print on stdout
    #[arg(short, long, value_enum, default_value_t = Format::Summary)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Short text report
    Summary,
    /// Parameters, final state and all sequences
    Json,
    /// Three-panel figure description
    Figure,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_log(args.log_level.as_deref())?;

    let config = SimulationConfig::load(args.config.as_deref(), args.dose, args.max_days)?;

    let simulation = Simulator::new(&config)?.run();

    match args.format {
        Format::Summary => println!("{}", simulation.summary()),
        Format::Json => println!("{}", simulation.to_json()?),
        Format::Figure => println!("{}", simulation.figure().to_json()?),
    }

    Ok(())
}
