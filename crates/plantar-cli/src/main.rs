//! Plantar command-line host
//!
//! - `plantar analyze <LEFT> <RIGHT>` - extract the composite field and load statistics
//! - `plantar simulate <OUT_DIR>` - write a synthetic left/right export pair

mod bootstrap;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plantar_core::{FootSide, PressureField};
use plantar_processing::{AnalysisConfig, AnalysisResult, PressurePipeline};
use plantar_simulation::{simulate_pair, write_export_file};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Plantar pressure analysis
#[derive(Parser)]
#[command(name = "plantar")]
#[command(about = "Plantar pressure field extraction and analysis", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level or filter directive (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info", env = "PLANTAR_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a left/right pair of export files
    Analyze {
        /// Left foot export file
        #[arg(name = "LEFT")]
        left: PathBuf,

        /// Right foot export file
        #[arg(name = "RIGHT")]
        right: PathBuf,

        /// JSON analysis configuration
        #[arg(long, value_name = "FILE", conflicts_with = "legacy")]
        config: Option<PathBuf>,

        /// Reproduce the historical desktop tool's numbers
        #[arg(long)]
        legacy: bool,

        /// Print the field and results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a synthetic left/right export pair
    Simulate {
        /// Output directory, created if missing
        #[arg(name = "OUT_DIR")]
        out_dir: PathBuf,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Serialize)]
struct Extraction<'a> {
    field: &'a PressureField,
    results: &'a AnalysisResult,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    bootstrap::setup_logging(&cli.log_level)?;

    tracing::debug!("plantar v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Analyze {
            left,
            right,
            config,
            legacy,
            json,
        } => analyze(&left, &right, config.as_deref(), legacy, json),
        Commands::Simulate { out_dir, seed } => simulate(&out_dir, seed),
    }
}

fn load_config(config: Option<&Path>, legacy: bool) -> Result<AnalysisConfig> {
    match config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None if legacy => Ok(AnalysisConfig::legacy()),
        None => Ok(AnalysisConfig::standard()),
    }
}

fn analyze(left: &Path, right: &Path, config: Option<&Path>, legacy: bool, json: bool) -> Result<()> {
    let config = load_config(config, legacy)?;
    let pipeline = PressurePipeline::new(config).context("Invalid analysis configuration")?;

    let (field, results) = pipeline
        .extract(left, right)
        .with_context(|| format!("Failed to analyze {} and {}", left.display(), right.display()))?;

    if json {
        let output = serde_json::to_string_pretty(&Extraction {
            field: &field,
            results: &results,
        })
        .context("Failed to serialize results")?;
        println!("{}", output);
    } else {
        print_summary(&pipeline.config().name, &results);
    }

    Ok(())
}

fn print_summary(profile: &str, results: &AnalysisResult) {
    println!("Profile: {}", profile);
    println!("Left CoP:   ({:.2}, {:.2})", results.left_cop.x, results.left_cop.y);
    println!("Right CoP:  ({:.2}, {:.2})", results.right_cop.x, results.right_cop.y);
    println!("Global CoP: ({:.2}, {:.2})", results.global_cop.x, results.global_cop.y);
    println!("Total pressure: {:.2}", results.total_pressure);
    println!(
        "Quadrants: Q1 {:.2}  Q2 {:.2}  Q3 {:.2}  Q4 {:.2}",
        results.pressure_q1, results.pressure_q2, results.pressure_q3, results.pressure_q4
    );
    println!(
        "Left/Right: {:.2} ({:.1}%) / {:.2} ({:.1}%)",
        results.left_pressure, results.left_pressure_perc, results.right_pressure, results.right_pressure_perc
    );
    println!(
        "Forefoot/Rearfoot: {:.2} ({:.1}%) / {:.2} ({:.1}%)",
        results.forefoot_pressure,
        results.forefoot_pressure_perc,
        results.rearfoot_pressure,
        results.rearfoot_pressure_perc
    );
    println!(
        "Left peak: {:.2} at ({}, {})",
        results.left_max, results.left_peak_pos.row, results.left_peak_pos.col
    );
}

fn simulate(out_dir: &Path, seed: u64) -> Result<()> {
    std::fs::create_dir_all(out_dir).with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let (left, right) = simulate_pair(seed).context("Failed to simulate foot pair")?;
    for (side, foot, name) in [(FootSide::Left, &left, "left.txt"), (FootSide::Right, &right, "right.txt")] {
        let path = out_dir.join(name);
        write_export_file(foot, side, &path).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), side = %side, "Wrote synthetic export");
    }

    Ok(())
}
