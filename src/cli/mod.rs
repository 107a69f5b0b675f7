//! Command-line parsing for the benchmark report generator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fetching/comparison code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::ReportType;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "br", version, about = "CAE benchmark report generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a loadcase from the benchmarking server and write an HTML report.
    Report(ReportArgs),
    /// Compare two local curve files and print the deviation metrics.
    Compare(CompareArgs),
    /// Render a local curve file to an SVG chart.
    Plot(PlotArgs),
}

/// Options for the full report pipeline.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Benchmarking server base URL (falls back to BENCH_BASE_URL in .env).
    #[arg(long)]
    pub url: Option<String>,

    /// Session token for the server (falls back to BENCH_SESSION in .env).
    #[arg(long)]
    pub session: Option<String>,

    /// Loadcase id whose targets the report covers.
    #[arg(short = 'l', long)]
    pub loadcase: u64,

    /// Simulation id to include (repeat for several simulations).
    #[arg(short = 's', long = "simulation", required = true)]
    pub simulations: Vec<u64>,

    /// Simulation whose curves become the comparison targets.
    #[arg(long = "target")]
    pub target_simulation: Option<u64>,

    /// Report layout when no template is given.
    #[arg(long = "type", value_enum, default_value_t = ReportType::SingleSolver)]
    pub report_type: ReportType,

    /// HTML template with {{placeholder}} markers; omit to use the built-in layout.
    #[arg(short = 't', long)]
    pub template: Option<PathBuf>,

    /// Output path for the report (default: Report_{uid}.html).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Export per-curve comparison metrics to CSV.
    #[arg(long = "export-metrics")]
    pub export_metrics: Option<PathBuf>,
}

/// Options for offline curve comparison.
#[derive(Debug, Parser)]
pub struct CompareArgs {
    /// Sample curve file (JSON or two-column CSV).
    pub sample: PathBuf,

    /// Target curve file (JSON or two-column CSV).
    pub target: PathBuf,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve file (JSON or two-column CSV).
    pub curve: PathBuf,

    /// Output SVG path (default: the curve file name with .svg).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}
