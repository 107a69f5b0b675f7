//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches loadcase data from the benchmarking server
//! - compares sample curves against their targets
//! - assembles the HTML report
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, CompareArgs, PlotArgs, ReportArgs};
use crate::domain::{Curve, ReportConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `br` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Compare(args) => handle_compare(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = report_config_from_args(&args)?;
    let run = pipeline::run_report(&config)?;

    println!("{}", crate::report::format_comparison_outcomes(&run.outcomes));
    for key in &run.unresolved {
        eprintln!("warning: no value for placeholder {{{{{key}}}}}");
    }

    let path = crate::io::write_report(config.output.as_deref(), &run.html)?;
    println!("report written to {}", path.display());

    if let Some(path) = &config.export_metrics {
        crate::io::write_metrics_csv(path, &run.outcomes)?;
        println!("metrics written to {}", path.display());
    }

    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let sample = crate::io::read_curve_file(&args.sample)?;
    let target = crate::io::read_curve_file(&args.target)?;

    let cmp =
        crate::math::CurveComparison::compute(&sample.x, &sample.y, &target.x, &target.y)?;
    println!(
        "{}",
        crate::report::format_comparison(&sample.name, &target.name, &cmp)
    );
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file = crate::io::read_curve_file(&args.curve)?;
    let curve = Curve {
        id: 0,
        name: file.name.clone(),
        is_target: false,
        x_label: file.x_label.clone(),
        y_label: file.y_label.clone(),
        x: file.x.clone(),
        y: file.y.clone(),
        picture: String::new(),
    };

    let svg = crate::render::curve_chart_svg(&curve)?;
    let output = args
        .output
        .unwrap_or_else(|| args.curve.with_extension("svg"));
    std::fs::write(&output, svg).map_err(|e| {
        AppError::new(2, format!("failed to write {}: {e}", output.display()))
    })?;
    println!("chart written to {}", output.display());
    Ok(())
}

fn report_config_from_args(args: &ReportArgs) -> Result<ReportConfig, AppError> {
    dotenvy::dotenv().ok();
    let base_url = match &args.url {
        Some(u) => u.clone(),
        None => std::env::var("BENCH_BASE_URL")
            .map_err(|_| AppError::new(2, "no server URL: pass --url or set BENCH_BASE_URL"))?,
    };

    Ok(ReportConfig {
        base_url,
        session: args.session.clone(),
        loadcase_id: args.loadcase,
        simulation_ids: args.simulations.clone(),
        target_simulation: args.target_simulation,
        report_type: args.report_type,
        template_path: args.template.clone(),
        output: args.output.clone(),
        export_metrics: args.export_metrics.clone(),
    })
}
