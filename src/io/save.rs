//! Report saving and metrics export.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::domain::ComparisonOutcome;
use crate::error::AppError;

/// Quasi-unique 12-character lowercase alphanumeric id for report file names.
pub fn unique_id() -> String {
    let mut rng = rand::thread_rng();
    (0..12)
        .map(|_| {
            let chars = b"abcdefghijklmnopqrstuvwxyz0123456789";
            chars[rng.gen_range(0..chars.len())] as char
        })
        .collect()
}

/// Write the report HTML, defaulting to `Report_{uid}.html` in the working
/// directory when no output path was given. Returns the path written.
pub fn write_report(output: Option<&Path>, content: &str) -> Result<PathBuf, AppError> {
    let path = match output {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(format!("Report_{}.html", unique_id())),
    };

    let mut file = File::create(&path)
        .map_err(|e| AppError::new(2, format!("Failed to create report '{}': {e}", path.display())))?;
    file.write_all(content.as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write report '{}': {e}", path.display())))?;

    Ok(path)
}

/// Write per-curve comparison metrics to a CSV file.
///
/// The export is meant to be easy to consume in spreadsheets or downstream
/// scripts. Failed pairs are exported with their error text in place of the
/// metric columns.
pub fn write_metrics_csv(path: &Path, outcomes: &[ComparisonOutcome]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create metrics CSV '{}': {e}", path.display())))?;

    writeln!(file, "simulation,curve,relative_area_pct,sum_of_squares,max_deviation,error")
        .map_err(|e| AppError::new(2, format!("Failed to write metrics CSV header: {e}")))?;

    for o in outcomes {
        match &o.result {
            Ok(m) => writeln!(
                file,
                "{},{},{},{:.10},{:.10},",
                csv_field(&o.sim_name),
                csv_field(&o.curve_name),
                m.relative_area_pct
                    .map(|p| format!("{p:.10}"))
                    .unwrap_or_default(),
                m.sum_of_squares,
                m.max_deviation,
            ),
            Err(err) => writeln!(
                file,
                "{},{},,,,{}",
                csv_field(&o.sim_name),
                csv_field(&o.curve_name),
                csv_field(&err.to_string()),
            ),
        }
        .map_err(|e| AppError::new(2, format!("Failed to write metrics CSV row: {e}")))?;
    }

    Ok(())
}

/// Quote a field when it contains CSV metacharacters.
fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
