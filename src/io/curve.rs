//! Read/write portable curve files.
//!
//! Curve JSON is the "portable" representation of a result curve: name, axis
//! labels, and the raw sample arrays. CSV input (two numeric columns, `x,y`)
//! is accepted as a lighter-weight alternative for hand-made curves.
//!
//! The JSON schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::CurveFile;
use crate::error::AppError;

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}

/// Read a two-column curve CSV (`x,y`, optional header row).
pub fn read_curve_csv(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut x = Vec::new();
    let mut y = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| AppError::new(2, format!("Failed to read curve CSV row {}: {e}", i + 1)))?;
        if record.len() < 2 {
            return Err(AppError::new(
                2,
                format!("Curve CSV row {} has fewer than 2 columns.", i + 1),
            ));
        }
        let xs = record.get(0).unwrap_or_default();
        let ys = record.get(1).unwrap_or_default();

        // Tolerate a single header row.
        if i == 0 && xs.parse::<f64>().is_err() {
            continue;
        }

        let parse = |field: &str, col: &str| {
            field.parse::<f64>().map_err(|_| {
                AppError::new(
                    2,
                    format!("Invalid {col} value '{field}' in curve CSV row {}.", i + 1),
                )
            })
        };
        x.push(parse(xs, "x")?);
        y.push(parse(ys, "y")?);
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("curve")
        .to_string();

    Ok(CurveFile {
        tool: "br".to_string(),
        name,
        x_label: String::new(),
        y_label: String::new(),
        x,
        y,
    })
}

/// Read a curve file, dispatching on the extension (`.json` vs CSV).
pub fn read_curve_file(path: &Path) -> Result<CurveFile, AppError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => read_curve_json(path),
        _ => read_curve_csv(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn csv_roundtrip_with_header() {
        let dir = std::env::temp_dir();
        let path = dir.join("br_test_curve_header.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "x,y").unwrap();
        writeln!(file, "0.0,1.5").unwrap();
        writeln!(file, "1.0,2.5").unwrap();
        drop(file);

        let curve = read_curve_csv(&path).unwrap();
        assert_eq!(curve.x, vec![0.0, 1.0]);
        assert_eq!(curve.y, vec![1.5, 2.5]);
        assert_eq!(curve.name, "br_test_curve_header");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn csv_without_header_reads_all_rows() {
        let dir = std::env::temp_dir();
        let path = dir.join("br_test_curve_plain.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "0,0").unwrap();
        writeln!(file, "2,4").unwrap();
        drop(file);

        let curve = read_curve_csv(&path).unwrap();
        assert_eq!(curve.x, vec![0.0, 2.0]);
        assert_eq!(curve.y, vec![0.0, 4.0]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn json_roundtrip_preserves_samples() {
        let dir = std::env::temp_dir();
        let path = dir.join("br_test_curve.json");
        let curve = CurveFile {
            tool: "br".to_string(),
            name: "Force".to_string(),
            x_label: "Time, s".to_string(),
            y_label: "Force, kN".to_string(),
            x: vec![0.0, 1.0, 2.0],
            y: vec![0.0, 1.0, 0.0],
        };

        write_curve_json(&path, &curve).unwrap();
        let loaded = read_curve_json(&path).unwrap();
        assert_eq!(loaded.name, "Force");
        assert_eq!(loaded.x, curve.x);
        assert_eq!(loaded.y, curve.y);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn bad_numeric_value_is_reported_with_row() {
        let dir = std::env::temp_dir();
        let path = dir.join("br_test_curve_bad.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "0,0").unwrap();
        writeln!(file, "1,oops").unwrap();
        drop(file);

        let err = read_curve_csv(&path).unwrap_err();
        assert!(err.to_string().contains("row 2"));

        std::fs::remove_file(&path).ok();
    }
}
