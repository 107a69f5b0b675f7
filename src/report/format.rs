//! Formatted terminal output for comparison results.

use crate::domain::ComparisonOutcome;
use crate::math::CurveComparison;

/// Format one offline comparison (`br compare`) for the terminal.
pub fn format_comparison(sample_name: &str, target_name: &str, cmp: &CurveComparison) -> String {
    let mut out = String::new();

    out.push_str("=== br - curve comparison ===\n");
    out.push_str(&format!("Sample: {sample_name}\n"));
    out.push_str(&format!("Target: {target_name}\n\n"));

    out.push_str(&format!("Sample area metric : {:.6}\n", cmp.area.sample_area));
    out.push_str(&format!("Target area metric : {:.6}\n", cmp.area.target_area));
    match cmp.area.ratio {
        Some(r) => out.push_str(&format!("Area ratio         : {:.6} ({:.2}%)\n", r, r * 100.0)),
        None => out.push_str("Area ratio         : n/a (target area metric is zero)\n"),
    }
    out.push_str(&format!("Sum of squares     : {:.6}\n", cmp.sum_of_squares));
    out.push_str(&format!("Max deviation      : {:.6}\n", cmp.max_deviation));

    out
}

/// Format the per-curve comparison table printed after a report run.
///
/// Failed pairs are listed with their reason; they never abort the run.
pub fn format_comparison_outcomes(outcomes: &[ComparisonOutcome]) -> String {
    if outcomes.is_empty() {
        return "No curves compared (no target simulation selected).\n".to_string();
    }

    let mut out = String::new();
    out.push_str("Curve comparisons against target:\n");
    out.push_str(&format!(
        "{:<24} {:<24} {:>12} {:>12} {:>12}\n",
        "simulation", "curve", "area %", "sum sq", "max dev"
    ));
    out.push_str(&format!(
        "{:-<24} {:-<24} {:-<12} {:-<12} {:-<12}\n",
        "", "", "", "", ""
    ));

    for o in outcomes {
        match &o.result {
            Ok(m) => {
                let area = m
                    .relative_area_pct
                    .map(|p| format!("{p:.3}"))
                    .unwrap_or_else(|| "n/a".to_string());
                out.push_str(&format!(
                    "{:<24} {:<24} {:>12} {:>12.4} {:>12.4}\n",
                    truncate(&o.sim_name, 24),
                    truncate(&o.curve_name, 24),
                    area,
                    m.sum_of_squares,
                    m.max_deviation,
                ));
            }
            Err(err) => {
                out.push_str(&format!(
                    "{:<24} {:<24} skipped: {err}\n",
                    truncate(&o.sim_name, 24),
                    truncate(&o.curve_name, 24),
                ));
            }
        }
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurveMetrics;
    use crate::math::CompareError;

    #[test]
    fn outcomes_table_lists_failures_without_aborting() {
        let outcomes = vec![
            ComparisonOutcome {
                sim_name: "Run A".to_string(),
                curve_name: "Force".to_string(),
                result: Ok(CurveMetrics {
                    relative_area_pct: Some(1.5),
                    sum_of_squares: 0.25,
                    max_deviation: 0.5,
                }),
            },
            ComparisonOutcome {
                sim_name: "Run B".to_string(),
                curve_name: "Force".to_string(),
                result: Err(CompareError::InsufficientPoints { got: 1 }),
            },
        ];

        let text = format_comparison_outcomes(&outcomes);
        assert!(text.contains("Run A"));
        assert!(text.contains("1.500"));
        assert!(text.contains("skipped: insufficient points"));
    }

    #[test]
    fn truncate_keeps_short_names() {
        assert_eq!(truncate("short", 24), "short");
        assert_eq!(truncate("abcdefgh", 4), "abc.");
    }
}
