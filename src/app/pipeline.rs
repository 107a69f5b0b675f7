//! Shared "report pipeline" logic behind the `br report` subcommand.
//!
//! Keeping this in one place separates the core workflow:
//! server fetch -> curve comparison -> placeholder table -> HTML
//! from the CLI front-end, which only handles arguments and printing.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::data::bench::BenchClient;
use crate::domain::{ComparisonOutcome, Loadcase, ReportConfig, Target};
use crate::error::AppError;
use crate::math::CurveComparison;
use crate::report::MetricsMap;
use crate::report::placeholders::trim_quotes;

/// All computed outputs of a single `br report` run.
#[derive(Debug)]
pub struct RunOutput {
    pub loadcase: Loadcase,
    pub outcomes: Vec<ComparisonOutcome>,
    /// The finished report document.
    pub html: String,
    /// Placeholder keys the template referenced but the server data never produced.
    pub unresolved: Vec<String>,
}

/// Execute the full report pipeline and return the computed outputs.
pub fn run_report(config: &ReportConfig) -> Result<RunOutput, AppError> {
    // 1) Fetch the loadcase with all simulations, targets and chart renders.
    let client = BenchClient::from_env(Some(&config.base_url), config.session.as_deref())?;
    let loadcase = crate::data::fetch_loadcase(&client, config)?;

    // 2) Compare every sample curve against the same-named target curve.
    let outcomes = compare_to_targets(&loadcase);
    let metrics = metrics_map(&outcomes);

    // 3) Turn the loadcase into placeholder values and render the document.
    let placeholders = crate::report::build_placeholders(&loadcase, &metrics);
    let (html, unresolved) = match &config.template_path {
        Some(path) => {
            let template = std::fs::read_to_string(path).map_err(|e| {
                AppError::new(2, format!("failed to read template {}: {e}", path.display()))
            })?;
            let unresolved = crate::report::unresolved_keys(&template, &placeholders)
                .into_iter()
                .map(str::to_string)
                .collect();
            (crate::report::substitute(&template, &placeholders), unresolved)
        }
        None => (
            crate::report::build_default_report(config.report_type, &loadcase),
            Vec::new(),
        ),
    };

    Ok(RunOutput {
        loadcase,
        outcomes,
        html,
        unresolved,
    })
}

/// Compare every non-target simulation curve against the target curve that
/// carries the same name. Curves without a matching target are skipped
/// silently; a pair whose comparison fails is recorded with its error so the
/// caller can warn without aborting the run.
pub fn compare_to_targets(loadcase: &Loadcase) -> Vec<ComparisonOutcome> {
    let targets: HashMap<&str, _> = loadcase
        .targets
        .iter()
        .filter_map(|t| match t {
            Target::Curve(c) => Some((trim_quotes(&c.name), c)),
            Target::Value(_) => None,
        })
        .collect();

    let mut pairs = Vec::new();
    for sim in loadcase.simulations.iter().filter(|s| !s.is_target) {
        for curve in &sim.curves {
            if let Some(target) = targets.get(trim_quotes(&curve.name)) {
                pairs.push((sim.name.as_str(), curve, *target));
            }
        }
    }

    pairs
        .par_iter()
        .map(|(sim_name, curve, target)| ComparisonOutcome {
            sim_name: sim_name.to_string(),
            curve_name: trim_quotes(&curve.name).to_string(),
            result: CurveComparison::compute(&curve.x, &curve.y, &target.x, &target.y)
                .map(Into::into),
        })
        .collect()
}

/// Index successful comparisons by `(simulation, curve)` for placeholder lookup.
pub fn metrics_map(outcomes: &[ComparisonOutcome]) -> MetricsMap {
    outcomes
        .iter()
        .filter_map(|o| {
            o.result
                .as_ref()
                .ok()
                .map(|m| ((o.sim_name.clone(), o.curve_name.clone()), m.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Curve, Simulation};

    fn curve(name: &str, is_target: bool, y: Vec<f64>) -> Curve {
        Curve {
            id: 1,
            name: name.to_string(),
            is_target,
            x_label: "Time".to_string(),
            y_label: "Force".to_string(),
            x: vec![0.0, 1.0, 2.0],
            y,
            picture: String::new(),
        }
    }

    fn loadcase_with_pair() -> Loadcase {
        Loadcase {
            id: 7,
            simulations: vec![Simulation {
                id: 1,
                name: "run-a".to_string(),
                is_target: false,
                tasks: Vec::new(),
                values: Vec::new(),
                pictures: Vec::new(),
                curves: vec![curve("\"force\"", false, vec![0.0, 1.0, 2.0])],
            }],
            targets: vec![Target::Curve(curve("force", true, vec![0.0, 1.0, 2.0]))],
            groups: Vec::new(),
        }
    }

    #[test]
    fn matching_curves_are_compared() {
        let outcomes = compare_to_targets(&loadcase_with_pair());
        assert_eq!(outcomes.len(), 1);
        let metrics = outcomes[0].result.as_ref().unwrap();
        assert_eq!(metrics.max_deviation, 0.0);
        assert_eq!(outcomes[0].curve_name, "force");
    }

    #[test]
    fn curves_without_a_target_are_skipped() {
        let mut lc = loadcase_with_pair();
        lc.targets.clear();
        assert!(compare_to_targets(&lc).is_empty());
    }

    #[test]
    fn failed_pairs_keep_their_error() {
        let mut lc = loadcase_with_pair();
        lc.simulations[0].curves[0].x = vec![10.0, 11.0, 12.0];
        let outcomes = compare_to_targets(&lc);
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].result.is_err());
    }

    #[test]
    fn metrics_map_drops_failures() {
        let mut lc = loadcase_with_pair();
        lc.simulations[0].curves[0].x = vec![10.0, 11.0, 12.0];
        let outcomes = compare_to_targets(&lc);
        assert!(metrics_map(&outcomes).is_empty());
    }
}
