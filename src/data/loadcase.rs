//! Loadcase assembly: fetch everything a report needs, fully materialized.
//!
//! The assembly is two-phase by design: plain data structs plus explicit fetch
//! functions that return fully-populated values. Nothing here holds partially
//! initialized state, so the comparison and report layers can assume every
//! curve has all of its samples present.

use std::collections::BTreeMap;

use crate::data::bench::{BenchClient, KeyResultKind, dimension_from_overview};
use crate::domain::{
    ComparisonGroup, Curve, GroupMember, KeyValue, Loadcase, Picture, ReportConfig, Simulation,
    Target,
};
use crate::error::AppError;
use crate::render;

/// Fetch the loadcase with all selected simulations, targets, and
/// cross-simulation comparison groups.
pub fn fetch_loadcase(client: &BenchClient, config: &ReportConfig) -> Result<Loadcase, AppError> {
    let mut targets: Vec<Target> = client
        .fetch_loadcase_targets(config.loadcase_id)?
        .into_iter()
        .map(Target::Value)
        .collect();

    let mut simulations = Vec::with_capacity(config.simulation_ids.len());
    for &sim_id in &config.simulation_ids {
        let is_target = config.target_simulation == Some(sim_id);
        let sim = fetch_simulation(client, sim_id, is_target)?;

        // The designated target simulation contributes its curves as the
        // reference curves every other simulation is compared against.
        if is_target {
            for curve in &sim.curves {
                targets.push(Target::Curve(curve.clone()));
            }
        }
        simulations.push(sim);
    }

    let groups = build_comparison_groups(&simulations)?;

    Ok(Loadcase {
        id: config.loadcase_id,
        simulations,
        targets,
        groups,
    })
}

/// Fetch one simulation with its tasks, values, pictures, and curves.
pub fn fetch_simulation(
    client: &BenchClient,
    id: u64,
    is_target: bool,
) -> Result<Simulation, AppError> {
    let (id, name) = client.fetch_simulation_summary(id)?;

    let mut tasks = Vec::new();
    for task_id in client.fetch_task_ids(id)? {
        tasks.push(client.fetch_task(task_id)?);
    }

    let mut values = Vec::new();
    for entry in client.fetch_key_results(id, KeyResultKind::Value)? {
        let raw = client.fetch_value_detail(id, entry.id, &entry.name)?;
        let value = raw.map(value_text).unwrap_or_default();
        let dimension = entry
            .overview
            .as_deref()
            .map(|o| dimension_from_overview(o, &value))
            .unwrap_or_default();
        values.push(KeyValue {
            id: entry.id,
            name: entry.name,
            value,
            dimension,
        });
    }

    let mut pictures = Vec::new();
    for entry in client.fetch_key_results(id, KeyResultKind::Picture)? {
        let content = client.fetch_picture(id, entry.id)?;
        pictures.push(Picture {
            id: entry.id,
            name: entry.name,
            content,
        });
    }

    let mut curves = Vec::new();
    for entry in client.fetch_key_results(id, KeyResultKind::Curve)? {
        let axes = client.fetch_curve_axes(id, entry.id)?;
        if axes.x.len() != axes.y.len() {
            return Err(AppError::new(
                4,
                format!(
                    "Curve '{}' has mismatched axes ({} x-values, {} y-values).",
                    entry.name,
                    axes.x.len(),
                    axes.y.len()
                ),
            ));
        }
        let mut curve = Curve {
            id: entry.id,
            name: entry.name,
            is_target,
            x_label: axes.x_label,
            y_label: axes.y_label,
            x: axes.x,
            y: axes.y,
            picture: String::new(),
        };
        curve.picture = render::svg_data_uri(&render::curve_chart_svg(&curve)?);
        curves.push(curve);
    }

    Ok(Simulation {
        id,
        name,
        is_target,
        tasks,
        values,
        pictures,
        curves,
    })
}

/// Group same-named curves across simulations and render one combined chart
/// per group.
///
/// A `BTreeMap` keeps group order deterministic across runs.
fn build_comparison_groups(simulations: &[Simulation]) -> Result<Vec<ComparisonGroup>, AppError> {
    let mut by_name: BTreeMap<String, Vec<GroupMember>> = BTreeMap::new();
    for sim in simulations {
        for curve in &sim.curves {
            by_name
                .entry(curve.name.clone())
                .or_default()
                .push(GroupMember {
                    sim_name: sim.name.clone(),
                    curve: curve.clone(),
                });
        }
    }

    let mut groups = Vec::with_capacity(by_name.len());
    for (curve_name, members) in by_name {
        let picture = render::svg_data_uri(&render::comparison_chart_svg(&curve_name, &members)?);
        groups.push(ComparisonGroup {
            curve_name,
            members,
            picture,
        });
    }
    Ok(groups)
}

/// Render a raw JSON value the way the report displays it.
fn value_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(name: &str) -> Curve {
        Curve {
            id: 1,
            name: name.to_string(),
            is_target: false,
            x_label: "Time".to_string(),
            y_label: "Force".to_string(),
            x: vec![0.0, 1.0, 2.0],
            y: vec![0.0, 1.0, 0.0],
            picture: String::new(),
        }
    }

    fn simulation(name: &str, curves: Vec<Curve>) -> Simulation {
        Simulation {
            id: 1,
            name: name.to_string(),
            is_target: false,
            tasks: Vec::new(),
            values: Vec::new(),
            pictures: Vec::new(),
            curves,
        }
    }

    #[test]
    fn groups_collect_same_named_curves() {
        let sims = vec![
            simulation("Run A", vec![curve("Force"), curve("Energy")]),
            simulation("Run B", vec![curve("Force")]),
        ];
        let groups = build_comparison_groups(&sims).unwrap();
        assert_eq!(groups.len(), 2);

        // BTreeMap ordering: "Energy" before "Force".
        assert_eq!(groups[0].curve_name, "Energy");
        assert_eq!(groups[0].members.len(), 1);
        assert_eq!(groups[1].curve_name, "Force");
        assert_eq!(groups[1].members.len(), 2);
        assert_eq!(groups[1].members[0].sim_name, "Run A");
        assert!(groups[1].picture.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn value_text_unquotes_strings() {
        assert_eq!(value_text(serde_json::json!("12.5")), "12.5");
        assert_eq!(value_text(serde_json::json!(12.5)), "12.5");
        assert_eq!(value_text(serde_json::json!(null)), "");
    }
}
