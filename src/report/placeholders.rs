//! Placeholder map construction.
//!
//! Template placeholders are colon-separated paths, e.g.
//! `{{Run A:crv:Force:cmp:dev}}` for the max deviation of simulation "Run A"'s
//! "Force" curve against the target. The full map is built once per report as
//! an explicit, immutable value; nothing mutates it afterwards.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{CurveMetrics, Loadcase, Target, TargetCriterion, TargetValue};

pub const VALUE: &str = "val";
pub const PICTURE: &str = "pic";
pub const CURVE: &str = "crv";
pub const COMPARE_TO_TARGET: &str = "cmp";
pub const SQUARED_AREA: &str = "asq";
pub const SUM_OF_SQUARES: &str = "ssq";
pub const MAX_DEVIATION: &str = "dev";
pub const TARGET: &str = "target";
pub const COMPARISON_CURVES: &str = "curves";
pub const CORES: &str = "cores";
pub const MEMORY: &str = "memory";
pub const STATUS: &str = "status";

/// Metrics of each simulation curve against its same-named target curve,
/// keyed by `(simulation name, curve name)`.
pub type MetricsMap = HashMap<(String, String), CurveMetrics>;

/// Build the full placeholder map for one loadcase.
///
/// A `BTreeMap` keeps iteration deterministic, which makes report output
/// reproducible for identical inputs.
pub fn build_placeholders(loadcase: &Loadcase, metrics: &MetricsMap) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();

    for target in &loadcase.targets {
        match target {
            Target::Value(value) => {
                if let Some(text) = format_target_value(value) {
                    map.insert(format!("{TARGET}:{VALUE}:{}", value.name), text);
                }
            }
            Target::Curve(curve) => {
                map.insert(
                    format!("{TARGET}:{CURVE}:{}", trim_quotes(&curve.name)),
                    image_tag(&curve.name, &curve.picture),
                );
            }
        }
    }

    for sim in &loadcase.simulations {
        for value in &sim.values {
            map.insert(
                format!("{}:{VALUE}:{}", sim.name, value.name),
                format!("{} {}", value.value, value.dimension),
            );
        }

        for picture in &sim.pictures {
            map.insert(
                format!("{}:{PICTURE}:{}", sim.name, picture.name),
                image_tag(&picture.name, &picture.content),
            );
        }

        // The server stores curve names with additional double quotes; keys
        // use the trimmed name so templates stay readable.
        for curve in &sim.curves {
            let trimmed = trim_quotes(&curve.name);
            map.insert(
                format!("{}:{CURVE}:{trimmed}", sim.name),
                image_tag(&curve.name, &curve.picture),
            );

            if let Some(m) = metrics.get(&(sim.name.clone(), trimmed.to_string())) {
                map.insert(
                    format!("{}:{CURVE}:{trimmed}:{COMPARE_TO_TARGET}:{SQUARED_AREA}", sim.name),
                    m.relative_area_pct
                        .map(|p| format!("{p}"))
                        .unwrap_or_else(|| "n/a".to_string()),
                );
                map.insert(
                    format!("{}:{CURVE}:{trimmed}:{COMPARE_TO_TARGET}:{SUM_OF_SQUARES}", sim.name),
                    format!("{}", m.sum_of_squares),
                );
                map.insert(
                    format!("{}:{CURVE}:{trimmed}:{COMPARE_TO_TARGET}:{MAX_DEVIATION}", sim.name),
                    format!("{}", m.max_deviation),
                );
            }
        }

        // Task placeholders expose the latest solver task only.
        if let Some(task) = sim.tasks.first() {
            map.insert(format!("{}:{CORES}", sim.name), format!("{}", task.cores));
            map.insert(format!("{}:{MEMORY}", sim.name), format!("{} MB", task.memory));
            map.insert(format!("{}:{STATUS}", sim.name), task.status.clone());
        }
    }

    for group in &loadcase.groups {
        map.insert(
            format!("{COMPARISON_CURVES}:{}", trim_quotes(&group.curve_name)),
            image_tag(&group.curve_name, &group.picture),
        );
    }

    map
}

/// Render a target value with its acceptance criterion, e.g. `"< 10 kN"` or
/// `"10 ± 0.5 kN"`.
///
/// Returns `None` when the payload lacks the fields its criterion requires.
pub fn format_target_value(t: &TargetValue) -> Option<String> {
    let dim = &t.dimension;
    match t.criterion {
        TargetCriterion::Eq => Some(format!("= {} {dim}", t.value?)),
        TargetCriterion::Lt => Some(format!("< {} {dim}", t.value?)),
        TargetCriterion::Le => Some(format!("\u{2264} {} {dim}", t.value?)),
        TargetCriterion::Gt => Some(format!("> {} {dim}", t.value?)),
        TargetCriterion::Ge => Some(format!("\u{2265} {} {dim}", t.value?)),
        TargetCriterion::Tolerance => Some(format!("{} \u{00b1} {} {dim}", t.value?, t.tolerance?)),
        TargetCriterion::Interval => Some(format!("[{}; {}] {dim}", t.left?, t.right?)),
    }
}

fn image_tag(name: &str, src: &str) -> String {
    format!("<img alt=\"{name}\" src=\"{src}\" width=\"50%\">")
}

/// Strip surrounding double quotes from a curve name.
pub fn trim_quotes(name: &str) -> &str {
    name.trim_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Curve, KeyValue, Simulation, Task};

    fn loadcase() -> Loadcase {
        Loadcase {
            id: 1,
            simulations: vec![Simulation {
                id: 10,
                name: "Run A".to_string(),
                is_target: false,
                tasks: vec![Task {
                    id: 100,
                    cores: 16,
                    memory: 4096,
                    status: "FINISHED".to_string(),
                }],
                values: vec![KeyValue {
                    id: 200,
                    name: "Max force".to_string(),
                    value: "1.25".to_string(),
                    dimension: "kN".to_string(),
                }],
                pictures: Vec::new(),
                curves: vec![Curve {
                    id: 300,
                    name: "\"Force\"".to_string(),
                    is_target: false,
                    x_label: String::new(),
                    y_label: String::new(),
                    x: vec![0.0, 1.0],
                    y: vec![0.0, 1.0],
                    picture: "data:image/svg+xml;base64,AAAA".to_string(),
                }],
            }],
            targets: vec![Target::Value(TargetValue {
                id: 1,
                name: "Max force".to_string(),
                criterion: TargetCriterion::Le,
                dimension: "kN".to_string(),
                value: Some(10.0),
                tolerance: None,
                left: None,
                right: None,
            })],
            groups: Vec::new(),
        }
    }

    #[test]
    fn value_and_task_placeholders() {
        let map = build_placeholders(&loadcase(), &MetricsMap::new());
        assert_eq!(map.get("Run A:val:Max force").unwrap(), "1.25 kN");
        assert_eq!(map.get("Run A:cores").unwrap(), "16");
        assert_eq!(map.get("Run A:memory").unwrap(), "4096 MB");
        assert_eq!(map.get("Run A:status").unwrap(), "FINISHED");
    }

    #[test]
    fn curve_keys_use_trimmed_names() {
        let mut metrics = MetricsMap::new();
        metrics.insert(
            ("Run A".to_string(), "Force".to_string()),
            CurveMetrics {
                relative_area_pct: Some(12.5),
                sum_of_squares: 0.25,
                max_deviation: 0.5,
            },
        );
        let map = build_placeholders(&loadcase(), &metrics);

        assert!(map.get("Run A:crv:Force").unwrap().starts_with("<img"));
        assert_eq!(map.get("Run A:crv:Force:cmp:asq").unwrap(), "12.5");
        assert_eq!(map.get("Run A:crv:Force:cmp:ssq").unwrap(), "0.25");
        assert_eq!(map.get("Run A:crv:Force:cmp:dev").unwrap(), "0.5");
    }

    #[test]
    fn undefined_area_ratio_renders_na() {
        let mut metrics = MetricsMap::new();
        metrics.insert(
            ("Run A".to_string(), "Force".to_string()),
            CurveMetrics {
                relative_area_pct: None,
                sum_of_squares: 1.0,
                max_deviation: 1.0,
            },
        );
        let map = build_placeholders(&loadcase(), &metrics);
        assert_eq!(map.get("Run A:crv:Force:cmp:asq").unwrap(), "n/a");
    }

    #[test]
    fn target_value_formats_follow_criterion() {
        let base = TargetValue {
            id: 1,
            name: "t".to_string(),
            criterion: TargetCriterion::Eq,
            dimension: "mm".to_string(),
            value: Some(2.0),
            tolerance: Some(0.1),
            left: Some(1.0),
            right: Some(3.0),
        };

        let case = |criterion| TargetValue { criterion, ..base.clone() };
        assert_eq!(format_target_value(&case(TargetCriterion::Eq)).unwrap(), "= 2 mm");
        assert_eq!(format_target_value(&case(TargetCriterion::Lt)).unwrap(), "< 2 mm");
        assert_eq!(format_target_value(&case(TargetCriterion::Le)).unwrap(), "\u{2264} 2 mm");
        assert_eq!(
            format_target_value(&case(TargetCriterion::Tolerance)).unwrap(),
            "2 \u{00b1} 0.1 mm"
        );
        assert_eq!(
            format_target_value(&case(TargetCriterion::Interval)).unwrap(),
            "[1; 3] mm"
        );
    }

    #[test]
    fn incomplete_target_value_is_skipped() {
        let t = TargetValue {
            id: 1,
            name: "t".to_string(),
            criterion: TargetCriterion::Tolerance,
            dimension: "mm".to_string(),
            value: Some(2.0),
            tolerance: None,
            left: None,
            right: None,
        };
        assert_eq!(format_target_value(&t), None);
    }
}
