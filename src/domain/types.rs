//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - assembled from REST payloads during a fetch
//! - handed to the comparison core without conversion
//! - embedded into reports or exported for later inspection

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::math::CurveComparison;

/// Page-size limits used when listing server collections.
///
/// The benchmarking server pages every list endpoint; these caps mirror the
/// limits the server enforces per entity type.
pub const MAX_TARGETS_PER_LOADCASE: usize = 250;
pub const MAX_TASKS_PER_SIMULATION: usize = 10;
pub const MAX_VALUES_PER_SIMULATION: usize = 250;
pub const MAX_PICTURES_PER_SIMULATION: usize = 100;
pub const MAX_CURVES_PER_SIMULATION: usize = 100;

/// Which report layout to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReportType {
    /// Cumulative report over simulations run with a single solver.
    SingleSolver,
    /// Cross-solver benchmark comparison (layout not implemented yet).
    Benchmark,
}

/// Acceptance criterion attached to a loadcase target value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetCriterion {
    Eq,
    Lt,
    #[serde(rename = "lte")]
    Le,
    Gt,
    #[serde(rename = "gte")]
    Ge,
    Tolerance,
    Interval,
}

/// A loadcase target value with its acceptance criterion.
///
/// Which of the optional fields are populated depends on the criterion:
/// `tolerance` only for [`TargetCriterion::Tolerance`], `left`/`right` only
/// for [`TargetCriterion::Interval`], `value` for everything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetValue {
    pub id: u64,
    pub name: String,
    pub criterion: TargetCriterion,
    pub dimension: String,
    pub value: Option<f64>,
    pub tolerance: Option<f64>,
    pub left: Option<f64>,
    pub right: Option<f64>,
}

/// A loadcase target: either a scalar acceptance value or a reference curve.
///
/// Target curves are not stored on the loadcase itself; they are the curves of
/// the simulation the user designates as target.
#[derive(Debug, Clone)]
pub enum Target {
    Value(TargetValue),
    Curve(Curve),
}

/// A scalar key result of a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyValue {
    pub id: u64,
    pub name: String,
    /// Rendered value, kept as text since the server mixes numeric types.
    pub value: String,
    /// Unit suffix as displayed by the server (may be empty).
    pub dimension: String,
}

/// A picture key result, fetched and embedded as a data URI.
#[derive(Debug, Clone)]
pub struct Picture {
    pub id: u64,
    pub name: String,
    pub content: String,
}

/// Execution info for one solver task of a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub cores: u32,
    /// Peak memory in MB.
    pub memory: u64,
    pub status: String,
}

/// A curve key result: paired abscissa/ordinate samples plus display metadata.
///
/// The comparison core only consumes `x`/`y`; the rest is carried for
/// rendering and placeholder naming.
#[derive(Debug, Clone)]
pub struct Curve {
    pub id: u64,
    pub name: String,
    pub is_target: bool,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Rendered chart as an SVG data URI.
    pub picture: String,
}

/// One fetched simulation with all its key results.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub id: u64,
    pub name: String,
    pub is_target: bool,
    pub tasks: Vec<Task>,
    pub values: Vec<KeyValue>,
    pub pictures: Vec<Picture>,
    pub curves: Vec<Curve>,
}

/// A curve from one simulation, grouped with same-named curves from others.
#[derive(Debug, Clone)]
pub struct GroupMember {
    pub sim_name: String,
    pub curve: Curve,
}

/// All same-named curves across the selected simulations, plus the combined
/// chart rendered from them.
#[derive(Debug, Clone)]
pub struct ComparisonGroup {
    pub curve_name: String,
    pub members: Vec<GroupMember>,
    pub picture: String,
}

/// Everything fetched for one loadcase, fully materialized.
#[derive(Debug, Clone)]
pub struct Loadcase {
    pub id: u64,
    pub simulations: Vec<Simulation>,
    pub targets: Vec<Target>,
    pub groups: Vec<ComparisonGroup>,
}

/// Deviation metrics of one simulation curve against its target, in the units
/// the report displays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurveMetrics {
    /// Relative squared-area deviation in percent; `None` when the target's
    /// area metric is zero and the ratio is undefined.
    pub relative_area_pct: Option<f64>,
    pub sum_of_squares: f64,
    pub max_deviation: f64,
}

impl From<CurveComparison> for CurveMetrics {
    fn from(cmp: CurveComparison) -> Self {
        Self {
            relative_area_pct: cmp.area.ratio.map(|r| r * 100.0),
            sum_of_squares: cmp.sum_of_squares,
            max_deviation: cmp.max_deviation,
        }
    }
}

/// Result of comparing one simulation curve against its same-named target
/// curve.
///
/// A failed comparison carries its validation error instead of metrics; one
/// bad pair never aborts the other comparisons.
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    pub sim_name: String,
    pub curve_name: String,
    pub result: Result<CurveMetrics, crate::math::CompareError>,
}

/// A saved curve file (JSON).
///
/// The portable representation used by `br compare` and `br plot` for working
/// with curves outside a server session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub name: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// A full report run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags plus environment defaults.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub base_url: String,
    pub session: Option<String>,
    pub loadcase_id: u64,
    pub simulation_ids: Vec<u64>,
    /// Simulation whose curves become the comparison targets.
    pub target_simulation: Option<u64>,
    pub report_type: ReportType,
    pub template_path: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub export_metrics: Option<PathBuf>,
}
