//! REST client for the CAE benchmarking server.
//!
//! Every list endpoint is paged and POST-based: the request body carries a
//! filter set, a sort order, and a `pageable` block. Entity detail endpoints
//! are plain GETs. All responses are JSON except picture content, which is
//! served as raw image bytes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    MAX_CURVES_PER_SIMULATION, MAX_PICTURES_PER_SIMULATION, MAX_TARGETS_PER_LOADCASE,
    MAX_TASKS_PER_SIMULATION, MAX_VALUES_PER_SIMULATION, TargetValue, Task,
};
use crate::error::AppError;

/// Key-result types distinguished by the server's list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResultKind {
    Value,
    Picture,
    Curve,
}

impl KeyResultKind {
    fn filter_value(self) -> &'static str {
        match self {
            KeyResultKind::Value => "value",
            KeyResultKind::Picture => "picture",
            KeyResultKind::Curve => "curve",
        }
    }

    fn page_size(self) -> usize {
        match self {
            KeyResultKind::Value => MAX_VALUES_PER_SIMULATION,
            KeyResultKind::Picture => MAX_PICTURES_PER_SIMULATION,
            KeyResultKind::Curve => MAX_CURVES_PER_SIMULATION,
        }
    }
}

/// A key-result list entry (details are fetched separately).
#[derive(Debug, Clone)]
pub struct KeyResultEntry {
    pub id: u64,
    pub name: String,
    /// Rendered overview string, e.g. `"1.25 kN"` for a value result.
    pub overview: Option<String>,
}

/// Axes data of one curve key result.
#[derive(Debug, Clone)]
pub struct CurveAxes {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub x_label: String,
    pub y_label: String,
}

pub struct BenchClient {
    client: Client,
    base_url: String,
}

impl BenchClient {
    /// Build a client from explicit values, falling back to the environment
    /// (`BENCH_BASE_URL`, `BENCH_SESSION` in `.env`).
    pub fn from_env(base_url: Option<&str>, session: Option<&str>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = match base_url {
            Some(u) => u.to_string(),
            None => std::env::var("BENCH_BASE_URL")
                .map_err(|_| AppError::new(2, "Missing server URL (--url or BENCH_BASE_URL in .env)."))?,
        };
        let session = match session {
            Some(s) => Some(s.to_string()),
            None => std::env::var("BENCH_SESSION").ok(),
        };

        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(session) = session {
            let cookie = format!("JSESSIONID={session}");
            let value = reqwest::header::HeaderValue::from_str(&cookie)
                .map_err(|_| AppError::new(2, "Invalid session token."))?;
            headers.insert(reqwest::header::COOKIE, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/{path}", self.base_url)
    }

    /// Fetch a simulation's id and name.
    pub fn fetch_simulation_summary(&self, id: u64) -> Result<(u64, String), AppError> {
        let body: SimulationPayload = self.get_json(&self.url(&format!("simulation/{id}")))?;
        Ok((body.id, body.name))
    }

    /// List the ids of a simulation's solver tasks (most recent first).
    pub fn fetch_task_ids(&self, simulation_id: u64) -> Result<Vec<u64>, AppError> {
        let resp = self.post_list(
            &self.url(&format!("simulation/{simulation_id}/task/list")),
            None,
            MAX_TASKS_PER_SIMULATION,
        )?;
        Ok(resp.content.into_iter().map(|e| e.id).collect())
    }

    /// Fetch one solver task's execution info.
    pub fn fetch_task(&self, id: u64) -> Result<Task, AppError> {
        let body: TaskPayload = self.get_json(&self.url(&format!("task/{id}")))?;
        Ok(Task {
            id: body.id,
            cores: body.num_of_cores,
            memory: body.memory,
            status: body.status,
        })
    }

    /// List a simulation's key results of one type.
    pub fn fetch_key_results(
        &self,
        simulation_id: u64,
        kind: KeyResultKind,
    ) -> Result<Vec<KeyResultEntry>, AppError> {
        let resp = self.post_list(
            &self.url(&format!("simulation/{simulation_id}/keyResult/list")),
            Some(("type", kind.filter_value())),
            kind.page_size(),
        )?;
        Ok(resp
            .content
            .into_iter()
            .map(|e| KeyResultEntry {
                id: e.id,
                name: e.name,
                overview: e.overview.and_then(|o| o.content),
            })
            .collect())
    }

    /// Fetch a value key result's raw value.
    ///
    /// The detail payload keys the value under the result's own name.
    pub fn fetch_value_detail(
        &self,
        simulation_id: u64,
        id: u64,
        name: &str,
    ) -> Result<Option<serde_json::Value>, AppError> {
        let body: serde_json::Value =
            self.get_json(&self.url(&format!("simulation/{simulation_id}/keyResult/{id}")))?;
        Ok(body.get(name).cloned())
    }

    /// Fetch a curve key result's axes data.
    pub fn fetch_curve_axes(&self, simulation_id: u64, id: u64) -> Result<CurveAxes, AppError> {
        let body: CurveDetailPayload =
            self.get_json(&self.url(&format!("simulation/{simulation_id}/keyResult/{id}")))?;
        let chart = body.chart;

        // The server is inconsistent about numeric types in chart arrays;
        // some exports carry the samples as strings.
        let x = parse_axis(&chart.x)?;
        let y = parse_axis(&chart.y)?;

        Ok(CurveAxes {
            x,
            y,
            x_label: chart.x_axis_label.unwrap_or_default(),
            y_label: chart.y_axis_label.unwrap_or_default(),
        })
    }

    /// Fetch a picture key result's content as a base64 data URI.
    pub fn fetch_picture(&self, simulation_id: u64, id: u64) -> Result<String, AppError> {
        let url = self.url(&format!("simulation/{simulation_id}/keyResult/{id}"));
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::new(4, format!("Picture request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Picture request failed with status {}.", resp.status()),
            ));
        }

        let mime = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/png")
            .to_string();
        let bytes = resp
            .bytes()
            .map_err(|e| AppError::new(4, format!("Failed to read picture bytes: {e}")))?;

        Ok(format!("data:{mime};base64,{}", BASE64.encode(&bytes)))
    }

    /// List a loadcase's target values.
    pub fn fetch_loadcase_targets(&self, loadcase_id: u64) -> Result<Vec<TargetValue>, AppError> {
        let url = self.url(&format!("loadcase/{loadcase_id}/dependentTarget/list"));
        let request = ListRequest::paged(None, MAX_TARGETS_PER_LOADCASE);
        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| AppError::new(4, format!("Target list request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Target list request failed with status {}.", resp.status()),
            ));
        }

        let body: TargetListResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse target list: {e}")))?;

        let mut out = Vec::with_capacity(body.content.len());
        for entry in body.content {
            out.push(target_from_entry(entry));
        }
        Ok(out)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::new(4, format!("Request to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Request to {url} failed with status {}.", resp.status()),
            ));
        }

        resp.json()
            .map_err(|e| AppError::new(4, format!("Failed to parse response from {url}: {e}")))
    }

    fn post_list(
        &self,
        url: &str,
        filter: Option<(&str, &str)>,
        size: usize,
    ) -> Result<ListResponse, AppError> {
        let request = ListRequest::paged(filter, size);
        let resp = self
            .client
            .post(url)
            .json(&request)
            .send()
            .map_err(|e| AppError::new(4, format!("List request to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("List request to {url} failed with status {}.", resp.status()),
            ));
        }

        resp.json()
            .map_err(|e| AppError::new(4, format!("Failed to parse list response from {url}: {e}")))
    }
}

// -- request/response payloads --------------------------------------------

#[derive(Debug, Serialize)]
struct ListRequest {
    filters: ListFilters,
    sort: Vec<String>,
    pageable: Pageable,
}

#[derive(Debug, Serialize)]
struct ListFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    list: Option<Vec<ListFilter>>,
}

#[derive(Debug, Serialize)]
struct ListFilter {
    name: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct Pageable {
    size: usize,
    page: usize,
}

impl ListRequest {
    fn paged(filter: Option<(&str, &str)>, size: usize) -> Self {
        Self {
            filters: ListFilters {
                list: filter.map(|(name, value)| {
                    vec![ListFilter {
                        name: name.to_string(),
                        value: value.to_string(),
                    }]
                }),
            },
            sort: Vec::new(),
            pageable: Pageable { size, page: 1 },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    content: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    id: u64,
    #[serde(default)]
    name: String,
    overview: Option<Overview>,
}

#[derive(Debug, Deserialize)]
struct Overview {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SimulationPayload {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TaskPayload {
    id: u64,
    memory: u64,
    #[serde(rename = "numOfCores")]
    num_of_cores: u32,
    status: String,
}

#[derive(Debug, Deserialize)]
struct CurveDetailPayload {
    chart: ChartPayload,
}

#[derive(Debug, Deserialize)]
struct ChartPayload {
    x: Vec<serde_json::Value>,
    y: Vec<serde_json::Value>,
    #[serde(rename = "xAxisLabel")]
    x_axis_label: Option<String>,
    #[serde(rename = "yAxisLabel")]
    y_axis_label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TargetListResponse {
    content: Vec<TargetEntry>,
}

#[derive(Debug, Deserialize)]
struct TargetEntry {
    id: u64,
    name: String,
    value: TargetValuePayload,
}

#[derive(Debug, Deserialize)]
struct TargetValuePayload {
    criterion: crate::domain::TargetCriterion,
    #[serde(default)]
    unit: Option<String>,
    #[serde(rename = "valueData")]
    value_data: TargetValueData,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TargetValueData {
    value: Option<f64>,
    tolerance: Option<f64>,
    left: Option<f64>,
    right: Option<f64>,
}

fn target_from_entry(entry: TargetEntry) -> TargetValue {
    use crate::domain::TargetCriterion;

    let criterion = entry.value.criterion;
    let data = entry.value.value_data;
    TargetValue {
        id: entry.id,
        name: entry.name,
        criterion,
        dimension: entry.value.unit.unwrap_or_default(),
        value: if criterion == TargetCriterion::Interval {
            None
        } else {
            data.value
        },
        tolerance: if criterion == TargetCriterion::Tolerance {
            data.tolerance
        } else {
            None
        },
        left: if criterion == TargetCriterion::Interval {
            data.left
        } else {
            None
        },
        right: if criterion == TargetCriterion::Interval {
            data.right
        } else {
            None
        },
    }
}

/// Parse one chart axis, accepting both JSON numbers and numeric strings.
fn parse_axis(values: &[serde_json::Value]) -> Result<Vec<f64>, AppError> {
    let mut out = Vec::with_capacity(values.len());
    for v in values {
        let parsed = match v {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(x) if x.is_finite() => out.push(x),
            _ => {
                return Err(AppError::new(
                    4,
                    format!("Invalid numeric value '{v}' in curve axes data."),
                ));
            }
        }
    }
    Ok(out)
}

/// Strip a rendered value prefix from an overview string to get the unit.
///
/// The server renders value overviews as `"<value> <unit>"`, so the unit is
/// whatever remains after the value text.
pub fn dimension_from_overview(overview: &str, value: &str) -> String {
    let stripped = overview.strip_prefix(value).unwrap_or(overview);
    stripped.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_request_omits_empty_filters() {
        let req = ListRequest::paged(None, 10);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["filters"], serde_json::json!({}));
        assert_eq!(json["pageable"]["size"], 10);
        assert_eq!(json["pageable"]["page"], 1);
    }

    #[test]
    fn list_request_carries_type_filter() {
        let req = ListRequest::paged(Some(("type", "curve")), 100);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["filters"]["list"][0]["name"], "type");
        assert_eq!(json["filters"]["list"][0]["value"], "curve");
    }

    #[test]
    fn parse_axis_accepts_numbers_and_strings() {
        let values = vec![
            serde_json::json!(1.5),
            serde_json::json!("2.25"),
            serde_json::json!(" 3 "),
        ];
        let parsed = parse_axis(&values).unwrap();
        assert_eq!(parsed, vec![1.5, 2.25, 3.0]);
    }

    #[test]
    fn parse_axis_rejects_non_numeric_entries() {
        let values = vec![serde_json::json!("abc")];
        assert!(parse_axis(&values).is_err());
    }

    #[test]
    fn dimension_strips_value_prefix() {
        assert_eq!(dimension_from_overview("1.25 kN", "1.25"), "kN");
        assert_eq!(dimension_from_overview("42", "42"), "");
        // Overview not starting with the value is returned trimmed as-is.
        assert_eq!(dimension_from_overview("kN 1.25", "1.25"), "kN 1.25");
    }

    #[test]
    fn target_entry_maps_criterion_fields() {
        let entry: TargetEntry = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Max force",
            "value": {
                "criterion": "tolerance",
                "unit": "kN",
                "valueData": {"value": 10.0, "tolerance": 0.5}
            }
        }))
        .unwrap();
        let t = target_from_entry(entry);
        assert_eq!(t.value, Some(10.0));
        assert_eq!(t.tolerance, Some(0.5));
        assert_eq!(t.left, None);
        assert_eq!(t.dimension, "kN");
    }

    #[test]
    fn interval_target_keeps_bounds_only() {
        let entry: TargetEntry = serde_json::from_value(serde_json::json!({
            "id": 8,
            "name": "Displacement",
            "value": {
                "criterion": "interval",
                "unit": "mm",
                "valueData": {"left": 1.0, "right": 2.0, "value": 99.0}
            }
        }))
        .unwrap();
        let t = target_from_entry(entry);
        assert_eq!(t.value, None);
        assert_eq!(t.left, Some(1.0));
        assert_eq!(t.right, Some(2.0));
    }
}
