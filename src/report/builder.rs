//! Built-in report layout, used when no template is supplied.
//!
//! The single-solver layout is one styled table: a row group per simulation
//! with task info, key-result values, and embedded pictures.

use crate::domain::{Loadcase, ReportType, Simulation};

/// Build the default report for the given layout.
pub fn build_default_report(report_type: ReportType, loadcase: &Loadcase) -> String {
    match report_type {
        ReportType::SingleSolver => build_single_solver_report(loadcase),
        // The cross-solver layout needs solver names, which the server does
        // not expose on the simulation entity yet.
        ReportType::Benchmark => "Benchmark report stub".to_string(),
    }
}

fn build_single_solver_report(loadcase: &Loadcase) -> String {
    let mut rows = String::new();
    for sim in &loadcase.simulations {
        rows.push_str(&simulation_rows(sim));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        <style>
            body {{
                background: #dedede;
            }}
            h1 {{
                text-align: center;
                font-family: Helvetica, sans-serif;
                font-size: 24px;
                color: #fe6420;
            }}
            table, td, th {{
                text-align: center;
                border: solid 1px #696969;
            }}
            table {{
                width: 100%;
                border-collapse: collapse;
            }}
            th {{
                background: #ababab;
            }}
        </style>
        <title>
            Single solver cumulative report
        </title>
    </head>
    <body>
        <h1>
            Single solver report
        </h1>
        <table>
{header}{rows}
        </table>
        <p style="font-family: Helvetica, sans-serif; font-size: 12px;">
            Generated {stamp}
        </p>
    </body>
</html>
"#,
        header = table_header(),
        stamp = chrono::Local::now().format("%Y-%m-%d %H:%M"),
    )
}

fn table_header() -> &'static str {
    r#"            <tr>
                <th rowspan="2" width="10%">
                    Simulation ID
                </th>
                <th rowspan="2" width="40%">
                    Simulation name
                </th>
                <th colspan="2" width="20%">
                    Last task info
                </th>
                <th colspan="3" width="30%">
                    Key results
                </th>
            </tr>
            <tr>
                <th width="10%">
                    Cores
                </th>
                <th width="10%">
                    Memory
                </th>
                <th width="10%">
                    Name
                </th>
                <th width="10%">
                    Value
                </th>
                <th width="10%">
                    Dimension
                </th>
            </tr>
"#
}

/// Rows for one simulation: the first row carries the id/name/task cells with
/// a rowspan covering every value and picture row below it.
fn simulation_rows(sim: &Simulation) -> String {
    let n_rows = (sim.values.len() + sim.pictures.len()).max(1);
    let (cores, memory) = match sim.tasks.first() {
        Some(t) => (t.cores.to_string(), format!("{} MB", t.memory)),
        None => ("-".to_string(), "-".to_string()),
    };

    let mut out = String::new();
    out.push_str(&format!(
        r#"            <tr>
                <td rowspan="{n_rows}">
                    {id}
                </td>
                <td rowspan="{n_rows}">
                    {name}
                </td>
                <td rowspan="{n_rows}">
                    {cores}
                </td>
                <td rowspan="{n_rows}">
                    {memory}
                </td>
"#,
        id = sim.id,
        name = sim.name,
    ));

    match sim.values.first() {
        Some(v) => out.push_str(&format!(
            "                <td>{}</td>\n                <td>{}</td>\n                <td>{}</td>\n            </tr>\n",
            v.name, v.value, v.dimension
        )),
        None => out.push_str("                <td colspan=\"3\">-</td>\n            </tr>\n"),
    }

    for v in sim.values.iter().skip(1) {
        out.push_str(&format!(
            "            <tr>\n                <td>{}</td>\n                <td>{}</td>\n                <td>{}</td>\n            </tr>\n",
            v.name, v.value, v.dimension
        ));
    }

    for p in &sim.pictures {
        out.push_str(&format!(
            "            <tr>\n                <td>{name}</td>\n                <td colspan=\"2\"><img alt=\"{name}\" src=\"{src}\" width=\"20%\"></td>\n            </tr>\n",
            name = p.name,
            src = p.content,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{KeyValue, Picture, Task};

    fn loadcase() -> Loadcase {
        Loadcase {
            id: 1,
            simulations: vec![Simulation {
                id: 42,
                name: "Crash run".to_string(),
                is_target: false,
                tasks: vec![Task {
                    id: 7,
                    cores: 32,
                    memory: 8192,
                    status: "FINISHED".to_string(),
                }],
                values: vec![
                    KeyValue {
                        id: 1,
                        name: "Max force".to_string(),
                        value: "1.25".to_string(),
                        dimension: "kN".to_string(),
                    },
                    KeyValue {
                        id: 2,
                        name: "Energy".to_string(),
                        value: "3.5".to_string(),
                        dimension: "kJ".to_string(),
                    },
                ],
                pictures: vec![Picture {
                    id: 3,
                    name: "Deformation".to_string(),
                    content: "data:image/png;base64,AAAA".to_string(),
                }],
                curves: Vec::new(),
            }],
            targets: Vec::new(),
            groups: Vec::new(),
        }
    }

    #[test]
    fn single_solver_report_is_complete_html() {
        let html = build_default_report(ReportType::SingleSolver, &loadcase());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Single solver report"));
        assert!(html.contains("Crash run"));
        assert!(html.contains("Max force"));
        assert!(html.contains("8192 MB"));
        // One value row + one picture row share the rowspan with the first row.
        assert!(html.contains("rowspan=\"3\""));
        assert!(html.contains("data:image/png;base64,AAAA"));
    }

    #[test]
    fn simulation_without_results_still_renders() {
        let mut lc = loadcase();
        lc.simulations[0].values.clear();
        lc.simulations[0].pictures.clear();
        lc.simulations[0].tasks.clear();
        let html = build_default_report(ReportType::SingleSolver, &lc);
        assert!(html.contains("rowspan=\"1\""));
        assert!(html.contains("<td colspan=\"3\">-</td>"));
    }

    #[test]
    fn benchmark_layout_is_stubbed() {
        let html = build_default_report(ReportType::Benchmark, &loadcase());
        assert_eq!(html, "Benchmark report stub");
    }
}
