//! Plotters-powered chart rendering for report embedding.
//!
//! Charts are drawn into SVG strings (no native backend dependencies) and
//! embedded into the HTML report as base64 data URIs. One chart per curve,
//! plus one combined chart per comparison group.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use plotters::prelude::*;

use crate::domain::{Curve, GroupMember};
use crate::error::AppError;

const CHART_WIDTH: u32 = 960;
const CHART_HEIGHT: u32 = 540;

// High-contrast palette for overlaid series; cycled when a group has more
// members than colors.
const SERIES_COLORS: [RGBColor; 6] = [
    RGBColor(0, 114, 189),
    RGBColor(217, 83, 25),
    RGBColor(119, 172, 48),
    RGBColor(126, 47, 142),
    RGBColor(237, 177, 32),
    RGBColor(77, 190, 238),
];

const TARGET_COLOR: RGBColor = RGBColor(0, 0, 0);

/// Render a single curve as an SVG chart.
pub fn curve_chart_svg(curve: &Curve) -> Result<String, AppError> {
    let points: Vec<(f64, f64)> = curve.x.iter().copied().zip(curve.y.iter().copied()).collect();
    let (x_range, y_range) = bounds(std::iter::once(points.as_slice()))?;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&curve.name, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(&curve.x_label)
            .y_desc(&curve.y_label)
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(points, &SERIES_COLORS[0]))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Render all same-named curves from different simulations into one chart.
///
/// The target simulation's curve is labelled "Target" and drawn in black so it
/// stands out against the per-simulation series.
pub fn comparison_chart_svg(name: &str, members: &[GroupMember]) -> Result<String, AppError> {
    if members.is_empty() {
        return Err(AppError::new(4, format!("Comparison group '{name}' has no curves.")));
    }

    let series: Vec<Vec<(f64, f64)>> = members
        .iter()
        .map(|m| m.curve.x.iter().copied().zip(m.curve.y.iter().copied()).collect())
        .collect();
    let (x_range, y_range) = bounds(series.iter().map(|s| s.as_slice()))?;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(name, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(&members[0].curve.x_label)
            .y_desc(&members[0].curve.y_label)
            .draw()
            .map_err(render_err)?;

        for (i, (member, points)) in members.iter().zip(series).enumerate() {
            let color = if member.curve.is_target {
                TARGET_COLOR
            } else {
                SERIES_COLORS[i % SERIES_COLORS.len()]
            };
            let label = if member.curve.is_target {
                "Target".to_string()
            } else {
                member.sim_name.clone()
            };
            chart
                .draw_series(LineSeries::new(points, &color))
                .map_err(render_err)?
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Wrap an SVG string as a base64 data URI for HTML embedding.
pub fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", BASE64.encode(svg.as_bytes()))
}

/// Axis ranges covering all series, padded so flat curves stay visible.
fn bounds<'a>(
    series: impl Iterator<Item = &'a [(f64, f64)]>,
) -> Result<(std::ops::Range<f64>, std::ops::Range<f64>), AppError> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for points in series {
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }

    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return Err(AppError::new(4, "Cannot render chart from empty or non-finite curve data."));
    }

    if (x_max - x_min).abs() < 1e-12 {
        x_min -= 0.5;
        x_max += 0.5;
    }
    if (y_max - y_min).abs() < 1e-12 {
        y_min -= 0.5;
        y_max += 0.5;
    }

    let y_pad = (y_max - y_min) * 0.05;
    Ok((x_min..x_max, (y_min - y_pad)..(y_max + y_pad)))
}

fn render_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::new(4, format!("Failed to render chart: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> Curve {
        Curve {
            id: 1,
            name: "Force over time".to_string(),
            is_target: false,
            x_label: "Time, s".to_string(),
            y_label: "Force, kN".to_string(),
            x: vec![0.0, 1.0, 2.0, 3.0],
            y: vec![0.0, 2.0, 1.0, 3.0],
            picture: String::new(),
        }
    }

    #[test]
    fn curve_chart_produces_svg() {
        let svg = curve_chart_svg(&curve()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Force over time"));
    }

    #[test]
    fn flat_curve_still_renders() {
        let mut c = curve();
        c.y = vec![1.0, 1.0, 1.0, 1.0];
        let svg = curve_chart_svg(&c).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn comparison_chart_labels_target() {
        let mut target = curve();
        target.is_target = true;
        let members = vec![
            GroupMember {
                sim_name: "Run A".to_string(),
                curve: curve(),
            },
            GroupMember {
                sim_name: "Baseline".to_string(),
                curve: target,
            },
        ];
        let svg = comparison_chart_svg("Force over time", &members).unwrap();
        assert!(svg.contains("Target"));
        assert!(svg.contains("Run A"));
    }

    #[test]
    fn empty_group_is_rejected() {
        assert!(comparison_chart_svg("Force", &[]).is_err());
    }

    #[test]
    fn data_uri_is_base64_svg() {
        let uri = svg_data_uri("<svg></svg>");
        assert!(uri.starts_with("data:image/svg+xml;base64,"));
    }
}
