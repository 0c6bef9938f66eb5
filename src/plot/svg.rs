//! Plotters-powered SVG charts.
//!
//! One chart per file: epochs on the x axis, the series values on the y axis,
//! and a legend naming each series.

use std::path::Path;

use plotters::prelude::*;

use super::Series;
use crate::error::AppError;

/// Chart size in pixels.
const CHART_SIZE: (u32, u32) = (800, 600);

const PALETTE: [RGBColor; 3] = [RGBColor(31, 119, 180), RGBColor(255, 127, 14), RGBColor(44, 160, 44)];

/// Write a line chart of `series` to `path` as SVG.
pub fn write_svg_chart(path: &Path, caption: &str, y_desc: &str, series: &[Series]) -> Result<(), AppError> {
    draw_chart(path, caption, y_desc, series)
        .map_err(|e| AppError::input(format!("Failed to write chart '{}': {e}", path.display())))
}

fn draw_chart(path: &Path, caption: &str, y_desc: &str, series: &[Series]) -> Result<(), Box<dyn std::error::Error>> {
    let (x0, x1, y0, y1) = bounds(series);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(16)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc("Epoch")
        .y_desc(y_desc)
        .x_labels(10)
        .y_labels(8)
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.3}"))
        .draw()?;

    for (i, s) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        chart
            .draw_series(LineSeries::new(
                s.points.iter().copied().filter(|(_, y)| y.is_finite()),
                color.stroke_width(2),
            ))?
            .label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Axis bounds covering every finite point, with a little vertical headroom.
fn bounds(series: &[Series]) -> (f64, f64, f64, f64) {
    let mut x0 = f64::INFINITY;
    let mut x1 = f64::NEG_INFINITY;
    let mut y0 = f64::INFINITY;
    let mut y1 = f64::NEG_INFINITY;

    for &(x, y) in series.iter().flat_map(|s| s.points.iter()) {
        if !y.is_finite() {
            continue;
        }
        x0 = x0.min(x);
        x1 = x1.max(x);
        y0 = y0.min(y);
        y1 = y1.max(y);
    }

    if !(x0.is_finite() && x1.is_finite()) {
        return (0.0, 1.0, 0.0, 1.0);
    }
    if x1 <= x0 {
        x0 -= 0.5;
        x1 += 0.5;
    }
    let pad = ((y1 - y0).abs() * 0.05).max(1e-6);
    (x0, x1, y0 - pad, y1 + pad)
}
