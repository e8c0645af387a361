//! src/charts/heatmap.rs

use super::{drawing_error, ChartError, CHART_SIZE, MAX_AXIS_LABELS};
use crate::dataset::{correlation_matrix, Dataset};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Stops of the viridis color scale, from -1 to 1.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Color of a correlation coefficient; NaN is grey.
fn scale_color(r: f64) -> RGBColor {
    if r.is_nan() {
        return RGBColor(200, 200, 200);
    }
    let t = ((r.clamp(-1.0, 1.0) + 1.0) / 2.0) * (VIRIDIS.len() - 1) as f64;
    let lower = t.floor() as usize;
    let upper = (lower + 1).min(VIRIDIS.len() - 1);
    let frac = t - lower as f64;
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (VIRIDIS[lower], VIRIDIS[upper]);
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Correlation matrix of the numeric columns as inline svg.
#[tracing::instrument(name = "Render correlation heatmap", skip(dataset))]
pub fn render_heatmap(dataset: &Dataset) -> Result<String, ChartError> {
    let (names, matrix) = correlation_matrix(dataset);
    if names.is_empty() {
        return Err(ChartError::NoNumericColumns);
    }
    let n = names.len() as i32;
    // first column at the top, the y axis grows upwards
    let name_at = |v: &SegmentValue<i32>, flipped: bool| match v {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
            let index = if flipped { n - 1 - *i } else { *i };
            usize::try_from(index)
                .ok()
                .and_then(|index| names.get(index))
                .cloned()
                .unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    };
    let format_x = |v: &SegmentValue<i32>| name_at(v, false);
    let format_y = |v: &SegmentValue<i32>| name_at(v, true);
    let value_style =
        TextStyle::from(("sans-serif", 13).into_font()).pos(Pos::new(HPos::Center, VPos::Center));

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;
        let mut chart = ChartBuilder::on(&root)
            .caption("Heatmap of Correlation Matrix", ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(120)
            .build_cartesian_2d((0..n).into_segmented(), (0..n).into_segmented())
            .map_err(drawing_error)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(names.len().min(MAX_AXIS_LABELS))
            .y_labels(names.len().min(MAX_AXIS_LABELS))
            .x_label_formatter(&format_x)
            .y_label_formatter(&format_y)
            .draw()
            .map_err(drawing_error)?;

        let cells: Vec<(i32, i32, f64)> = matrix
            .iter()
            .enumerate()
            .flat_map(|(row, values)| {
                values
                    .iter()
                    .enumerate()
                    .map(move |(col, r)| (col as i32, n - 1 - row as i32, *r))
            })
            .collect();
        chart
            .draw_series(cells.iter().map(|(x, y, r)| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(*x), SegmentValue::Exact(*y)),
                        (SegmentValue::Exact(*x + 1), SegmentValue::Exact(*y + 1)),
                    ],
                    scale_color(*r).filled(),
                )
            }))
            .map_err(drawing_error)?;
        chart
            .draw_series(cells.iter().map(|(x, y, r)| {
                let text_color: &RGBColor = if r.is_nan() || *r > 0.0 { &BLACK } else { &WHITE };
                let label = if r.is_nan() {
                    "NaN".to_string()
                } else {
                    format!("{:.2}", r)
                };
                Text::new(
                    label,
                    (SegmentValue::CenterOf(*x), SegmentValue::CenterOf(*y)),
                    value_style.clone().color(text_color),
                )
            }))
            .map_err(drawing_error)?;
        root.present().map_err(drawing_error)?;
    }
    Ok(svg)
}
