//! src/charts/pie.rs

use super::{drawing_error, grouped_sums, ChartError, PlotType, CHART_SIZE};
use crate::dataset::Column;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;

/// Arc resolution of a slice outline in radians.
const ARC_STEP: f64 = PI / 90.0;

pub(super) fn render_pie(names: &Column, values: &Column) -> Result<String, ChartError> {
    let slices: Vec<(String, f64)> = grouped_sums(names, values)
        .into_iter()
        .filter(|(_, v)| *v > 0.0)
        .collect();
    let total: f64 = slices.iter().map(|s| s.1).sum();
    if slices.is_empty() || total <= 0.0 {
        return Err(ChartError::NothingToPlot);
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;
        let area = root
            .titled(PlotType::Pie.label(), ("sans-serif", 24))
            .map_err(drawing_error)?;
        let (width, height) = area.dim_in_pixel();
        let center = (width as f64 / 2.0, height as f64 / 2.0);
        let radius = (width.min(height) as f64 / 2.0) * 0.85;
        let label_style = ("sans-serif", 14)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));

        let mut start = -PI / 2.0;
        for (index, (name, value)) in slices.iter().enumerate() {
            let sweep = value / total * 2.0 * PI;
            let end = start + sweep;
            let mut outline = vec![to_pixel(center, 0.0, 0.0)];
            let mut angle = start;
            while angle < end {
                outline.push(to_pixel(center, radius, angle));
                angle += ARC_STEP;
            }
            outline.push(to_pixel(center, radius, end));
            area.draw(&Polygon::new(outline, Palette99::pick(index).filled()))
                .map_err(drawing_error)?;

            let middle = start + sweep / 2.0;
            let label = format!("{} ({:.1}%)", name, value / total * 100.0);
            area.draw(&Text::new(
                label,
                to_pixel(center, radius * 0.65, middle),
                label_style.clone(),
            ))
            .map_err(drawing_error)?;
            start = end;
        }
        root.present().map_err(drawing_error)?;
    }
    Ok(svg)
}

fn to_pixel(center: (f64, f64), radius: f64, angle: f64) -> (i32, i32) {
    (
        (center.0 + radius * angle.cos()).round() as i32,
        (center.1 + radius * angle.sin()).round() as i32,
    )
}
