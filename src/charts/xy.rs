//! src/charts/xy.rs

use super::{axis_bounds, drawing_error, grouped_sums, sum_by_label, ChartError, PlotType, CHART_SIZE, MAX_AXIS_LABELS};
use crate::dataset::Column;
use plotters::prelude::*;
use std::collections::HashMap;

pub(super) fn render_xy(plot_type: PlotType, x: &Column, y: &Column) -> Result<String, ChartError> {
    match plot_type {
        PlotType::Bar => render_bar(x, y),
        _ => render_points(plot_type, x, y),
    }
}

/// One bar per category.
struct Bars {
    groups: Vec<(String, f64)>,
    horizontal: bool,
    category_desc: String,
    value_desc: String,
}

impl Bars {
    /// Numeric y: sum of y per x value. Numeric x over categorical y: horizontal
    /// bars summing x per y value. Two categorical columns: rows per x value.
    fn of(x: &Column, y: &Column) -> Bars {
        match (x.is_numeric(), y.is_numeric()) {
            (_, true) => Bars {
                groups: sorted_sums(x, y),
                horizontal: false,
                category_desc: x.name.clone(),
                value_desc: y.name.clone(),
            },
            (true, false) => Bars {
                groups: grouped_sums(y, x),
                horizontal: true,
                category_desc: y.name.clone(),
                value_desc: x.name.clone(),
            },
            (false, false) => Bars {
                groups: sum_by_label(x, (0..y.len()).map(|row| y.value(row).map(|_| 1.0))),
                horizontal: false,
                category_desc: x.name.clone(),
                value_desc: format!("count of {}", y.name),
            },
        }
    }
}

/// Grouped sums of `y` over `x`, ordered by value when `x` is numeric.
fn sorted_sums(x: &Column, y: &Column) -> Vec<(String, f64)> {
    let mut groups = grouped_sums(x, y);
    let Some(x_values) = x.numeric_values() else {
        return groups;
    };
    let keys: HashMap<String, f64> = x_values
        .into_iter()
        .enumerate()
        .filter_map(|(row, value)| Some((x.value(row)?, value?)))
        .collect();
    let key = |label: &str| keys.get(label).copied().unwrap_or(f64::NAN);
    groups.sort_by(|a, b| key(&a.0).total_cmp(&key(&b.0)));
    groups
}

fn render_bar(x: &Column, y: &Column) -> Result<String, ChartError> {
    let bars = Bars::of(x, y);
    if bars.groups.is_empty() {
        return Err(ChartError::NothingToPlot);
    }
    let groups = &bars.groups;
    let n = groups.len() as i32;
    let (v_min, v_max) = axis_bounds(groups.iter().map(|g| g.1).chain(std::iter::once(0.0)));
    let format_category = |v: &SegmentValue<i32>| match v {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => groups
            .get(*i as usize)
            .map(|g| g.0.clone())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };
    let extent = |value: f64| if value >= 0.0 { (0.0, value) } else { (value, 0.0) };
    let style = BLUE.mix(0.6).filled();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;
        let mut builder = ChartBuilder::on(&root);
        builder
            .caption(PlotType::Bar.label(), ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100);
        if bars.horizontal {
            let mut chart = builder
                .build_cartesian_2d(v_min..v_max, (0..n).into_segmented())
                .map_err(drawing_error)?;
            chart
                .configure_mesh()
                .disable_y_mesh()
                .y_labels(groups.len().min(MAX_AXIS_LABELS))
                .y_label_formatter(&format_category)
                .x_desc(bars.value_desc.as_str())
                .y_desc(bars.category_desc.as_str())
                .draw()
                .map_err(drawing_error)?;
            chart
                .draw_series(groups.iter().enumerate().map(|(i, (_, value))| {
                    let i = i as i32;
                    let (low, high) = extent(*value);
                    Rectangle::new(
                        [(low, SegmentValue::Exact(i + 1)), (high, SegmentValue::Exact(i))],
                        style,
                    )
                }))
                .map_err(drawing_error)?;
        } else {
            let mut chart = builder
                .build_cartesian_2d((0..n).into_segmented(), v_min..v_max)
                .map_err(drawing_error)?;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(groups.len().min(MAX_AXIS_LABELS))
                .x_label_formatter(&format_category)
                .x_desc(bars.category_desc.as_str())
                .y_desc(bars.value_desc.as_str())
                .draw()
                .map_err(drawing_error)?;
            chart
                .draw_series(groups.iter().enumerate().map(|(i, (_, value))| {
                    let i = i as i32;
                    let (low, high) = extent(*value);
                    Rectangle::new(
                        [(SegmentValue::Exact(i), high), (SegmentValue::Exact(i + 1), low)],
                        style,
                    )
                }))
                .map_err(drawing_error)?;
        }
        root.present().map_err(drawing_error)?;
    }
    Ok(svg)
}

/// Position of every row on one axis. Numeric columns keep their values,
/// other columns are placed at the index of the value's first appearance.
struct AxisValues {
    positions: Vec<Option<f64>>,
    categories: Option<Vec<String>>,
}

impl AxisValues {
    fn of(column: &Column) -> AxisValues {
        if let Some(positions) = column.numeric_values() {
            return AxisValues {
                positions,
                categories: None,
            };
        }
        let mut categories: Vec<String> = Vec::new();
        let positions = (0..column.len())
            .map(|row| {
                let label = column.value(row)?;
                let index = match categories.iter().position(|c| *c == label) {
                    Some(index) => index,
                    None => {
                        categories.push(label);
                        categories.len() - 1
                    }
                };
                Some(index as f64)
            })
            .collect();
        AxisValues {
            positions,
            categories: Some(categories),
        }
    }

    fn label(&self, v: f64) -> String {
        self.categories
            .as_deref()
            .map(|categories| category_label(categories, v))
            .unwrap_or_default()
    }
}

fn points(x: &AxisValues, y: &AxisValues) -> Vec<(f64, f64)> {
    x.positions
        .iter()
        .zip(&y.positions)
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .collect()
}

fn category_label(categories: &[String], v: f64) -> String {
    let rounded = v.round();
    if (v - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories.get(rounded as usize).cloned().unwrap_or_default()
}

fn render_points(plot_type: PlotType, x: &Column, y: &Column) -> Result<String, ChartError> {
    let x_axis = AxisValues::of(x);
    let y_axis = AxisValues::of(y);
    let points = points(&x_axis, &y_axis);
    if points.is_empty() {
        return Err(ChartError::NothingToPlot);
    }
    let (x_min, x_max) = axis_bounds(points.iter().map(|p| p.0));
    let (y_min, y_max) = axis_bounds(points.iter().map(|p| p.1));
    let format_x = |v: &f64| x_axis.label(*v);
    let format_y = |v: &f64| y_axis.label(*v);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(plot_type.label(), ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(drawing_error)?;
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(x.name.as_str()).y_desc(y.name.as_str());
        if let Some(categories) = &x_axis.categories {
            mesh.x_labels(categories.len().min(MAX_AXIS_LABELS))
                .x_label_formatter(&format_x);
        }
        if let Some(categories) = &y_axis.categories {
            mesh.y_labels(categories.len().min(MAX_AXIS_LABELS))
                .y_label_formatter(&format_y);
        }
        mesh.draw().map_err(drawing_error)?;
        match plot_type {
            PlotType::Line => {
                chart
                    .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
                    .map_err(drawing_error)?;
            }
            _ => {
                chart
                    .draw_series(points.iter().map(|p| Circle::new(*p, 4, BLUE.mix(0.7).filled())))
                    .map_err(drawing_error)?;
            }
        }
        root.present().map_err(drawing_error)?;
    }
    Ok(svg)
}
