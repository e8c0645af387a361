//! src/charts/mod.rs

mod heatmap;
mod pie;
mod xy;

pub use heatmap::render_heatmap;

use crate::dataset::{Column, Dataset, Dtype};
use crate::error::error_chain_fmt;
use plotters::drawing::DrawingAreaErrorKind;

/// Width and height of every rendered chart in pixels.
const CHART_SIZE: (u32, u32) = (900, 560);
/// Axis labels beyond this count are thinned out by the mesh.
const MAX_AXIS_LABELS: usize = 30;

#[derive(thiserror::Error)]
pub enum ChartError {
    #[error("No numeric columns found in the dataset to generate a heatmap.")]
    NoNumericColumns,
    #[error("Pie chart requires categorical data for 'names' and numerical data for 'values'.")]
    PieRequiresCategoricalAndNumeric,
    #[error("Column `{0}` does not exist.")]
    UnknownColumn(String),
    #[error("There is nothing to plot for the selected columns.")]
    NothingToPlot,
    #[error("Failed to draw the chart.")]
    Drawing(#[source] anyhow::Error),
}

impl std::fmt::Debug for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

fn drawing_error<E>(e: DrawingAreaErrorKind<E>) -> ChartError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ChartError::Drawing(anyhow::Error::new(e))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlotType {
    #[default]
    Bar,
    Line,
    Scatter,
    Pie,
}

impl PlotType {
    pub const ALL: [PlotType; 4] = [PlotType::Bar, PlotType::Line, PlotType::Scatter, PlotType::Pie];

    pub fn label(&self) -> &'static str {
        match self {
            PlotType::Bar => "Bar Chart",
            PlotType::Line => "Line Chart",
            PlotType::Scatter => "Scatter Plot",
            PlotType::Pie => "Pie Chart",
        }
    }

    /// Form value of the plot type.
    pub fn value(&self) -> &'static str {
        match self {
            PlotType::Bar => "bar",
            PlotType::Line => "line",
            PlotType::Scatter => "scatter",
            PlotType::Pie => "pie",
        }
    }
}

/// Render the selected chart of `y_col` over `x_col` as inline svg.
#[tracing::instrument(name = "Render chart", skip(dataset))]
pub fn render_chart(
    dataset: &Dataset,
    plot_type: PlotType,
    x_col: &str,
    y_col: &str,
) -> Result<String, ChartError> {
    let x = dataset
        .column(x_col)
        .ok_or_else(|| ChartError::UnknownColumn(x_col.to_string()))?;
    let y = dataset
        .column(y_col)
        .ok_or_else(|| ChartError::UnknownColumn(y_col.to_string()))?;
    match plot_type {
        PlotType::Pie => {
            if x.dtype() != Dtype::Object || !y.is_numeric() {
                return Err(ChartError::PieRequiresCategoricalAndNumeric);
            }
            pie::render_pie(x, y)
        }
        PlotType::Bar | PlotType::Line | PlotType::Scatter => xy::render_xy(plot_type, x, y),
    }
}

/// Sum of the numeric `y` values per distinct `x` value, in order of first appearance.
fn grouped_sums(x: &Column, y: &Column) -> Vec<(String, f64)> {
    sum_by_label(x, y.numeric_values().unwrap_or_default())
}

/// Sum of `values` per distinct label in `labels`; rows with a missing label
/// or value are skipped.
fn sum_by_label(labels: &Column, values: impl IntoIterator<Item = Option<f64>>) -> Vec<(String, f64)> {
    let mut groups: Vec<(String, f64)> = Vec::new();
    for (row, value) in values.into_iter().enumerate() {
        let (Some(label), Some(value)) = (labels.value(row), value) else {
            continue;
        };
        if value.is_nan() {
            continue;
        }
        match groups.iter_mut().find(|(l, _)| *l == label) {
            Some(group) => group.1 += value,
            None => groups.push((label, value)),
        }
    }
    groups
}

/// Axis range covering `values` with a little head room.
fn axis_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}
