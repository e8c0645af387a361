//! src/dashboard.rs

use crate::charts::{render_chart, render_heatmap, ChartError, PlotType};
use crate::dataset::{describe, read_file, value_counts, Dataset, DescribeTable, UploadedFile};
use crate::error::DeskResult;
use chrono::{DateTime, Utc};

/// Number of rows shown in the data preview.
pub const PREVIEW_ROWS: usize = 5;

/// Query of the dashboard sidebar form.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct DashboardOptions {
    #[serde(default)]
    pub show_dimensions: bool,
    #[serde(default)]
    pub show_descriptions: bool,
    #[serde(default)]
    pub show_statistics: bool,
    #[serde(default)]
    pub show_value_counts: bool,
    #[serde(default)]
    pub plot_type: PlotType,
    pub x_col: Option<String>,
    pub y_col: Option<String>,
}

/// A chart either rendered as svg or skipped with a message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Figure {
    Svg(String),
    Skipped(String),
}

impl Figure {
    /// Chart errors the user can fix by picking other columns become a
    /// message, drawing failures are passed on.
    fn from_render(result: Result<String, ChartError>) -> Result<Figure, ChartError> {
        match result {
            Ok(svg) => Ok(Figure::Svg(svg)),
            Err(e @ ChartError::Drawing(_)) => Err(e),
            Err(e) => Ok(Figure::Skipped(e.to_string())),
        }
    }
}

pub struct FieldDescription {
    pub name: String,
    pub dtype: String,
}

pub struct ValueCounts {
    pub column: String,
    pub counts: Vec<(String, usize)>,
}

/// Everything the dashboard shows for one uploaded file.
pub struct DashboardReport {
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub columns: Vec<String>,
    pub preview: Vec<Vec<String>>,
    pub dimensions: Option<(usize, usize)>,
    pub field_descriptions: Option<Vec<FieldDescription>>,
    pub statistics: Option<DescribeTable>,
    pub value_counts: Option<Vec<ValueCounts>>,
    pub heatmap: Figure,
    pub plot_type: PlotType,
    pub x_col: String,
    pub y_col: String,
    pub chart: Figure,
}

/// Selected column if it exists, otherwise the first column.
fn select_column(dataset: &Dataset, selected: Option<&str>) -> String {
    selected
        .filter(|name| dataset.column(name).is_some())
        .map(str::to_string)
        .or_else(|| dataset.columns().first().map(|c| c.name.clone()))
        .unwrap_or_default()
}

/// Run the whole pipeline on the stored upload: parse, derive the views and
/// render the charts. CPU bound, call it on the blocking pool.
#[tracing::instrument(
    name = "Build dashboard report",
    skip(file),
    fields(file_name = %file.file_name)
)]
pub fn build_report(file: &UploadedFile, options: &DashboardOptions) -> DeskResult<DashboardReport> {
    let dataset = read_file(&file.file_name, &file.bytes)?;
    let x_col = select_column(&dataset, options.x_col.as_deref());
    let y_col = select_column(&dataset, options.y_col.as_deref());

    let field_descriptions = options.show_descriptions.then(|| {
        dataset
            .columns()
            .iter()
            .map(|c| FieldDescription {
                name: c.name.clone(),
                dtype: c.dtype().to_string(),
            })
            .collect()
    });
    let value_counts = options.show_value_counts.then(|| {
        dataset
            .columns()
            .iter()
            .map(|c| ValueCounts {
                column: c.name.clone(),
                counts: value_counts(c),
            })
            .collect()
    });

    Ok(DashboardReport {
        file_name: file.file_name.clone(),
        uploaded_at: file.uploaded_at,
        columns: dataset.column_names(),
        preview: dataset.head(PREVIEW_ROWS),
        dimensions: options.show_dimensions.then(|| dataset.shape()),
        field_descriptions,
        statistics: options.show_statistics.then(|| describe(&dataset)),
        value_counts,
        heatmap: Figure::from_render(render_heatmap(&dataset))?,
        chart: Figure::from_render(render_chart(&dataset, options.plot_type, &x_col, &y_col))?,
        plot_type: options.plot_type,
        x_col,
        y_col,
    })
}
