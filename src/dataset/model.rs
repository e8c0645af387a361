//! src/dataset/model.rs

use std::collections::HashMap;
use std::fmt;

/// Cell as delivered by a file reader, before column types are inferred.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

/// Spellings which count as a missing value in text based files.
const MISSING_MARKERS: [&str; 12] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "NULL", "null", "None", "#N/A", "<NA>",
];

impl RawCell {
    /// Classify a text field from a CSV file.
    pub fn from_text(field: &str) -> RawCell {
        let trimmed = field.trim();
        if MISSING_MARKERS.contains(&trimmed) {
            RawCell::Empty
        } else if let Ok(i) = trimmed.parse::<i64>() {
            RawCell::Int(i)
        } else if let Ok(f) = trimmed.parse::<f64>() {
            RawCell::Float(f)
        } else if trimmed.eq_ignore_ascii_case("true") {
            RawCell::Bool(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            RawCell::Bool(false)
        } else {
            RawCell::Text(field.to_owned())
        }
    }

    fn to_text(&self) -> Option<String> {
        match self {
            RawCell::Empty => None,
            RawCell::Int(i) => Some(i.to_string()),
            RawCell::Float(f) => Some(format_float(*f)),
            RawCell::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
            RawCell::Text(s) => Some(s.clone()),
        }
    }
}

/// Column type, named the way dataframe libraries name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    Int64,
    Float64,
    Bool,
    Object,
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dtype::Int64 => "int64",
            Dtype::Float64 => "float64",
            Dtype::Bool => "bool",
            Dtype::Object => "object",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Bool(Vec<Option<bool>>),
    Text(Vec<Option<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    /// Infer the narrowest type which holds every non-missing cell.
    pub fn infer(name: String, cells: Vec<RawCell>) -> Column {
        let present = cells.iter().filter(|c| **c != RawCell::Empty);
        let (mut ints, mut floats, mut bools, mut total) = (0, 0, 0, 0);
        for cell in present {
            total += 1;
            match cell {
                RawCell::Int(_) => ints += 1,
                RawCell::Float(_) => floats += 1,
                RawCell::Bool(_) => bools += 1,
                _ => {}
            }
        }
        let data = if total == 0 || (floats > 0 && ints + floats == total) {
            ColumnData::Float(
                cells
                    .into_iter()
                    .map(|c| match c {
                        RawCell::Int(i) => Some(i as f64),
                        RawCell::Float(f) if !f.is_nan() => Some(f),
                        _ => None,
                    })
                    .collect(),
            )
        } else if ints == total {
            ColumnData::Int(
                cells
                    .into_iter()
                    .map(|c| match c {
                        RawCell::Int(i) => Some(i),
                        _ => None,
                    })
                    .collect(),
            )
        } else if bools == total {
            ColumnData::Bool(
                cells
                    .into_iter()
                    .map(|c| match c {
                        RawCell::Bool(b) => Some(b),
                        _ => None,
                    })
                    .collect(),
            )
        } else {
            ColumnData::Text(cells.iter().map(RawCell::to_text).collect())
        };
        Column { name, data }
    }

    /// Infer from CSV fields; object columns keep the fields verbatim.
    pub fn from_text_fields(name: String, fields: Vec<String>) -> Column {
        let cells = fields.iter().map(|f| RawCell::from_text(f)).collect();
        let column = Column::infer(name, cells);
        match column.data {
            ColumnData::Text(_) => Column {
                name: column.name,
                data: ColumnData::Text(
                    fields
                        .into_iter()
                        .map(|f| (!MISSING_MARKERS.contains(&f.trim())).then_some(f))
                        .collect(),
                ),
            },
            _ => column,
        }
    }

    pub fn dtype(&self) -> Dtype {
        match self.data {
            ColumnData::Int(_) => Dtype::Int64,
            ColumnData::Float(_) => Dtype::Float64,
            ColumnData::Bool(_) => Dtype::Bool,
            ColumnData::Text(_) => Dtype::Object,
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.dtype(), Dtype::Int64 | Dtype::Float64)
    }

    /// Values as floats; `None` for non-numeric columns.
    pub fn numeric_values(&self) -> Option<Vec<Option<f64>>> {
        match &self.data {
            ColumnData::Int(v) => Some(v.iter().map(|i| i.map(|i| i as f64)).collect()),
            ColumnData::Float(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Display form of the value in `row`; `None` if missing.
    pub fn value(&self, row: usize) -> Option<String> {
        match &self.data {
            ColumnData::Int(v) => v.get(row).copied().flatten().map(|i| i.to_string()),
            ColumnData::Float(v) => v.get(row).copied().flatten().map(format_float),
            ColumnData::Bool(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|b| if b { "True" } else { "False" }.to_string()),
            ColumnData::Text(v) => v.get(row).cloned().flatten(),
        }
    }

    pub fn display_value(&self, row: usize) -> String {
        self.value(row).unwrap_or_else(|| "NaN".to_string())
    }
}

pub fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

/// Parsed tabular data with named, typed columns of equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset from a header row and data rows; short rows are padded
    /// with missing values. Blank headers become `Unnamed: <index>` and
    /// duplicated headers get a `.<n>` suffix.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<RawCell>>) -> Dataset {
        let headers = unique_headers(headers);
        let cells = transpose(headers.len(), rows, || RawCell::Empty);
        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| Column::infer(name, cells))
            .collect();
        Dataset { columns }
    }

    /// Like `from_rows`, for the text fields of a CSV file.
    pub fn from_text_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Dataset {
        let headers = unique_headers(headers);
        let fields = transpose(headers.len(), rows, String::new);
        let columns = headers
            .into_iter()
            .zip(fields)
            .map(|(name, fields)| Column::from_text_fields(name, fields))
            .collect();
        Dataset { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_numeric()).collect()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0 || self.columns.is_empty()
    }

    /// First `n` rows in display form.
    pub fn head(&self, n: usize) -> Vec<Vec<String>> {
        (0..self.n_rows().min(n))
            .map(|row| self.columns.iter().map(|c| c.display_value(row)).collect())
            .collect()
    }
}

fn transpose<T>(width: usize, rows: Vec<Vec<T>>, fill: impl Fn() -> T) -> Vec<Vec<T>> {
    let mut columns: Vec<Vec<T>> = (0..width).map(|_| Vec::with_capacity(rows.len())).collect();
    for row in rows {
        let mut row = row.into_iter();
        for column in columns.iter_mut() {
            column.push(row.next().unwrap_or_else(&fill));
        }
    }
    columns
}

fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(index, header)| {
            let header = header.trim().to_owned();
            let header = if header.is_empty() {
                format!("Unnamed: {}", index)
            } else {
                header
            };
            let count = seen.entry(header.clone()).or_insert(0);
            let unique = if *count == 0 {
                header
            } else {
                format!("{}.{}", header, count)
            };
            *count += 1;
            unique
        })
        .collect()
}
