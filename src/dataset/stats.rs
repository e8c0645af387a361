//! src/dataset/stats.rs

use crate::dataset::{Column, Dataset};
use std::collections::HashMap;

/// Row labelled table as produced by `describe`.
#[derive(Debug, Clone, PartialEq)]
pub struct DescribeTable {
    pub columns: Vec<String>,
    pub rows: Vec<(String, Vec<String>)>,
}

/// Quantile `q` in `[0, 1]` of sorted `values` with linear interpolation.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

fn format_stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", v)
    }
}

/// Summary statistics. Numeric columns get count, mean, std, min, quartiles and max;
/// without numeric columns every column gets count, unique, top and freq.
pub fn describe(dataset: &Dataset) -> DescribeTable {
    let numeric = dataset.numeric_columns();
    if numeric.is_empty() {
        describe_categorical(dataset.columns().iter().collect())
    } else {
        describe_numeric(numeric)
    }
}

fn describe_numeric(columns: Vec<&Column>) -> DescribeTable {
    let labels = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
    let mut rows: Vec<(String, Vec<String>)> =
        labels.iter().map(|l| (l.to_string(), Vec::new())).collect();
    for column in columns.iter() {
        let mut values: Vec<f64> = column
            .numeric_values()
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        values.sort_by(f64::total_cmp);
        let stats = [
            values.len() as f64,
            mean(&values),
            std_dev(&values),
            values.first().copied().unwrap_or(f64::NAN),
            quantile(&values, 0.25),
            quantile(&values, 0.5),
            quantile(&values, 0.75),
            values.last().copied().unwrap_or(f64::NAN),
        ];
        for (row, stat) in rows.iter_mut().zip(stats) {
            row.1.push(format_stat(stat));
        }
    }
    DescribeTable {
        columns: columns.iter().map(|c| c.name.clone()).collect(),
        rows,
    }
}

fn describe_categorical(columns: Vec<&Column>) -> DescribeTable {
    let labels = ["count", "unique", "top", "freq"];
    let mut rows: Vec<(String, Vec<String>)> =
        labels.iter().map(|l| (l.to_string(), Vec::new())).collect();
    for column in columns.iter() {
        let counts = value_counts(column);
        let count: usize = counts.iter().map(|(_, n)| n).sum();
        let (top, freq) = counts
            .first()
            .map(|(v, n)| (v.clone(), n.to_string()))
            .unwrap_or_else(|| ("NaN".to_string(), "NaN".to_string()));
        let values = [count.to_string(), counts.len().to_string(), top, freq];
        for (row, value) in rows.iter_mut().zip(values) {
            row.1.push(value);
        }
    }
    DescribeTable {
        columns: columns.iter().map(|c| c.name.clone()).collect(),
        rows,
    }
}

/// Frequency of each non-missing value, most frequent first;
/// ties keep the order of first appearance.
pub fn value_counts(column: &Column) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in 0..column.len() {
        if let Some(value) = column.value(row) {
            match index.get(&value) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(value.clone(), counts.len());
                    counts.push((value, 1));
                }
            }
        }
    }
    // stable sort keeps first appearance order for equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Pearson correlation of every pair of numeric columns over the rows
/// where both values are present. Undefined coefficients are NaN.
pub fn correlation_matrix(dataset: &Dataset) -> (Vec<String>, Vec<Vec<f64>>) {
    let columns = dataset.numeric_columns();
    let names = columns.iter().map(|c| c.name.clone()).collect();
    let values: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|c| c.numeric_values().unwrap_or_default())
        .collect();
    let matrix = values
        .iter()
        .map(|a| values.iter().map(|b| pearson(a, b)).collect())
        .collect();
    (names, matrix)
}

fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if !x.is_nan() && !y.is_nan() => Some((*x, *y)),
            _ => None,
        })
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}
