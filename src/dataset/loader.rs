//! src/dataset/loader.rs

use crate::dataset::{Dataset, DatasetError, RawCell};
use anyhow::Context;
use calamine::{open_workbook_auto_from_rs, Data, ExcelDateTime, Reader};
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::io::Cursor;
use std::path::Path;

/// Number of leading bytes used to guess the text encoding of a CSV file.
const SNIFF_LEN: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Excel,
}

impl FileKind {
    pub fn from_file_name(file_name: &str) -> Result<FileKind, DatasetError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(FileKind::Csv),
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Ok(FileKind::Excel),
            _ => Err(DatasetError::UnsupportedFileType(extension)),
        }
    }
}

/// A byte-order mark wins, otherwise the encoding is guessed from the first bytes.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    let sample = &bytes[..bytes.len().min(SNIFF_LEN)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    detector.guess(None, true)
}

/// Decode `bytes` with the detected encoding; the BOM is stripped.
pub fn decode_text(bytes: &[u8]) -> (String, &'static Encoding) {
    let encoding = detect_encoding(bytes);
    let (text, used_encoding, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(
            encoding = used_encoding.name(),
            "Malformed byte sequences were replaced while decoding the upload."
        );
    }
    (text.into_owned(), used_encoding)
}

/// Parse an uploaded file into a dataset.
#[tracing::instrument(name = "Read uploaded file", skip(bytes), fields(size = bytes.len()))]
pub fn read_file(file_name: &str, bytes: &[u8]) -> Result<Dataset, DatasetError> {
    let dataset = match FileKind::from_file_name(file_name)? {
        FileKind::Csv => read_csv(bytes)?,
        FileKind::Excel => read_excel(bytes)?,
    };
    if dataset.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(dataset)
}

fn read_csv(bytes: &[u8]) -> Result<Dataset, DatasetError> {
    if bytes.is_empty() {
        return Err(DatasetError::Empty);
    }
    let (text, encoding) = decode_text(bytes);
    tracing::debug!(encoding = encoding.name(), "Decoded csv upload");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read the csv header row.")
        .map_err(DatasetError::Parse)?
        .iter()
        .map(str::to_owned)
        .collect();
    // short rows are padded with missing values, long rows are an error
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .context("Failed to read csv records.")
            .map_err(DatasetError::Parse)?;
        if record.len() > headers.len() {
            return Err(DatasetError::Parse(anyhow::anyhow!(
                "Expected {} fields in line {}, saw {}.",
                headers.len(),
                record.position().map_or(0, |p| p.line()),
                record.len()
            )));
        }
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(Dataset::from_text_rows(headers, rows))
}

fn read_excel(bytes: &[u8]) -> Result<Dataset, DatasetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .context("Failed to open the workbook.")
        .map_err(DatasetError::Parse)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DatasetError::Empty)?
        .context("Failed to read the first worksheet.")
        .map_err(DatasetError::Parse)?;
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| match cell {
                Data::Empty => String::new(),
                Data::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        None => return Err(DatasetError::Empty),
    };
    let rows = rows
        .map(|row| row.iter().map(excel_cell).collect())
        .collect();
    Ok(Dataset::from_rows(headers, rows))
}

fn excel_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::Int(i) => RawCell::Int(*i),
        Data::Float(f) if f.is_nan() => RawCell::Empty,
        // workbooks store every number as a float
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => RawCell::Int(*f as i64),
        Data::Float(f) => RawCell::Float(*f),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::String(s) if s.trim().is_empty() => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::DateTime(date_time) => RawCell::Text(format_date_time(date_time)),
        // iso dates, durations and cell errors
        other => RawCell::Text(other.to_string()),
    }
}

/// Dates as `YYYY-MM-DD`, with the time of day when it is not midnight.
/// Durations keep the raw serial value.
fn format_date_time(date_time: &ExcelDateTime) -> String {
    match date_time.as_datetime() {
        Some(dt) if date_time.is_datetime() => {
            if dt.time() == chrono::NaiveTime::MIN {
                dt.format("%Y-%m-%d").to_string()
            } else {
                dt.format("%Y-%m-%d %H:%M:%S").to_string()
            }
        }
        _ => date_time.to_string(),
    }
}
