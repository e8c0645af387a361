//! src/dataset/mod.rs

mod loader;
mod model;
mod stats;
mod store;

pub use loader::{decode_text, detect_encoding, read_file, FileKind};
pub use model::{Column, ColumnData, Dataset, Dtype, RawCell};
pub use stats::{correlation_matrix, describe, quantile, value_counts, DescribeTable};
pub use store::{DatasetStore, UploadedFile};

use crate::error::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum DatasetError {
    #[error("Unsupported file type. Please upload a CSV or Excel file.")]
    UnsupportedFileType(String),
    #[error("Error parsing the file. Please check the file format.")]
    Parse(#[source] anyhow::Error),
    #[error("The uploaded file contains no data.")]
    Empty,
    #[error("The uploaded file is no longer available. Please upload it again.")]
    NotFound,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
