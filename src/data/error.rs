use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while building a [`super::Dataset`].
///
/// Load failures are fatal at startup: the dashboard has nothing to show
/// without a valid dataset.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: missing value for '{column}'")]
    MissingValue { row: usize, column: &'static str },

    #[error("row {row}: payload mass must be finite and non-negative, got {value}")]
    InvalidPayload { row: usize, value: f64 },

    #[error("row {row}: outcome class must be 0 or 1, got {value}")]
    InvalidOutcome { row: usize, value: f64 },

    #[error("row {row}: launch site is empty")]
    EmptySite { row: usize },

    #[error("dataset contains no launch records")]
    Empty,
}
