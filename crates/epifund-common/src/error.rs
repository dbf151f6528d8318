use thiserror::Error;

/// Failure to turn a source file into a Dataset.
///
/// Fatal at startup for datasets declared mandatory; otherwise the source is
/// served as "data unavailable" and the process keeps running.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source file not found: {path}")]
    FileNotFound { path: String },

    #[error("malformed delimited text in {path}: {message}")]
    Csv { path: String, message: String },

    #[error("malformed workbook {path}: {message}")]
    Workbook { path: String, message: String },

    #[error("{path} has no header row")]
    EmptyFile { path: String },

    #[error("unsupported file extension \"{extension}\" for {path} (expected .csv or .xlsx)")]
    UnsupportedFormat { path: String, extension: String },

    #[error("schema mismatch in {path}: missing column \"{column}\"")]
    MissingColumn { path: String, column: String },

    #[error(
        "schema mismatch in {path} row {row}: column \"{column}\" expected {expected}, got \"{value}\""
    )]
    BadCell {
        path: String,
        row: usize,
        column: String,
        expected: &'static str,
        value: String,
    },
}

/// Failure to aggregate a Dataset. Always recoverable at the request
/// boundary; rendered as a user-visible message, never a crash.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("grouping key \"{key}\" does not exist in the {dataset} schema")]
    UnknownKey { key: String, dataset: String },
}
