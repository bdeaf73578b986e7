use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors produced by the Contacta dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A dataset file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited structure of a dataset is inconsistent.
    #[error("Failed to parse {path}{}: {message}", line_suffix(.line))]
    Parse {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },

    /// A column every aggregation depends on is absent.
    #[error("Required column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// The configured field delimiter is not a single ASCII character.
    #[error("Invalid delimiter: {0:?}")]
    InvalidDelimiter(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

/// Non-fatal conditions found while loading a dataset.
///
/// The load continues with reduced output; callers surface these to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// A date cell could not be parsed day-first; the row's date is missing.
    #[error("line {line}: unparseable date {value:?}")]
    UnparseableDate { line: u64, value: String },

    /// An expected (but not required) column is absent.
    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    /// A count cell is not an integer; it contributes zero.
    #[error("line {line}: column '{column}' has non-numeric value {value:?}")]
    UnparseableCount {
        line: u64,
        column: String,
        value: String,
    },
}

impl LoadWarning {
    /// `true` when the warning reports the absence of `column`.
    pub fn is_missing_column(&self, column: &str) -> bool {
        matches!(self, LoadWarning::MissingColumn { column: c } if c == column)
    }
}
