use chrono::NaiveDateTime;
use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

/// Fatal errors: any of these aborts the whole run.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to open workbook: {0}")]
    Workbook(String),

    #[error("Sheet '{sheet}' not found (available: {})", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("Invalid column label '{0}': expected letters A-Z only")]
    InvalidColumnLabel(String),

    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },

    #[error("Structure '{0}' not found")]
    StructureNotFound(String),

    #[error("No column structure given: use --structure or --name-column, --date-column and --data-columns")]
    MissingStructure,

    #[error("Structure '{0}' already exists")]
    DuplicateStructure(String),

    #[error("Failed to write document: {0}")]
    Write(String),
}

/// Why a single row did not produce a record.
///
/// Only [`RowIssue::RangeExcluded`] is silent; every other variant is
/// reported back to the caller as a failed row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowIssue {
    #[error("invalid or missing date")]
    InvalidDate,

    #[error("missing name")]
    MissingName,

    #[error("missing data in column {column}")]
    MissingData { column: String },

    #[error("date outside of the requested range")]
    RangeExcluded,
}

impl RowIssue {
    /// Whether this issue counts as a failed row.
    pub fn is_failure(&self) -> bool {
        !matches!(self, RowIssue::RangeExcluded)
    }
}
