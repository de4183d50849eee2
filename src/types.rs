use crate::error::{ReportError, ReportResult, RowIssue};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

//==============================================================================
// Cells
//==============================================================================

/// A single spreadsheet cell, reduced to what the report cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Timestamp(NaiveDateTime),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Timestamp(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Timestamp(dt) => write!(f, "{}", dt.format(DATE_TIME_FORMAT)),
        }
    }
}

/// Format used for record dates in the document body.
pub const DATE_TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// A rectangular sheet of cells addressed by absolute position.
///
/// `rows[0]` is spreadsheet row 1 (the header row), `rows[n][0]` column A.
/// Rows may be ragged; missing cells read as [`CellValue::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Cell at a 1-based row number and zero-based column index.
    pub fn cell(&self, row_number: usize, column: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        row_number
            .checked_sub(1)
            .and_then(|idx| self.rows.get(idx))
            .and_then(|row| row.get(column))
            .unwrap_or(&EMPTY)
    }

    /// Last populated row number (1-based), or 0 for an empty sheet.
    pub fn max_row(&self) -> usize {
        self.rows.len()
    }
}

//==============================================================================
// Column structures
//==============================================================================

/// Which columns of a sheet hold the name, the date and the result data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnStructure {
    pub name_column: String,
    pub date_column: String,
    pub data_columns: Vec<String>,
}

impl ColumnStructure {
    pub fn new(
        name_column: impl Into<String>,
        date_column: impl Into<String>,
        data_columns: Vec<String>,
    ) -> Self {
        Self {
            name_column: name_column.into(),
            date_column: date_column.into(),
            data_columns,
        }
    }

    /// Build a structure from a comma-delimited data column list ("HA,HC,HE").
    pub fn from_delimited(
        name_column: impl Into<String>,
        date_column: impl Into<String>,
        data_columns: &str,
    ) -> Self {
        Self::new(
            name_column,
            date_column,
            data_columns.split(',').map(str::to_string).collect(),
        )
    }
}

//==============================================================================
// Records
//==============================================================================

/// Earliest date accepted in the date column.
pub fn min_record_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1900, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

/// One validated test result taken from a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    date: NaiveDateTime,
    info: Vec<CellValue>,
}

impl Record {
    pub fn new(name: impl Into<String>, date: NaiveDateTime, info: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            date,
            info,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Data cell values, in the order of the structure's data columns.
    pub fn info(&self) -> &[CellValue] {
        &self.info
    }
}

/// Inclusive date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDateTime,
    to: NaiveDateTime,
}

impl DateRange {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> ReportResult<Self> {
        if from > to {
            return Err(ReportError::InvalidDateRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDateTime) -> bool {
        self.from <= date && date <= self.to
    }
}

/// A row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub row: usize,
    pub reason: RowIssue,
}

/// Everything one pass over a sheet produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub failures: Vec<RowFailure>,
}

impl Extraction {
    /// Row numbers of failed rows, in sheet order.
    pub fn failed_rows(&self) -> Vec<usize> {
        self.failures.iter().map(|f| f.row).collect()
    }
}

//==============================================================================
// Grouping
//==============================================================================

/// Where the year in a month label comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthLabelYear {
    /// Each group uses the year of its own records.
    #[default]
    PerRecord,
    /// Every group uses the year of the earliest record (legacy reports).
    FirstRecord,
}

/// Records that share a calendar month, in report order.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    pub label: String,
    pub records: Vec<Record>,
}

/// Result of persisting a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Complete,
    Partial { failed_rows: Vec<usize> },
}

impl WriteOutcome {
    pub fn from_failed_rows(failed_rows: Vec<usize>) -> Self {
        if failed_rows.is_empty() {
            WriteOutcome::Complete
        } else {
            WriteOutcome::Partial { failed_rows }
        }
    }
}
