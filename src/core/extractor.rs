//! Row extraction - one spreadsheet row → one [`Record`]

use crate::error::{ReportResult, RowIssue};
use crate::excel::{column_index, index_to_label};
use crate::types::{min_record_date, CellValue, ColumnStructure, DateRange, Record, Sheet};
use chrono::NaiveDateTime;
use tracing::debug;

/// A data column with its label kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DataColumn {
    label: String,
    index: usize,
}

/// Validates rows against a column structure and an optional date range.
///
/// Column labels are resolved once, up front; a malformed label fails the
/// whole run instead of every row.
#[derive(Debug, Clone)]
pub struct RowExtractor {
    name_column: usize,
    date_column: usize,
    data_columns: Vec<DataColumn>,
    date_range: Option<DateRange>,
    min_date: NaiveDateTime,
}

impl RowExtractor {
    pub fn new(structure: &ColumnStructure, date_range: Option<DateRange>) -> ReportResult<Self> {
        let name_column = column_index(&structure.name_column)?;
        let date_column = column_index(&structure.date_column)?;
        let data_columns = structure
            .data_columns
            .iter()
            .map(|label| {
                let index = column_index(label)?;
                Ok(DataColumn {
                    label: index_to_label(index),
                    index,
                })
            })
            .collect::<ReportResult<Vec<_>>>()?;

        debug!(
            name_column,
            date_column,
            data_columns = data_columns.len(),
            "resolved column structure"
        );

        Ok(Self {
            name_column,
            date_column,
            data_columns,
            date_range,
            min_date: min_record_date(),
        })
    }

    /// Extract the record stored in `row_number` (1-based).
    ///
    /// Checks run in a fixed order and the first one that fails decides the
    /// reported issue: date, date range, name, then each data column.
    pub fn extract(&self, sheet: &Sheet, row_number: usize) -> Result<Record, RowIssue> {
        let date = sheet
            .cell(row_number, self.date_column)
            .as_timestamp()
            .filter(|date| *date >= self.min_date)
            .ok_or(RowIssue::InvalidDate)?;

        if let Some(range) = &self.date_range {
            if !range.contains(date) {
                return Err(RowIssue::RangeExcluded);
            }
        }

        let name = match sheet.cell(row_number, self.name_column) {
            CellValue::Empty => return Err(RowIssue::MissingName),
            value => value.to_string(),
        };

        let mut info = Vec::with_capacity(self.data_columns.len());
        for column in &self.data_columns {
            let value = sheet.cell(row_number, column.index);
            if value.is_empty() {
                return Err(RowIssue::MissingData {
                    column: column.label.clone(),
                });
            }
            info.push(value.clone());
        }

        Ok(Record::new(name, date, info))
    }
}
