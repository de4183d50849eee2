//! Workbook access - Excel (.xlsx/.xls/.ods) → [`Sheet`]

use crate::error::{ReportError, ReportResult};
use crate::types::{CellValue, Sheet};
use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;
use tracing::debug;

/// List the sheet names of a workbook, in workbook order.
pub fn list_sheets(path: &Path) -> ReportResult<Vec<String>> {
    let workbook = open_workbook_auto(path)
        .map_err(|e| ReportError::Workbook(format!("{}: {}", path.display(), e)))?;
    Ok(workbook.sheet_names().to_vec())
}

/// Load one named sheet.
///
/// Fails with [`ReportError::SheetNotFound`] when the workbook has no sheet
/// with that name.
pub fn load_sheet(path: &Path, sheet_name: &str) -> ReportResult<Sheet> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ReportError::Workbook(format!("{}: {}", path.display(), e)))?;

    let available = workbook.sheet_names().to_vec();
    if !available.iter().any(|name| name == sheet_name) {
        return Err(ReportError::SheetNotFound {
            sheet: sheet_name.to_string(),
            available,
        });
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| ReportError::Workbook(format!("{}: {}", sheet_name, e)))?;

    let sheet = range_to_sheet(sheet_name, &range);
    debug!(
        sheet = sheet_name,
        rows = sheet.max_row(),
        "loaded worksheet"
    );
    Ok(sheet)
}

/// Copy a calamine range into an absolutely addressed [`Sheet`].
///
/// Calamine ranges start at the first used cell, so positions are read
/// through `get_value` to keep row 1 / column A anchored.
fn range_to_sheet(sheet_name: &str, range: &Range<Data>) -> Sheet {
    let Some((last_row, last_col)) = range.end() else {
        return Sheet::new(sheet_name, Vec::new());
    };

    let rows = (0..=last_row)
        .map(|row| {
            (0..=last_col)
                .map(|col| {
                    range
                        .get_value((row, col))
                        .map(convert_cell)
                        .unwrap_or(CellValue::Empty)
                })
                .collect()
        })
        .collect();

    Sheet::new(sheet_name, rows)
}

/// Map a calamine cell onto the closed [`CellValue`] set.
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) if dt.is_datetime() => dt
            .as_datetime()
            .map(CellValue::Timestamp)
            .unwrap_or_else(|| CellValue::Text(cell.to_string())),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::Timestamp)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        other => CellValue::Text(other.to_string()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
