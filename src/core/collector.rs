//! Result collection - a whole sheet → records + failed rows

use super::extractor::RowExtractor;
use crate::error::ReportResult;
use crate::types::{ColumnStructure, DateRange, Extraction, RowFailure, Sheet};
use tracing::{debug, warn};

/// Number of header rows skipped by [`collect_all`] callers by default.
pub const DEFAULT_HEADER_ROWS: usize = 1;

/// Run every data row of `sheet` through the extractor.
///
/// Rows that fail validation are logged and returned in
/// [`Extraction::failures`]; rows outside `date_range` are dropped silently.
/// Only an unresolvable column structure is fatal.
pub fn collect_all(
    sheet: &Sheet,
    structure: &ColumnStructure,
    date_range: Option<DateRange>,
    header_rows: usize,
) -> ReportResult<Extraction> {
    let extractor = RowExtractor::new(structure, date_range)?;
    let mut extraction = Extraction::default();
    let mut excluded = 0usize;

    for row in (header_rows + 1)..=sheet.max_row() {
        match extractor.extract(sheet, row) {
            Ok(record) => extraction.records.push(record),
            Err(issue) if issue.is_failure() => {
                warn!(sheet = %sheet.name, row, "skipping row: {}", issue);
                extraction.failures.push(RowFailure { row, reason: issue });
            }
            Err(_) => excluded += 1,
        }
    }

    debug!(
        sheet = %sheet.name,
        records = extraction.records.len(),
        failures = extraction.failures.len(),
        excluded,
        "collected rows"
    );

    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowIssue;
    use crate::types::CellValue;
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn row(date: Option<NaiveDateTime>, name: Option<&str>, data: &[&str]) -> Vec<CellValue> {
        let mut cells = vec![
            date.map(CellValue::Timestamp).unwrap_or(CellValue::Empty),
            name.map(text).unwrap_or(CellValue::Empty),
        ];
        cells.extend(data.iter().map(|d| text(d)));
        cells
    }

    fn sample_sheet() -> Sheet {
        Sheet::new(
            "Results",
            vec![
                vec![text("Date"), text("Name"), text("Q1"), text("Q2")],
                row(Some(dt(2024, 3, 5)), Some("Іванов"), &["X", "Y"]),
                row(Some(dt(2024, 3, 6)), None, &["X", "Y"]),
                row(Some(dt(2024, 4, 1)), Some("Петров"), &["A", "B"]),
            ],
        )
    }

    #[test]
    fn test_collect_all_splits_records_and_failures() {
        let structure = ColumnStructure::from_delimited("B", "A", "C,D");
        let extraction =
            collect_all(&sample_sheet(), &structure, None, DEFAULT_HEADER_ROWS).unwrap();

        assert_eq!(extraction.records.len(), 2);
        assert_eq!(extraction.records[0].name(), "Іванов");
        assert_eq!(extraction.records[1].name(), "Петров");
        assert_eq!(
            extraction.failures,
            vec![RowFailure {
                row: 3,
                reason: RowIssue::MissingName
            }]
        );
        assert_eq!(extraction.failed_rows(), vec![3]);
    }

    #[test]
    fn test_collect_all_range_exclusions_are_not_failures() {
        let structure = ColumnStructure::from_delimited("B", "A", "C,D");
        let range = DateRange::new(dt(2024, 4, 1), dt(2024, 4, 30)).unwrap();
        let extraction =
            collect_all(&sample_sheet(), &structure, Some(range), DEFAULT_HEADER_ROWS).unwrap();

        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].name(), "Петров");
        assert!(extraction.failures.is_empty());
    }

    #[test]
    fn test_collect_all_each_failed_row_listed_once() {
        let sheet = Sheet::new(
            "Results",
            vec![
                vec![text("Date"), text("Name"), text("Q1"), text("Q2")],
                row(None, None, &[]),
                row(Some(dt(2024, 3, 5)), Some("Іванов"), &["X"]),
                row(Some(dt(2024, 3, 5)), None, &[]),
            ],
        );
        let structure = ColumnStructure::from_delimited("B", "A", "C,D");
        let extraction = collect_all(&sheet, &structure, None, DEFAULT_HEADER_ROWS).unwrap();

        assert!(extraction.records.is_empty());
        assert_eq!(extraction.failed_rows(), vec![2, 3, 4]);
        assert_eq!(extraction.failures[0].reason, RowIssue::InvalidDate);
        assert_eq!(
            extraction.failures[1].reason,
            RowIssue::MissingData {
                column: "D".to_string()
            }
        );
        assert_eq!(extraction.failures[2].reason, RowIssue::MissingName);
    }

    #[test]
    fn test_collect_all_header_only_sheet() {
        let sheet = Sheet::new("Results", vec![vec![text("Date")]]);
        let structure = ColumnStructure::from_delimited("B", "A", "C");
        let extraction = collect_all(&sheet, &structure, None, DEFAULT_HEADER_ROWS).unwrap();
        assert_eq!(extraction, Extraction::default());
    }

    #[test]
    fn test_collect_all_custom_header_rows() {
        let structure = ColumnStructure::from_delimited("B", "A", "C,D");
        let extraction = collect_all(&sample_sheet(), &structure, None, 2).unwrap();
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.failed_rows(), vec![3]);
    }

    #[test]
    fn test_collect_all_invalid_structure_is_fatal() {
        let structure = ColumnStructure::from_delimited("B", "1", "C");
        assert!(collect_all(&sample_sheet(), &structure, None, DEFAULT_HEADER_ROWS).is_err());
    }
}
