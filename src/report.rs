//! End-to-end report generation: workbook sheet → `.docx`

use crate::core::{collect_all, order_and_group, DEFAULT_HEADER_ROWS};
use crate::document::{compose, write_report, Document};
use crate::error::ReportResult;
use crate::excel::load_sheet;
use crate::types::{
    ColumnStructure, DateRange, Extraction, MonthGroup, MonthLabelYear, Sheet, WriteOutcome,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// What one run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub output: PathBuf,
    pub records: usize,
    pub groups: usize,
    pub outcome: WriteOutcome,
}

/// One report request: which sheet, which columns, which dates.
#[derive(Debug, Clone)]
pub struct ReportJob {
    pub sheet: String,
    pub structure: ColumnStructure,
    pub date_range: Option<DateRange>,
    pub month_year: MonthLabelYear,
    pub header_rows: usize,
}

impl ReportJob {
    pub fn new(sheet: impl Into<String>, structure: ColumnStructure) -> Self {
        Self {
            sheet: sheet.into(),
            structure,
            date_range: None,
            month_year: MonthLabelYear::default(),
            header_rows: DEFAULT_HEADER_ROWS,
        }
    }

    pub fn with_date_range(mut self, date_range: Option<DateRange>) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn with_month_year(mut self, month_year: MonthLabelYear) -> Self {
        self.month_year = month_year;
        self
    }

    /// Extract and group the records of an already loaded sheet.
    pub fn prepare(&self, sheet: &Sheet) -> ReportResult<(Vec<MonthGroup>, Extraction)> {
        let mut extraction = collect_all(sheet, &self.structure, self.date_range, self.header_rows)?;
        let records = std::mem::take(&mut extraction.records);
        let groups = order_and_group(records, self.month_year);
        Ok((groups, extraction))
    }

    /// Build the document for an already loaded sheet, without writing it.
    pub fn build(&self, sheet: &Sheet) -> ReportResult<(Document, Extraction)> {
        let (groups, extraction) = self.prepare(sheet)?;
        Ok((compose(&groups), extraction))
    }

    /// Read `input`, build the report and save it to `output`.
    ///
    /// Nothing is written when the sheet cannot be read.
    pub fn run(&self, input: &Path, output: &Path) -> ReportResult<ReportSummary> {
        info!(
            input = %input.display(),
            sheet = %self.sheet,
            filtered = self.date_range.is_some(),
            "generating report"
        );

        let sheet = load_sheet(input, &self.sheet)?;
        let (groups, extraction) = self.prepare(&sheet)?;
        let records = groups.iter().map(|g| g.records.len()).sum::<usize>();
        let document = compose(&groups);
        let outcome = write_report(&document, output, &extraction.failed_rows())?;

        Ok(ReportSummary {
            output: output.to_path_buf(),
            records,
            groups: groups.len(),
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HeadingLevel;
    use crate::error::ReportError;
    use crate::types::CellValue;
    use chrono::NaiveDate;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn ts(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::Timestamp(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        )
    }

    fn sheet() -> Sheet {
        Sheet::new(
            "Results",
            vec![
                vec![text("Date"), text("Name"), text("Q1"), text("Q2")],
                vec![ts(2024, 3, 5), text("Іванов"), text("X"), text("Y")],
                vec![ts(2024, 3, 7), CellValue::Empty, text("X"), text("Y")],
                vec![ts(2024, 4, 1), text("Петров"), text("A"), text("B")],
            ],
        )
    }

    #[test]
    fn test_build_groups_and_failures() {
        let job = ReportJob::new("Results", ColumnStructure::from_delimited("B", "A", "C,D"));
        let (document, extraction) = job.build(&sheet()).unwrap();

        assert_eq!(extraction.failed_rows(), vec![3]);
        assert!(extraction.records.is_empty(), "records move into the groups");
        assert_eq!(
            document.headings(HeadingLevel::Month),
            vec!["Березень 2024", "Квітень 2024"]
        );
        assert_eq!(
            document.headings(HeadingLevel::Record),
            vec!["Іванов", "Петров"]
        );
    }

    #[test]
    fn test_run_missing_input_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("out.docx");
        let job = ReportJob::new("Results", ColumnStructure::from_delimited("B", "A", "C"));

        let result = job.run(&dir.path().join("missing.xlsx"), &output);

        assert!(matches!(result, Err(ReportError::Workbook(_))));
        assert!(!output.exists());
    }
}
