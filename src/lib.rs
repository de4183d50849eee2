//! PsyTest - test result spreadsheets → Word reports
//!
//! Reads one worksheet, validates each row against a [`ColumnStructure`],
//! orders the resulting records by date and name, groups them by month and
//! renders a `.docx` document.
//!
//! # Pipeline
//!
//! 1. [`excel::load_sheet`] - workbook sheet → [`Sheet`]
//! 2. [`core::collect_all`] - rows → records + failed rows
//! 3. [`core::order_and_group`] - records → month groups
//! 4. [`document::compose`] - month groups → [`document::Document`]
//! 5. [`document::write_report`] - document → `.docx`
//!
//! # Example
//!
//! ```no_run
//! use psytest_results::report::ReportJob;
//! use psytest_results::types::ColumnStructure;
//! use std::path::Path;
//!
//! let structure = ColumnStructure::from_delimited("B", "A", "BS");
//! let summary = ReportJob::new("Відповіді", structure)
//!     .run(Path::new("results.xlsx"), Path::new("report.docx"))?;
//!
//! println!("{} records, outcome: {:?}", summary.records, summary.outcome);
//! # Ok::<(), psytest_results::error::ReportError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod document;
pub mod error;
pub mod excel;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use error::{ReportError, ReportResult, RowIssue};
pub use types::{
    CellValue, ColumnStructure, DateRange, Extraction, MonthGroup, MonthLabelYear, Record,
    RowFailure, Sheet, WriteOutcome,
};
