//! Spreadsheet input
//!
//! - Column labels ("A", "AA") → zero-based indices
//! - Workbook sheets → [`crate::types::Sheet`] grids of typed cells

mod column;
mod workbook;

pub use column::{column_index, index_to_label};
pub use workbook::{list_sheets, load_sheet};
