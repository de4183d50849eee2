//! Shared fixtures: small workbooks written with rust_xlsxwriter

#![allow(dead_code)]

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::io::Read;
use std::path::Path;

pub const SHEET: &str = "Results";

/// One sheet row: (date, name, data cells). `None` leaves the cell empty.
pub type FixtureRow<'a> = (Option<(u16, u8, u8)>, Option<&'a str>, Vec<Option<&'a str>>);

/// Write a workbook with a header row followed by `rows`.
///
/// Columns: A = date (10:30:00), B = name, C.. = data.
pub fn write_workbook(path: &Path, rows: &[FixtureRow]) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET).unwrap();
    sheet.write_string(0, 0, "Дата").unwrap();
    sheet.write_string(0, 1, "ПІБ").unwrap();
    sheet.write_string(0, 2, "Шкала 1").unwrap();
    sheet.write_string(0, 3, "Шкала 2").unwrap();

    for (idx, (date, name, data)) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        if let Some((y, m, d)) = date {
            let dt = ExcelDateTime::from_ymd(*y, *m, *d)
                .unwrap()
                .and_hms(10, 30, 0)
                .unwrap();
            sheet
                .write_datetime_with_format(row, 0, &dt, &date_format)
                .unwrap();
        }
        if let Some(name) = name {
            sheet.write_string(row, 1, *name).unwrap();
        }
        for (col, value) in data.iter().enumerate() {
            if let Some(value) = value {
                sheet.write_string(row, col as u16 + 2, *value).unwrap();
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Round-trip sample: rows 2 and 4 valid, row 3 has no name.
pub fn write_sample_workbook(path: &Path) {
    write_workbook(
        path,
        &[
            (Some((2024, 3, 5)), Some("Іванов"), vec![Some("X"), Some("Y")]),
            (Some((2024, 3, 9)), None, vec![Some("X"), Some("Y")]),
            (Some((2024, 4, 1)), Some("Петров"), vec![Some("A"), Some("B")]),
        ],
    );
}

/// The body XML of a generated .docx
pub fn document_xml(path: &Path) -> String {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

/// Assert that `needles` occur in `haystack` in this order.
pub fn assert_in_order(haystack: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        let pos = haystack[from..]
            .find(needle)
            .unwrap_or_else(|| panic!("'{needle}' not found after offset {from}"));
        from += pos + needle.len();
    }
}
