//! Chronological ordering and month grouping

use crate::types::{MonthGroup, MonthLabelYear, Record};
use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

/// Ukrainian month names, January first.
pub const UK_MONTHS: [&str; 12] = [
    "Січень",
    "Лютий",
    "Березень",
    "Квітень",
    "Травень",
    "Червень",
    "Липень",
    "Серпень",
    "Вересень",
    "Жовтень",
    "Листопад",
    "Грудень",
];

/// "Березень 2024" style label for `date`'s month and the given year.
pub fn month_label(date: NaiveDateTime, year: i32) -> String {
    format!("{} {}", UK_MONTHS[date.month0() as usize], year)
}

/// Stable sort by date, then by name.
pub fn sort_records(records: &mut [Record]) {
    records.sort_by(|a, b| a.date().cmp(&b.date()).then_with(|| a.name().cmp(b.name())));
}

/// Sort records and split them into consecutive month groups.
///
/// A new group starts whenever the label changes, so groups never come out
/// empty and appear in chronological order.
pub fn order_and_group(mut records: Vec<Record>, year_source: MonthLabelYear) -> Vec<MonthGroup> {
    sort_records(&mut records);

    let Some(first_year) = records.first().map(|r| r.date().year()) else {
        return Vec::new();
    };

    let mut groups: Vec<MonthGroup> = Vec::new();
    for record in records {
        let year = match year_source {
            MonthLabelYear::PerRecord => record.date().year(),
            MonthLabelYear::FirstRecord => first_year,
        };
        let label = month_label(record.date(), year);

        match groups.last_mut() {
            Some(group) if group.label == label => group.records.push(record),
            _ => groups.push(MonthGroup {
                label,
                records: vec![record],
            }),
        }
    }

    debug!(groups = groups.len(), "grouped records by month");
    groups
}
