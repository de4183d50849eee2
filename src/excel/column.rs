//! Spreadsheet column labels ("A", "Z", "AA", ...) ↔ zero-based indices

use crate::error::{ReportError, ReportResult};

/// Resolve a column label to a zero-based index (A→0, Z→25, AA→26).
///
/// Labels are case-insensitive and surrounding whitespace is ignored.
/// Empty or non-alphabetic labels are rejected.
pub fn column_index(label: &str) -> ReportResult<usize> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(ReportError::InvalidColumnLabel(label.to_string()));
    }

    let mut value: usize = 0;
    for c in trimmed.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(ReportError::InvalidColumnLabel(label.to_string()));
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        value = value
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| ReportError::InvalidColumnLabel(label.to_string()))?;
    }

    Ok(value - 1)
}

/// Canonical label of a zero-based column index (0→A, 25→Z, 26→AA).
pub fn index_to_label(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index.saturating_add(1);
    while n > 0 {
        letters.push(char::from(b'A' + ((n - 1) % 26) as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
