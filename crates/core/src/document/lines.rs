//! Line collection maintenance.
//!
//! Item numbers are 1-based, unique, and dense. Deleting a line renumbers
//! the ones after it.

use std::collections::HashSet;

use super::error::DocumentError;
use super::types::DocumentLine;

/// Assign `item_no` 1, 2, 3, ... in the current order.
#[must_use]
pub fn renumber_lines(lines: Vec<DocumentLine>) -> Vec<DocumentLine> {
    lines
        .into_iter()
        .zip(1u32..)
        .map(|(line, item_no)| DocumentLine { item_no, ..line })
        .collect()
}

/// Drop the line with `item_no` and renumber the rest.
pub fn remove_line(
    mut lines: Vec<DocumentLine>,
    item_no: u32,
) -> Result<Vec<DocumentLine>, DocumentError> {
    let index = lines
        .iter()
        .position(|line| line.item_no == item_no)
        .ok_or(DocumentError::LineNotFound(item_no))?;
    lines.remove(index);
    Ok(renumber_lines(lines))
}

/// Check item numbers are unique and form `1..=n`.
pub fn validate_lines(lines: &[DocumentLine]) -> Result<(), DocumentError> {
    let mut seen = HashSet::with_capacity(lines.len());
    for line in lines {
        if !seen.insert(line.item_no) {
            return Err(DocumentError::DuplicateItemNo(line.item_no));
        }
    }

    let mut numbers: Vec<u32> = seen.into_iter().collect();
    numbers.sort_unstable();
    for (found, expected) in numbers.into_iter().zip(1u32..) {
        if found != expected {
            return Err(DocumentError::NonDenseItemNo { expected, found });
        }
    }
    Ok(())
}
