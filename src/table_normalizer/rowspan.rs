//! Header rowspan inference from border codes
//!
//! A header cell whose bottom edge is open continues into the cell below it
//! in the same logical column. The merge walks down until it meets a closed
//! bottom edge or crosses the column-index row. Body rows are never merged
//! here; an open bottom edge in the body is decoration only.

use std::collections::{HashMap, HashSet};

use super::model::Row;
use crate::utils::repair_hyphenation;

/// `(row, logical column) -> cell index` using each row's own colspans.
fn logical_grid(rows: &[Row]) -> HashMap<(usize, usize), usize> {
    let mut grid = HashMap::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let mut column = 0;
        for (cell_idx, cell) in row.cells.iter().enumerate() {
            for offset in 0..cell.colspan.max(1) {
                grid.insert((row_idx, column + offset), cell_idx);
            }
            column += cell.colspan.max(1);
        }
    }
    grid
}

/// Index of the row that closes the header block.
fn header_boundary(rows: &[Row]) -> Option<usize> {
    rows.iter()
        .position(|row| row.is_column_index)
        .or_else(|| rows.iter().position(|row| !row.is_header))
}

/// Merge vertically split header cells in place.
///
/// Returns the number of cells that gained a rowspan. The merged text is the
/// non-empty fragments joined by single spaces with hyphenation repaired;
/// absorbed cells are removed from their rows, which may leave a row empty.
pub fn apply_header_rowspan(rows: &mut [Row]) -> usize {
    if rows.len() < 2 {
        return 0;
    }
    let Some(boundary) = header_boundary(rows).filter(|idx| *idx >= 1) else {
        return 0;
    };

    let grid = logical_grid(rows);
    let Some(max_column) = grid.keys().map(|(_, column)| *column).max() else {
        return 0;
    };

    let mut absorbed: HashSet<(usize, usize)> = HashSet::new();
    let mut processed: HashSet<(usize, usize)> = HashSet::new();
    let mut merged = 0;

    for column in 0..=max_column {
        let mut row_idx = 0;
        while row_idx < boundary {
            let Some(&cell_idx) = grid.get(&(row_idx, column)) else {
                row_idx += 1;
                continue;
            };
            let key = (row_idx, cell_idx);
            if absorbed.contains(&key) || processed.contains(&key) || !rows[row_idx].is_header {
                row_idx += 1;
                continue;
            }
            processed.insert(key);

            let origin = &rows[row_idx].cells[cell_idx];
            if origin.has_bottom_border() {
                row_idx += 1;
                continue;
            }

            let mut fragments: Vec<&str> = Vec::new();
            if !origin.text.trim().is_empty() {
                fragments.push(&origin.text);
            }
            let mut span = 1;
            let mut next_row = row_idx + 1;
            while next_row <= boundary && next_row < rows.len() {
                let Some(&below_idx) = grid.get(&(next_row, column)) else {
                    break;
                };
                let below = &rows[next_row].cells[below_idx];
                if !below.text.trim().is_empty() {
                    fragments.push(&below.text);
                }
                absorbed.insert((next_row, below_idx));
                span += 1;
                if below.has_bottom_border() {
                    break;
                }
                next_row += 1;
            }

            if span > 1 {
                let text = repair_hyphenation(&fragments.join(" "));
                let origin = &mut rows[row_idx].cells[cell_idx];
                origin.rowspan = span;
                origin.text = text;
                merged += 1;
                row_idx = next_row;
            } else {
                row_idx += 1;
            }
        }
    }

    for (row_idx, row) in rows.iter_mut().enumerate() {
        let mut cell_idx = 0;
        row.cells.retain(|_| {
            let keep = !absorbed.contains(&(row_idx, cell_idx));
            cell_idx += 1;
            keep
        });
    }
    merged
}
