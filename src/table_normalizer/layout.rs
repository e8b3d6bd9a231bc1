//! Layout resolution for data tables
//!
//! Recovers the logical grid the publisher flattened away: the header/body
//! boundary (from the column-index row), colspans (from declared pixel
//! widths against a canonical column set), then header rowspans and the
//! optional body-row merge.

use std::collections::HashSet;

use tracing::debug;

use super::body_rowspan::merge_body_row_groups;
use super::classification::DataCandidate;
use super::model::{Cell, Row, Table};
use super::rowspan::apply_header_rowspan;
use crate::config::NormalizerConfig;
use crate::utils::{
    FORM_DISTINCT_COUNTS, FORM_KEYWORD_DISTINCT_COUNTS, IRREGULAR_LAYOUT_KEYWORD_ROWS,
    IRREGULAR_LAYOUT_MIN_ROWS, is_column_number,
};

/// Index of the first row made mostly of bare integers.
///
/// The row needs at least two cells and at least `ratio` of them numeric.
pub fn find_column_index_row(rows: &[Row], ratio: f64) -> Option<usize> {
    rows.iter().position(|row| {
        let total = row.cells.len();
        let numeric = row
            .cells
            .iter()
            .filter(|cell| is_column_number(&cell.text))
            .count();
        total >= 2 && numeric as f64 >= total as f64 * ratio
    })
}

/// Widths of `row` when every cell declares a non-zero width.
fn fully_declared_widths(row: &Row) -> Option<Vec<u32>> {
    row.cells
        .iter()
        .map(|cell| cell.width.filter(|width| *width > 0))
        .collect()
}

/// Reference column widths for colspan inference.
///
/// Prefers the column-index row; otherwise the row with the most cells that
/// all declare a width (earliest wins a tie). Empty when no row qualifies.
pub fn canonical_widths(rows: &[Row], column_index: Option<usize>) -> Vec<u32> {
    if let Some(widths) = column_index
        .and_then(|idx| rows.get(idx))
        .and_then(fully_declared_widths)
        .filter(|widths| widths.len() >= 2)
    {
        return widths;
    }

    rows.iter()
        .filter_map(fully_declared_widths)
        .filter(|widths| !widths.is_empty())
        .fold(Vec::new(), |best, widths| {
            if widths.len() > best.len() { widths } else { best }
        })
}

/// Cumulative pixel boundaries, starting at 0.
fn boundaries(widths: &[u32]) -> Vec<u64> {
    std::iter::once(0)
        .chain(widths.iter().scan(0u64, |total, width| {
            *total += u64::from(*width);
            Some(*total)
        }))
        .collect()
}

/// Index of the boundary closest to `position`; ties go to the lower index.
fn nearest_boundary(position: u64, boundaries: &[u64]) -> usize {
    let mut best = 0;
    let mut best_diff = u64::MAX;
    for (idx, boundary) in boundaries.iter().enumerate() {
        let diff = boundary.abs_diff(position);
        if diff < best_diff {
            best = idx;
            best_diff = diff;
        }
    }
    best
}

/// Recompute colspans of one row against the canonical widths.
///
/// Cells without a width keep colspan 1 and advance the running position by
/// the canonical width of their own column (clamped to the last column).
pub fn assign_colspans(cells: Vec<Cell>, widths: &[u32]) -> Vec<Cell> {
    if widths.is_empty() {
        return cells;
    }
    let bounds = boundaries(widths);
    let mut position = 0u64;

    cells
        .into_iter()
        .enumerate()
        .map(|(idx, mut cell)| {
            match cell.width.filter(|width| *width > 0) {
                Some(width) => {
                    let end = position + u64::from(width);
                    let start_col = nearest_boundary(position, &bounds);
                    let end_col = nearest_boundary(end, &bounds);
                    cell.colspan = end_col.saturating_sub(start_col).max(1);
                    position = end;
                }
                None => {
                    cell.colspan = 1;
                    position += u64::from(widths[idx.min(widths.len() - 1)]);
                }
            }
            cell
        })
        .collect()
}

/// Whether a merged row set looks like a form laid out with tables.
///
/// Such layouts have wildly varying cell counts and no column grid to
/// recover, so colspan inference would only scramble them.
pub fn is_irregular_layout(rows: &[Row], config: &NormalizerConfig) -> bool {
    if rows.len() < IRREGULAR_LAYOUT_MIN_ROWS {
        return false;
    }
    let distinct: HashSet<usize> = rows.iter().map(|row| row.cells.len()).collect();
    if distinct.len() >= FORM_DISTINCT_COUNTS {
        return true;
    }
    if distinct.len() < FORM_KEYWORD_DISTINCT_COUNTS {
        return false;
    }
    let leading_text = rows
        .iter()
        .take(IRREGULAR_LAYOUT_KEYWORD_ROWS)
        .flat_map(|row| row.cells.iter().map(|cell| cell.text.as_str()))
        .collect::<Vec<_>>()
        .join(" ");
    config.has_form_keyword(&leading_text)
}

/// Flag header and column-index rows around `column_index`.
fn mark_rows(rows: &mut [Row], column_index: Option<usize>) {
    for (idx, row) in rows.iter_mut().enumerate() {
        row.is_header = column_index.is_some_and(|ci| idx < ci);
        row.is_column_index = column_index == Some(idx);
        for cell in &mut row.cells {
            cell.is_header = row.is_header;
        }
    }
}

/// Resolve a data candidate into a renderable [`Table`].
pub fn resolve(candidate: DataCandidate, config: &NormalizerConfig) -> Table {
    let DataCandidate { mut rows, title, notes } = candidate;

    if is_irregular_layout(&rows, config) {
        debug!(rows = rows.len(), "Irregular layout, keeping cells as-is");
        mark_rows(&mut rows, None);
        return Table { rows, title, notes };
    }

    let column_index = find_column_index_row(&rows, config.column_index_ratio());
    let widths = canonical_widths(&rows, column_index);

    if widths.is_empty() {
        debug!(?column_index, "No canonical widths, skipping colspan inference");
        mark_rows(&mut rows, column_index);
        return Table { rows, title, notes };
    }

    rows = rows
        .into_iter()
        .map(|row| Row {
            cells: assign_colspans(row.cells, &widths),
            ..row
        })
        .collect();
    mark_rows(&mut rows, column_index);

    apply_header_rowspan(&mut rows);
    if config.merge_body_row_groups() {
        merge_body_row_groups(&mut rows);
    }

    debug!(
        rows = rows.len(),
        columns = widths.len(),
        ?column_index,
        "Resolved table layout"
    );
    Table { rows, title, notes }
}
