//! Optional body-row merging keyed on row numbers
//!
//! Long legal tables number their entries ("1.", "2.", ...) and wrap an
//! entry over several rows whose first cell is left empty. When one of the
//! other columns holds at most one non-empty fragment across such a run, the
//! run is read as a single logical row and collapsed with rowspans.
//!
//! Off by default: it has not been validated against the real corpus.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::model::Row;
use crate::utils::repair_hyphenation;

static ROW_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.$").expect("ROW_NUMBER_RE: hardcoded regex is valid")
});

fn first_text(row: &Row) -> Option<&str> {
    row.cells.first().map(|cell| cell.text.trim())
}

fn row_number(row: &Row) -> Option<u64> {
    let caps = ROW_NUMBER_RE.captures(first_text(row)?)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Whether the row after a run continues the numbering (or ends it cleanly).
fn continues_numbering(after: Option<&Row>, number: u64) -> bool {
    let Some(row) = after else {
        return true;
    };
    match first_text(row) {
        None => false,
        Some(text) if text.is_empty() => true,
        Some(_) => row_number(row).is_some_and(|next| next == number + 1),
    }
}

/// Collapse one run of rows; returns whether anything was merged.
fn merge_run(run: &mut [Row]) -> bool {
    let Some(columns) = run.first().map(|row| row.cells.len()).filter(|n| *n >= 2) else {
        return false;
    };

    let fragments: Vec<Vec<String>> = (0..columns)
        .map(|column| {
            run.iter()
                .filter_map(|row| row.cells.get(column))
                .map(|cell| cell.text.trim())
                .filter(|text| !text.is_empty())
                .map(str::to_string)
                .collect()
        })
        .collect();

    if !fragments[1..].iter().any(|texts| texts.len() <= 1) {
        return false;
    }

    let span = run.len();
    for (cell, texts) in run[0].cells.iter_mut().zip(&fragments) {
        cell.rowspan = span;
        cell.text = repair_hyphenation(&texts.join(" "));
    }
    for row in &mut run[1..] {
        let absorbed = columns.min(row.cells.len());
        row.cells.drain(..absorbed);
    }
    true
}

/// Merge numbered body-row runs in place; returns how many runs were merged.
pub fn merge_body_row_groups(rows: &mut [Row]) -> usize {
    let mut merged = 0;
    let mut idx = 0;

    while idx < rows.len() {
        if rows[idx].in_header_block() {
            idx += 1;
            continue;
        }
        let Some(number) = row_number(&rows[idx]) else {
            idx += 1;
            continue;
        };

        let mut size = 1;
        while let Some(next) = rows.get(idx + size) {
            if next.in_header_block() || first_text(next).is_none_or(|text| !text.is_empty()) {
                break;
            }
            size += 1;
        }

        if size > 1
            && continues_numbering(rows.get(idx + size), number)
            && merge_run(&mut rows[idx..idx + size])
        {
            merged += 1;
        }
        idx += size;
    }

    if merged > 0 {
        debug!(merged, "Merged numbered body row runs");
    }
    merged
}
