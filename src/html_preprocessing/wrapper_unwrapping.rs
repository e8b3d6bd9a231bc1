//! Positioning wrapper removal
//!
//! The 2014 export format centers real tables by nesting them in a
//! one-column outer table. Such a wrapper has exactly one cell per row, no
//! visible cell borders, and at least one table somewhere inside its cells.
//! It is replaced by its content, kept inside a width-preserving `<div>`
//! when the first cell declares a width. Tables of a split-table family
//! (placeholder or data class) are never treated as wrappers.

use kuchiki::NodeRef;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::config::NormalizerConfig;
use crate::utils::{LEGACY_FORMAT_ATTR, css_length, dom};

static BORDER_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*border(?:-(?:top|right|bottom|left))?\s*:\s*([^;]*)")
        .expect("BORDER_DECL_RE: hardcoded regex is valid")
});

static BORDER_WIDTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:pt|px)\b").expect("BORDER_WIDTH_RE: hardcoded regex is valid")
});

static STYLE_WIDTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*width\s*:\s*([\d.]+\s*(?:pt|px))")
        .expect("STYLE_WIDTH_RE: hardcoded regex is valid")
});

/// Whether a style declares a border a reader would actually see.
fn has_visible_border(style: &str) -> bool {
    BORDER_DECL_RE
        .captures_iter(style)
        .filter_map(|caps| caps.get(1))
        .map(|value| value.as_str())
        .filter(|value| !value.to_ascii_lowercase().contains("none"))
        .any(|value| {
            BORDER_WIDTH_RE
                .captures_iter(value)
                .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
                .any(|width| width > 0.0)
        })
}

/// Width to preserve from the wrapper's first cell, as a CSS length.
fn wrapper_width(cell: &NodeRef) -> Option<String> {
    let from_style = dom::attr(cell, "style").and_then(|style| {
        STYLE_WIDTH_RE
            .captures(&style)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().split_whitespace().collect::<String>())
    });
    from_style.or_else(|| {
        dom::attr(cell, "width")
            .filter(|width| !width.trim().is_empty())
            .map(|width| css_length(&width))
    })
}

/// The single cell of every row, if `table` is a positioning wrapper.
fn wrapper_cells(table: &NodeRef) -> Option<Vec<NodeRef>> {
    let rows = dom::own_rows(table);
    if rows.is_empty() {
        return None;
    }

    let mut cells = Vec::with_capacity(rows.len());
    for row in &rows {
        let [cell] = <[NodeRef; 1]>::try_from(dom::row_cells(row)).ok()?;
        if dom::attr(&cell, "style").is_some_and(|style| has_visible_border(&style)) {
            return None;
        }
        cells.push(cell);
    }

    let wraps_table = cells
        .iter()
        .any(|cell| cell.descendants().any(|node| dom::is_tag(&node, "table")));
    wraps_table.then_some(cells)
}

/// Content worth moving out of a wrapper cell: elements and non-blank text.
fn movable_children(cell: &NodeRef) -> Vec<NodeRef> {
    cell.children()
        .filter(|child| {
            child.as_element().is_some() || (child.as_text().is_some() && !dom::is_blank_text(child))
        })
        .collect()
}

fn unwrap_table(table: &NodeRef, cells: &[NodeRef]) {
    let content: Vec<NodeRef> = cells.iter().flat_map(movable_children).collect();
    let container = cells
        .first()
        .and_then(wrapper_width)
        .map(|width| {
            let div = dom::new_element("div");
            dom::set_attr(&div, "style", format!("width: {width}; max-width: 100%;"));
            div
        });

    match container {
        Some(div) => {
            for node in content {
                div.append(node);
            }
            table.insert_before(div);
        }
        None => {
            for node in content {
                table.insert_before(node);
            }
        }
    }
    table.detach();
}

/// Replace positioning wrapper tables with their content.
///
/// Returns the number of wrappers removed.
pub fn unwrap_wrapper_tables(document: &NodeRef, config: &NormalizerConfig) -> usize {
    let mut unwrapped = 0;
    for table in dom::all_tables(document) {
        if dom::has_class(&table, config.placeholder_class())
            || dom::has_class(&table, config.data_class())
        {
            continue;
        }
        if let Some(cells) = wrapper_cells(&table) {
            unwrap_table(&table, &cells);
            unwrapped += 1;
        }
    }
    debug!(unwrapped, "Unwrapped positioning tables");
    unwrapped
}

/// Remove the legacy format marker from every table.
pub fn strip_legacy_format_attr(document: &NodeRef) -> usize {
    dom::all_tables(document)
        .iter()
        .filter(|table| dom::remove_attr(table, LEGACY_FORMAT_ATTR))
        .count()
}
