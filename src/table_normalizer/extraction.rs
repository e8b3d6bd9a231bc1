//! Row/cell extraction
//!
//! Turns a table element into flat [`Row`]/[`Cell`] records. The legacy
//! class suffix (`L9`, `C12`, `R5`, `J0`) is parsed here once; nothing
//! downstream looks at class strings again.

use kuchiki::NodeRef;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use super::model::{Alignment, BorderCode, Cell, Row};
use crate::utils::dom;
use crate::utils::{collapse_whitespace, parse_leading_int};

static STYLE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([LCRJ])(\d+)$").expect("STYLE_SUFFIX_RE: hardcoded regex is valid")
});

/// Alignment and border code decoded from a cell's class list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSuffix {
    pub align: Alignment,
    pub border: Option<BorderCode>,
}

/// Decode the first `<prefix><code>` class token.
///
/// A code above 15 keeps the alignment but drops the border.
pub fn parse_style_suffix<S: AsRef<str>>(classes: &[S]) -> Option<StyleSuffix> {
    classes.iter().find_map(|class| {
        let caps = STYLE_SUFFIX_RE.captures(class.as_ref())?;
        let prefix = caps.get(1)?.as_str().chars().next()?;
        let align = Alignment::from_prefix(prefix)?;
        let border = caps
            .get(2)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .and_then(BorderCode::new);
        if border.is_none() {
            trace!(class = class.as_ref(), "border code out of range, ignoring");
        }
        Some(StyleSuffix { align, border })
    })
}

/// Read a positive span attribute, defaulting to 1.
fn span_attr(node: &NodeRef, name: &str) -> usize {
    dom::attr(node, name)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|span| *span >= 1)
        .unwrap_or(1)
}

/// Build a [`Cell`] from a `td`/`th` element.
pub fn extract_cell(node: &NodeRef) -> Cell {
    let suffix = parse_style_suffix(&dom::class_tokens(node));
    Cell {
        text: collapse_whitespace(&node.text_contents()),
        colspan: span_attr(node, "colspan"),
        rowspan: span_attr(node, "rowspan"),
        width: dom::attr(node, "width").and_then(|w| parse_leading_int(&w)),
        align: suffix.map(|s| s.align).unwrap_or_default(),
        is_header: dom::is_tag(node, "th"),
        border: suffix.and_then(|s| s.border),
    }
}

/// Extract the rows owned by `table`, skipping rows without cells.
pub fn extract_rows(table: &NodeRef) -> Vec<Row> {
    dom::own_rows(table)
        .iter()
        .map(|tr| {
            dom::row_cells(tr)
                .iter()
                .map(extract_cell)
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .map(Row::new)
        .collect()
}

/// Whether any cell of `table` carries a visible border code.
pub fn has_bordered_cells(table: &NodeRef) -> bool {
    dom::own_rows(table).iter().any(|tr| {
        dom::row_cells(tr).iter().any(|cell| {
            parse_style_suffix(&dom::class_tokens(cell))
                .and_then(|suffix| suffix.border)
                .is_some_and(BorderCode::is_visible)
        })
    })
}
