//! Markup output
//!
//! Two ways out of the pipeline:
//!
//! - [`render_table`] emits a fresh table for a resolved [`Table`], with the
//!   header block in `<thead>`, explicit spans, and every border side and
//!   width spelled out inline
//! - [`apply_inline_styles`] leaves a table's structure alone and only makes
//!   its class-encoded borders, widths and alignment explicit; this is the
//!   fallback for forms and anything the classifier did not recognize

use std::collections::HashSet;

use kuchiki::NodeRef;

use super::extraction::parse_style_suffix;
use super::model::{Alignment, BorderCode, Cell, Row, Table};
use crate::utils::dom;
use crate::utils::{BORDER_STYLE, CAPTION_STYLE, RENDERED_TABLE_ATTRS, css_length};

/// Escape text and turn line breaks into `<br/>`.
fn multiline(text: &str) -> String {
    html_escape::encode_text(text).replace('\n', "<br/>")
}

fn border_declarations(border: Option<BorderCode>) -> impl Iterator<Item = String> {
    border
        .into_iter()
        .flat_map(BorderCode::sides)
        .map(|side| format!("border-{side}: {BORDER_STYLE}"))
}

fn cell_style(cell: &Cell) -> Vec<String> {
    let mut styles = Vec::new();
    if let Some(width) = cell.width.filter(|width| *width > 0) {
        styles.push(format!("width: {width}px"));
    }
    let align = if cell.is_header {
        Alignment::Center
    } else {
        cell.align
    };
    if align != Alignment::Left {
        styles.push(format!("text-align: {}", align.as_css()));
    }
    styles.extend(border_declarations(cell.border));
    styles
}

fn render_cell(cell: &Cell, out: &mut String) {
    let tag = if cell.is_header { "th" } else { "td" };
    out.push('<');
    out.push_str(tag);
    if cell.colspan > 1 {
        out.push_str(&format!(r#" colspan="{}""#, cell.colspan));
    }
    if cell.rowspan > 1 {
        out.push_str(&format!(r#" rowspan="{}""#, cell.rowspan));
    }
    let styles = cell_style(cell);
    if !styles.is_empty() {
        out.push_str(&format!(r#" style="{}""#, styles.join("; ")));
    }
    out.push_str(&format!(">{}</{tag}>", html_escape::encode_text(&cell.text)));
}

fn render_row(row: &Row) -> String {
    let mut out = String::from("<tr>");
    for cell in &row.cells {
        render_cell(cell, &mut out);
    }
    out.push_str("</tr>");
    out
}

/// Render a resolved table, its caption and (optionally) its trailing notes.
///
/// Empty rows are kept: they hold the place of rows absorbed by a rowspan.
pub fn render_table(table: &Table, include_notes: bool) -> String {
    let mut lines = vec![format!("<table {RENDERED_TABLE_ATTRS}>")];

    if let Some(title) = table.title.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!(
            r#"<caption style="{CAPTION_STYLE}">{}</caption>"#,
            multiline(title)
        ));
    }

    let header: Vec<&Row> = table.header_rows().collect();
    if !header.is_empty() {
        lines.push("<thead>".to_string());
        lines.extend(header.into_iter().map(render_row));
        lines.push("</thead>".to_string());
    }

    let body: Vec<&Row> = table.body_rows().collect();
    if !body.is_empty() {
        lines.push("<tbody>".to_string());
        lines.extend(body.into_iter().map(render_row));
        lines.push("</tbody>".to_string());
    }
    lines.push("</table>".to_string());

    if include_notes && let Some(notes) = table.notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push("<br/>".to_string());
        lines.push(format!("<div>{}</div>", multiline(notes)));
    }

    lines.join("\n")
}

/// Lowercased property names already declared in a style attribute.
fn declared_properties(style: &str) -> HashSet<String> {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .map(|(property, _)| property.trim().to_ascii_lowercase())
        .collect()
}

/// Append declarations whose property is not already present.
///
/// Returns whether the style attribute changed.
fn append_styles(node: &NodeRef, declarations: &[(String, String)]) -> bool {
    let existing = dom::attr(node, "style").unwrap_or_default();
    let present = declared_properties(&existing);
    let additions: Vec<String> = declarations
        .iter()
        .filter(|(property, _)| !present.contains(property.as_str()))
        .map(|(property, value)| format!("{property}: {value}"))
        .collect();
    if additions.is_empty() {
        return false;
    }

    let base = existing.trim().trim_end_matches(';').trim_end();
    let style = if base.is_empty() {
        additions.join("; ")
    } else {
        format!("{base}; {}", additions.join("; "))
    };
    dom::set_attr(node, "style", &style);
    true
}

/// Make class-encoded styling explicit on a table kept as-is.
///
/// Adds `border-collapse: collapse` to the table and, per cell, its width,
/// alignment and border sides. Properties already declared inline are left
/// untouched, so running this twice is a no-op.
pub fn apply_inline_styles(table: &NodeRef) {
    append_styles(
        table,
        &[("border-collapse".to_string(), "collapse".to_string())],
    );

    for row in dom::own_rows(table) {
        for cell in dom::row_cells(&row) {
            let suffix = parse_style_suffix(&dom::class_tokens(&cell));
            let mut declarations = Vec::new();

            if let Some(width) = dom::attr(&cell, "width").filter(|w| !w.trim().is_empty()) {
                declarations.push(("width".to_string(), css_length(&width)));
            }
            if let Some(suffix) = suffix {
                declarations.push(("text-align".to_string(), suffix.align.as_css().to_string()));
            }
            for side in suffix.and_then(|s| s.border).into_iter().flat_map(BorderCode::sides) {
                declarations.push((format!("border-{side}"), BORDER_STYLE.to_string()));
            }

            append_styles(&cell, &declarations);
        }
    }
}
