//! Table classification
//!
//! Decides what a candidate group or standalone table is before anything is
//! restructured. The checks run in a fixed priority order and the first one
//! that matches wins:
//!
//! 1. form group: heterogeneous row shapes across several tables
//! 2. title block: a few borderless, full-width single-cell rows
//! 3. data table: bordered cells (plus a shape check for standalone tables)
//! 4. anything else is unrecognized and only gets inline styles

use std::collections::HashSet;

use tracing::debug;

use super::model::Row;
use crate::config::NormalizerConfig;
use crate::utils::{FORM_DISTINCT_COUNTS, FORM_GROUP_MIN_TABLES, FORM_KEYWORD_DISTINCT_COUNTS};

/// One table of a candidate group, already extracted
#[derive(Debug, Clone, Default)]
pub struct ExtractedTable {
    pub rows: Vec<Row>,
    /// Whitespace-collapsed text of the whole table, for keyword checks
    pub text: String,
}

/// Rows to restructure plus the title/notes recovered around them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataCandidate {
    pub rows: Vec<Row>,
    pub title: Option<String>,
    pub notes: Option<String>,
}

/// Outcome of classification; each variant carries what its handler needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Printable form: keep every row and cell, add inline styles only
    Form,
    /// Decorative title block with no table content of its own
    Title(String),
    /// Tabular data to resolve and re-render
    Data(DataCandidate),
    /// No confident reading; keep the structure, add inline styles only
    Unrecognized(&'static str),
}

/// Whether a group of data tables is a printable form.
///
/// Needs at least three tables and four distinct per-row cell counts, then
/// either five distinct counts or a form keyword in the combined text.
pub fn is_form_group(tables: &[ExtractedTable], config: &NormalizerConfig) -> bool {
    if tables.len() < FORM_GROUP_MIN_TABLES {
        return false;
    }

    let distinct: HashSet<usize> = tables
        .iter()
        .flat_map(|table| table.rows.iter().map(|row| row.cells.len()))
        .collect();
    if distinct.len() < FORM_KEYWORD_DISTINCT_COUNTS {
        return false;
    }
    if distinct.len() >= FORM_DISTINCT_COUNTS {
        return true;
    }

    let combined = tables
        .iter()
        .map(|table| table.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    config.has_form_keyword(&combined)
}

/// Whether a table's rows form a decorative title block.
///
/// At most `title_max_rows` rows, exactly one cell per row, no visible
/// border, and every declared width at least `title_min_width`.
pub fn is_title_table(rows: &[Row], config: &NormalizerConfig) -> bool {
    rows.len() <= config.title_max_rows()
        && rows.iter().all(|row| {
            let [cell] = row.cells.as_slice() else {
                return false;
            };
            !cell.has_visible_border()
                && cell.width.is_none_or(|width| width >= config.title_min_width())
        })
}

/// Non-empty cell texts joined by line breaks.
pub fn block_text(rows: &[Row]) -> Option<String> {
    let lines: Vec<&str> = rows
        .iter()
        .flat_map(|row| row.cells.iter())
        .map(|cell| cell.text.as_str())
        .filter(|text| !text.is_empty())
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn has_bordered_rows(rows: &[Row]) -> bool {
    rows.iter()
        .flat_map(|row| row.cells.iter())
        .any(|cell| cell.has_visible_border())
}

/// Full data-table shape test used for standalone tables.
///
/// At least two rows, at least one bordered cell, and column counts that
/// are either uniform or within a factor of two with at least two columns.
pub fn is_data_shape(rows: &[Row]) -> bool {
    if rows.len() < 2 || !has_bordered_rows(rows) {
        return false;
    }
    let counts = rows.iter().map(|row| row.cells.len());
    let (Some(min_cols), Some(max_cols)) = (counts.clone().min(), counts.max()) else {
        return false;
    };
    (max_cols == min_cols && max_cols >= 2) || (min_cols >= 2 && max_cols <= min_cols * 2)
}

fn push_line(target: &mut Option<String>, text: String) {
    match target {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(&text);
        }
        None => *target = Some(text),
    }
}

/// Classify the data tables of a placeholder group.
pub fn classify_group(tables: &[ExtractedTable], config: &NormalizerConfig) -> Classification {
    if is_form_group(tables, config) {
        debug!(tables = tables.len(), "Group classified as form");
        return Classification::Form;
    }

    let mut candidate = DataCandidate::default();
    let mut seen_content = false;

    for table in tables {
        if is_title_table(&table.rows, config) {
            if let Some(text) = block_text(&table.rows) {
                let target = if seen_content {
                    &mut candidate.notes
                } else {
                    &mut candidate.title
                };
                push_line(target, text);
            }
        } else {
            seen_content = true;
            candidate.rows.extend(table.rows.iter().cloned());
        }
    }

    if !seen_content {
        return match candidate.title.or(candidate.notes) {
            Some(title) => Classification::Title(title),
            None => Classification::Unrecognized("group has no content tables"),
        };
    }
    if candidate.rows.is_empty() {
        return Classification::Unrecognized("content tables have no rows");
    }
    if !has_bordered_rows(&candidate.rows) {
        return Classification::Unrecognized("no bordered cells, positional layout");
    }

    debug!(
        rows = candidate.rows.len(),
        has_title = candidate.title.is_some(),
        has_notes = candidate.notes.is_some(),
        "Group classified as data"
    );
    Classification::Data(candidate)
}

/// Classify a standalone table (never a form; the form test needs a group).
pub fn classify_table(rows: Vec<Row>, config: &NormalizerConfig) -> Classification {
    if rows.is_empty() {
        return Classification::Unrecognized("table has no rows");
    }
    if is_title_table(&rows, config) {
        return match block_text(&rows) {
            Some(title) => Classification::Title(title),
            None => Classification::Unrecognized("empty title block"),
        };
    }
    if !is_data_shape(&rows) {
        return Classification::Unrecognized("not a data table shape");
    }
    Classification::Data(DataCandidate {
        rows,
        ..DataCandidate::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_normalizer::model::{BorderCode, Cell};

    fn bordered(text: &str) -> Cell {
        Cell::new(text).with_border(BorderCode::new(15).unwrap())
    }

    fn row(cells: Vec<Cell>) -> Row {
        Row::new(cells)
    }

    fn table_with_counts(counts: &[usize], text: &str) -> ExtractedTable {
        ExtractedTable {
            rows: counts
                .iter()
                .map(|n| row((0..*n).map(|_| bordered("x")).collect()))
                .collect(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_form_group_by_distinct_counts() {
        let config = NormalizerConfig::default();
        let tables = vec![
            table_with_counts(&[1, 2], ""),
            table_with_counts(&[3, 4], ""),
            table_with_counts(&[5], ""),
        ];
        assert!(is_form_group(&tables, &config));
        assert_eq!(classify_group(&tables, &config), Classification::Form);
    }

    #[test]
    fn test_form_group_needs_keyword_with_four_counts() {
        let config = NormalizerConfig::default();
        let plain = vec![
            table_with_counts(&[1, 2], ""),
            table_with_counts(&[3], ""),
            table_with_counts(&[4], ""),
        ];
        assert!(!is_form_group(&plain, &config));

        let with_keyword = vec![
            table_with_counts(&[1, 2], "Примерна форма"),
            table_with_counts(&[3], ""),
            table_with_counts(&[4], ""),
        ];
        assert!(is_form_group(&with_keyword, &config));
    }

    #[test]
    fn test_uniform_three_table_group_is_not_form() {
        let config = NormalizerConfig::default();
        let tables = vec![
            table_with_counts(&[3, 3], "ПРОТОКОЛ"),
            table_with_counts(&[3], ""),
            table_with_counts(&[3], ""),
        ];
        assert!(!is_form_group(&tables, &config));
        assert!(matches!(classify_group(&tables, &config), Classification::Data(_)));
    }

    #[test]
    fn test_title_table_detection() {
        let config = NormalizerConfig::default();
        let title = vec![
            row(vec![Cell::new("Приложение № 1").with_width(600)]),
            row(vec![Cell::new("към чл. 5").with_width(600)]),
        ];
        assert!(is_title_table(&title, &config));
        assert_eq!(block_text(&title).as_deref(), Some("Приложение № 1\nкъм чл. 5"));

        let narrow = vec![row(vec![Cell::new("x").with_width(200)])];
        assert!(!is_title_table(&narrow, &config));

        let boxed = vec![row(vec![bordered("x").with_width(600)])];
        assert!(!is_title_table(&boxed, &config));

        let two_cells = vec![row(vec![Cell::new("a"), Cell::new("b")])];
        assert!(!is_title_table(&two_cells, &config));
    }

    #[test]
    fn test_group_splits_title_content_and_notes() {
        let config = NormalizerConfig::default();
        let title = ExtractedTable {
            rows: vec![row(vec![Cell::new("Таблица 1").with_width(640)])],
            text: "Таблица 1".to_string(),
        };
        let content = ExtractedTable {
            rows: vec![row(vec![bordered("a"), bordered("b")])],
            text: "a b".to_string(),
        };
        let note = ExtractedTable {
            rows: vec![row(vec![Cell::new("Забележка").with_width(640)])],
            text: "Забележка".to_string(),
        };

        let Classification::Data(candidate) = classify_group(&[title, content, note], &config) else {
            panic!("expected data classification");
        };
        assert_eq!(candidate.title.as_deref(), Some("Таблица 1"));
        assert_eq!(candidate.notes.as_deref(), Some("Забележка"));
        assert_eq!(candidate.rows.len(), 1);
    }

    #[test]
    fn test_borderless_group_is_unrecognized() {
        let config = NormalizerConfig::default();
        let content = ExtractedTable {
            rows: vec![row(vec![Cell::new("a"), Cell::new("b")])],
            text: String::new(),
        };
        assert!(matches!(
            classify_group(&[content], &config),
            Classification::Unrecognized(_)
        ));
    }

    #[test]
    fn test_data_shape_bounds() {
        let two = row(vec![bordered("a"), bordered("b")]);
        let four = row(vec![bordered("a"), bordered("b"), bordered("c"), bordered("d")]);
        let five = row((0..5).map(|_| bordered("x")).collect());
        let one = row(vec![bordered("a")]);

        assert!(is_data_shape(&[two.clone(), four.clone()]));
        assert!(!is_data_shape(&[two.clone(), five]));
        assert!(!is_data_shape(&[one.clone(), two.clone()]));
        assert!(!is_data_shape(&[one.clone(), one]));
        assert!(!is_data_shape(&[two]));
    }

    #[test]
    fn test_classify_table_requires_data_shape() {
        let config = NormalizerConfig::default();
        let rows = vec![
            row(vec![bordered("a"), bordered("b")]),
            row(vec![bordered("1"), bordered("2")]),
        ];
        assert!(matches!(classify_table(rows, &config), Classification::Data(_)));
        assert!(matches!(
            classify_table(vec![row(vec![bordered("a"), bordered("b")])], &config),
            Classification::Unrecognized(_)
        ));
    }
}
