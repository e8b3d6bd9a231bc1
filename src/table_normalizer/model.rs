//! Structured table model built by extraction and consumed by the renderer
//!
//! Values here are constructed fresh for one table group, transformed by the
//! resolver and rendered back to markup; nothing outlives a single call.

use serde::Serialize;

/// A cell's 4-bit border code as encoded in the legacy class suffix.
///
/// | bit | value | side   |
/// |-----|-------|--------|
/// | 3   | 8     | left   |
/// | 2   | 4     | right  |
/// | 1   | 2     | top    |
/// | 0   | 1     | bottom |
///
/// The side flags are always derived from the code; there is no way to set
/// one independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderCode(u8);

impl BorderCode {
    pub const LEFT: u8 = 0b1000;
    pub const RIGHT: u8 = 0b0100;
    pub const TOP: u8 = 0b0010;
    pub const BOTTOM: u8 = 0b0001;

    /// Build a code, rejecting anything outside `0..=15`.
    #[must_use]
    pub fn new(code: u32) -> Option<Self> {
        u8::try_from(code).ok().filter(|c| *c <= 15).map(Self)
    }

    #[must_use]
    pub fn code(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn left(self) -> bool {
        self.0 & Self::LEFT != 0
    }

    #[must_use]
    pub fn right(self) -> bool {
        self.0 & Self::RIGHT != 0
    }

    #[must_use]
    pub fn top(self) -> bool {
        self.0 & Self::TOP != 0
    }

    #[must_use]
    pub fn bottom(self) -> bool {
        self.0 & Self::BOTTOM != 0
    }

    #[must_use]
    pub fn is_visible(self) -> bool {
        self.0 > 0
    }

    /// Present sides in left, right, top, bottom order.
    pub fn sides(self) -> impl Iterator<Item = &'static str> {
        [
            (self.left(), "left"),
            (self.right(), "right"),
            (self.top(), "top"),
            (self.bottom(), "bottom"),
        ]
        .into_iter()
        .filter_map(|(present, side)| present.then_some(side))
    }
}

/// Horizontal alignment carried by the class prefix letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Map a class prefix letter (`L`, `C`, `R`, `J`).
    #[must_use]
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'L' => Some(Self::Left),
            'C' => Some(Self::Center),
            'R' => Some(Self::Right),
            'J' => Some(Self::Justify),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Whitespace-collapsed text content
    pub text: String,
    pub colspan: usize,
    pub rowspan: usize,
    /// Declared width in pixels
    pub width: Option<u32>,
    pub align: Alignment,
    pub is_header: bool,
    /// `None` when the cell carried no alignment/border class suffix
    pub border: Option<BorderCode>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            text: String::new(),
            colspan: 1,
            rowspan: 1,
            width: None,
            align: Alignment::Left,
            is_header: false,
            border: None,
        }
    }
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_border(mut self, border: BorderCode) -> Self {
        self.border = Some(border);
        self
    }

    #[must_use]
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Whether the cell closes its column downwards.
    ///
    /// Cells without a class suffix give no evidence of an open bottom edge
    /// and are treated as closed so they never trigger a rowspan merge.
    #[must_use]
    pub fn has_bottom_border(&self) -> bool {
        self.border.is_none_or(BorderCode::bottom)
    }

    #[must_use]
    pub fn has_visible_border(&self) -> bool {
        self.border.is_some_and(BorderCode::is_visible)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub is_header: bool,
    /// Row of bare integers labelling the columns ("1 2 3 4")
    pub is_column_index: bool,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            ..Self::default()
        }
    }

    /// Rows rendered inside `<thead>`.
    #[must_use]
    pub fn in_header_block(&self) -> bool {
        self.is_header || self.is_column_index
    }

    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(|cell| cell.text.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub rows: Vec<Row>,
    /// Recovered title; lines separated by `\n`
    pub title: Option<String>,
    /// Trailing notes; lines separated by `\n`
    pub notes: Option<String>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.in_header_block())
    }

    pub fn body_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| !row.in_header_block())
    }

    /// Text-only view for downstream JSON producers.
    pub fn summary(&self) -> TableSummary {
        let mut summary = TableSummary {
            title: self.title.clone(),
            notes: self.notes.clone(),
            ..TableSummary::default()
        };
        for row in &self.rows {
            if row.is_column_index {
                summary.column_numbers = Some(row.texts());
            } else if row.is_header {
                summary.headers.push(row.texts());
            } else {
                summary.rows.push(row.texts());
            }
        }
        summary
    }
}

/// Serializable text view of a normalized table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub headers: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_numbers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_code_decomposition() {
        let code = BorderCode::new(9).unwrap();
        assert!(code.left());
        assert!(!code.right());
        assert!(!code.top());
        assert!(code.bottom());
        assert_eq!(code.sides().collect::<Vec<_>>(), vec!["left", "bottom"]);

        let full = BorderCode::new(15).unwrap();
        assert_eq!(full.sides().count(), 4);
        assert!(!BorderCode::new(0).unwrap().is_visible());
    }

    #[test]
    fn test_border_code_rejects_out_of_range() {
        assert!(BorderCode::new(16).is_none());
        assert!(BorderCode::new(300).is_none());
    }

    #[test]
    fn test_cell_without_suffix_counts_as_closed_bottom() {
        let cell = Cell::new("x");
        assert!(cell.has_bottom_border());
        assert!(!cell.has_visible_border());

        let open = Cell::new("x").with_border(BorderCode::new(12).unwrap());
        assert!(!open.has_bottom_border());
        assert!(open.has_visible_border());
    }

    #[test]
    fn test_summary_partitions_rows() {
        let mut header = Row::new(vec![Cell::new("Name"), Cell::new("Qty")]);
        header.is_header = true;
        let mut index = Row::new(vec![Cell::new("1"), Cell::new("2")]);
        index.is_column_index = true;
        let body = Row::new(vec![Cell::new("Salt"), Cell::new("3")]);

        let mut table = Table::new(vec![header, index, body]);
        table.title = Some("Приложение".to_string());

        let summary = table.summary();
        assert_eq!(summary.headers, vec![vec!["Name", "Qty"]]);
        assert_eq!(summary.column_numbers, Some(vec!["1".to_string(), "2".to_string()]));
        assert_eq!(summary.rows, vec![vec!["Salt", "3"]]);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["title"], "Приложение");
        assert!(json.get("notes").is_none());
        assert_eq!(table.header_rows().count(), 2);
        assert_eq!(table.body_rows().count(), 1);
    }
}
