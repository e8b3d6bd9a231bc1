//! Shared constants for table normalization
//!
//! Default thresholds for the classifier and layout resolver. These mirror
//! what the legacy publishing system emits and are overridable through
//! [`crate::config::NormalizerConfig`].

/// Class token marking the empty placeholder table that opens a split table
pub const DEFAULT_PLACEHOLDER_CLASS: &str = "def";

/// Class token shared by the data tables that follow a placeholder
pub const DEFAULT_DATA_CLASS: &str = "defFix";

/// Minimum declared cell width (px) for a borderless single-column table to
/// be read as a decorative title block
pub const DEFAULT_TITLE_MIN_WIDTH: u32 = 500;

/// Maximum row count of a title block
pub const DEFAULT_TITLE_MAX_ROWS: usize = 3;

/// Share of integer cells that makes a row a column-index row
pub const DEFAULT_COLUMN_INDEX_RATIO: f64 = 0.7;

/// Minimum number of tables in a group before the form test applies
pub const FORM_GROUP_MIN_TABLES: usize = 3;

/// Distinct per-row cell counts that make a group a form when keywords are present
pub const FORM_KEYWORD_DISTINCT_COUNTS: usize = 4;

/// Distinct per-row cell counts that make a group a form on their own
pub const FORM_DISTINCT_COUNTS: usize = 5;

/// Minimum rows before the resolver treats a merged row set as an irregular layout
pub const IRREGULAR_LAYOUT_MIN_ROWS: usize = 5;

/// How many leading rows the irregular-layout guard scans for form keywords
pub const IRREGULAR_LAYOUT_KEYWORD_ROWS: usize = 10;

/// Legacy attribute carried by wrapper tables of the 2014 export format
pub const LEGACY_FORMAT_ATTR: &str = "tableformat";

/// Inline border declaration value emitted for every present border side
pub const BORDER_STYLE: &str = "1px solid";

/// Attributes of the table element emitted by the renderer
pub const RENDERED_TABLE_ATTRS: &str =
    r#"cellspacing="0" cellpadding="5" style="border-collapse: collapse;""#;

/// Inline style of the caption carrying a recovered title
pub const CAPTION_STYLE: &str = "text-align: center; font-weight: bold; padding-bottom: 5px;";

/// Keywords that mark a heterogeneous table group as a printable form
pub const DEFAULT_FORM_KEYWORDS: &[&str] = &[
    "ПРИМЕРНА ФОРМА",
    "ПРОТОКОЛ",
    "НАРЯД",
    "УДОСТОВЕРЕНИЕ",
    "ДНЕВНИК",
    "ЗАПОВЕД",
    "ДЕКЛАРАЦИЯ",
    "ФОРМУЛЯР",
];
