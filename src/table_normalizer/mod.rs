//! Split-table reconstruction
//!
//! Runs the whole pipeline over one document:
//!
//! 1. style cleaning and wrapper removal (see [`crate::html_preprocessing`])
//! 2. group and standalone table detection
//! 3. extraction into [`Row`]/[`Cell`] values
//! 4. classification
//! 5. layout resolution for data tables
//! 6. rendering, or inline-style fallback for everything else
//!
//! Only the final step touches the document tree; everything in between
//! works on plain values.

pub mod body_rowspan;
pub mod classification;
pub mod extraction;
pub mod group_detection;
pub mod layout;
pub mod model;
pub mod rendering;
pub mod rowspan;

use kuchiki::NodeRef;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

use crate::config::NormalizerConfig;
use crate::error::Result;
use crate::html_preprocessing::{clean_styles, strip_legacy_format_attr, unwrap_wrapper_tables};
use crate::utils::{collapse_whitespace, dom};

pub use classification::{Classification, DataCandidate, ExtractedTable};
pub use group_detection::{StandaloneTable, TableGroup};
pub use model::{Alignment, BorderCode, Cell, Row, Table, TableSummary};

static WORK_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<table|\bstyle\s*=").expect("WORK_MARKER_RE: hardcoded regex is valid")
});

static DOCUMENT_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:!doctype|html|head|body)\b")
        .expect("DOCUMENT_MARKER_RE: hardcoded regex is valid")
});

/// What one normalization pass did, for logging and regression checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    /// Elements whose inline style was rewritten or removed
    pub styles_cleaned: usize,
    pub wrappers_unwrapped: usize,
    /// Placeholder groups replaced by one rendered table
    pub groups_merged: usize,
    pub groups_kept_as_form: usize,
    /// Groups left in place with inline styles only
    pub groups_fallback: usize,
    /// Hidden-border tables replaced by a rendered table
    pub singles_restructured: usize,
    /// Standalone tables left in place with inline styles only
    pub singles_styled: usize,
}

impl NormalizationReport {
    /// Whether the pass changed any table structure.
    #[must_use]
    pub fn restructured_any(&self) -> bool {
        self.groups_merged + self.singles_restructured > 0
    }
}

/// Normalizes the split tables of legal documents.
#[derive(Debug, Clone, Default)]
pub struct TableNormalizer {
    config: NormalizerConfig,
}

impl TableNormalizer {
    #[must_use]
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize markup and return the rewritten markup.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized back to text.
    pub fn normalize(&self, markup: &str) -> Result<String> {
        self.normalize_with_report(markup).map(|(output, _)| output)
    }

    /// Normalize markup and report what was done.
    ///
    /// Markup without tables and inline styles is returned verbatim. Input
    /// without a doctype or an `<html>`, `<head>` or `<body>` tag is parsed
    /// and returned as a body fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized back to text.
    pub fn normalize_with_report(&self, markup: &str) -> Result<(String, NormalizationReport)> {
        if !WORK_MARKER_RE.is_match(markup) {
            return Ok((markup.to_string(), NormalizationReport::default()));
        }

        let as_fragment = !DOCUMENT_MARKER_RE.is_match(markup);
        let document = if as_fragment {
            dom::parse_fragment(markup)
        } else {
            dom::parse_document(markup)
        };
        let report = self.normalize_document(&document)?;
        let output = dom::serialize(&document, as_fragment)?;
        Ok((output, report))
    }

    /// Run every stage over a parsed document in place.
    ///
    /// # Errors
    ///
    /// Returns an error if a stage's selector is rejected by the parser.
    pub fn normalize_document(&self, document: &NodeRef) -> Result<NormalizationReport> {
        let mut report = NormalizationReport::default();

        if self.config.clean_styles() {
            report.styles_cleaned = clean_styles(document)?;
        }
        if self.config.unwrap_wrappers() {
            report.wrappers_unwrapped = unwrap_wrapper_tables(document, &self.config);
        }
        strip_legacy_format_attr(document);

        // Both lists are taken before anything moves: a group kept in place
        // must not be picked up again as standalone tables.
        let groups = group_detection::find_table_groups(document, &self.config);
        let singles = group_detection::find_standalone_tables(document, &self.config, &groups);

        for group in &groups {
            self.process_group(group, &mut report);
        }
        for single in &singles {
            self.process_single(single, &mut report);
        }

        debug!(?report, "Normalized document");
        Ok(report)
    }

    fn process_group(&self, group: &TableGroup, report: &mut NormalizationReport) {
        let tables: Vec<ExtractedTable> = group
            .data_tables
            .iter()
            .map(|table| ExtractedTable {
                rows: extraction::extract_rows(table),
                text: collapse_whitespace(&table.text_contents()),
            })
            .collect();

        match classification::classify_group(&tables, &self.config) {
            Classification::Form => {
                for table in &group.data_tables {
                    rendering::apply_inline_styles(table);
                }
                report.groups_kept_as_form += 1;
            }
            Classification::Data(candidate) => {
                let table = layout::resolve(candidate, &self.config);
                if self.replace_with(&group.placeholder, &table) {
                    for node in group.data_tables.iter().chain(&group.separators) {
                        node.detach();
                    }
                    group.placeholder.detach();
                    report.groups_merged += 1;
                } else {
                    self.style_group(group, "merge produced no cells", report);
                }
            }
            Classification::Title(_) => {
                self.style_group(group, "title block without content table", report);
            }
            Classification::Unrecognized(reason) => self.style_group(group, reason, report),
        }
    }

    fn style_group(&self, group: &TableGroup, reason: &str, report: &mut NormalizationReport) {
        debug!(reason, tables = group.data_tables.len(), "Keeping group, inline styles only");
        for table in &group.data_tables {
            rendering::apply_inline_styles(table);
        }
        report.groups_fallback += 1;
    }

    fn process_single(&self, single: &StandaloneTable, report: &mut NormalizationReport) {
        let node = single.node();
        if let StandaloneTable::HiddenBorder(_) = single
            && let Classification::Data(candidate) =
                classification::classify_table(extraction::extract_rows(node), &self.config)
        {
            let table = layout::resolve(candidate, &self.config);
            if self.replace_with(node, &table) {
                node.detach();
                report.singles_restructured += 1;
                return;
            }
        }
        rendering::apply_inline_styles(node);
        report.singles_styled += 1;
    }

    /// Render `table` and insert it before `anchor`.
    ///
    /// Returns false (and inserts nothing) when the table has no cells left.
    fn replace_with(&self, anchor: &NodeRef, table: &Table) -> bool {
        if table.rows.iter().all(|row| row.cells.is_empty()) {
            return false;
        }
        let rendered = rendering::render_table(table, self.config.render_notes());
        let nodes = dom::parse_fragment_nodes(&rendered);
        if nodes.is_empty() {
            return false;
        }
        for node in nodes {
            anchor.insert_before(node);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_path_returns_input_verbatim() -> anyhow::Result<()> {
        let markup = "<p>Чл. 1. Текст&nbsp;без таблици</p>";
        let (output, report) = TableNormalizer::default().normalize_with_report(markup)?;
        assert_eq!(output, markup);
        assert_eq!(report, NormalizationReport::default());
        Ok(())
    }

    #[test]
    fn test_placeholder_group_is_merged() -> anyhow::Result<()> {
        let markup = r#"<table class="def"></table><br>
<table class="defFix"><tr><td class="L9" width="100">Име</td><td class="R5" width="200">Брой</td></tr></table>"#;
        let (output, report) = TableNormalizer::default().normalize_with_report(markup)?;
        assert_eq!(report.groups_merged, 1);
        assert!(report.restructured_any());
        assert!(!output.contains("defFix"));
        assert!(!output.contains(r#"class="def""#));
        assert!(output.contains(
            r#"<td style="width: 100px; border-left: 1px solid; border-bottom: 1px solid">Име</td>"#
        ));
        assert!(output.contains(
            r#"<td style="width: 200px; text-align: right; border-right: 1px solid; border-bottom: 1px solid">Брой</td>"#
        ));
        Ok(())
    }

    #[test]
    fn test_hidden_border_single_is_restructured() -> anyhow::Result<()> {
        let markup = r#"<table class="defFix" border="0">
<tr><td class="C15" width="100">A</td><td class="C15" width="100">B</td></tr>
<tr><td class="L15" width="100">1</td><td class="L15" width="100">2</td></tr>
</table>"#;
        let (output, report) = TableNormalizer::default().normalize_with_report(markup)?;
        assert_eq!(report.singles_restructured, 1);
        assert!(output.contains("<thead>"));
        assert!(output.contains("<th style=\"width: 100px; text-align: center;"));
        Ok(())
    }

    #[test]
    fn test_fragment_keeps_style_and_title_blocks() -> anyhow::Result<()> {
        let markup = r#"<style>.L9{border-left:1px}</style><title>Наредба</title><p style="color: black">Чл. 1</p>"#;
        let (output, report) = TableNormalizer::default().normalize_with_report(markup)?;
        assert_eq!(report.styles_cleaned, 1);
        assert_eq!(output, "<style>.L9{border-left:1px}</style><title>Наредба</title><p>Чл. 1</p>");
        Ok(())
    }

    #[test]
    fn test_spaced_style_attribute_is_cleaned() -> anyhow::Result<()> {
        let markup = r#"<p style = "color: black">Чл. 2</p>"#;
        let (output, report) = TableNormalizer::default().normalize_with_report(markup)?;
        assert_eq!(report.styles_cleaned, 1);
        assert_eq!(output, "<p>Чл. 2</p>");
        Ok(())
    }

    #[test]
    fn test_head_and_body_tags_mark_a_document() -> anyhow::Result<()> {
        let markup = r#"<head><style>p{}</style></head><body><p style="color: black">Чл. 3</p></body>"#;
        let output = TableNormalizer::default().normalize(markup)?;
        assert!(output.contains("<head><style>p{}</style></head>"));
        assert!(output.contains("<body><p>Чл. 3</p></body>"));
        Ok(())
    }

    #[test]
    fn test_plain_single_only_gets_styles() -> anyhow::Result<()> {
        let markup = r#"<table class="defFix"><tr><td class="C0" width="50">a</td></tr></table>"#;
        let (output, report) = TableNormalizer::default().normalize_with_report(markup)?;
        assert_eq!(report.singles_styled, 1);
        assert!(output.contains(r#"style="width: 50px; text-align: center""#));
        assert!(output.contains(r#"class="defFix""#));
        Ok(())
    }
}
