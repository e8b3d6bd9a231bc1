//! Table group detection
//!
//! The legacy publisher splits one visual table into an empty placeholder
//! table followed by one or more data tables of the same family, separated
//! only by whitespace and `<br>`. Standalone data tables whose own border
//! attribute is absent but whose cells carry border codes are picked up as
//! hidden-border singles.

use kuchiki::NodeRef;
use tracing::debug;

use super::extraction::has_bordered_cells;
use crate::config::NormalizerConfig;
use crate::utils::dom;

/// A placeholder table and the data tables that follow it
#[derive(Debug, Clone)]
pub struct TableGroup {
    pub placeholder: NodeRef,
    pub data_tables: Vec<NodeRef>,
    /// Whitespace and `<br>` nodes between the members, removed on merge
    pub separators: Vec<NodeRef>,
}

impl TableGroup {
    /// Every table of the group, placeholder first.
    pub fn members(&self) -> impl Iterator<Item = &NodeRef> {
        std::iter::once(&self.placeholder).chain(self.data_tables.iter())
    }

    pub fn contains(&self, table: &NodeRef) -> bool {
        self.members().any(|member| member == table)
    }
}

/// A data table outside any group
#[derive(Debug, Clone)]
pub enum StandaloneTable {
    /// No border attribute, but cells with border codes
    HiddenBorder(NodeRef),
    /// Only class-encoded alignment and widths to make explicit
    Styled(NodeRef),
}

impl StandaloneTable {
    pub fn node(&self) -> &NodeRef {
        match self {
            Self::HiddenBorder(node) | Self::Styled(node) => node,
        }
    }
}

fn is_placeholder(table: &NodeRef, config: &NormalizerConfig) -> bool {
    dom::has_class(table, config.placeholder_class()) && !dom::has_class(table, config.data_class())
}

fn is_data_table(node: &NodeRef, config: &NormalizerConfig) -> bool {
    dom::is_tag(node, "table") && dom::has_class(node, config.data_class())
}

/// Walk the siblings after `placeholder` collecting data tables.
///
/// Stops at the first non-blank text, comment, or element that is neither
/// `<br>` nor a data table. Returns `None` when no data table follows.
pub fn collect_group(placeholder: &NodeRef, config: &NormalizerConfig) -> Option<TableGroup> {
    let mut data_tables = Vec::new();
    let mut separators = Vec::new();
    let mut pending = Vec::new();
    let mut current = placeholder.next_sibling();

    while let Some(node) = current {
        if dom::is_blank_text(&node) || dom::is_tag(&node, "br") {
            pending.push(node.clone());
        } else if is_data_table(&node, config) {
            separators.append(&mut pending);
            data_tables.push(node.clone());
        } else {
            break;
        }
        current = node.next_sibling();
    }

    if data_tables.is_empty() {
        return None;
    }

    Some(TableGroup {
        placeholder: placeholder.clone(),
        data_tables,
        separators,
    })
}

/// Find every split-table group in document order.
pub fn find_table_groups(document: &NodeRef, config: &NormalizerConfig) -> Vec<TableGroup> {
    let groups: Vec<TableGroup> = dom::all_tables(document)
        .iter()
        .filter(|table| is_placeholder(table, config))
        .filter_map(|placeholder| collect_group(placeholder, config))
        .collect();

    debug!(count = groups.len(), "Detected split table groups");
    groups
}

/// Find data tables not claimed by any group and with no declared border.
pub fn find_standalone_tables(
    document: &NodeRef,
    config: &NormalizerConfig,
    groups: &[TableGroup],
) -> Vec<StandaloneTable> {
    dom::all_tables(document)
        .into_iter()
        .filter(|table| is_data_table(table, config))
        .filter(|table| !groups.iter().any(|group| group.contains(table)))
        .filter(|table| {
            dom::attr(table, "border")
                .map(|border| border.trim().is_empty() || border.trim() == "0")
                .unwrap_or(true)
        })
        .map(|table| {
            if has_bordered_cells(&table) {
                StandaloneTable::HiddenBorder(table)
            } else {
                StandaloneTable::Styled(table)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NormalizerConfig {
        NormalizerConfig::default()
    }

    #[test]
    fn test_group_skips_whitespace_and_breaks() {
        let document = dom::parse_document(
            r#"<table class="def"></table>
               <br/>
               <table class="defFix"><tr><td class="L9">a</td></tr></table>
               <br>
               <table class="defFix"><tr><td class="R5">b</td></tr></table>
               <p>after</p>
               <table class="defFix"><tr><td class="R5">c</td></tr></table>"#,
        );
        let groups = find_table_groups(&document, &config());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].data_tables.len(), 2);
        assert_eq!(groups[0].members().count(), 3);
        // Trailing separators after the last data table are not claimed
        assert!(groups[0].separators.iter().all(|n| n.next_sibling().is_some()));

        let singles = find_standalone_tables(&document, &config(), &groups);
        assert_eq!(singles.len(), 1);
        assert!(matches!(singles[0], StandaloneTable::HiddenBorder(_)));
    }

    #[test]
    fn test_text_ends_group() {
        let document = dom::parse_document(
            r#"<table class="def"></table> note
               <table class="defFix"><tr><td>a</td></tr></table>"#,
        );
        assert!(find_table_groups(&document, &config()).is_empty());
    }

    #[test]
    fn test_bordered_and_plain_singles() {
        let document = dom::parse_document(
            r#"<table class="defFix" border="1"><tr><td class="L9">a</td></tr></table>
               <table class="defFix" border="0"><tr><td class="C0">b</td></tr></table>
               <table><tr><td class="L9">c</td></tr></table>"#,
        );
        let singles = find_standalone_tables(&document, &config(), &[]);
        assert_eq!(singles.len(), 1);
        assert!(matches!(singles[0], StandaloneTable::Styled(_)));
        assert!(dom::is_tag(singles[0].node(), "table"));
    }
}
