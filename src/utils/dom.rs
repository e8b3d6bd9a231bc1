//! Thin helpers over kuchiki's mutable DOM
//!
//! Every stage follows the same pattern: parse once into a mutable tree,
//! collect the nodes of interest before touching anything (detaching during
//! iteration invalidates sibling iterators), mutate, then serialize once.

use html5ever::{LocalName, QualName, local_name, namespace_url, ns};
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;

use crate::error::Result;

/// Parse markup into a mutable document tree.
pub fn parse_document(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html.to_string())
}

/// Parse a snippet as the content of a `<body>`.
///
/// Nothing is moved into a synthesized `<head>`: `<style>`, `<title>` and
/// `<meta>` stay where they were written. The nodes hang off a single root
/// element, see [`fragment_root`].
pub fn parse_fragment(html: &str) -> NodeRef {
    let context = QualName::new(None, ns!(html), local_name!("body"));
    kuchiki::parse_fragment(context, Vec::new()).one(html.to_string())
}

/// The element holding the top-level nodes of a parsed fragment.
pub fn fragment_root(document: &NodeRef) -> NodeRef {
    document
        .children()
        .find(|child| child.as_element().is_some())
        .unwrap_or_else(|| document.clone())
}

/// Parse a markup snippet and return its top-level nodes, detached and
/// ready to be inserted elsewhere.
pub fn parse_fragment_nodes(html: &str) -> Vec<NodeRef> {
    let root = fragment_root(&parse_fragment(html));
    let nodes: Vec<NodeRef> = root.children().collect();
    for node in &nodes {
        node.detach();
    }
    nodes
}

/// A new, detached HTML element without attributes.
pub fn new_element(name: &str) -> NodeRef {
    NodeRef::new_element(QualName::new(None, ns!(html), LocalName::from(name)), [])
}

/// Serialize a tree. With `as_fragment` the tree must come from
/// [`parse_fragment`] and only the top-level nodes are written, so callers
/// get back the shape they passed in.
pub fn serialize(document: &NodeRef, as_fragment: bool) -> Result<String> {
    let mut output = Vec::new();
    if as_fragment {
        for child in fragment_root(document).children() {
            child.serialize(&mut output)?;
        }
    } else {
        document.serialize(&mut output)?;
    }
    Ok(String::from_utf8(output)?)
}

pub fn is_tag(node: &NodeRef, name: &str) -> bool {
    node.as_element()
        .is_some_and(|element| (*element.name.local).eq_ignore_ascii_case(name))
}

pub fn attr(node: &NodeRef, name: &str) -> Option<String> {
    let element = node.as_element()?;
    let attrs = element.attributes.borrow();
    attrs.get(name).map(String::from)
}

pub fn set_attr(node: &NodeRef, name: &str, value: impl Into<String>) {
    if let Some(element) = node.as_element() {
        element.attributes.borrow_mut().insert(name, value.into());
    }
}

pub fn remove_attr(node: &NodeRef, name: &str) -> bool {
    node.as_element()
        .is_some_and(|element| element.attributes.borrow_mut().remove(name).is_some())
}

/// Whitespace-separated tokens of the `class` attribute.
pub fn class_tokens(node: &NodeRef) -> Vec<String> {
    attr(node, "class")
        .map(|classes| classes.split_whitespace().map(String::from).collect())
        .unwrap_or_default()
}

pub fn has_class(node: &NodeRef, token: &str) -> bool {
    class_tokens(node).iter().any(|class| class == token)
}

/// Text node containing only whitespace (including NBSP).
pub fn is_blank_text(node: &NodeRef) -> bool {
    node.as_text()
        .is_some_and(|text| text.borrow().trim().is_empty())
}

/// Direct element children whose tag is one of `names`.
pub fn child_elements(node: &NodeRef, names: &[&str]) -> Vec<NodeRef> {
    node.children()
        .filter(|child| names.iter().any(|name| is_tag(child, name)))
        .collect()
}

/// Rows that belong to this table and not to a table nested in one of its
/// cells: direct `tr` children plus those of `thead`/`tbody`/`tfoot`.
pub fn own_rows(table: &NodeRef) -> Vec<NodeRef> {
    let mut rows = Vec::new();
    for child in table.children() {
        if is_tag(&child, "tr") {
            rows.push(child);
        } else if is_tag(&child, "thead") || is_tag(&child, "tbody") || is_tag(&child, "tfoot") {
            rows.extend(child_elements(&child, &["tr"]));
        }
    }
    rows
}

/// Cells of a row in document order.
pub fn row_cells(row: &NodeRef) -> Vec<NodeRef> {
    child_elements(row, &["td", "th"])
}

/// All `table` elements of the document in document order.
pub fn all_tables(document: &NodeRef) -> Vec<NodeRef> {
    document
        .descendants()
        .filter(|node| is_tag(node, "table"))
        .collect()
}
