//! Inline style cleanup
//!
//! The legacy export spells out defaults that hurt rendering: explicit
//! black/`windowtext` colors on borders and text, `color:` declarations
//! left empty, white backgrounds that vanish in dark themes, and a
//! `margin-left` on tables that pushes them out of line with their titles.
//! Each declaration is cleaned on its own; a style attribute that ends up
//! empty is removed. Running the pass twice changes nothing the second time.

use kuchiki::NodeRef;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::{NormalizeError, Result};
use crate::utils::{collapse_whitespace, dom};

static COLOR_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:black|windowtext)\b").expect("COLOR_TOKEN_RE: hardcoded regex is valid")
});

static WHITE_BACKGROUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:white|#f[ef]f?[ef]?f?[ef]?)$")
        .expect("WHITE_BACKGROUND_RE: hardcoded regex is valid")
});

static MARGIN_LENGTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\d.]+\s*(?:pt|px)?$").expect("MARGIN_LENGTH_RE: hardcoded regex is valid")
});

/// Clean one style attribute value.
///
/// Returns `None` when nothing changed, otherwise the cleaned value (which
/// may be empty, meaning the attribute should go).
pub fn clean_style(style: &str, on_table: bool) -> Option<String> {
    let mut changed = false;
    let mut kept: Vec<String> = Vec::new();

    for declaration in style.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }
        let Some((property, value)) = declaration.split_once(':') else {
            kept.push(declaration.to_string());
            continue;
        };
        let property = property.trim();
        let name = property.to_ascii_lowercase();

        let stripped = COLOR_TOKEN_RE.replace_all(value, "");
        let value = collapse_whitespace(&stripped);
        let rewritten = value != value_text(declaration);

        let drop = value.is_empty()
            || (matches!(name.as_str(), "background" | "background-color")
                && WHITE_BACKGROUND_RE.is_match(&value))
            || (on_table && name == "margin-left" && MARGIN_LENGTH_RE.is_match(&value));

        if drop {
            changed = true;
        } else if rewritten {
            changed = true;
            kept.push(format!("{property}: {value}"));
        } else {
            kept.push(declaration.to_string());
        }
    }

    changed.then(|| kept.join("; "))
}

/// Value part of a `property: value` declaration, trimmed.
fn value_text(declaration: &str) -> &str {
    declaration
        .split_once(':')
        .map(|(_, value)| value.trim())
        .unwrap_or_default()
}

/// Clean every inline style in the document; returns how many elements changed.
///
/// # Errors
///
/// Returns `NormalizeError::Selector` if the attribute selector is rejected.
pub fn clean_styles(document: &NodeRef) -> Result<usize> {
    let styled: Vec<NodeRef> = document
        .select("[style]")
        .map_err(|()| NormalizeError::Selector("[style]".to_string()))?
        .map(|element| element.as_node().clone())
        .collect();

    let mut cleaned = 0;
    for node in &styled {
        let Some(style) = dom::attr(node, "style") else {
            continue;
        };
        let Some(new_style) = clean_style(&style, dom::is_tag(node, "table")) else {
            continue;
        };
        if new_style.is_empty() {
            dom::remove_attr(node, "style");
        } else {
            dom::set_attr(node, "style", new_style);
        }
        cleaned += 1;
    }

    debug!(cleaned, scanned = styled.len(), "Cleaned inline styles");
    Ok(cleaned)
}
