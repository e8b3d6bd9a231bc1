//! Core configuration type for table normalization
//!
//! `NormalizerConfig` holds the family class names and the classifier and
//! resolver thresholds. Defaults come from [`crate::utils::constants`].

use serde::{Deserialize, Serialize};

use crate::utils::{
    DEFAULT_COLUMN_INDEX_RATIO, DEFAULT_DATA_CLASS, DEFAULT_FORM_KEYWORDS,
    DEFAULT_PLACEHOLDER_CLASS, DEFAULT_TITLE_MAX_ROWS, DEFAULT_TITLE_MIN_WIDTH,
};

/// Main configuration struct for table normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Class token of the empty placeholder table opening a split table
    pub(crate) placeholder_class: String,

    /// Class token shared by the data tables of a family
    pub(crate) data_class: String,

    /// Keywords (matched case-insensitively) that mark a heterogeneous
    /// table group as a printable form
    pub(crate) form_keywords: Vec<String>,

    /// Minimum declared width in pixels of a title block cell
    pub(crate) title_min_width: u32,

    /// Maximum rows of a title block
    pub(crate) title_max_rows: usize,

    /// Share of integer cells that makes a row the column-index row
    pub(crate) column_index_ratio: f64,

    /// Merge unlabeled body rows under the preceding "N." row.
    ///
    /// Unverified on real documents; off by default.
    pub(crate) merge_body_row_groups: bool,

    /// Run the document-wide inline style cleaner
    pub(crate) clean_styles: bool,

    /// Replace single-column positioning tables with their content
    pub(crate) unwrap_wrappers: bool,

    /// Emit recovered trailing notes after a merged table
    pub(crate) render_notes: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            placeholder_class: DEFAULT_PLACEHOLDER_CLASS.to_string(),
            data_class: DEFAULT_DATA_CLASS.to_string(),
            form_keywords: DEFAULT_FORM_KEYWORDS.iter().map(|kw| (*kw).to_string()).collect(),
            title_min_width: DEFAULT_TITLE_MIN_WIDTH,
            title_max_rows: DEFAULT_TITLE_MAX_ROWS,
            column_index_ratio: DEFAULT_COLUMN_INDEX_RATIO,
            merge_body_row_groups: false,
            clean_styles: true,
            unwrap_wrappers: true,
            render_notes: true,
        }
    }
}

impl NormalizerConfig {
    /// Load a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values fail validation.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| crate::NormalizeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
