//! Getter methods for `NormalizerConfig`

use super::types::NormalizerConfig;

impl NormalizerConfig {
    #[must_use]
    pub fn placeholder_class(&self) -> &str {
        &self.placeholder_class
    }

    #[must_use]
    pub fn data_class(&self) -> &str {
        &self.data_class
    }

    #[must_use]
    pub fn form_keywords(&self) -> &[String] {
        &self.form_keywords
    }

    #[must_use]
    pub fn title_min_width(&self) -> u32 {
        self.title_min_width
    }

    #[must_use]
    pub fn title_max_rows(&self) -> usize {
        self.title_max_rows
    }

    #[must_use]
    pub fn column_index_ratio(&self) -> f64 {
        self.column_index_ratio
    }

    #[must_use]
    pub fn merge_body_row_groups(&self) -> bool {
        self.merge_body_row_groups
    }

    #[must_use]
    pub fn clean_styles(&self) -> bool {
        self.clean_styles
    }

    #[must_use]
    pub fn unwrap_wrappers(&self) -> bool {
        self.unwrap_wrappers
    }

    #[must_use]
    pub fn render_notes(&self) -> bool {
        self.render_notes
    }

    /// Whether `text` contains any configured form keyword.
    #[must_use]
    pub fn has_form_keyword(&self, text: &str) -> bool {
        let upper = text.to_uppercase();
        self.form_keywords
            .iter()
            .any(|keyword| upper.contains(&keyword.to_uppercase()))
    }
}
