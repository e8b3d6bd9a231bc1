//! Builder for `NormalizerConfig`
//!
//! Every field has a default, so the builder has no required steps; `build`
//! validates the combination before handing out a config.

use anyhow::{Context, anyhow, ensure};

use super::types::NormalizerConfig;

#[derive(Debug, Clone, Default)]
pub struct NormalizerConfigBuilder {
    config: NormalizerConfig,
}

impl NormalizerConfig {
    /// Create a builder for configuring a `NormalizerConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> NormalizerConfigBuilder {
        NormalizerConfigBuilder::default()
    }

    /// Check threshold ranges and class name sanity.
    ///
    /// # Errors
    ///
    /// Returns `NormalizeError::InvalidConfig` describing the first violation.
    pub fn validate(&self) -> crate::Result<()> {
        self.check().map_err(Into::into)
    }

    fn check(&self) -> anyhow::Result<()> {
        ensure!(
            !self.placeholder_class.trim().is_empty(),
            "placeholder_class must not be empty"
        );
        ensure!(!self.data_class.trim().is_empty(), "data_class must not be empty");
        ensure!(
            self.placeholder_class != self.data_class,
            "placeholder_class and data_class must differ (both '{}')",
            self.data_class
        );
        if !(self.column_index_ratio > 0.0 && self.column_index_ratio <= 1.0) {
            return Err(anyhow!("expected a value in (0, 1], got {}", self.column_index_ratio))
                .context("column_index_ratio");
        }
        ensure!(self.title_max_rows >= 1, "title_max_rows must be at least 1");
        Ok(())
    }
}

impl NormalizerConfigBuilder {
    #[must_use]
    pub fn placeholder_class(mut self, class: impl Into<String>) -> Self {
        self.config.placeholder_class = class.into();
        self
    }

    #[must_use]
    pub fn data_class(mut self, class: impl Into<String>) -> Self {
        self.config.data_class = class.into();
        self
    }

    #[must_use]
    pub fn form_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.form_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn title_min_width(mut self, width: u32) -> Self {
        self.config.title_min_width = width;
        self
    }

    #[must_use]
    pub fn title_max_rows(mut self, rows: usize) -> Self {
        self.config.title_max_rows = rows;
        self
    }

    #[must_use]
    pub fn column_index_ratio(mut self, ratio: f64) -> Self {
        self.config.column_index_ratio = ratio;
        self
    }

    #[must_use]
    pub fn merge_body_row_groups(mut self, enabled: bool) -> Self {
        self.config.merge_body_row_groups = enabled;
        self
    }

    #[must_use]
    pub fn clean_styles(mut self, enabled: bool) -> Self {
        self.config.clean_styles = enabled;
        self
    }

    #[must_use]
    pub fn unwrap_wrappers(mut self, enabled: bool) -> Self {
        self.config.unwrap_wrappers = enabled;
        self
    }

    #[must_use]
    pub fn render_notes(mut self, enabled: bool) -> Self {
        self.config.render_notes = enabled;
        self
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    ///
    /// Returns `NormalizeError::InvalidConfig` if a threshold is out of range
    /// or the family class names are empty or identical.
    pub fn build(self) -> crate::Result<NormalizerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
