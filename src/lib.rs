//! Table reconstruction for legal documents scraped from a legacy publisher.
//!
//! The publisher splits one visual table into an empty placeholder table
//! and a run of data tables, and encodes borders and alignment in class
//! suffixes (`L9`, `C14`). [`normalize`] merges such runs back into one
//! table with explicit spans, a header block and inline styles, and leaves
//! anything it cannot read confidently in place with only its styling made
//! explicit.
//!
//! ```
//! let markup = r#"<table class="def"></table>
//! <table class="defFix"><tr><td class="L9" width="100">Име</td><td class="R5" width="200">Брой</td></tr></table>"#;
//! let output = lexbg_tables::normalize(markup);
//! assert!(!output.contains("defFix"));
//! assert!(output.contains("border-left: 1px solid"));
//! ```

pub mod config;
pub mod error;
pub mod html_preprocessing;
pub mod table_normalizer;
pub mod utils;

pub use config::{NormalizerConfig, NormalizerConfigBuilder};
pub use error::{NormalizeError, Result};
pub use table_normalizer::{NormalizationReport, Table, TableNormalizer, TableSummary};

use tracing::warn;

/// Normalize every split or hidden-border table in `markup`.
///
/// Never fails: if the document cannot be processed the input is returned
/// unchanged and a warning is logged.
#[must_use]
pub fn normalize(markup: &str) -> String {
    match try_normalize(markup) {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "Table normalization failed, returning input unchanged");
            markup.to_string()
        }
    }
}

/// Like [`normalize`], but surfaces internal failures.
///
/// # Errors
///
/// Returns an error if the rewritten document cannot be serialized.
pub fn try_normalize(markup: &str) -> Result<String> {
    TableNormalizer::default().normalize(markup)
}

/// Normalize with a custom configuration.
///
/// # Errors
///
/// Returns an error if the rewritten document cannot be serialized.
pub fn normalize_with_config(markup: &str, config: &NormalizerConfig) -> Result<String> {
    TableNormalizer::new(config.clone()).normalize(markup)
}

/// Normalize and return counters describing what was changed.
///
/// # Errors
///
/// Returns an error if the rewritten document cannot be serialized.
pub fn normalize_with_report(
    markup: &str,
    config: &NormalizerConfig,
) -> Result<(String, NormalizationReport)> {
    TableNormalizer::new(config.clone()).normalize_with_report(markup)
}
