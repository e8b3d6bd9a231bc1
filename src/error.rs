//! Error types for table normalization
//!
//! The boundary operation [`crate::normalize`] never surfaces these: every
//! failure degrades to returning the input untouched. They exist so internal
//! stages can propagate with `?` and so [`crate::try_normalize`] callers can
//! see what went wrong.

use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Result type alias for normalization operations
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Error types for normalization operations
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Writing the DOM back to markup failed
    #[error("Failed to serialize HTML: {0}")]
    Serialize(#[from] io::Error),

    /// Serialized markup was not valid UTF-8
    #[error("Serialized HTML is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// A hardcoded CSS selector was rejected by the selector engine
    #[error("Invalid CSS selector: {0}")]
    Selector(String),

    /// Configuration failed validation
    #[error("Invalid normalizer configuration: {0}")]
    InvalidConfig(String),
}

impl From<anyhow::Error> for NormalizeError {
    fn from(error: anyhow::Error) -> Self {
        NormalizeError::InvalidConfig(format!("{error:#}"))
    }
}

impl NormalizeError {
    /// Whether the failure came from the configuration rather than the markup
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, NormalizeError::InvalidConfig(_))
    }
}
