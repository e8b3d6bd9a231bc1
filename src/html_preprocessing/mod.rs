//! Document-wide cleanup run before table groups are detected.
//!
//! - Inline style cleaning (black/system colors, white backgrounds, table margins)
//! - Positioning wrapper removal and legacy format attribute stripping

pub mod style_cleaning;
pub mod wrapper_unwrapping;

pub use style_cleaning::{clean_style, clean_styles};
pub use wrapper_unwrapping::{strip_legacy_format_attr, unwrap_wrapper_tables};
