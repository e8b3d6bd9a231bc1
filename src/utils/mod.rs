//! Shared helpers: constants, text cleanup and DOM access

pub mod constants;
pub mod dom;
pub mod string_utils;

pub use constants::*;
pub use string_utils::{
    collapse_whitespace, css_length, is_column_number, parse_leading_int, repair_hyphenation,
};
