//! Text helpers shared by extraction and rowspan merging
//!
//! Cell text coming out of the legacy publisher is hard-wrapped: runs of
//! whitespace stand in for line breaks and words split across rows keep a
//! trailing hyphen. These helpers undo both.

use regex::Regex;
use std::sync::LazyLock;

/// Lowercase letter, hyphen, one or more spaces, lowercase letter.
///
/// Compound words (`въздухо-водо`) have no space after the hyphen and are
/// left alone; a hyphen before a capital or a digit is kept as well.
static HYPHEN_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\p{Ll})- +(\p{Ll})").expect("HYPHEN_BREAK_RE: hardcoded regex is valid")
});

static LEADING_INT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)").expect("LEADING_INT_RE: hardcoded regex is valid")
});

/// Collapse every whitespace run (including NBSP) to one space and trim.
///
/// # Examples
/// ```
/// # use lexbg_tables::utils::collapse_whitespace;
/// assert_eq!(collapse_whitespace("  Вид\n\t на  стоката "), "Вид на стоката");
/// ```
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split(|c: char| c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join syllables that were split across rows with a trailing hyphen.
///
/// # Examples
/// ```
/// # use lexbg_tables::utils::repair_hyphenation;
/// assert_eq!(repair_hyphenation("Опаковка и раз- фасовка"), "Опаковка и разфасовка");
/// assert_eq!(repair_hyphenation("въздухо-водоне- проницаеми"), "въздухо-водонепроницаеми");
/// assert_eq!(repair_hyphenation("Чл.- 5"), "Чл.- 5");
/// ```
#[must_use]
pub fn repair_hyphenation(text: &str) -> String {
    // Overlapping breaks ("а- б- в") need a second pass because the shared
    // letter is consumed by the first match.
    let mut current = text.to_string();
    loop {
        let next = HYPHEN_BREAK_RE.replace_all(&current, "${1}${2}").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Whether a cell text is a bare integer, as found in column-index rows.
#[must_use]
pub fn is_column_number(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}

/// Parse the leading digits of an attribute value (`"120"`, `"120px"`).
///
/// Anything else, including percentages' absent digits, yields `None` so
/// the caller treats the width as undeclared.
#[must_use]
pub fn parse_leading_int(value: &str) -> Option<u32> {
    LEADING_INT_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Normalize a width attribute into a CSS length: bare digits become pixels,
/// anything else (`30%`, `12pt`) is kept as written.
///
/// # Examples
/// ```
/// # use lexbg_tables::utils::css_length;
/// assert_eq!(css_length("120"), "120px");
/// assert_eq!(css_length(" 30% "), "30%");
/// ```
#[must_use]
pub fn css_length(raw: &str) -> String {
    let raw = raw.trim();
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        format!("{raw}px")
    } else {
        raw.to_string()
    }
}
