//! Property-based tests for the structural invariants of normalization
//!
//! - every rendered span is at least 1
//! - a group is either merged into one table or left cell-for-cell intact
//! - style cleaning is idempotent
//! - border flags always match the code's bits

use lexbg_tables::html_preprocessing::clean_style;
use lexbg_tables::table_normalizer::BorderCode;
use lexbg_tables::{normalize, normalize_with_report, NormalizerConfig};
use proptest::prelude::*;

mod common;
use common::{attrs, count, split_group};

const WORDS: [&str; 6] = ["сол", "1", "Брой", "раз-", "фасовка", "2."];

fn cell_strategy() -> impl Strategy<Value = (char, u32, u32, usize)> {
    (
        prop::sample::select(vec!['L', 'C', 'R', 'J']),
        0u32..=15,
        prop::sample::select(vec![0u32, 40, 50, 100, 150, 200]),
        0..WORDS.len(),
    )
}

fn table_strategy() -> impl Strategy<Value = Vec<Vec<(char, u32, u32, usize)>>> {
    prop::collection::vec(prop::collection::vec(cell_strategy(), 1..6), 1..7)
}

fn render_fixture(rows: &[Vec<(char, u32, u32, usize)>]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|(prefix, code, width, word)| {
                    let width_attr = if *width > 0 {
                        format!(r#" width="{width}""#)
                    } else {
                        String::new()
                    };
                    format!(r#"<td class="{prefix}{code}"{width_attr}>{}</td>"#, WORDS[*word])
                })
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();
    split_group(&[format!(r#"<table class="defFix">{body}</table>"#)])
}

#[test]
fn proptest_rendered_spans_are_positive() {
    proptest!(|(rows in table_strategy())| {
        let output = normalize(&render_fixture(&rows));
        for attr in ["colspan", "rowspan"] {
            for value in attrs(&output, "td, th", attr) {
                let span: usize = value.parse().unwrap_or(0);
                prop_assert!(span >= 1, "{attr}={value}");
            }
        }
    });
}

#[test]
fn proptest_group_output_is_one_table_or_untouched() {
    proptest!(|(rows in table_strategy())| {
        let html = render_fixture(&rows);
        let (output, report) = normalize_with_report(&html, &NormalizerConfig::default()).unwrap();
        if report.groups_merged == 1 {
            prop_assert_eq!(count(&output, "table"), 1);
            prop_assert_eq!(count(&output, "table.defFix"), 0);
        } else {
            prop_assert_eq!(count(&output, "table.defFix"), 1);
            prop_assert_eq!(count(&output, "td"), rows.iter().map(Vec::len).sum::<usize>());
        }
    });
}

fn declaration_strategy() -> impl Strategy<Value = String> {
    let property = prop::sample::select(vec![
        "color", "COLOR", "border-top", "BORDER-LEFT", "background", "background-color",
        "MARGIN-LEFT", "width", "font-family",
    ]);
    let value = prop::sample::select(vec![
        "", "black", "windowtext 1pt solid", "1pt solid black", "white", "#fefefe", "#FFF",
        "#fafafa", "2.85pt", "auto", "Blackadder", "  red  ", "medium none",
    ]);
    (property, value).prop_map(|(property, value)| format!("{property}:{value}"))
}

#[test]
fn proptest_style_cleaning_is_idempotent() {
    proptest!(|(declarations in prop::collection::vec(declaration_strategy(), 0..6), on_table: bool)| {
        let style = declarations.join(";");
        let once = clean_style(&style, on_table).unwrap_or(style);
        prop_assert_eq!(clean_style(&once, on_table), None);
    });
}

#[test]
fn proptest_arbitrary_style_cleaning_is_idempotent() {
    proptest!(|(style in "\\PC{0,80}")| {
        let once = clean_style(&style, true).unwrap_or(style);
        prop_assert_eq!(clean_style(&once, true), None);
    });
}

#[test]
fn proptest_border_flags_match_code() {
    proptest!(|(code in 0u32..=15)| {
        let border = BorderCode::new(code).unwrap();
        prop_assert_eq!(border.left(), code & 8 != 0);
        prop_assert_eq!(border.right(), code & 4 != 0);
        prop_assert_eq!(border.top(), code & 2 != 0);
        prop_assert_eq!(border.bottom(), code & 1 != 0);
        prop_assert_eq!(u32::from(border.code()), code);
    });
}

#[test]
fn proptest_out_of_range_codes_are_rejected() {
    proptest!(|(code in 16u32..10_000)| {
        prop_assert!(BorderCode::new(code).is_none());
    });
}
