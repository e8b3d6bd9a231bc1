//! Test utilities and fixture builders for the table normalization suite

use scraper::{Html, Selector};
use tracing_subscriber::EnvFilter;

/// Install a tracing subscriber honoring `RUST_LOG`; safe to call repeatedly.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One fixture cell: class suffix, declared width, text.
pub type CellSpec<'a> = (&'a str, u32, &'a str);

/// The empty table opening a split group.
#[allow(dead_code)]
pub fn placeholder() -> &'static str {
    r#"<table class="def" width="640"></table>"#
}

/// A `defFix` data table built from rows of `(class, width, text)` cells.
#[allow(dead_code)]
pub fn data_table(rows: &[&[CellSpec<'_>]]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|(class, width, text)| {
                    format!(r#"<td class="{class}" width="{width}">{text}</td>"#)
                })
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();
    format!(r#"<table class="defFix" width="640">{body}</table>"#)
}

/// A borderless single-cell title table.
#[allow(dead_code)]
pub fn title_table(lines: &[&str]) -> String {
    let rows: Vec<[CellSpec<'_>; 1]> = lines.iter().map(|line| [("C0", 640, *line)]).collect();
    let rows: Vec<&[CellSpec<'_>]> = rows.iter().map(|row| &row[..]).collect();
    data_table(&rows)
}

/// Placeholder followed by the given tables, separated by `<br>` as exported.
#[allow(dead_code)]
pub fn split_group(tables: &[String]) -> String {
    let mut html = String::from(placeholder());
    for table in tables {
        html.push_str("\n<br>\n");
        html.push_str(table);
    }
    html
}

#[allow(dead_code)]
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid test selector {css}: {e:?}"))
}

/// Number of elements matching `css`.
#[allow(dead_code)]
pub fn count(html: &str, css: &str) -> usize {
    Html::parse_fragment(html).select(&selector(css)).count()
}

/// Whitespace-collapsed text of every element matching `css`.
#[allow(dead_code)]
pub fn texts(html: &str, css: &str) -> Vec<String> {
    Html::parse_fragment(html)
        .select(&selector(css))
        .map(|element| {
            let text = element.text().collect::<Vec<_>>().join(" ");
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .collect()
}

/// Values of `attr` on every element matching `css`.
#[allow(dead_code)]
pub fn attrs(html: &str, css: &str, attr: &str) -> Vec<String> {
    Html::parse_fragment(html)
        .select(&selector(css))
        .filter_map(|element| element.value().attr(attr).map(String::from))
        .collect()
}

/// Cell count of every row matching `css`.
#[allow(dead_code)]
pub fn row_lengths(html: &str, css: &str) -> Vec<usize> {
    let cell = selector("td, th");
    Html::parse_fragment(html)
        .select(&selector(css))
        .map(|row| row.select(&cell).count())
        .collect()
}
