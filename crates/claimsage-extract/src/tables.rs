//! Explicitly numbered table extraction ("Table N" bodies).

use claimsage_common::records::PatentTable;
use lazy_static::lazy_static;
use regex::Regex;

use crate::text::{normalize_whitespace, truncate_chars};

const MIN_TABLE_LEN: usize = 50;
const MAX_TABLE_LEN: usize = 2_000;
const MAX_TABLES: usize = 30;

lazy_static! {
    // Line-anchored: prose references like "shown in Table 1 were" are not headings.
    static ref TABLE_HEADING: Regex = Regex::new(r"(?mi)^[ \t]*Table\s+(\d+)[^\n]*\n").unwrap();
    static ref BODY_TERMINATOR: Regex = Regex::new(r"\n\s*\n|\[0\d+\]").unwrap();
}

/// Extract up to [`MAX_TABLES`] numbered table bodies.
pub fn extract_tables(text: &str) -> Vec<PatentTable> {
    let headings: Vec<(u32, usize, usize)> = TABLE_HEADING
        .captures_iter(text)
        .filter_map(|caps| {
            let number: u32 = caps.get(1)?.as_str().parse().ok()?;
            let m = caps.get(0)?;
            Some((number, m.start(), m.end()))
        })
        .collect();

    let mut tables = Vec::new();
    for (i, (number, _, body_start)) in headings.iter().enumerate() {
        // Body runs to a blank line, a paragraph marker, the next table, or EOF.
        let next_heading = headings.get(i + 1).map(|next| next.1).unwrap_or(text.len());
        let window = &text[*body_start..next_heading];
        let body_end = BODY_TERMINATOR
            .find(window)
            .map(|m| m.start())
            .unwrap_or(window.len());

        let content = normalize_whitespace(&window[..body_end]);
        if content.len() >= MIN_TABLE_LEN {
            tables.push(PatentTable {
                table_number: *number,
                content: truncate_chars(&content, MAX_TABLE_LEN).to_string(),
            });
        }
        if tables.len() >= MAX_TABLES {
            break;
        }
    }
    tables
}
