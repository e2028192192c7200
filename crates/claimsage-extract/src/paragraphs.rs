//! Numbered-paragraph extraction.
//!
//! Published applications prefix description paragraphs with a bracketed
//! sequence index — `[0001]` in EP/US text, `【0001】` in JP-sourced text.
//! Both marker conventions are scanned and the results merged; duplicate
//! numbers keep the longer body. Gaps in the numbering are a diagnostic
//! signal, not an error.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use claimsage_common::records::Paragraph;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::text::normalize_whitespace;

/// Bodies at or below this length are OCR noise, not paragraphs.
pub const MIN_CONTENT_LEN: usize = 15;
/// Indices at or above this are implausible for a single application.
const MAX_PARAGRAPH_NUMBER: u32 = 10_000;

lazy_static! {
    static ref MARKER_CONVENTIONS: Vec<Regex> = vec![
        Regex::new(r"\[0*(\d+)\]").unwrap(),
        Regex::new(r"【0*(\d+)】").unwrap(),
    ];
}

/// Extract all numbered paragraphs, sorted ascending and unique by number.
pub fn extract_paragraphs(text: &str) -> Vec<Paragraph> {
    let mut merged: BTreeMap<u32, Paragraph> = BTreeMap::new();

    for convention in MARKER_CONVENTIONS.iter() {
        for para in scan_convention(text, convention) {
            match merged.entry(para.number) {
                Entry::Vacant(slot) => {
                    slot.insert(para);
                }
                Entry::Occupied(mut slot) => {
                    // Duplicate number: keep the longer body.
                    if para.content.len() > slot.get().content.len() {
                        slot.insert(para);
                    }
                }
            }
        }
    }

    let paragraphs: Vec<Paragraph> = merged.into_values().collect();
    log_gaps(&paragraphs);
    paragraphs
}

/// Scan one marker convention: each candidate body runs from the end of its
/// marker to the start of the next marker of the same convention.
fn scan_convention(text: &str, marker: &Regex) -> Vec<Paragraph> {
    let markers: Vec<(u32, usize, usize)> = marker
        .captures_iter(text)
        .filter_map(|caps| {
            let number: u32 = caps.get(1)?.as_str().parse().ok()?;
            let m = caps.get(0)?;
            Some((number, m.start(), m.end()))
        })
        .collect();

    let mut out = Vec::new();
    for (i, (number, _, body_start)) in markers.iter().enumerate() {
        let body_end = markers.get(i + 1).map(|next| next.1).unwrap_or(text.len());
        let content = normalize_whitespace(&text[*body_start..body_end]);

        if content.len() > MIN_CONTENT_LEN && *number > 0 && *number < MAX_PARAGRAPH_NUMBER {
            out.push(Paragraph::new(*number, content));
        }
    }
    out
}

fn log_gaps(paragraphs: &[Paragraph]) {
    let gaps: Vec<String> = paragraphs
        .windows(2)
        .filter(|w| w[1].number - w[0].number > 1)
        .map(|w| format!("{}→{}", w[0].number, w[1].number))
        .collect();

    if !gaps.is_empty() && gaps.len() < 10 {
        warn!(gaps = %gaps.join(", "), "numbering gaps in extracted paragraphs");
    }
}
