//! Canonical legal section extraction.
//!
//! Scans a fixed vocabulary of section headings (plus known synonyms) and
//! takes each body up to the next all-caps heading-like line. Output is
//! ordered by first appearance in the source, not by scan order.

use claimsage_common::records::{estimate_page, PatentSection};
use lazy_static::lazy_static;
use regex::Regex;

use crate::text::{normalize_whitespace, strip_markers, truncate_chars};

const MIN_SECTION_LEN: usize = 100;
const MAX_SECTION_LEN: usize = 10_000;

/// Canonical heading → accepted spellings in the source text.
const SECTION_VOCABULARY: &[(&str, &[&str])] = &[
    ("Technical Field", &["TECHNICAL FIELD"]),
    ("Background Art", &["BACKGROUND ART", "BACKGROUND OF THE INVENTION"]),
    ("Summary Of Invention", &["SUMMARY OF INVENTION", "SUMMARY OF THE INVENTION"]),
    ("Technical Problem", &["TECHNICAL PROBLEM"]),
    ("Solution To Problem", &["SOLUTION TO PROBLEM"]),
    ("Advantageous Effects", &["ADVANTAGEOUS EFFECTS OF INVENTION", "ADVANTAGEOUS EFFECTS"]),
    ("Description Of Embodiments", &["DESCRIPTION OF EMBODIMENTS", "DETAILED DESCRIPTION OF EMBODIMENTS"]),
    ("Best Mode", &["BEST MODE FOR CARRYING OUT THE INVENTION", "BEST MODE"]),
    ("Examples", &["EXAMPLES"]),
    ("Industrial Applicability", &["INDUSTRIAL APPLICABILITY"]),
];

lazy_static! {
    /// A heading-like line: newline, then a long run of capitals.
    static ref NEXT_HEADING: Regex = Regex::new(r"\n\s*[A-Z][A-Z\s]{10,}").unwrap();
    static ref FIRST_MARKER: Regex = Regex::new(r"\[0*(\d+)\]|【0*(\d+)】").unwrap();
}

/// Extract all recognised sections, ordered by first-appearance offset.
pub fn extract_sections(text: &str, num_pages: u32) -> Vec<PatentSection> {
    let mut found: Vec<(usize, PatentSection)> = Vec::new();

    for (canonical, spellings) in SECTION_VOCABULARY {
        let Some((offset, body_raw)) = find_section(text, spellings) else {
            continue;
        };

        let body = normalize_whitespace(&strip_markers(&body_raw));
        if body.len() < MIN_SECTION_LEN {
            continue;
        }

        found.push((
            offset,
            PatentSection {
                name: canonical.to_string(),
                content: truncate_chars(&body, MAX_SECTION_LEN).to_string(),
                page: estimate_section_page(&body_raw, offset, text.len(), num_pages),
            },
        ));
    }

    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, section)| section).collect()
}

/// Locate the first spelling match and slice its body up to the next
/// all-caps heading-like line or end of text.
fn find_section(text: &str, spellings: &[&str]) -> Option<(usize, String)> {
    for spelling in spellings {
        let pattern = heading_regex(spelling);
        if let Some(m) = pattern.find(text) {
            let body_start = m.end();
            let body_end = NEXT_HEADING
                .find(&text[body_start..])
                .map(|next| body_start + next.start())
                .unwrap_or(text.len());
            return Some((m.start(), text[body_start..body_end].to_string()));
        }
    }
    None
}

fn heading_regex(spelling: &str) -> Regex {
    let words: Vec<&str> = spelling.split_whitespace().collect();
    Regex::new(&format!(r"(?i){}", words.join(r"\s+"))).unwrap()
}

/// Page estimate: nearest paragraph marker in the body (number ÷ 5), or
/// linear interpolation of the character offset over the page count.
fn estimate_section_page(body_raw: &str, offset: usize, text_len: usize, num_pages: u32) -> u32 {
    if let Some(caps) = FIRST_MARKER.captures(body_raw) {
        let digits = caps.get(1).or_else(|| caps.get(2));
        if let Some(number) = digits.and_then(|d| d.as_str().parse::<u32>().ok()) {
            return estimate_page(number);
        }
    }

    if text_len == 0 || num_pages == 0 {
        return 1;
    }
    let fraction = offset as f64 / text_len as f64;
    ((fraction * num_pages as f64).ceil() as u32).clamp(1, num_pages.max(1))
}
