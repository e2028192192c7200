//! Citation extraction from generated answers.
//!
//! Three tiers: markers the model actually cited, then the ranked evidence
//! the prompt was built from, then the abstract. Markers that do not resolve
//! to a real paragraph are dropped silently.

use claimsage_common::records::{Citation, PatentRecord};
use claimsage_retrieval::ScoredParagraph;
use lazy_static::lazy_static;
use regex::Regex;

const MAX_CITATIONS: usize = 3;
const MAX_CANDIDATES: usize = 5;

lazy_static! {
    static ref MARKER: Regex = Regex::new(r"\[(\d{1,4})\]").unwrap();
}

pub fn extract_citations(
    answer: &str,
    record: &PatentRecord,
    ranked: &[ScoredParagraph],
) -> Vec<Citation> {
    let mut candidates: Vec<Citation> = MARKER
        .captures_iter(answer)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .filter(|number| record.paragraph(*number).is_some())
        .map(|number| Citation::paragraph(&record.patent_number, number))
        .take(MAX_CANDIDATES)
        .collect();

    if candidates.is_empty() {
        candidates = ranked
            .iter()
            .take(MAX_CANDIDATES)
            .map(|s| Citation::paragraph(&record.patent_number, s.paragraph.number))
            .collect();
    }
    if candidates.is_empty() {
        candidates.push(Citation::abstract_of(&record.patent_number));
    }

    // One citation per (page, section) pin; readers get distinct places to look.
    let mut seen: Vec<(u32, String)> = Vec::new();
    candidates.retain(|c| {
        let key = (c.page, c.section.clone());
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });

    candidates.sort_by_key(|c| c.paragraph_number.unwrap_or(u32::MAX));
    candidates.truncate(MAX_CITATIONS);
    candidates
}
