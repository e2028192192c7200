//! Document structurer: orchestrates the sub-extractors into one record.
//!
//! Every field falls back to a documented default when its patterns find
//! nothing; structuring never fails for valid text input.

use chrono::Utc;
use claimsage_common::records::{content_hash, PatentRecord};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

use crate::claims::extract_claims;
use crate::compositions::extract_compositions;
use crate::details::extract_technical_details;
use crate::header::extract_header;
use crate::keywords::extract_keywords;
use crate::paragraphs::extract_paragraphs;
use crate::sections::extract_sections;
use crate::tables::extract_tables;
use crate::text::{normalize_whitespace, strip_markers, truncate_chars};

const MAX_TITLE_LEN: usize = 300;
const MIN_ABSTRACT_LEN: usize = 100;
const MAX_ABSTRACT_LEN: usize = 4_000;

pub const DEFAULT_TITLE: &str = "Patent Document";
pub const DEFAULT_ABSTRACT: &str = "Abstract not available for this patent document.";

/// Title keywords gating the INID (54) field: avoids picking up all-caps
/// boilerplate that shares the field's shape.
const TITLE_ALLOW_LIST: &[&str] = &[
    "STEEL",
    "SHEET",
    "METHOD",
    "PROCESS",
    "MAGNETIC",
    "ALLOY",
    "MATERIAL",
    "PRODUCTION",
    "CONTAINING",
];

lazy_static! {
    // (11) EP 3 888 777 A1 — INID-tagged publication number
    static ref NUMBER_TAGGED: Regex =
        Regex::new(r"\(11\)\s*([A-Z]{2}\s*\d[\d\s]*\d\s*[A-Z]\d)").unwrap();
    // EP3888777A1 — bare jurisdiction form: letter prefix, digits, kind code
    static ref NUMBER_BARE: Regex = Regex::new(r"\b([A-Z]{2}\s*\d[\d\s]*\d\s*[A-Z]\d)\b").unwrap();

    static ref TITLE_TAGGED: Regex = Regex::new(r"\(54\)\s*([A-Z][A-Z\s,\-/]{10,300})").unwrap();
    static ref TITLE_LABELLED: Regex = Regex::new(r"(?i)Title[:\s]+([A-Z][^\n]{20,300})").unwrap();

    static ref ABSTRACT_TAGGED: Regex = Regex::new(r"\(57\)\s*").unwrap();
    static ref ABSTRACT_LABELLED: Regex = Regex::new(r"(?i)Abstract[:\s]*\n").unwrap();
    // Terminators: first numbered paragraph, a known heading, claims, or
    // publication boilerplate.
    static ref ABSTRACT_TERMINATOR: Regex = Regex::new(
        r"\[0*1\]|【0*1】|TECHNICAL FIELD|DETAILED DESCRIPTION|DESCRIPTION OF|\bClaims\b|European Patent|Europäisches|\n\s*EP\s*\d"
    )
    .unwrap();
}

/// Structure raw extracted text into an immutable [`PatentRecord`].
///
/// `fallback_id` (typically the source file stem) is used when no
/// jurisdiction-style identifier is found in the text.
pub fn structure_patent(text: &str, fallback_id: &str, num_pages: u32) -> PatentRecord {
    let patent_number = extract_patent_number(text, fallback_id);
    debug!(%patent_number, "structuring patent document");

    let title = extract_title(text);
    let abstract_text = extract_abstract(text);
    let header_info = extract_header(text);
    let numbered_paragraphs = extract_paragraphs(text);
    let sections = extract_sections(text, num_pages);
    let tables = extract_tables(text);
    let compositions = extract_compositions(text);
    let technical_details = extract_technical_details(text);
    let keywords = extract_keywords(text);
    let claims = extract_claims(text);

    let searchable_content = build_searchable_content(
        &title,
        &abstract_text,
        &numbered_paragraphs,
        &sections,
        &tables,
        &claims,
    );

    info!(
        %patent_number,
        paragraphs = numbered_paragraphs.len(),
        sections = sections.len(),
        tables = tables.len(),
        compositions = compositions.len(),
        claims = claims.len(),
        "structured patent document"
    );

    PatentRecord {
        patent_number,
        title,
        abstract_text,
        header_info,
        numbered_paragraphs,
        sections,
        tables,
        compositions,
        technical_details,
        keywords,
        claims,
        searchable_content,
        source_file: None,
        num_pages,
        text_length: text.len(),
        content_hash: content_hash(text),
        processed_at: Utc::now(),
    }
}

/// Canonicalize: strip all whitespace, uppercase.
pub fn normalize_patent_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

fn extract_patent_number(text: &str, fallback_id: &str) -> String {
    for pattern in [&*NUMBER_TAGGED, &*NUMBER_BARE] {
        if let Some(caps) = pattern.captures(text) {
            return normalize_patent_number(&caps[1]);
        }
    }
    normalize_patent_number(&fallback_id.replace('_', ""))
}

fn extract_title(text: &str) -> String {
    if let Some(caps) = TITLE_TAGGED.captures(text) {
        let candidate = normalize_whitespace(&caps[1]);
        if TITLE_ALLOW_LIST.iter().any(|kw| candidate.contains(kw)) {
            return truncate_chars(&candidate, MAX_TITLE_LEN).to_string();
        }
    }
    if let Some(caps) = TITLE_LABELLED.captures(text) {
        return truncate_chars(&normalize_whitespace(&caps[1]), MAX_TITLE_LEN).to_string();
    }
    DEFAULT_TITLE.to_string()
}

fn extract_abstract(text: &str) -> String {
    for anchor in [&*ABSTRACT_TAGGED, &*ABSTRACT_LABELLED] {
        let Some(m) = anchor.find(text) else {
            continue;
        };
        let body_start = m.end();
        let body_end = ABSTRACT_TERMINATOR
            .find(&text[body_start..])
            .map(|t| body_start + t.start())
            .unwrap_or(text.len());

        let body = normalize_whitespace(&strip_markers(&text[body_start..body_end]));
        // Reject short false positives (stray "(57)" on a drawings page).
        if body.len() >= MIN_ABSTRACT_LEN {
            return truncate_chars(&body, MAX_ABSTRACT_LEN).to_string();
        }
    }
    DEFAULT_ABSTRACT.to_string()
}

fn build_searchable_content(
    title: &str,
    abstract_text: &str,
    paragraphs: &[claimsage_common::records::Paragraph],
    sections: &[claimsage_common::records::PatentSection],
    tables: &[claimsage_common::records::PatentTable],
    claims: &[claimsage_common::records::Claim],
) -> String {
    let mut content = String::new();
    content.push_str(&format!("TITLE: {}\n\n", title));
    content.push_str(&format!("ABSTRACT: {}\n\n", abstract_text));

    if !paragraphs.is_empty() {
        content.push_str("DETAILED DESCRIPTION:\n");
        for para in paragraphs {
            content.push_str(&format!("{} {}\n", para.marker, para.content));
        }
        content.push('\n');
    }
    for section in sections {
        content.push_str(&format!(
            "{}:\n{}\n\n",
            section.name.to_uppercase(),
            section.content
        ));
    }
    for table in tables {
        content.push_str(&format!("TABLE {}: {}\n\n", table.table_number, table.content));
    }
    if !claims.is_empty() {
        content.push_str("CLAIMS:\n");
        for claim in claims {
            content.push_str(&format!("Claim {}: {}\n", claim.number, claim.text));
        }
    }
    content
}
