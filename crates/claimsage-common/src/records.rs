//! Data model for structured patent records and citations.
//!
//! A `PatentRecord` is built once by the structuring pass and never mutated
//! afterwards; the corpus loads it read-only and replaces it wholesale only
//! by rerunning structuring.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Display-page heuristic: published applications carry roughly five
/// numbered paragraphs per page. Best-effort display data only.
pub const PARAGRAPHS_PER_PAGE: u32 = 5;

/// Zero-padded bracket marker for a paragraph number: 12 → `[0012]`.
pub fn paragraph_marker(number: u32) -> String {
    format!("[{:04}]", number)
}

/// Best-effort page estimate for a numbered paragraph.
pub fn estimate_page(paragraph_number: u32) -> u32 {
    paragraph_number.div_ceil(PARAGRAPHS_PER_PAGE).max(1)
}

/// SHA-256 of the raw extracted text, kept as a provenance field.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// A legally-numbered description paragraph: the bracketed sequence index
/// is the pinpoint-citation convention in published applications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paragraph {
    pub number: u32,
    pub content: String,
    pub marker: String,
}

impl Paragraph {
    pub fn new(number: u32, content: impl Into<String>) -> Self {
        Self {
            number,
            content: content.into(),
            marker: paragraph_marker(number),
        }
    }
}

/// INID-coded bibliographic header fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeaderInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inventors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatentSection {
    pub name: String,
    pub content: String,
    pub page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatentTable {
    pub table_number: u32,
    pub content: String,
}

/// Elemental composition: either a min/max range or a single value,
/// expressed as a percentage unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Composition {
    pub element: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemperatureSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessMention {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TechnicalDetails {
    pub temperatures: Vec<TemperatureSpec>,
    pub processes: Vec<ProcessMention>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claim {
    pub number: u32,
    pub text: String,
}

/// Structured representation of one parsed patent document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatentRecord {
    pub patent_number: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub header_info: HeaderInfo,
    /// Strictly ascending by number, unique.
    pub numbered_paragraphs: Vec<Paragraph>,
    /// Ordered by first appearance in the source text.
    pub sections: Vec<PatentSection>,
    pub tables: Vec<PatentTable>,
    pub compositions: Vec<Composition>,
    #[serde(default)]
    pub technical_details: TechnicalDetails,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    pub claims: Vec<Claim>,
    /// Derived concatenation of all structured fields, for audit and debug.
    pub searchable_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    pub num_pages: u32,
    pub text_length: usize,
    pub content_hash: String,
    pub processed_at: DateTime<Utc>,
}

impl PatentRecord {
    pub fn paragraph(&self, number: u32) -> Option<&Paragraph> {
        self.numbered_paragraphs.iter().find(|p| p.number == number)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CitationKind {
    Paragraph,
    Abstract,
}

/// Pointer from a generated answer back to the supporting passage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub patent_id: String,
    /// Always ≥ 1.
    pub page: u32,
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_number: Option<u32>,
    #[serde(rename = "type")]
    pub kind: CitationKind,
}

impl Citation {
    pub fn paragraph(patent_id: impl Into<String>, number: u32) -> Self {
        Self {
            patent_id: patent_id.into(),
            page: estimate_page(number),
            section: "Detailed Description".to_string(),
            paragraph_number: Some(number),
            kind: CitationKind::Paragraph,
        }
    }

    pub fn abstract_of(patent_id: impl Into<String>) -> Self {
        Self {
            patent_id: patent_id.into(),
            page: 1,
            section: "Abstract".to_string(),
            paragraph_number: None,
            kind: CitationKind::Abstract,
        }
    }
}

/// QA output contract: always well-formed for a valid request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    pub citations: Vec<Citation>,
}
