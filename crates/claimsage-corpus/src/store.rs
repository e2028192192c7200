//! Corpus store: loads the structuring pass output and serves records by
//! normalized patent identifier.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use claimsage_common::records::PatentRecord;
use claimsage_common::Result;
use serde::Serialize;
use tracing::{info, warn};

const SUMMARY_ABSTRACT_LEN: usize = 250;

/// Canonical lookup key: whitespace stripped, uppercased. `ep 3888777 a1`
/// and `EP3888777A1` address the same record.
pub fn normalize_patent_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Listing row for the patent index endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatentSummary {
    pub patent_number: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub num_paragraphs: usize,
    pub num_claims: usize,
    pub num_pages: u32,
}

/// Immutable collection of structured records, keyed by normalized id.
pub struct PatentCorpus {
    records: HashMap<String, Arc<PatentRecord>>,
    /// Normalized ids in first-insertion order, for stable listings.
    order: Vec<String>,
}

impl PatentCorpus {
    /// Load a corpus from the JSON array written by the structuring pass.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let records: Vec<PatentRecord> = serde_json::from_str(&raw)?;
        let corpus = Self::from_records(records);
        info!(path = %path.display(), patents = corpus.len(), "loaded patent corpus");
        Ok(corpus)
    }

    /// Build a corpus from already-parsed records. On duplicate identifiers
    /// the later record wins.
    pub fn from_records(records: Vec<PatentRecord>) -> Self {
        let mut map: HashMap<String, Arc<PatentRecord>> = HashMap::new();
        let mut order = Vec::new();
        for record in records {
            let key = normalize_patent_id(&record.patent_number);
            if map.insert(key.clone(), Arc::new(record)).is_some() {
                warn!(patent = %key, "duplicate patent identifier, keeping the later record");
            } else {
                order.push(key);
            }
        }
        Self { records: map, order }
    }

    pub fn empty() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn get(&self, patent_id: &str) -> Option<Arc<PatentRecord>> {
        self.records.get(&normalize_patent_id(patent_id)).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Listing rows in first-insertion order.
    pub fn summaries(&self) -> Vec<PatentSummary> {
        self.order
            .iter()
            .filter_map(|key| self.records.get(key))
            .map(|record| PatentSummary {
                patent_number: record.patent_number.clone(),
                title: record.title.clone(),
                abstract_text: truncate_chars(&record.abstract_text, SUMMARY_ABSTRACT_LEN),
                num_paragraphs: record.numbered_paragraphs.len(),
                num_claims: record.claims.len(),
                num_pages: record.num_pages,
            })
            .collect()
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
