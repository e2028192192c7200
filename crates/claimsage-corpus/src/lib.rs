//! In-memory read-only corpus of structured patent records.

mod store;

pub use store::{normalize_patent_id, PatentCorpus, PatentSummary};
