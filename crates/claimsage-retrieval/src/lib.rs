//! Lexical evidence retrieval over numbered description paragraphs.

mod retriever;

pub use retriever::{question_keywords, rank_evidence, retrieve_evidence, ScoredParagraph, MAX_EVIDENCE};
