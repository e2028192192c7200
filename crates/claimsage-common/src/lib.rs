//! claimsage-common — Shared records, citations, and errors used across all claimsage crates.

pub mod error;
pub mod records;

// Re-export commonly used types
pub use error::{ClaimsageError, Result};
pub use records::{Answer, Citation, CitationKind, Paragraph, PatentRecord};
