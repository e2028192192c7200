//! claimsage-extract — pattern-based structuring of extracted patent text.
//!
//! Each sub-extractor is an independent, side-effect-free pattern pass over
//! the raw text; `structurer` orchestrates them into one immutable
//! `PatentRecord`. A missing pattern always yields a documented default,
//! never an error.

pub mod claims;
pub mod compositions;
pub mod details;
pub mod header;
pub mod keywords;
pub mod paragraphs;
pub mod sections;
pub mod structurer;
pub mod tables;
mod text;

pub use structurer::structure_patent;
