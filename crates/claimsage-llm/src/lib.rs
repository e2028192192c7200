//! Answer generation: backend trait, prompt building, fallback chain,
//! and citation extraction.

pub mod backend;
pub mod citations;
pub mod prompt;
pub mod synthesizer;

pub use backend::{GenerationBackend, GenerationError, GenerationRequest, GenerationResponse, GroqBackend, Message};
pub use synthesizer::{AnswerSynthesizer, ModelChain};
