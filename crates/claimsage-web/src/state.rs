//! Shared application state for the web server.

use std::sync::Arc;

use claimsage_corpus::PatentCorpus;
use claimsage_llm::AnswerSynthesizer;

/// Shared state injected into every Axum handler.
#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<PatentCorpus>,
    pub synthesizer: Arc<AnswerSynthesizer>,
}

impl AppState {
    pub fn new(corpus: PatentCorpus, synthesizer: AnswerSynthesizer) -> Self {
        Self {
            corpus: Arc::new(corpus),
            synthesizer: Arc::new(synthesizer),
        }
    }
}

pub type SharedState = Arc<AppState>;
