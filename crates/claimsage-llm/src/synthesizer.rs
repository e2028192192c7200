//! Answer synthesis with a fallback model chain.
//!
//! Auth failures are fatal. Unavailable or timed-out models advance the
//! chain; a model that answers from further down the chain becomes the new
//! starting point. Any other failure degrades to a local deterministic
//! answer built from the top-ranked evidence, so a valid question always
//! gets an answer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use claimsage_common::records::{Answer, Paragraph, PatentRecord};
use claimsage_common::{ClaimsageError, Result};
use claimsage_retrieval::{rank_evidence, ScoredParagraph};
use tracing::{error, warn};

use crate::backend::{GenerationBackend, GenerationRequest, Message};
use crate::citations::extract_citations;
use crate::prompt::{build_prompt, SYSTEM_PROMPT};

const PRIMARY_EXCERPT_CHARS: usize = 300;
const SECONDARY_EXCERPT_CHARS: usize = 200;

/// Ordered model identifiers with a shared cursor. The cursor only moves
/// forward, and only when a later model actually answered.
pub struct ModelChain {
    models: Vec<String>,
    current: AtomicUsize,
}

impl ModelChain {
    pub fn new(models: Vec<String>) -> Self {
        let models = if models.is_empty() {
            Self::default_groq().models
        } else {
            models
        };
        Self {
            models,
            current: AtomicUsize::new(0),
        }
    }

    pub fn default_groq() -> Self {
        Self {
            models: vec![
                "llama-3.3-70b-versatile".to_string(),
                "llama-3.1-8b-instant".to_string(),
                "mixtral-8x7b-32768".to_string(),
                "gemma2-9b-it".to_string(),
            ],
            current: AtomicUsize::new(0),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current.load(Ordering::Acquire)
    }

    pub fn model(&self, index: usize) -> &str {
        &self.models[index]
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Move the cursor, but only if no other request moved it first.
    fn promote(&self, from: usize, to: usize) {
        if self
            .current
            .compare_exchange(from, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            warn!(model = self.model(to), "promoted fallback model to primary");
        }
    }
}

pub struct AnswerSynthesizer {
    backend: Arc<dyn GenerationBackend>,
    chain: ModelChain,
    temperature: f32,
    max_tokens: u32,
}

impl AnswerSynthesizer {
    pub fn new(backend: Arc<dyn GenerationBackend>, chain: ModelChain) -> Self {
        Self {
            backend,
            chain,
            temperature: 0.2,
            max_tokens: 400,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// The model the next request will try first.
    pub fn current_model(&self) -> &str {
        self.chain.model(self.chain.current_index())
    }

    /// Answer a question about one patent record.
    pub async fn answer(&self, record: &PatentRecord, question: &str) -> Result<Answer> {
        let ranked = rank_evidence(record, question);
        let mut evidence: Vec<Paragraph> =
            ranked.iter().map(|s| s.paragraph.clone()).collect();
        evidence.sort_by_key(|p| p.number);

        let prompt = build_prompt(record, &evidence, question);
        let messages = vec![Message::system(SYSTEM_PROMPT), Message::user(prompt)];

        let start = self.chain.current_index();
        for index in start..self.chain.len() {
            let model = self.chain.model(index).to_string();
            let request = GenerationRequest {
                messages: messages.clone(),
                model: model.clone(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            };

            match self.backend.complete(request).await {
                Ok(response) => {
                    let answer = response.content.trim().to_string();
                    if answer.is_empty() {
                        warn!(model, "empty completion, using local fallback");
                        return Ok(self.local_fallback(record, &ranked));
                    }
                    if index != start {
                        self.chain.promote(start, index);
                    }
                    let citations = extract_citations(&answer, record, &ranked);
                    return Ok(Answer { answer, citations });
                }
                Err(err) if err.is_auth() => {
                    error!(model, %err, "generation credentials rejected");
                    return Err(ClaimsageError::Config(format!(
                        "generation credentials rejected: {err}"
                    )));
                }
                Err(err) if err.is_unavailable() => {
                    warn!(model, %err, "model unavailable, trying the next one");
                }
                Err(err) => {
                    warn!(model, %err, "generation failed, using local fallback");
                    return Ok(self.local_fallback(record, &ranked));
                }
            }
        }

        warn!("model chain exhausted, using local fallback");
        Ok(self.local_fallback(record, &ranked))
    }

    /// Deterministic answer from the top-ranked evidence, or the abstract
    /// when nothing scored.
    fn local_fallback(&self, record: &PatentRecord, ranked: &[ScoredParagraph]) -> Answer {
        let answer = match ranked {
            [] => format!(
                "According to the abstract: {}",
                excerpt(&record.abstract_text, PRIMARY_EXCERPT_CHARS)
            ),
            [only] => format!(
                "According to {}, {}",
                only.paragraph.marker,
                excerpt(&only.paragraph.content, PRIMARY_EXCERPT_CHARS)
            ),
            [first, second, ..] => format!(
                "According to {}, {} {} adds: {}",
                first.paragraph.marker,
                excerpt(&first.paragraph.content, PRIMARY_EXCERPT_CHARS),
                second.paragraph.marker,
                excerpt(&second.paragraph.content, SECONDARY_EXCERPT_CHARS)
            ),
        };
        let citations = extract_citations(&answer, record, ranked);
        Answer { answer, citations }
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{GenerationError, GenerationResponse};
    use async_trait::async_trait;
    use chrono::Utc;
    use claimsage_common::records::{HeaderInfo, TechnicalDetails};
    use std::collections::HashMap;

    #[derive(Clone)]
    enum Script {
        Reply(&'static str),
        Unavailable,
        BadKey,
        RateLimited,
    }

    struct ScriptedBackend {
        scripts: HashMap<String, Script>,
    }

    impl ScriptedBackend {
        fn new(scripts: &[(&str, Script)]) -> Arc<Self> {
            Arc::new(Self {
                scripts: scripts
                    .iter()
                    .map(|(model, script)| (model.to_string(), script.clone()))
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        async fn complete(
            &self,
            req: GenerationRequest,
        ) -> std::result::Result<GenerationResponse, GenerationError> {
            match self.scripts.get(&req.model) {
                Some(Script::Reply(text)) => Ok(GenerationResponse {
                    content: text.to_string(),
                    model: req.model,
                }),
                Some(Script::Unavailable) => Err(GenerationError::Unavailable(
                    "model has been decommissioned".to_string(),
                )),
                Some(Script::BadKey) => {
                    Err(GenerationError::Auth("invalid api key".to_string()))
                }
                Some(Script::RateLimited) => Err(GenerationError::Api {
                    status: 429,
                    message: "rate limited".to_string(),
                }),
                None => Err(GenerationError::Unavailable(format!(
                    "unknown model {}",
                    req.model
                ))),
            }
        }
    }

    fn record(paragraphs: Vec<Paragraph>) -> PatentRecord {
        PatentRecord {
            patent_number: "EP3888777A1".to_string(),
            title: "ELECTRICAL STEEL SHEET".to_string(),
            abstract_text: "A steel sheet with high electrical resistivity.".to_string(),
            header_info: HeaderInfo::default(),
            numbered_paragraphs: paragraphs,
            sections: Vec::new(),
            tables: Vec::new(),
            compositions: Vec::new(),
            technical_details: TechnicalDetails::default(),
            keywords: Default::default(),
            claims: Vec::new(),
            searchable_content: String::new(),
            source_file: None,
            num_pages: 3,
            text_length: 0,
            content_hash: String::new(),
            processed_at: Utc::now(),
        }
    }

    fn chain(models: &[&str]) -> ModelChain {
        ModelChain::new(models.iter().map(|m| m.to_string()).collect())
    }

    #[tokio::test]
    async fn test_successful_generation_resolves_cited_markers() {
        let backend = ScriptedBackend::new(&[(
            "model-a",
            Script::Reply("The Si content is 2.5-4.0% [0001]."),
        )]);
        let synthesizer = AnswerSynthesizer::new(backend, chain(&["model-a"]));
        let r = record(vec![Paragraph::new(1, "The steel contains 2.5-4.0% Si.")]);

        let answer = synthesizer.answer(&r, "What is the Si content?").await.unwrap();
        assert!(answer.answer.contains("2.5-4.0%"));
        assert_eq!(answer.citations.len(), 1);
        assert_eq!(answer.citations[0].paragraph_number, Some(1));
    }

    #[tokio::test]
    async fn test_unavailable_models_promote_the_working_fallback() {
        let backend = ScriptedBackend::new(&[
            ("model-a", Script::Unavailable),
            ("model-b", Script::Reply("Annealing at 850°C [0002].")),
        ]);
        let synthesizer = AnswerSynthesizer::new(backend, chain(&["model-a", "model-b"]));
        let r = record(vec![Paragraph::new(2, "Annealing at 850°C.")]);

        let answer = synthesizer
            .answer(&r, "What is the annealing temperature?")
            .await
            .unwrap();
        assert!(answer.answer.contains("850°C"));
        assert_eq!(synthesizer.chain.current_index(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_chain_degrades_to_local_answer() {
        let backend = ScriptedBackend::new(&[
            ("model-a", Script::Unavailable),
            ("model-b", Script::Unavailable),
        ]);
        let synthesizer = AnswerSynthesizer::new(backend, chain(&["model-a", "model-b"]));
        let r = record(vec![Paragraph::new(
            10,
            "The sheet exhibits high resistivity of 60 µΩcm.",
        )]);

        let answer = synthesizer
            .answer(&r, "What resistivity does the sheet have?")
            .await
            .unwrap();
        assert!(answer.answer.starts_with("According to [0010],"));
        assert_eq!(answer.citations.len(), 1);
        assert_eq!(answer.citations[0].paragraph_number, Some(10));
    }

    #[tokio::test]
    async fn test_auth_failure_is_fatal() {
        let backend = ScriptedBackend::new(&[("model-a", Script::BadKey)]);
        let synthesizer = AnswerSynthesizer::new(backend, chain(&["model-a"]));
        let r = record(vec![Paragraph::new(1, "The steel contains Si.")]);

        let err = synthesizer
            .answer(&r, "What does the steel contain?")
            .await
            .unwrap_err();
        assert!(matches!(err, ClaimsageError::Config(_)));
    }

    #[tokio::test]
    async fn test_other_api_errors_still_produce_an_answer() {
        let backend = ScriptedBackend::new(&[("model-a", Script::RateLimited)]);
        let synthesizer = AnswerSynthesizer::new(backend, chain(&["model-a"]));
        let r = record(vec![Paragraph::new(3, "Hot rolling at 1100°C is performed.")]);

        let answer = synthesizer
            .answer(&r, "What rolling temperature is used?")
            .await
            .unwrap();
        assert!(answer.answer.starts_with("According to [0003],"));
    }

    #[tokio::test]
    async fn test_no_evidence_falls_back_to_the_abstract() {
        let backend = ScriptedBackend::new(&[("model-a", Script::RateLimited)]);
        let synthesizer = AnswerSynthesizer::new(backend, chain(&["model-a"]));
        let r = record(Vec::new());

        let answer = synthesizer
            .answer(&r, "What resistivity does the sheet have?")
            .await
            .unwrap();
        assert!(answer.answer.starts_with("According to the abstract:"));
        assert_eq!(answer.citations.len(), 1);
        assert_eq!(answer.citations[0].section, "Abstract");
    }

    #[test]
    fn test_default_chain_starts_at_the_primary_model() {
        let chain = ModelChain::default_groq();
        assert_eq!(chain.model(chain.current_index()), "llama-3.3-70b-versatile");
        assert_eq!(chain.len(), 4);
    }
}
