//! Keyword and intent scoring of description paragraphs.
//!
//! Scoring is purely lexical: two points per keyword occurrence plus a flat
//! five-point bonus per matched question intent whose indicator terms appear
//! in the paragraph. No embeddings, no index; a corpus of one patent at a
//! time keeps a linear scan cheap.

use claimsage_common::records::{Paragraph, PatentRecord};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

/// Upper bound on evidence passed to prompt building.
pub const MAX_EVIDENCE: usize = 10;

const KEYWORD_WEIGHT: u32 = 2;
const INTENT_BONUS: u32 = 5;

const STOP_WORDS: &[&str] = &[
    "what", "which", "where", "when", "does", "this", "that", "with", "from",
    "have", "has", "the", "and", "for", "are", "was", "were", "how", "why",
    "is", "in", "of", "to", "a", "an", "or", "on", "at", "by", "it", "its",
    "can", "could", "would", "should", "about", "there", "their", "used",
];

/// A question intent: a pattern over the question plus indicator terms that
/// must appear in a paragraph for the bonus to apply.
struct IntentRule {
    name: &'static str,
    question: Regex,
    indicators: &'static [&'static str],
}

lazy_static! {
    static ref INTENT_RULES: Vec<IntentRule> = vec![
        IntentRule {
            name: "composition",
            question: Regex::new(r"(?i)composition|contain|content|element|material|mass|alloy")
                .unwrap(),
            indicators: &["%", "mass%", "wt%", "contain", "composition"],
        },
        IntentRule {
            name: "process",
            question: Regex::new(
                r"(?i)process|method|manufactur|produc|rolling|annealing|temperature"
            )
            .unwrap(),
            indicators: &["°c", "rolling", "annealing", "process", "heated", "temperature"],
        },
        IntentRule {
            name: "property",
            question: Regex::new(
                r"(?i)property|properties|resistivity|magnetic|strength|loss|density"
            )
            .unwrap(),
            indicators: &["resistivity", "magnetic", "strength", "core loss", "flux density", "property"],
        },
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredParagraph {
    pub paragraph: Paragraph,
    pub score: u32,
}

/// Lowercased question terms longer than three characters, stop words
/// removed, punctuation trimmed from the edges.
pub fn question_keywords(question: &str) -> Vec<String> {
    question
        .to_lowercase()
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|word| word.len() > 3 && !STOP_WORDS.contains(&word.as_str()))
        .collect()
}

/// Score all numbered paragraphs against the question and return the top
/// [`MAX_EVIDENCE`], highest score first. Zero-score paragraphs are dropped.
/// Ties keep document order.
pub fn rank_evidence(record: &PatentRecord, question: &str) -> Vec<ScoredParagraph> {
    let keywords = question_keywords(question);
    let intents: Vec<&IntentRule> = INTENT_RULES
        .iter()
        .filter(|rule| rule.question.is_match(question))
        .collect();
    debug!(
        keywords = keywords.len(),
        intents = intents.len(),
        "scoring paragraphs"
    );

    let mut scored: Vec<ScoredParagraph> = record
        .numbered_paragraphs
        .iter()
        .filter_map(|paragraph| {
            let score = score_paragraph(paragraph, &keywords, &intents);
            (score > 0).then(|| ScoredParagraph {
                paragraph: paragraph.clone(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_EVIDENCE);
    scored
}

/// The ranked evidence set re-sorted into document order (ascending
/// paragraph number), ready for prompt presentation.
pub fn retrieve_evidence(record: &PatentRecord, question: &str) -> Vec<Paragraph> {
    let mut evidence: Vec<Paragraph> = rank_evidence(record, question)
        .into_iter()
        .map(|s| s.paragraph)
        .collect();
    evidence.sort_by_key(|p| p.number);
    evidence
}

fn score_paragraph(paragraph: &Paragraph, keywords: &[String], intents: &[&IntentRule]) -> u32 {
    let content = paragraph.content.to_lowercase();

    let mut score = 0;
    for keyword in keywords {
        score += KEYWORD_WEIGHT * content.matches(keyword.as_str()).count() as u32;
    }
    for intent in intents {
        if intent
            .indicators
            .iter()
            .any(|indicator| content.contains(indicator))
        {
            debug!(intent = intent.name, number = paragraph.number, "intent bonus");
            score += INTENT_BONUS;
        }
    }
    score
}
