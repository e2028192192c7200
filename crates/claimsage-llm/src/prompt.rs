//! Deterministic prompt assembly from a record and its retrieved evidence.

use claimsage_common::records::{Composition, Paragraph, PatentRecord, TemperatureSpec};

/// Character budget communicated to the model for the answer body.
pub const ANSWER_CHAR_BUDGET: usize = 400;

const MAX_EXCERPT_CHARS: usize = 800;
const FALLBACK_PARAGRAPHS: usize = 15;
const MAX_COMPOSITION_LINES: usize = 10;
const MAX_TEMPERATURE_LINES: usize = 5;

pub const SYSTEM_PROMPT: &str = "\
You are a patent analysis assistant. Answer questions strictly from the \
patent content provided. When a passage supports your answer, cite it with \
its bracketed paragraph marker, for example [0012]. If the provided content \
does not answer the question, say so. Never invent facts or markers.";

/// Build the user prompt. Same record, same evidence, same question always
/// produces the same string.
pub fn build_prompt(record: &PatentRecord, evidence: &[Paragraph], question: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!("PATENT NUMBER: {}\n", record.patent_number));
    prompt.push_str(&format!("TITLE: {}\n", record.title));
    prompt.push_str(&format!("ABSTRACT: {}\n\n", record.abstract_text));

    prompt.push_str("RELEVANT PASSAGES:\n");
    if evidence.is_empty() {
        // No scored evidence: fall back to the opening of the description.
        for paragraph in record.numbered_paragraphs.iter().take(FALLBACK_PARAGRAPHS) {
            push_passage(&mut prompt, paragraph);
        }
    } else {
        for paragraph in evidence {
            push_passage(&mut prompt, paragraph);
        }
    }
    prompt.push('\n');

    if !record.compositions.is_empty() {
        prompt.push_str("KEY COMPOSITIONS:\n");
        for composition in record.compositions.iter().take(MAX_COMPOSITION_LINES) {
            prompt.push_str(&format!("{}\n", format_composition(composition)));
        }
        prompt.push('\n');
    }

    let temperatures = &record.technical_details.temperatures;
    if !temperatures.is_empty() {
        prompt.push_str("KEY TEMPERATURES:\n");
        for temperature in temperatures.iter().take(MAX_TEMPERATURE_LINES) {
            prompt.push_str(&format!("{}\n", format_temperature(temperature)));
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!("QUESTION: {}\n\n", question));
    prompt.push_str(&format!(
        "Answer in at most {} characters, citing supporting paragraph markers.",
        ANSWER_CHAR_BUDGET
    ));
    prompt
}

fn push_passage(prompt: &mut String, paragraph: &Paragraph) {
    let excerpt: String = paragraph.content.chars().take(MAX_EXCERPT_CHARS).collect();
    prompt.push_str(&format!("{} {}\n", paragraph.marker, excerpt));
}

fn format_composition(c: &Composition) -> String {
    match (c.min, c.max, c.value) {
        (Some(min), Some(max), _) => format!("{}: {}-{} {}", c.element, min, max, c.unit),
        (_, _, Some(value)) => format!("{}: {} {}", c.element, value, c.unit),
        _ => format!("{}: unspecified {}", c.element, c.unit),
    }
}

fn format_temperature(t: &TemperatureSpec) -> String {
    match (t.min, t.max, t.value) {
        (Some(min), Some(max), _) => format!("{}-{}{}", min, max, t.unit),
        (_, _, Some(value)) => format!("{}{}", value, t.unit),
        _ => format!("unspecified {}", t.unit),
    }
}
