//! Domain keyword detection against a controlled vocabulary.

use std::collections::BTreeSet;

/// Controlled vocabulary of electrical-steel domain terms.
const DOMAIN_VOCABULARY: &[&str] = &[
    "steel",
    "magnetic",
    "silicon",
    "chromium",
    "aluminum",
    "manganese",
    "annealing",
    "rolling",
    "composition",
    "alloy",
    "resistivity",
    "coating",
    "core loss",
    "flux density",
];

pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    DOMAIN_VOCABULARY
        .iter()
        .filter(|term| lower.contains(*term))
        .map(|term| term.to_string())
        .collect()
}
