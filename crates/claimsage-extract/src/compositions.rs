//! Elemental composition extraction.
//!
//! Catches both the labelled form (`Si: 2.5-4.0 mass%`) and the inline form
//! (`2.5 to 4.0% Si`), plus single values. A single value for an element
//! already covered by a previously found range is dropped.

use claimsage_common::records::Composition;
use lazy_static::lazy_static;
use regex::Regex;

const MAX_COMPOSITIONS: usize = 50;
const UNIT: &str = "mass%";

lazy_static! {
    // Si: 2.5-4.0%, Al = 0.5 to 2.0 mass%
    static ref RANGE_LABELLED: Regex = Regex::new(
        r"([A-Z][a-z]?)\s*[:=]?\s*(\d+(?:\.\d+)?)\s*(?:%?\s*to\s*|[-~])\s*(\d+(?:\.\d+)?)\s*(?:mass\s*%|wt\.?\s*%|%)"
    )
    .unwrap();
    // 2.5-4.0% Si
    static ref RANGE_INLINE: Regex = Regex::new(
        r"(\d+(?:\.\d+)?)\s*(?:to\s*|[-~])\s*(\d+(?:\.\d+)?)\s*(?:mass\s*%|wt\.?\s*%|%)\s+(?:of\s+)?([A-Z][a-z]?)\b"
    )
    .unwrap();
    // Cr: 0.3%
    static ref SINGLE_LABELLED: Regex = Regex::new(
        r"([A-Z][a-z]?)\s*[:=]?\s*(\d+(?:\.\d+)?)\s*(?:mass\s*%|wt\.?\s*%|%)"
    )
    .unwrap();
}

pub fn extract_compositions(text: &str) -> Vec<Composition> {
    let mut out: Vec<Composition> = Vec::new();

    for caps in RANGE_LABELLED.captures_iter(text) {
        push_range(&mut out, &caps[1], &caps[2], &caps[3]);
    }
    for caps in RANGE_INLINE.captures_iter(text) {
        push_range(&mut out, &caps[3], &caps[1], &caps[2]);
    }

    for caps in SINGLE_LABELLED.captures_iter(text) {
        let element = caps[1].to_string();
        let Ok(value) = caps[2].parse::<f64>() else {
            continue;
        };
        // Dedup rule: skip a single value already covered by a range.
        let covered = out.iter().any(|c| {
            c.element == element
                && matches!((c.min, c.max), (Some(min), Some(max)) if min <= value && value <= max)
        });
        if !covered {
            out.push(Composition {
                element,
                min: None,
                max: None,
                value: Some(value),
                unit: UNIT.to_string(),
            });
        }
    }

    out.truncate(MAX_COMPOSITIONS);
    out
}

fn push_range(out: &mut Vec<Composition>, element: &str, min: &str, max: &str) {
    let (Ok(min), Ok(max)) = (min.parse::<f64>(), max.parse::<f64>()) else {
        return;
    };
    let composition = Composition {
        element: element.to_string(),
        min: Some(min),
        max: Some(max),
        value: None,
        unit: UNIT.to_string(),
    };
    if !out.contains(&composition) {
        out.push(composition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_range() {
        let comps = extract_compositions("Si: 2.5-4.0 mass%, Al: 0.5 to 2.0%");
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].element, "Si");
        assert_eq!(comps[0].min, Some(2.5));
        assert_eq!(comps[0].max, Some(4.0));
        assert_eq!(comps[1].element, "Al");
    }

    #[test]
    fn test_inline_range() {
        let comps = extract_compositions("The steel contains 2.5-4.0% Si.");
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].element, "Si");
        assert_eq!(comps[0].min, Some(2.5));
        assert_eq!(comps[0].max, Some(4.0));
    }

    #[test]
    fn test_single_value_covered_by_range_is_dropped() {
        let comps = extract_compositions("Si: 2.5-4.0 mass%. Preferably Si: 3.2%.");
        let singles: Vec<_> = comps.iter().filter(|c| c.value.is_some()).collect();
        assert!(singles.is_empty(), "covered single value must be deduplicated");
    }

    #[test]
    fn test_single_value_outside_range_is_kept() {
        let comps = extract_compositions("Si: 2.5-4.0 mass%. Also Cr: 0.3%.");
        assert!(comps
            .iter()
            .any(|c| c.element == "Cr" && c.value == Some(0.3)));
    }
}
