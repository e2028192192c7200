//! Technical-detail extraction: temperatures and process mentions.

use claimsage_common::records::{ProcessMention, TechnicalDetails, TemperatureSpec};
use lazy_static::lazy_static;
use regex::Regex;

use crate::text::{normalize_whitespace, truncate_chars};

const MAX_TEMPERATURES: usize = 50;
const PROCESS_DESCRIPTION_LEN: usize = 150;

/// Controlled vocabulary of manufacturing processes.
const PROCESS_VOCABULARY: &[&str] = &[
    "hot rolling",
    "cold rolling",
    "annealing",
    "quenching",
    "tempering",
    "pickling",
    "casting",
    "coating",
    "galvanizing",
    "soaking",
];

lazy_static! {
    // 1050-1150°C, 850 to 900 ℃, 700°C
    static ref TEMPERATURE: Regex =
        Regex::new(r"(\d{2,4})\s*(?:to\s+|[-~]\s*)?(\d{2,4})?\s*(?:°C|℃)").unwrap();
    static ref PROCESS_PATTERNS: Vec<(&'static str, Regex)> = PROCESS_VOCABULARY
        .iter()
        .map(|name| {
            let words: Vec<&str> = name.split_whitespace().collect();
            (*name, Regex::new(&format!(r"(?i){}", words.join(r"\s+"))).unwrap())
        })
        .collect();
}

pub fn extract_technical_details(text: &str) -> TechnicalDetails {
    TechnicalDetails {
        temperatures: extract_temperatures(text),
        processes: extract_processes(text),
    }
}

fn extract_temperatures(text: &str) -> Vec<TemperatureSpec> {
    let mut temperatures = Vec::new();
    for caps in TEMPERATURE.captures_iter(text) {
        let Ok(first) = caps[1].parse::<i32>() else {
            continue;
        };
        let spec = match caps.get(2).and_then(|m| m.as_str().parse::<i32>().ok()) {
            Some(second) => TemperatureSpec {
                min: Some(first),
                max: Some(second),
                value: None,
                unit: "°C".to_string(),
            },
            None => TemperatureSpec {
                min: None,
                max: None,
                value: Some(first),
                unit: "°C".to_string(),
            },
        };
        if !temperatures.contains(&spec) {
            temperatures.push(spec);
        }
        if temperatures.len() >= MAX_TEMPERATURES {
            break;
        }
    }
    temperatures
}

/// One mention per vocabulary entry: the first occurrence, paired with a
/// short description taken from the surrounding text.
fn extract_processes(text: &str) -> Vec<ProcessMention> {
    let mut processes = Vec::new();

    for (name, pattern) in PROCESS_PATTERNS.iter() {
        let Some(m) = pattern.find(text) else {
            continue;
        };
        let snippet_raw = truncate_chars(&text[m.start()..], PROCESS_DESCRIPTION_LEN);
        processes.push(ProcessMention {
            name: name.to_string(),
            description: normalize_whitespace(snippet_raw),
        });
    }
    processes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_range() {
        let details = extract_technical_details("Hot rolling is performed at 1050-1150°C.");
        assert_eq!(details.temperatures.len(), 1);
        assert_eq!(details.temperatures[0].min, Some(1050));
        assert_eq!(details.temperatures[0].max, Some(1150));
    }

    #[test]
    fn test_single_temperature() {
        let details = extract_technical_details("annealed at 850°C for two minutes");
        assert_eq!(details.temperatures[0].value, Some(850));
    }

    #[test]
    fn test_process_mentions_from_vocabulary() {
        let details =
            extract_technical_details("After hot rolling, the sheet undergoes cold rolling.");
        let names: Vec<&str> = details.processes.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["hot rolling", "cold rolling"]);
        assert!(details.processes[0].description.starts_with("hot rolling"));
    }

    #[test]
    fn test_duplicate_temperatures_collapsed() {
        let details = extract_technical_details("at 800°C, again at 800°C");
        assert_eq!(details.temperatures.len(), 1);
    }
}
