//! Claims extraction: numbered `N. text` segments inside the claims block.

use claimsage_common::records::Claim;
use lazy_static::lazy_static;
use regex::Regex;

use crate::text::{normalize_whitespace, truncate_chars};

const MAX_CLAIM_LEN: usize = 2_000;

lazy_static! {
    static ref CLAIMS_HEADING: Regex = Regex::new(r"(?i)\bClaims?\s*\n").unwrap();
    static ref BLOCK_TERMINATOR: Regex =
        Regex::new(r"(?i)\b(?:Description|Drawings|Figures)\b").unwrap();
    // A claim number at the start of a line: "1. A method of..."
    static ref CLAIM_NUMBER: Regex = Regex::new(r"(?m)^\s*(\d{1,3})\.\s+").unwrap();
}

pub fn extract_claims(text: &str) -> Vec<Claim> {
    let Some(heading) = CLAIMS_HEADING.find(text) else {
        return Vec::new();
    };
    let block_start = heading.end();
    let block_end = BLOCK_TERMINATOR
        .find(&text[block_start..])
        .map(|m| block_start + m.start())
        .unwrap_or(text.len());
    let block = &text[block_start..block_end];

    let numbers: Vec<(u32, usize, usize)> = CLAIM_NUMBER
        .captures_iter(block)
        .filter_map(|caps| {
            let number: u32 = caps.get(1)?.as_str().parse().ok()?;
            let m = caps.get(0)?;
            Some((number, m.start(), m.end()))
        })
        .collect();

    let mut claims = Vec::new();
    for (i, (number, _, text_start)) in numbers.iter().enumerate() {
        let text_end = numbers.get(i + 1).map(|next| next.1).unwrap_or(block.len());
        let body = normalize_whitespace(&block[*text_start..text_end]);
        if body.is_empty() {
            continue;
        }
        claims.push(Claim {
            number: *number,
            text: truncate_chars(&body, MAX_CLAIM_LEN).to_string(),
        });
    }
    claims
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Claims\n\
1. A non-oriented electrical steel sheet comprising, in mass%, Si: 2.5-4.0%.\n\
2. The sheet according to claim 1, wherein hot rolling is performed\n\
   at 1050-1150°C.\n\
Description\n\
[0001] unrelated text";

    #[test]
    fn test_extracts_numbered_claims() {
        let claims = extract_claims(SAMPLE);
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].number, 1);
        assert!(claims[0].text.starts_with("A non-oriented"));
        assert!(claims[1].text.contains("1050-1150°C"));
    }

    #[test]
    fn test_block_bounded_by_closing_marker() {
        let claims = extract_claims(SAMPLE);
        assert!(!claims[1].text.contains("unrelated"));
    }

    #[test]
    fn test_no_claims_heading_means_no_claims() {
        assert!(extract_claims("1. Looks like a claim but no heading.").is_empty());
    }

    #[test]
    fn test_decimal_values_do_not_split_claims() {
        let text = "Claims\n1. Si content of\n2.5% or more.\n";
        let claims = extract_claims(text);
        assert_eq!(claims.len(), 1);
        assert!(claims[0].text.contains("2.5% or more"));
    }
}
