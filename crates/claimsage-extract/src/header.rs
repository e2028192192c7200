//! INID-coded bibliographic header extraction.
//!
//! Published front pages tag bibliographic fields with INID codes:
//! (21) application number, (22) filing date, (43) publication date,
//! (30) priority, (71) applicant, (72) inventors, (51) classification.

use claimsage_common::records::HeaderInfo;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref APPLICATION_NUMBER: Regex =
        Regex::new(r"(?i)\(21\)\s*Application number:\s*([\d.]+)").unwrap();
    static ref FILING_DATE: Regex =
        Regex::new(r"(?i)\(22\)\s*Date of filing:\s*([\d.]+)").unwrap();
    static ref PUBLICATION_DATE: Regex =
        Regex::new(r"(?i)\(43\)\s*Date of publication:\s*([\d.]+)").unwrap();
    static ref PRIORITY: Regex = Regex::new(r"(?i)\(30\)\s*Priority:\s*([^\n]+)").unwrap();
    static ref APPLICANT: Regex = Regex::new(r"(?i)\(71\)\s*Applicants?:\s*([^\n]+)").unwrap();
    static ref INVENTORS: Regex = Regex::new(r"(?i)\(72\)\s*Inventors?:\s*([^\n]+)").unwrap();
    static ref CLASSIFICATION: Regex =
        Regex::new(r"(?i)\(51\)\s*Int\s*Cl[.\d]*:\s*([^\n]+)").unwrap();
}

pub fn extract_header(text: &str) -> HeaderInfo {
    HeaderInfo {
        application_number: first_capture(&APPLICATION_NUMBER, text),
        filing_date: first_capture(&FILING_DATE, text),
        publication_date: first_capture(&PUBLICATION_DATE, text),
        priority: first_capture(&PRIORITY, text),
        applicant: first_capture(&APPLICANT, text),
        inventors: INVENTORS
            .captures_iter(text)
            .map(|caps| caps[1].trim().to_string())
            .collect(),
        classification: first_capture(&CLASSIFICATION, text),
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\
(21) Application number: 21180483.8\n\
(22) Date of filing: 18.06.2021\n\
(43) Date of publication: 22.12.2021\n\
(30) Priority: 19.06.2020 JP 2020106589\n\
(51) Int Cl.: C22C 38/02\n\
(71) Applicant: Example Steel Corporation\n\
(72) Inventor: YAMADA, Taro\n\
(72) Inventor: SUZUKI, Hanako\n";

    #[test]
    fn test_all_fields_extracted() {
        let header = extract_header(HEADER);
        assert_eq!(header.application_number.as_deref(), Some("21180483.8"));
        assert_eq!(header.filing_date.as_deref(), Some("18.06.2021"));
        assert_eq!(header.publication_date.as_deref(), Some("22.12.2021"));
        assert_eq!(
            header.priority.as_deref(),
            Some("19.06.2020 JP 2020106589")
        );
        assert_eq!(
            header.applicant.as_deref(),
            Some("Example Steel Corporation")
        );
        assert_eq!(header.inventors, vec!["YAMADA, Taro", "SUZUKI, Hanako"]);
        assert_eq!(header.classification.as_deref(), Some("C22C 38/02"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let header = extract_header("no header here");
        assert!(header.application_number.is_none());
        assert!(header.inventors.is_empty());
    }
}
