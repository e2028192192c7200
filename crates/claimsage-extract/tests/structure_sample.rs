//! End-to-end structuring of a realistic front-page + description sample.

use claimsage_extract::structure_patent;

const SAMPLE: &str = "\
(11) EP 3 888 777 A1\n\
(21) Application number: 21180483.8\n\
(22) Date of filing: 18.06.2021\n\
(43) Date of publication: 22.12.2021\n\
(51) Int Cl.: C22C 38/02\n\
(71) Applicant: Example Steel Corporation\n\
(72) Inventor: YAMADA, Taro\n\
(54) NON-ORIENTED ELECTRICAL STEEL SHEET AND PRODUCTION METHOD\n\
(57) A non-oriented electrical steel sheet having excellent magnetic properties\n\
and high electrical resistivity, containing Si and Al in controlled amounts,\n\
and a production method performing hot rolling and annealing under controlled\n\
temperatures, are provided.\n\
TECHNICAL FIELD\n\
[0001] The present invention relates to a non-oriented electrical steel sheet\n\
used for motor cores, and to a method for producing the same. The steel\n\
contains 2.5-4.0% Si and Al: 0.5-2.0%.\n\
[0002] Hot rolling is performed at 1050-1150°C, followed by cold rolling and\n\
annealing at 850°C to obtain low core loss and high flux density.\n\
EXAMPLES\n\
[0003] Steels having the compositions shown in Table 1 were produced and the\n\
magnetic properties of the obtained sheets were evaluated as described below.\n\
Table 1 Chemical compositions of the test steels\n\
Si 3.1  Al 0.6  Mn 0.2  Cr 0.1  (values in mass percent, balance Fe)\n\n\
Claims\n\
1. A non-oriented electrical steel sheet comprising, in mass%, Si: 2.5-4.0%\n\
   and Al: 0.5-2.0%.\n\
2. A method according to claim 1, wherein hot rolling is performed at\n\
   1050-1150°C.\n\
Description of the drawings follows.\n";

#[test]
fn structures_all_fields_from_one_document() {
    let record = structure_patent(SAMPLE, "ep_3888777_a1", 12);

    assert_eq!(record.patent_number, "EP3888777A1");
    assert_eq!(
        record.title,
        "NON-ORIENTED ELECTRICAL STEEL SHEET AND PRODUCTION METHOD"
    );
    assert!(record.abstract_text.starts_with("A non-oriented electrical steel sheet"));

    assert_eq!(
        record
            .numbered_paragraphs
            .iter()
            .map(|p| p.number)
            .collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let section_names: Vec<&str> = record.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(section_names, vec!["Technical Field", "Examples"]);

    assert_eq!(record.tables.len(), 1);
    assert!(record.compositions.iter().any(|c| c.element == "Si"));
    assert!(record
        .technical_details
        .processes
        .iter()
        .any(|p| p.name == "hot rolling"));
    assert!(record.keywords.contains("steel"));
    assert_eq!(record.claims.len(), 2);

    assert_eq!(record.header_info.applicant.as_deref(), Some("Example Steel Corporation"));
    assert_eq!(record.num_pages, 12);
    assert!(record.searchable_content.contains("[0001]"));
    assert!(record.searchable_content.contains("CLAIMS:"));
}

#[test]
fn serde_round_trip_preserves_the_record() {
    let record = structure_patent(SAMPLE, "ep_3888777_a1", 12);
    let json = serde_json::to_string(&record).unwrap();
    let back: claimsage_common::records::PatentRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(back.patent_number, record.patent_number);
    assert_eq!(back.numbered_paragraphs, record.numbered_paragraphs);
    assert_eq!(back.claims, record.claims);
    assert_eq!(back.content_hash, record.content_hash);
}
