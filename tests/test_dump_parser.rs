//! Integration tests for field dump parsing and the read path.

use pdf_filler::fdf::FdfWriter;
use pdf_filler::{
    map_form_to_pdf, normalize_for_fill, parse_dump, to_key_value, DumpParser, FieldFlags,
    FieldKind, FieldRecord, FieldValue, RemapTable, ValueExtraction,
};
use proptest::prelude::*;

/// Dump of a small application form as printed by `pdftk dump_data_fields_utf8`.
const APPLICATION_DUMP: &str = "---
FieldType: Text
FieldName: applicant.name
FieldNameAlt: Full name
FieldFlags: 2
FieldValue: Jane Doe
FieldJustification: Left
---
FieldType: Text
FieldName: applicant.notes
FieldFlags: 4096
FieldValue: Allergic to peanuts.
Prefers email.
FieldJustification: Left
---
FieldType: Button
FieldName: agree
FieldFlags: 0
FieldValue: Yes
FieldJustification: Left
FieldStateOption: Off
FieldStateOption: Yes
---
FieldType: Button
FieldName: size
FieldFlags: 49152
FieldJustification: Left
FieldStateOption: L
FieldStateOption: M
FieldStateOption: Off
---
FieldType: Choice
FieldName: country
FieldFlags: 131072
FieldValue: Norway
FieldValueDefault: Sweden
FieldJustification: Left
FieldStateOption: Norway
FieldStateOption: Sweden
---
FieldType: Signature
FieldName: signature
FieldFlags: 0
FieldJustification: Left
";

#[test]
fn test_parse_application_dump() {
    let records = parse_dump(APPLICATION_DUMP);

    assert_eq!(records.len(), 6);
    assert_eq!(
        records[0],
        FieldRecord::new("applicant.name")
            .with_type("Text")
            .with_flags("2")
    );
    assert_eq!(records[1].flags(), FieldFlags::MULTILINE);
    assert!(records[2].is_checkbox());
    assert!(records[3].flags().contains(FieldFlags::RADIO));
    assert_eq!(records[4].kind(), FieldKind::Choice);
    assert!(records[4].flags().contains(FieldFlags::COMBO));
    assert_eq!(records[5].kind(), FieldKind::Signature);
    assert!(records.iter().all(|r| r.field_value.is_empty()));
}

#[test]
fn test_single_line_values() {
    let parser = DumpParser::new().with_values(ValueExtraction::SingleLine);
    let records = parser.parse(APPLICATION_DUMP);

    assert_eq!(records[0].field_value, "Jane Doe");
    assert_eq!(records[1].field_value, "Allergic to peanuts.");
    assert_eq!(records[2].field_value, "Yes");
    assert_eq!(records[3].field_value, "");
    assert_eq!(records[4].field_value, "Norway");
}

#[test]
fn test_multiline_values() {
    let parser = DumpParser::new().with_values(ValueExtraction::MultiLine);
    let records = parser.parse(APPLICATION_DUMP);

    assert_eq!(records[0].field_value, "Jane Doe");
    assert_eq!(records[1].field_value, "Allergic to peanuts.\nPrefers email.");
    assert_eq!(records[4].field_value, "Norway");
}

#[test]
fn test_alternate_name_pattern() {
    let parser = DumpParser::new()
        .with_name_pattern(r"FieldNameAlt: ([^\n]*)")
        .unwrap();
    let records = parser.parse(APPLICATION_DUMP);

    assert_eq!(records[0].title, "Full name");
    // Blocks without an alternate name keep an empty title
    assert_eq!(records[1].title, "");
    assert_eq!(records.len(), 6);
}

#[test]
fn test_documented_example_segment() {
    let records = parse_dump("---\nFieldName: Foo\nFieldType: Text\nFieldFlags: 2");
    assert_eq!(
        records,
        vec![FieldRecord {
            title: "Foo".into(),
            field_type: "Text".into(),
            field_flags: "2".into(),
            field_value: "".into(),
        }]
    );
}

#[test]
fn test_remap_read_path() {
    let parser = DumpParser::new().with_values(ValueExtraction::SingleLine);
    let records = parser.parse(APPLICATION_DUMP);

    let mut remap = RemapTable::new();
    remap.insert("applicant.name".into(), "name".into());
    remap.insert("not_in_form".into(), "ignored".into());

    let map = map_form_to_pdf(&records, &remap);
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["name", "applicant.notes", "agree", "size", "country", "signature"]
    );
    assert_eq!(map["name"], FieldValue::Text("Jane Doe".into()));
}

#[test]
fn test_read_then_encode_keeps_pairs() {
    let parser = DumpParser::new().with_values(ValueExtraction::SingleLine);
    let records = parser.parse(APPLICATION_DUMP);

    let mut values = to_key_value(&records);
    values.insert("agree".into(), true.into());
    let normalized = normalize_for_fill(values.clone());

    for (key, value) in &values {
        match value {
            FieldValue::Boolean(_) => {
                assert_eq!(normalized[key], FieldValue::Text("Yes".into()))
            },
            _ => assert_eq!(&normalized[key], value),
        }
    }

    let bytes = FdfWriter::from_values(&normalized).to_bytes().unwrap();
    let content = String::from_utf8_lossy(&bytes).to_string();
    assert!(content.contains("/T (applicant.name) /V (Jane Doe)"));
    assert!(content.contains("/T (agree) /V (Yes)"));
    assert!(content.contains("/T (size) /V ()"));
}

proptest! {
    #[test]
    fn prop_one_record_per_block(names in prop::collection::vec("[A-Za-z0-9_. ]{0,12}", 0..20)) {
        let mut dump = String::from("header line\n");
        for name in &names {
            dump.push_str("---\nFieldType: Text\nFieldName: ");
            dump.push_str(name);
            dump.push('\n');
        }

        let records = parse_dump(&dump);
        prop_assert_eq!(records.len(), names.len());
        for (record, name) in records.iter().zip(&names) {
            prop_assert_eq!(record.title.as_str(), name.trim());
            prop_assert_eq!(record.field_type.as_str(), "Text");
        }
    }

    #[test]
    fn prop_slice_count(segments in prop::collection::vec("[a-z\n:]{0,8}", 1..10)) {
        let dump = segments.join("---");
        prop_assert_eq!(parse_dump(&dump).len(), segments.len() - 1);
    }
}
