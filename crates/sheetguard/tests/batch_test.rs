//! Integration tests for batch validation and reports.

use std::collections::HashMap;
use std::sync::Arc;

use sheetguard::validation::{ALL_CLEAR, NO_FILES_PROCESSED};
use sheetguard::{BatchEntry, ColumnMapping, Severity, TemplateRegistry, ValidationEngine};

const VISIUM: &str = "spatial-visium-v1.0";

fn engine() -> ValidationEngine {
    ValidationEngine::new(Arc::new(TemplateRegistry::builtin().unwrap()))
}

fn visium_mapping() -> ColumnMapping {
    ColumnMapping::identity(["Slide_ID", "Capture_Area", "Library_ID", "Block_ID"])
}

fn files(pairs: &[(&str, &str)]) -> HashMap<String, Vec<u8>> {
    pairs
        .iter()
        .map(|(name, content)| (name.to_string(), content.as_bytes().to_vec()))
        .collect()
}

const CLEAN: &str = "Slide_ID,Capture_Area,Library_ID,Block_ID\nV1,A1,L1,B1\n";
const DIRTY: &str = "Slide_ID,Capture_Area,Library_ID,Block_ID\nV1,Z9,L1,B1\nV1,A2,L2,\n";

#[test]
fn test_empty_batch_fallback() {
    let issues = engine().validate_batch(&[], &HashMap::<String, Vec<u8>>::new());

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].id, "1");
    assert_eq!(issues[0].severity, Severity::Info);
    assert_eq!(issues[0].file_name, "N/A");
    assert_eq!(issues[0].row_index, None);
    assert_eq!(issues[0].column_name, None);
    assert_eq!(issues[0].description, NO_FILES_PROCESSED);
}

#[test]
fn test_no_entry_matches_any_file() {
    let entries = vec![
        BatchEntry::new("missing.csv", VISIUM, visium_mapping()),
        BatchEntry::new("", VISIUM, visium_mapping()),
    ];
    let issues = engine().validate_batch(&entries, &files(&[("other.csv", CLEAN)]));

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].file_name, "N/A");
    assert_eq!(issues[0].description, NO_FILES_PROCESSED);
}

#[test]
fn test_batch_concatenates_in_entry_order() {
    let entries = vec![
        BatchEntry::new("dirty.csv", VISIUM, visium_mapping()),
        BatchEntry::new("absent.csv", VISIUM, visium_mapping()),
        BatchEntry::new("clean.csv", VISIUM, visium_mapping()),
    ];
    let issues = engine().validate_batch(
        &entries,
        &files(&[("clean.csv", CLEAN), ("dirty.csv", DIRTY)]),
    );

    let found: Vec<_> = issues
        .iter()
        .map(|i| (i.file_name.as_str(), i.id.as_str()))
        .collect();
    // Ids restart for each file.
    assert_eq!(
        found,
        vec![
            ("dirty.csv", "1"),
            ("dirty.csv", "2"),
            ("dirty.csv", "3"),
            ("clean.csv", "1"),
        ]
    );
    assert_eq!(issues[0].description, "Duplicate value 'V1' (first seen in row 2)");
    assert_eq!(issues[1].description, "Value 'Z9' doesn't match expected format");
    assert_eq!(issues[2].description, "Required field 'Block_ID' is empty");
    assert_eq!(issues[3].description, ALL_CLEAR);
}

#[test]
fn test_processed_files_suppress_fallback() {
    let entries = vec![BatchEntry::new("clean.csv", VISIUM, visium_mapping())];
    let issues = engine().validate_batch(&entries, &files(&[("clean.csv", CLEAN)]));

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].file_name, "clean.csv");
    assert_eq!(issues[0].description, ALL_CLEAR);
}

#[test]
fn test_empty_bytes_are_still_validated() {
    let entries = vec![BatchEntry::new("empty.csv", VISIUM, visium_mapping())];
    let issues = engine().validate_batch(&entries, &files(&[("empty.csv", "")]));

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].file_name, "empty.csv");
    assert_eq!(
        issues[0].description,
        "Failed to parse CSV: No columns to parse from file"
    );
}

#[test]
fn test_batch_from_json_manifest() {
    let manifest = r#"[
        {"fileName": "clean.csv", "templateId": "spatial-visium-v1.0",
         "mapping": {"Slide_ID": "Slide_ID", "Capture_Area": "Capture_Area",
                     "Library_ID": "Library_ID", "Block_ID": "Block_ID"}},
        {"fileName": "clean2.csv"}
    ]"#;
    let entries: Vec<BatchEntry> = serde_json::from_str(manifest).unwrap();
    let issues = engine().validate_batch(
        &entries,
        &files(&[("clean.csv", CLEAN), ("clean2.csv", CLEAN)]),
    );

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].description, ALL_CLEAR);
    assert_eq!(issues[1].file_name, "clean2.csv");
    assert_eq!(issues[1].description, "Unknown template: ");
}

#[test]
fn test_report_batch() {
    let entries = vec![
        BatchEntry::new("dirty.csv", VISIUM, visium_mapping()),
        BatchEntry::new("clean.csv", VISIUM, visium_mapping()),
    ];
    let contents = files(&[("clean.csv", CLEAN), ("dirty.csv", DIRTY)]);
    let engine = engine();

    let report = engine.report_batch(&entries, &contents);
    assert_eq!(report.issues, engine.validate_batch(&entries, &contents));

    let names: Vec<_> = report.sources.iter().map(|s| s.file_name.as_str()).collect();
    assert_eq!(names, vec!["dirty.csv", "clean.csv"]);
    assert_eq!(report.sources[1].size_bytes, CLEAN.len() as u64);
    assert!(report.sources[0].hash.starts_with("sha256:"));

    assert_eq!(report.summary.blockers, 1);
    assert_eq!(report.summary.warnings, 2);
    assert_eq!(report.summary.infos, 1);
    assert!(!report.passed());
}

#[test]
fn test_report_for_empty_batch() {
    let report = engine().report_batch(&[], &HashMap::<String, &[u8]>::new());
    assert!(report.sources.is_empty());
    assert_eq!(report.summary.infos, 1);
    assert!(report.passed());
}
