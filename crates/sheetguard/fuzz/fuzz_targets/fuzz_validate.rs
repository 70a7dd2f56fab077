//! Fuzz target for single-file validation.
//!
//! Feeds arbitrary sheets and mappings to the engine and checks that it
//! never panics and always numbers its issues from "1".

#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sheetguard::{ColumnMapping, TemplateRegistry, ValidationEngine};

const TEMPLATES: &[&str] = &[
    "illumina-ngs-run-v1.2",
    "10x-single-cell-v2.0",
    "spatial-visium-v1.0",
];

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    template: u8,
    mapping: Vec<(&'a str, &'a str)>,
    sheet: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    if input.sheet.len() > 50_000 {
        return;
    }

    let Ok(registry) = TemplateRegistry::builtin() else {
        return;
    };
    let engine = ValidationEngine::new(Arc::new(registry));

    let template = TEMPLATES[input.template as usize % TEMPLATES.len()];
    let mapping: ColumnMapping = input.mapping.into_iter().collect();

    let issues = engine.validate(input.sheet, "fuzz.csv", template, &mapping);
    assert!(!issues.is_empty());
    for (i, issue) in issues.iter().enumerate() {
        assert_eq!(issue.id, (i + 1).to_string());
    }
});
