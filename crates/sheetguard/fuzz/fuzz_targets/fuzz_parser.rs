//! Fuzz target for the sample-sheet parser.
//!
//! Checks that parsing never panics, with a fixed and an auto-detected
//! delimiter, and that every parsed row has one cell per header.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sheetguard::{Parser, ParserConfig};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let fixed = Parser::new();
    let detected = Parser::with_config(ParserConfig::default().with_delimiter(None));

    for parser in [fixed, detected] {
        if let Ok(table) = parser.parse(data) {
            assert!(table.rows.iter().all(|r| r.len() == table.column_count()));
        }
    }
});
