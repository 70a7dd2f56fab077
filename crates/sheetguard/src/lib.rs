//! Sheetguard: schema-driven validation of multi-omics sample sheets.
//!
//! Sample sheets are checked against a catalog of declarative templates
//! before a sequencing or spatial pipeline run proceeds. Every finding is
//! reported as a structured [`ValidationIssue`]; validation itself never
//! fails.
//!
//! # Core Principles
//!
//! - **Template-driven**: rules come from the catalog, never from the data
//! - **Deterministic**: the same inputs always yield the same issues, ids included
//! - **Non-fatal**: malformed input becomes a Blocker issue, not an error
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sheetguard::{ColumnMapping, TemplateRegistry, ValidationEngine};
//!
//! let registry = Arc::new(TemplateRegistry::builtin().unwrap());
//! let engine = ValidationEngine::new(registry);
//!
//! let bytes = std::fs::read("SampleSheet.csv").unwrap();
//! let mapping = ColumnMapping::new()
//!     .with("Run_ID", "run")
//!     .with("Sample_ID", "sample");
//!
//! for issue in engine.validate(&bytes, "SampleSheet.csv", "illumina-ngs-run-v1.2", &mapping) {
//!     println!("{} {}: {}", issue.id, issue.severity, issue.description);
//! }
//! ```

pub mod error;
pub mod input;
pub mod template;
pub mod validation;

pub use error::{Result, SheetguardError};
pub use input::{ColumnMapping, ParsedTable, Parser, ParserConfig, SourceMetadata};
pub use template::{FieldRule, FieldType, SchemaTemplate, TemplateRegistry};
pub use validation::{
    BatchEntry, EngineConfig, IssueSummary, Severity, ValidationEngine, ValidationIssue,
    ValidationReport,
};
