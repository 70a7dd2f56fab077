//! Validation engine: resolves template fields to columns, checks every
//! cell, and emits numbered issues.

mod batch;
mod cell;
mod engine;
mod issue;
mod report;
mod resolver;
mod summary;
mod uniqueness;

pub use batch::{BatchEntry, NO_FILE_NAME, NO_FILES_PROCESSED};
pub use cell::{CellValidator, WholeNumber, coerce_integer};
pub use engine::{EngineConfig, ValidationEngine};
pub use issue::{ALL_CLEAR, IssueCollector, Severity, ValidationIssue};
pub use report::ValidationReport;
pub use resolver::{FieldResolver, Resolution};
pub use summary::IssueSummary;
pub use uniqueness::UniquenessTracker;
