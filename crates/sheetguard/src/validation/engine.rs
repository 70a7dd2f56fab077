//! Single-file and batch validation.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::input::{ColumnMapping, ParsedTable, Parser, ParserConfig, SourceMetadata};
use crate::template::{SchemaTemplate, TemplateRegistry};

use super::batch::{BatchEntry, NO_FILES_PROCESSED, NO_FILE_NAME};
use super::cell::CellValidator;
use super::issue::{IssueCollector, Severity, ValidationIssue};
use super::report::ValidationReport;
use super::resolver::{FieldResolver, Resolution};
use super::summary::IssueSummary;
use super::uniqueness::UniquenessTracker;

/// Engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// How file bytes are read into a table.
    pub parser: ParserConfig,
}

/// Validates sample sheets against the templates of a registry.
///
/// The engine holds no mutable state; one instance can serve concurrent
/// calls from several threads.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    registry: Arc<TemplateRegistry>,
    parser: Parser,
}

impl ValidationEngine {
    /// Create an engine with the default configuration.
    pub fn new(registry: Arc<TemplateRegistry>) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(registry: Arc<TemplateRegistry>, config: EngineConfig) -> Self {
        Self {
            registry,
            parser: Parser::with_config(config.parser),
        }
    }

    /// The template registry.
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Validate one file.
    ///
    /// Never fails: an unknown template or unreadable bytes each yield a
    /// single Blocker, and a file with no findings yields one all-clear Info
    /// issue. Ids run from "1" in discovery order.
    pub fn validate(
        &self,
        bytes: &[u8],
        file_name: &str,
        template_id: &str,
        mapping: &ColumnMapping,
    ) -> Vec<ValidationIssue> {
        let span = tracing::debug_span!("validate", file = file_name, template = template_id);
        let _guard = span.enter();

        let mut issues = IssueCollector::new(file_name);
        self.check_file(bytes, template_id, mapping, &mut issues);
        let issues = issues.finish();

        let summary = IssueSummary::from_issues(&issues);
        info!(
            file = file_name,
            blockers = summary.blockers,
            warnings = summary.warnings,
            infos = summary.infos,
            "validated file"
        );

        issues
    }

    fn check_file(
        &self,
        bytes: &[u8],
        template_id: &str,
        mapping: &ColumnMapping,
        issues: &mut IssueCollector,
    ) {
        let Some(template) = self.registry.lookup(template_id) else {
            issues.file_blocker(format!("Unknown template: {}", template_id));
            return;
        };

        let table = match self.parser.parse(bytes) {
            Ok(table) => table,
            Err(e) => {
                issues.file_blocker(format!("Failed to parse CSV: {}", e));
                return;
            }
        };
        debug!(
            format = table.format(),
            columns = table.column_count(),
            rows = table.row_count(),
            "parsed file"
        );

        check_fields(template, &table, mapping, issues);
    }

    /// Validate every entry whose file is present in `files`, concatenating
    /// the per-file issues in entry order.
    ///
    /// Each file keeps its own id sequence. When no file was processed the
    /// result is a single Info issue for file "N/A".
    pub fn validate_batch<B: AsRef<[u8]>>(
        &self,
        entries: &[BatchEntry],
        files: &HashMap<String, B>,
    ) -> Vec<ValidationIssue> {
        self.run_batch(entries, files).1
    }

    /// Validate a batch and describe the processed files alongside the issues.
    pub fn report_batch<B: AsRef<[u8]>>(
        &self,
        entries: &[BatchEntry],
        files: &HashMap<String, B>,
    ) -> ValidationReport {
        let (sources, issues) = self.run_batch(entries, files);
        ValidationReport::new(sources, issues)
    }

    fn run_batch<B: AsRef<[u8]>>(
        &self,
        entries: &[BatchEntry],
        files: &HashMap<String, B>,
    ) -> (Vec<SourceMetadata>, Vec<ValidationIssue>) {
        let mut sources = Vec::new();
        let mut all_issues = Vec::new();

        for entry in entries {
            if entry.file_name.is_empty() {
                warn!("skipping batch entry without a file name");
                continue;
            }
            let Some(bytes) = files.get(&entry.file_name) else {
                warn!(file = %entry.file_name, "no contents for batch entry, skipping");
                continue;
            };
            let bytes = bytes.as_ref();

            sources.push(SourceMetadata::from_bytes(&entry.file_name, bytes));
            all_issues.extend(self.validate(
                bytes,
                &entry.file_name,
                &entry.template_id,
                &entry.mapping,
            ));
        }

        if all_issues.is_empty() {
            all_issues.push(ValidationIssue::new(
                "1",
                Severity::Info,
                NO_FILE_NAME,
                NO_FILES_PROCESSED,
            ));
        }

        let summary = IssueSummary::from_issues(&all_issues);
        info!(
            files = sources.len(),
            blockers = summary.blockers,
            warnings = summary.warnings,
            infos = summary.infos,
            "validated batch"
        );

        (sources, all_issues)
    }
}

/// Run field resolution and row checks, field by field in template order.
fn check_fields(
    template: &SchemaTemplate,
    table: &ParsedTable,
    mapping: &ColumnMapping,
    issues: &mut IssueCollector,
) {
    let resolver = FieldResolver::new(mapping, table);
    let mut tracker = UniquenessTracker::new();

    for rule in template.fields() {
        let resolution = resolver.resolve(rule);
        debug!(field = %rule.name, ?resolution, "resolved field");

        let index = match resolution {
            Resolution::Column { index } => index,
            skipped => {
                if let Some(description) = skipped.blocker(rule) {
                    issues.field_blocker(&rule.name, description);
                }
                continue;
            }
        };

        tracker.begin_field(&rule.name);
        let validator = CellValidator::new(rule);
        // Row 1 is the header.
        for (i, cell) in table.column_values(index).enumerate() {
            validator.check(cell, i + 2, &mut tracker, issues);
        }
    }
}
