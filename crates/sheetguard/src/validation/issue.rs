//! Validation issues and the per-invocation collector that numbers them.

use serde::{Deserialize, Serialize};

/// Description of the synthetic issue emitted when a file has no findings.
pub const ALL_CLEAR: &str = "All validations passed successfully!";

/// Severity level of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Status marker, including the all-clear case.
    Info,
    /// Should be reviewed before proceeding.
    Warning,
    /// Must be fixed before the pipeline run proceeds.
    Blocker,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Blocker => "Blocker",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One reported finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Sequential id within one engine invocation ("1", "2", ...).
    pub id: String,
    /// Severity level.
    pub severity: Severity,
    /// File the issue belongs to.
    pub file_name: String,
    /// Spreadsheet-style row number: the first data row is 2.
    pub row_index: Option<usize>,
    /// Canonical field name the issue refers to.
    pub column_name: Option<String>,
    /// Human-readable description.
    pub description: String,
}

impl ValidationIssue {
    /// Create an issue with no row or column.
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        file_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            file_name: file_name.into(),
            row_index: None,
            column_name: None,
            description: description.into(),
        }
    }

    /// Set the row index.
    pub fn with_row(mut self, row_index: usize) -> Self {
        self.row_index = Some(row_index);
        self
    }

    /// Set the column name.
    pub fn with_column(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }

    /// Whether this issue must be fixed before proceeding.
    pub fn is_blocker(&self) -> bool {
        self.severity == Severity::Blocker
    }
}

/// Accumulates the issues of one single-file validation, assigning ids in
/// discovery order from a single counter starting at 1.
#[derive(Debug)]
pub struct IssueCollector {
    file_name: String,
    next_id: u64,
    issues: Vec<ValidationIssue>,
}

impl IssueCollector {
    /// Start collecting issues for a file.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            next_id: 1,
            issues: Vec::new(),
        }
    }

    /// Record an issue under the next id.
    pub fn push(
        &mut self,
        severity: Severity,
        row_index: Option<usize>,
        column_name: Option<&str>,
        description: impl Into<String>,
    ) {
        let mut issue = ValidationIssue::new(
            self.next_id.to_string(),
            severity,
            self.file_name.as_str(),
            description,
        );
        issue.row_index = row_index;
        issue.column_name = column_name.map(str::to_string);

        self.next_id += 1;
        self.issues.push(issue);
    }

    /// Record a file-level blocker (no row, no column).
    pub fn file_blocker(&mut self, description: impl Into<String>) {
        self.push(Severity::Blocker, None, None, description);
    }

    /// Record a field-level blocker (column, no row).
    pub fn field_blocker(&mut self, field: &str, description: impl Into<String>) {
        self.push(Severity::Blocker, None, Some(field), description);
    }

    /// Record a cell-level issue.
    pub fn cell(
        &mut self,
        severity: Severity,
        row_index: usize,
        field: &str,
        description: impl Into<String>,
    ) {
        self.push(severity, Some(row_index), Some(field), description);
    }

    /// Name of the file being validated.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Issues recorded so far.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Number of issues recorded so far.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Finish the invocation. A file without findings gets one all-clear
    /// Info issue.
    pub fn finish(mut self) -> Vec<ValidationIssue> {
        if self.issues.is_empty() {
            self.push(Severity::Info, None, None, ALL_CLEAR);
        }
        self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut collector = IssueCollector::new("run.csv");
        collector.file_blocker("first");
        collector.field_blocker("Lane", "second");
        collector.cell(Severity::Warning, 2, "Index_I1", "third");

        let issues = collector.finish();
        let ids: Vec<_> = issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(issues.iter().all(|i| i.file_name == "run.csv"));
        assert_eq!(issues[1].column_name.as_deref(), Some("Lane"));
        assert_eq!(issues[1].row_index, None);
        assert_eq!(issues[2].row_index, Some(2));
    }

    #[test]
    fn test_all_clear_only_when_empty() {
        let issues = IssueCollector::new("clean.csv").finish();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "1");
        assert_eq!(issues[0].severity, Severity::Info);
        assert_eq!(issues[0].description, ALL_CLEAR);
        assert_eq!(issues[0].row_index, None);
        assert_eq!(issues[0].column_name, None);

        let mut collector = IssueCollector::new("dirty.csv");
        collector.cell(Severity::Warning, 3, "Sample_ID", "dup");
        let issues = collector.finish();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_issue_json_shape() {
        let issue = ValidationIssue::new("4", Severity::Blocker, "a.csv", "Value 0 is below minimum 1")
            .with_row(2)
            .with_column("Lane");
        let json = serde_json::to_value(&issue).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "4",
                "severity": "Blocker",
                "fileName": "a.csv",
                "rowIndex": 2,
                "columnName": "Lane",
                "description": "Value 0 is below minimum 1"
            })
        );

        let bare = serde_json::to_value(ValidationIssue::new("1", Severity::Info, "N/A", "x")).unwrap();
        assert!(bare["rowIndex"].is_null());
        assert!(bare["columnName"].is_null());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Blocker);
    }
}
