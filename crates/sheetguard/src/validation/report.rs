//! Batch validation report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::input::SourceMetadata;

use super::issue::ValidationIssue;
use super::summary::IssueSummary;

/// Result of validating a batch, with metadata about the processed files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Files that were actually validated, in batch order.
    pub sources: Vec<SourceMetadata>,
    /// Issues in emission order.
    pub issues: Vec<ValidationIssue>,
    /// Severity counts over `issues`.
    pub summary: IssueSummary,
    /// When validation finished.
    pub validated_at: DateTime<Utc>,
}

impl ValidationReport {
    /// Build a report stamped with the current time.
    pub fn new(sources: Vec<SourceMetadata>, issues: Vec<ValidationIssue>) -> Self {
        let summary = IssueSummary::from_issues(&issues);
        Self {
            sources,
            issues,
            summary,
            validated_at: Utc::now(),
        }
    }

    /// Whether the batch may proceed (no Blocker issue).
    pub fn passed(&self) -> bool {
        !self.summary.has_blockers()
    }

    /// Issues belonging to one file.
    pub fn issues_for<'a>(&'a self, file_name: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues.iter().filter(move |i| i.file_name == file_name)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Severity;

    #[test]
    fn test_report_json() {
        let report = ValidationReport::new(
            vec![SourceMetadata::from_bytes("a.csv", b"Run_ID\nR1\n")],
            vec![ValidationIssue::new("1", Severity::Warning, "a.csv", "dup").with_row(3)],
        );
        assert!(report.passed());
        assert_eq!(report.issues_for("a.csv").count(), 1);
        assert_eq!(report.issues_for("b.csv").count(), 0);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["sources"][0]["fileName"], "a.csv");
        assert_eq!(json["sources"][0]["sizeBytes"], 10);
        assert_eq!(json["summary"]["warnings"], 1);
        assert_eq!(json["issues"][0]["rowIndex"], 3);
        assert!(json["validatedAt"].is_string());
    }
}
