//! Severity counts over an issue list.

use serde::{Deserialize, Serialize};

use super::issue::{Severity, ValidationIssue};

/// Counts of issues by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub blockers: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl IssueSummary {
    /// Count the issues of a list.
    pub fn from_issues<'a>(issues: impl IntoIterator<Item = &'a ValidationIssue>) -> Self {
        let mut summary = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Blocker => summary.blockers += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
        }
        summary
    }

    /// Total number of issues.
    pub fn total(&self) -> usize {
        self.blockers + self.warnings + self.infos
    }

    /// Whether any issue must be fixed before proceeding.
    pub fn has_blockers(&self) -> bool {
        self.blockers > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let issues = vec![
            ValidationIssue::new("1", Severity::Blocker, "a.csv", "x"),
            ValidationIssue::new("2", Severity::Warning, "a.csv", "y"),
            ValidationIssue::new("3", Severity::Warning, "a.csv", "z"),
            ValidationIssue::new("1", Severity::Info, "b.csv", "ok"),
        ];
        let summary = IssueSummary::from_issues(&issues);

        assert_eq!(summary.blockers, 1);
        assert_eq!(summary.warnings, 2);
        assert_eq!(summary.infos, 1);
        assert_eq!(summary.total(), 4);
        assert!(summary.has_blockers());
        assert!(!IssueSummary::default().has_blockers());
    }
}
