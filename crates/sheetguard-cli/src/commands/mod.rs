//! CLI command implementations.

pub mod batch;
pub mod templates;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use indexmap::IndexMap;
use sheetguard::{
    EngineConfig, ParserConfig, Severity, SheetguardError, TemplateRegistry, ValidationEngine,
    ValidationIssue, ValidationReport,
};

use crate::cli::GlobalOptions;

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing blocks the pipeline run.
    Clean,
    /// At least one Blocker issue was reported.
    Blocked,
}

impl Outcome {
    pub fn from_report(report: &ValidationReport) -> Self {
        if report.passed() {
            Outcome::Clean
        } else {
            Outcome::Blocked
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Clean => 0,
            Outcome::Blocked => 2,
        }
    }
}

/// Load the catalog named by `--templates`, or the built-in one.
pub fn load_registry(options: &GlobalOptions) -> Result<TemplateRegistry, SheetguardError> {
    match &options.templates {
        Some(path) => TemplateRegistry::load(path),
        None => TemplateRegistry::builtin(),
    }
}

/// Build an engine from the global options.
pub fn build_engine(options: &GlobalOptions) -> Result<ValidationEngine, SheetguardError> {
    let registry = load_registry(options)?;
    let config = EngineConfig {
        parser: ParserConfig::default().with_delimiter(options.delimiter.byte()),
    };
    Ok(ValidationEngine::with_config(Arc::new(registry), config))
}

/// Read a file, naming it in the error.
pub fn read_file(path: &Path) -> Result<Vec<u8>, SheetguardError> {
    std::fs::read(path).map_err(|e| SheetguardError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Print a report grouped by file.
pub fn print_report(report: &ValidationReport) {
    let mut by_file: IndexMap<&str, Vec<&ValidationIssue>> = IndexMap::new();
    for issue in &report.issues {
        by_file.entry(issue.file_name.as_str()).or_default().push(issue);
    }

    for (file, issues) in &by_file {
        println!("{} {}", "Results for".cyan().bold(), file.white());
        for issue in issues {
            print_issue(issue);
        }
        println!();
    }

    let summary = &report.summary;
    println!("{}", "Summary:".yellow().bold());
    println!("  Files:    {}", report.sources.len().to_string().white());
    println!("  Blockers: {}", summary.blockers.to_string().red());
    println!("  Warnings: {}", summary.warnings.to_string().yellow());
    println!("  Info:     {}", summary.infos.to_string().blue());
    println!();

    if report.passed() {
        println!("{}", "No blockers; the run may proceed.".green().bold());
    } else {
        println!("{}", "Blockers found; fix them before proceeding.".red().bold());
    }
}

fn print_issue(issue: &ValidationIssue) {
    let severity = match issue.severity {
        Severity::Blocker => "BLOCKER".red().bold(),
        Severity::Warning => "WARNING".yellow().bold(),
        Severity::Info => "INFO".blue().bold(),
    };

    let mut location = String::new();
    if let Some(row) = issue.row_index {
        location.push_str(&format!("row {}", row));
    }
    if let Some(column) = &issue.column_name {
        if !location.is_empty() {
            location.push_str(", ");
        }
        location.push_str(column);
    }

    if location.is_empty() {
        println!("  {:>3} {:<8} {}", issue.id.dimmed(), severity, issue.description);
    } else {
        println!(
            "  {:>3} {:<8} {} {}",
            issue.id.dimmed(),
            severity,
            format!("[{}]", location).dimmed(),
            issue.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_exit_codes() {
        let clean = ValidationReport::new(
            vec![],
            vec![ValidationIssue::new("1", Severity::Warning, "a.csv", "dup")],
        );
        assert_eq!(Outcome::from_report(&clean).exit_code(), 0);

        let blocked = ValidationReport::new(
            vec![],
            vec![ValidationIssue::new("1", Severity::Blocker, "a.csv", "Unknown template: x")],
        );
        assert_eq!(Outcome::from_report(&blocked).exit_code(), 2);
    }
}
