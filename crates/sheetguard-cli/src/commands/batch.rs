//! Batch command - validate every file listed in a manifest.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use colored::Colorize;
use sheetguard::BatchEntry;

use super::{build_engine, print_report, read_file, Outcome};
use crate::cli::GlobalOptions;

pub fn run(
    manifest: PathBuf,
    output: Option<PathBuf>,
    options: &GlobalOptions,
) -> Result<Outcome, Box<dyn std::error::Error>> {
    let engine = build_engine(options)?;

    let entries: Vec<BatchEntry> = serde_json::from_slice(&read_file(&manifest)?)?;
    let base_dir = manifest.parent().unwrap_or_else(|| Path::new("."));
    let files = read_batch_files(&entries, base_dir);

    let report = engine.report_batch(&entries, &files);

    if let Some(ref path) = output {
        std::fs::write(path, report.to_json()?)?;
    }

    if options.json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
        if let Some(path) = output {
            println!();
            println!("{} {}", "Report written to".cyan(), path.display());
        }
    }

    Ok(Outcome::from_report(&report))
}

/// Read each entry's file relative to the manifest directory. Files that
/// can't be read are left out, so their entries are skipped.
fn read_batch_files(entries: &[BatchEntry], base_dir: &Path) -> HashMap<String, Vec<u8>> {
    let mut files = HashMap::new();

    for entry in entries {
        if entry.file_name.is_empty() || files.contains_key(&entry.file_name) {
            continue;
        }
        match read_file(&base_dir.join(&entry.file_name)) {
            Ok(bytes) => {
                files.insert(entry.file_name.clone(), bytes);
            }
            Err(e) => tracing::warn!(file = %entry.file_name, error = %e, "could not read batch file"),
        }
    }

    files
}
