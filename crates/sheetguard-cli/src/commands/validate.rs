//! Validate command - check one sample sheet against a template.

use std::path::{Path, PathBuf};

use sheetguard::{ColumnMapping, SourceMetadata, ValidationReport};

use super::{build_engine, print_report, read_file, Outcome};
use crate::cli::GlobalOptions;

pub fn run(
    file: PathBuf,
    template: String,
    mapping: Option<String>,
    map: Vec<(String, String)>,
    options: &GlobalOptions,
) -> Result<Outcome, Box<dyn std::error::Error>> {
    let engine = build_engine(options)?;
    let bytes = read_file(&file)?;

    let mapping = match (mapping, map.is_empty()) {
        (None, true) => {
            // Without a mapping, fields are looked up under their own names.
            let fields = engine
                .registry()
                .lookup(&template)
                .map(|t| t.fields().iter().map(|f| f.name.as_str()).collect::<Vec<_>>())
                .unwrap_or_default();
            ColumnMapping::identity(fields)
        }
        (base, _) => {
            let mut mapping = match base {
                Some(source) => load_mapping(&source)?,
                None => ColumnMapping::new(),
            };
            for (field, column) in map {
                mapping.insert(field, column);
            }
            mapping
        }
    };
    tracing::debug!(fields = mapping.len(), "using column mapping");

    let file_name = display_name(&file);
    let issues = engine.validate(&bytes, &file_name, &template, &mapping);
    let report = ValidationReport::new(vec![SourceMetadata::from_bytes(&file_name, &bytes)], issues);

    if options.json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }

    Ok(Outcome::from_report(&report))
}

/// Parse a mapping given inline as JSON or as the path of a JSON file.
fn load_mapping(source: &str) -> Result<ColumnMapping, Box<dyn std::error::Error>> {
    let path = Path::new(source);
    let mapping = if path.is_file() {
        serde_json::from_slice(&read_file(path)?)?
    } else {
        serde_json::from_str(source)?
    };
    Ok(mapping)
}

/// Name issues are reported under: the file name without its directory.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
