//! CLI argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Sheetguard: validate multi-omics sample sheets before a pipeline run
#[derive(Parser)]
#[command(name = "sheetguard")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Template catalog (JSON) to use instead of the built-in templates
    #[arg(long, global = true, value_name = "CATALOG")]
    pub templates: Option<PathBuf>,

    /// Delimiter of the input files (auto, comma, tab, semicolon, pipe)
    #[arg(long, global = true, default_value = "comma")]
    pub delimiter: DelimiterChoice,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate one sample sheet against a template
    Validate {
        /// Path to the sample sheet
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Template id (see `sheetguard templates`)
        #[arg(short, long)]
        template: String,

        /// Column mapping as a JSON object, or a path to a JSON file
        #[arg(long, value_name = "JSON")]
        mapping: Option<String>,

        /// Map one field to a column (repeatable)
        #[arg(long = "map", value_name = "FIELD=COLUMN", value_parser = parse_map_entry)]
        map: Vec<(String, String)>,
    },

    /// Validate the files listed in a batch manifest
    Batch {
        /// JSON array of {fileName, templateId, mapping} entries
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Write the JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List templates, or show the rules of one
    Templates {
        /// Template id
        #[arg(value_name = "ID")]
        id: Option<String>,
    },
}

/// Parse a `FIELD=COLUMN` pair. The column may be empty (unmaps the field).
pub fn parse_map_entry(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, column)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), column.trim().to_string()))
        }
        _ => Err(format!("Invalid mapping '{}'. Use FIELD=COLUMN.", s)),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DelimiterChoice {
    Auto,
    #[default]
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

impl DelimiterChoice {
    /// Delimiter byte, or `None` to auto-detect.
    pub fn byte(&self) -> Option<u8> {
        match self {
            DelimiterChoice::Auto => None,
            DelimiterChoice::Comma => Some(b','),
            DelimiterChoice::Tab => Some(b'\t'),
            DelimiterChoice::Semicolon => Some(b';'),
            DelimiterChoice::Pipe => Some(b'|'),
        }
    }
}

impl std::str::FromStr for DelimiterChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(DelimiterChoice::Auto),
            "comma" | "," => Ok(DelimiterChoice::Comma),
            "tab" | "\\t" => Ok(DelimiterChoice::Tab),
            "semicolon" | ";" => Ok(DelimiterChoice::Semicolon),
            "pipe" | "|" => Ok(DelimiterChoice::Pipe),
            _ => Err(format!(
                "Unknown delimiter: {}. Use auto, comma, tab, semicolon, or pipe.",
                s
            )),
        }
    }
}

impl std::fmt::Display for DelimiterChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DelimiterChoice::Auto => write!(f, "auto"),
            DelimiterChoice::Comma => write!(f, "comma"),
            DelimiterChoice::Tab => write!(f, "tab"),
            DelimiterChoice::Semicolon => write!(f, "semicolon"),
            DelimiterChoice::Pipe => write!(f, "pipe"),
        }
    }
}
