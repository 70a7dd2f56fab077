//! Batch entries: which template and mapping apply to which file.

use serde::{Deserialize, Serialize};

use crate::input::ColumnMapping;

/// Description of the Info issue returned when a batch processed no file.
pub const NO_FILES_PROCESSED: &str = "No files were processed for validation";

/// File name carried by the batch fallback issue.
pub const NO_FILE_NAME: &str = "N/A";

/// One file of a batch run.
///
/// Missing keys deserialize as empty: an entry without a file name is
/// skipped, and one without a template id is validated against the empty id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    /// Name of the file, used as the key into the batch's file contents.
    #[serde(default)]
    pub file_name: String,
    /// Template to validate the file against.
    #[serde(default)]
    pub template_id: String,
    /// Canonical field name to column header.
    #[serde(default, alias = "columnMapping")]
    pub mapping: ColumnMapping,
}

impl BatchEntry {
    /// Create a batch entry.
    pub fn new(
        file_name: impl Into<String>,
        template_id: impl Into<String>,
        mapping: ColumnMapping,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            template_id: template_id.into(),
            mapping,
        }
    }
}
