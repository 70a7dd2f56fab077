//! Resolution of template fields to physical columns.

use crate::input::{ColumnMapping, ParsedTable};
use crate::template::FieldRule;

/// Outcome of resolving one field against a mapping and a parsed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The field has no mapping entry.
    Unmapped,
    /// The mapping names a column the file doesn't have.
    MissingColumn { column: String },
    /// The field is backed by the column at this position.
    Column { index: usize },
}

impl Resolution {
    /// Blocker description for a resolution that skips the field, if one is
    /// due. Optional unmapped fields are skipped silently.
    pub fn blocker(&self, rule: &FieldRule) -> Option<String> {
        match self {
            Resolution::Unmapped if rule.required => Some(format!(
                "Required field '{}' is not mapped to any CSV column",
                rule.name
            )),
            Resolution::Unmapped => None,
            Resolution::MissingColumn { column } => {
                Some(format!("Mapped column '{}' not found in CSV file", column))
            }
            Resolution::Column { .. } => None,
        }
    }
}

/// Resolves template fields to columns of one file.
pub struct FieldResolver<'a> {
    mapping: &'a ColumnMapping,
    table: &'a ParsedTable,
}

impl<'a> FieldResolver<'a> {
    /// Create a resolver over a mapping and a parsed table.
    pub fn new(mapping: &'a ColumnMapping, table: &'a ParsedTable) -> Self {
        Self { mapping, table }
    }

    /// Resolve one field.
    pub fn resolve(&self, rule: &FieldRule) -> Resolution {
        let Some(column) = self.mapping.get(&rule.name) else {
            return Resolution::Unmapped;
        };

        match self.table.column_index(column) {
            Some(index) => Resolution::Column { index },
            None => Resolution::MissingColumn {
                column: column.to_string(),
            },
        }
    }
}
