//! Per-file association of canonical field names to physical column headers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Partial mapping from canonical field name to the column header present in
/// one specific file.
///
/// Fields absent from the mapping are unmapped. On the wire, `null` and empty
/// strings also mean unmapped; they are dropped on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, Option<String>>")]
pub struct ColumnMapping {
    #[serde(flatten)]
    columns: IndexMap<String, String>,
}

impl ColumnMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map every field to a column of the same name.
    pub fn identity<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        fields.into_iter().map(|f| (f, f)).collect()
    }

    /// Map a field to a column. An empty column name leaves the field unmapped.
    pub fn with(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.insert(field, column);
        self
    }

    /// Map a field to a column. An empty column name unmaps the field.
    pub fn insert(&mut self, field: impl Into<String>, column: impl Into<String>) {
        let field = field.into();
        let column = column.into();
        if column.is_empty() {
            self.columns.shift_remove(&field);
        } else {
            self.columns.insert(field, column);
        }
    }

    /// Column mapped to a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.columns.get(field).map(String::as_str)
    }

    /// Iterate `(field, column)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(f, c)| (f.as_str(), c.as_str()))
    }

    /// Number of mapped fields.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no field is mapped.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl From<IndexMap<String, Option<String>>> for ColumnMapping {
    fn from(raw: IndexMap<String, Option<String>>) -> Self {
        let mut mapping = ColumnMapping::new();
        for (field, column) in raw {
            if let Some(column) = column {
                mapping.insert(field, column);
            }
        }
        mapping
    }
}

impl<F: Into<String>, C: Into<String>> FromIterator<(F, C)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (F, C)>>(iter: I) -> Self {
        let mut mapping = ColumnMapping::new();
        for (field, column) in iter {
            mapping.insert(field, column);
        }
        mapping
    }
}
