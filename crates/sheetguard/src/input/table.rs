//! Parsed tabular data.

/// Header plus rows of one parsed sample sheet.
///
/// Cells are kept as raw text. A cell is `None` when the row was short or the
/// text was one of the parser's missing-value tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    /// Column headers, with duplicates disambiguated (`name`, `name.1`, ...).
    pub headers: Vec<String>,
    /// Row data in file order; every row has one cell per header.
    pub rows: Vec<Vec<Option<String>>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl ParsedTable {
    /// Create a new table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether a header is present.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// All cells of a column, in row order.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|cell| cell.as_deref()))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|cell| cell.as_deref())
    }

    /// Name of the format implied by the delimiter.
    pub fn format(&self) -> &'static str {
        match self.delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
    }
}
