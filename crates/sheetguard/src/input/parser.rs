//! Delimited-text parser for sample sheets.

use std::collections::HashSet;

use crate::error::{Result, SheetguardError};

use super::table::ParsedTable;

/// Delimiters to try when auto-detecting, in order of preference.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Lines sampled when auto-detecting.
const SAMPLE_LINES: usize = 10;

/// Cell texts treated as missing values.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
    /// Exact cell texts read as missing.
    pub na_values: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: Some(b','),
            quote: b'"',
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ParserConfig {
    /// Use the given delimiter, or auto-detect when `None`.
    pub fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replace the missing-value tokens.
    pub fn with_na_values<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.na_values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// Parses raw sample-sheet bytes into a [`ParsedTable`].
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// The parser's configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse bytes into a header and rows.
    ///
    /// Fails on empty input, undecodable (non UTF-8) bytes, and rows that
    /// carry more fields than the header. Short rows are padded with missing
    /// cells. Blank and whitespace-only lines are skipped, before the header
    /// as well as between rows.
    pub fn parse(&self, bytes: &[u8]) -> Result<ParsedTable> {
        let (body, skipped_lines) = skip_leading_blank_lines(bytes);
        if body.is_empty() {
            return Err(SheetguardError::EmptyData(
                "No columns to parse from file".to_string(),
            ));
        }

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(body).unwrap_or(b','),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(body);

        let headers = disambiguate_headers(reader.headers()?.iter());
        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;

            if record.len() == 1 && record[0].trim().is_empty() {
                continue;
            }

            if record.len() > expected_cols {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                return Err(SheetguardError::RaggedRow {
                    line: line + skipped_lines,
                    expected: expected_cols,
                    found: record.len(),
                });
            }

            let row: Vec<Option<String>> = (0..expected_cols)
                .map(|i| record.get(i).filter(|v| !self.is_na(v)).map(str::to_string))
                .collect();

            rows.push(row);
        }

        tracing::trace!(
            columns = expected_cols,
            rows = rows.len(),
            delimiter = ?(delimiter as char),
            "parsed table"
        );

        Ok(ParsedTable::new(headers, rows, delimiter))
    }

    fn is_na(&self, value: &str) -> bool {
        self.config.na_values.iter().any(|na| na == value)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop a UTF-8 BOM and any blank lines ahead of the header, returning the
/// rest and the number of lines dropped.
fn skip_leading_blank_lines(bytes: &[u8]) -> (&[u8], u64) {
    let mut rest = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    let mut skipped = 0;

    while let Some(end) = rest.iter().position(|&b| b == b'\n') {
        if !rest[..end].trim_ascii().is_empty() {
            break;
        }
        rest = &rest[end + 1..];
        skipped += 1;
    }
    if rest.trim_ascii().is_empty() {
        rest = &[];
    }

    (rest, skipped)
}

/// Name empty headers `Unnamed: {position}` and rename repeated headers to
/// `name.1`, `name.2`, ... keeping the first as-is.
fn disambiguate_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::new();

    for (position, name) in raw.enumerate() {
        let name = if name.is_empty() {
            format!("Unnamed: {}", position)
        } else {
            name.to_string()
        };

        let mut candidate = name.clone();
        let mut suffix = 0;
        while seen.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}.{}", name, suffix);
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}

/// Guess the delimiter from the first non-blank lines.
///
/// A candidate scores by how many sampled lines split into the same number
/// of fields as the first, then by that field count. Ties go to the earlier
/// entry of tab, comma, semicolon, pipe. Returns `None` when no candidate
/// occurs in the first line.
pub fn detect_delimiter(bytes: &[u8]) -> Option<u8> {
    let sample: Vec<&[u8]> = bytes
        .split(|&b| b == b'\n')
        .filter(|line| !line.trim_ascii().is_empty())
        .take(SAMPLE_LINES)
        .collect();
    let (first, rest) = sample.split_first()?;

    DELIMITERS
        .iter()
        .rev()
        .filter_map(|&delim| {
            let width = unquoted_count(first, delim);
            if width == 0 {
                return None;
            }
            let agreeing = rest
                .iter()
                .filter(|line| unquoted_count(line, delim) == width)
                .count();
            Some(((agreeing, width), delim))
        })
        .max_by_key(|&(score, _)| score)
        .map(|(_, delim)| delim)
}

/// Occurrences of `delimiter` outside double quotes.
fn unquoted_count(line: &[u8], delimiter: u8) -> usize {
    let mut in_quotes = false;
    line.iter()
        .filter(|&&b| {
            if b == b'"' {
                in_quotes = !in_quotes;
            }
            b == delimiter && !in_quotes
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        let data = b"Run_ID;Sample_ID;Lane\nR1;S1;1\nR1;S2;2\n";
        assert_eq!(detect_delimiter(data), Some(b';'));
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted_commas() {
        let data = b"\"Sample, ID, Name\"\tNote\n\"S1, x, y\"\tfree text\n";
        assert_eq!(detect_delimiter(data), Some(b'\t'));
    }

    #[test]
    fn test_detect_delimiter_without_candidates() {
        assert_eq!(detect_delimiter(b"Sample_ID\nS1\n"), None);
        assert_eq!(detect_delimiter(b"\n  \n"), None);
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let table = parser
            .parse(b"Sample_ID,Lane,Index_I1\nS1,1,ATGC\nS2,2,GGCC")
            .unwrap();

        assert_eq!(table.headers, vec!["Sample_ID", "Lane", "Index_I1"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some("S1"));
        assert_eq!(table.get(1, 2), Some("GGCC"));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = Parser::new().parse(b"a,b,c\n1\n2,3\n").unwrap();
        assert_eq!(table.rows[0], vec![Some("1".to_string()), None, None]);
        assert_eq!(table.rows[1], vec![Some("2".to_string()), Some("3".to_string()), None]);
    }

    #[test]
    fn test_long_row_is_an_error() {
        let err = Parser::new().parse(b"a,b\n1,2\n3,4,5\n").unwrap_err();
        assert_eq!(err.to_string(), "Expected 2 fields in line 3, saw 3");
    }

    #[test]
    fn test_empty_input() {
        for input in [&b""[..], b"\n\n", b"   \r\n"] {
            let err = Parser::new().parse(input).unwrap_err();
            assert_eq!(err.to_string(), "No columns to parse from file");
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let err = Parser::new().parse(b"a,b\n\xff\xfe,1\n").unwrap_err();
        assert!(matches!(err, SheetguardError::Csv(_)));
    }

    #[test]
    fn test_na_tokens_are_missing() {
        let table = Parser::new()
            .parse(b"a,b,c,d\nNA,null,n/a,value\n")
            .unwrap();
        assert_eq!(
            table.rows[0],
            vec![None, None, None, Some("value".to_string())]
        );
    }

    #[test]
    fn test_na_tokens_are_exact() {
        let table = Parser::new().parse(b"a,b\nNa, NA\n").unwrap();
        assert_eq!(
            table.rows[0],
            vec![Some("Na".to_string()), Some(" NA".to_string())]
        );
    }

    #[test]
    fn test_custom_na_values() {
        let parser = Parser::with_config(ParserConfig::default().with_na_values(["-"]));
        let table = parser.parse(b"a,b\n-,NA\n").unwrap();
        assert_eq!(table.rows[0], vec![None, Some("NA".to_string())]);
    }

    #[test]
    fn test_duplicate_headers() {
        let table = Parser::new().parse(b"Lane,Lane,Lane.1,Lane\n1,2,3,4\n").unwrap();
        assert_eq!(table.headers, vec!["Lane", "Lane.1", "Lane.1.1", "Lane.2"]);
    }

    #[test]
    fn test_empty_headers_are_named_by_position() {
        let table = Parser::new().parse(b"Sample,,Lane,\nS1,x,1,y\n").unwrap();
        assert_eq!(table.headers, vec!["Sample", "Unnamed: 1", "Lane", "Unnamed: 3"]);
        assert_eq!(table.get(0, 1), Some("x"));
    }

    #[test]
    fn test_whitespace_only_lines_are_skipped() {
        let table = Parser::new().parse(b"a,b\n1,2\n   \n\t\r\n3,4\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(1, 0), Some("3"));
    }

    #[test]
    fn test_whitespace_only_lines_before_header() {
        let table = Parser::new().parse(b"  \r\n\na,b\n1,2\n").unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_ragged_line_counts_leading_blank_lines() {
        let err = Parser::new().parse(b"\n  \na,b\n1,2,3\n").unwrap_err();
        assert_eq!(err.to_string(), "Expected 2 fields in line 4, saw 3");
    }

    #[test]
    fn test_auto_detect_tab() {
        let parser = Parser::with_config(ParserConfig::default().with_delimiter(None));
        let table = parser.parse(b"Slide_ID\tCapture_Area\nV1\tA1\n").unwrap();
        assert_eq!(table.delimiter, b'\t');
        assert_eq!(table.headers, vec!["Slide_ID", "Capture_Area"]);
    }

    #[test]
    fn test_header_only() {
        let table = Parser::new().parse(b"Run_ID,Lane\n").unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_bom_and_quotes() {
        let table = Parser::new()
            .parse(b"\xef\xbb\xbfSample_ID,Note\nS1,\"a, b\"\n")
            .unwrap();
        assert_eq!(table.headers[0], "Sample_ID");
        assert_eq!(table.get(0, 1), Some("a, b"));
    }
}
