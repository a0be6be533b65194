// ============================================================
// CSV PARSER
// ============================================================
// Parse uploaded CSV bytes into a table with data-frame style headers

use std::collections::HashSet;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::encoding::decode_upload;
use crate::domain::csv::{CsvTable, PreviewConfig};
use crate::domain::error::{AppError, Result};

/// Delimiters considered when sniffing
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Lines sampled when sniffing the delimiter
const SNIFF_LINES: usize = 10;

/// CSV parser for uploads
pub struct CsvParser {
    /// Delimiter character; `None` sniffs from the content
    delimiter: Option<u8>,

    /// Whether to trim whitespace from values
    trim: bool,

    /// Whether rows shorter than the header are an error
    strict: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: Some(b','),
            trim: false,
            strict: false,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PreviewConfig) -> Self {
        Self {
            delimiter: config.delimiter,
            trim: config.trim,
            strict: config.strict,
        }
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Decode and parse raw upload bytes
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<CsvTable> {
        let content = decode_upload(bytes)?;
        self.parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<CsvTable> {
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| Self::detect_delimiter(content));

        if let Some(line) = unclosed_quote_line(content, delimiter) {
            return Err(AppError::ParseError(format!(
                "EOF inside string starting at line {}",
                line
            )));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Column counts are checked per row below
            .from_reader(content.as_bytes());

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV record {}: {}", index + 1, e))
            })?;

            if !is_blank_record(content, &record) {
                records.push(record);
            }
        }

        let mut records = records.into_iter();
        let headers = records.next().ok_or_else(|| {
            AppError::ParseError("No columns to parse from file".to_string())
        })?;

        let columns = disambiguate_headers(&headers);
        let width = columns.len();

        let rows = records
            .map(|record| self.parse_row(content, width, &record))
            .collect::<Result<Vec<_>>>()?;

        Ok(CsvTable::new(columns, rows))
    }

    /// Fit one record to the header width
    fn parse_row(
        &self,
        content: &str,
        width: usize,
        record: &StringRecord,
    ) -> Result<Vec<String>> {
        if record.len() > width || (self.strict && record.len() < width) {
            return Err(AppError::ParseError(format!(
                "Expected {} fields in line {}, saw {}",
                width,
                line_at(content, record_start(content, record)),
                record.len()
            )));
        }

        let mut values: Vec<String> = record.iter().map(str::to_string).collect();
        values.resize(width, String::new());
        Ok(values)
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let sample_lines: Vec<&str> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(SNIFF_LINES)
            .collect();

        if sample_lines.is_empty() {
            return b',';
        }

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &DELIMITER_CANDIDATES {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

/// Byte offset of the record's first character.
///
/// The reader stamps a record with the position it started scanning from,
/// which lies before any blank lines it skipped on the way.
fn record_start(content: &str, record: &StringRecord) -> usize {
    let from = record
        .position()
        .map(|pos| pos.byte() as usize)
        .unwrap_or_default()
        .min(content.len());

    from + content.as_bytes()[from..]
        .iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .count()
}

/// 1-based physical line containing `offset`
fn line_at(content: &str, offset: usize) -> usize {
    content.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// A whitespace-only line; a quoted empty field still counts as a value
fn is_blank_record(content: &str, record: &StringRecord) -> bool {
    if record.len() != 1 || !record[0].trim().is_empty() {
        return false;
    }

    let raw = &content[record_start(content, record)..];
    !raw.lines().next().unwrap_or_default().contains('"')
}

/// Line where a quoted field opens and never closes, if any
fn unclosed_quote_line(content: &str, delimiter: u8) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut open_at = None;
    let mut field_start = true;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if open_at.is_some() {
            if b == b'"' {
                if bytes.get(i + 1) == Some(&b'"') {
                    i += 1;
                } else {
                    open_at = None;
                }
            }
        } else if b == b'"' && field_start {
            open_at = Some(i);
            field_start = false;
        } else {
            field_start = b == delimiter || b == b'\n' || b == b'\r';
        }
        i += 1;
    }

    open_at.map(|offset| line_at(content, offset))
}

/// Name empty headers `Unnamed: {pos}` and suffix repeats with `.1`, `.2`, ...
fn disambiguate_headers(headers: &StringRecord) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(headers.len());

    for (position, raw) in headers.iter().enumerate() {
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {}", position)
        } else {
            raw.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while used.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        used.insert(name.clone());
        columns.push(name);
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let content = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let parser = CsvParser::new();
        let table = parser.parse_content(content).unwrap();

        assert_eq!(table.columns, vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0], vec!["Alice", "30", "NYC"]);
    }

    #[test]
    fn test_header_only() {
        let table = CsvParser::new().parse_content("a,b,c\n").unwrap();

        assert_eq!(table.columns, vec!["a", "b", "c"]);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_empty_input_has_no_columns() {
        for content in ["", "\n\n", "   \n"] {
            let err = CsvParser::new().parse_content(content).unwrap_err();
            assert_eq!(
                err,
                AppError::ParseError("No columns to parse from file".to_string()),
                "{:?}",
                content
            );
        }
    }

    #[test]
    fn test_long_row_is_parse_error() {
        let err = CsvParser::new()
            .parse_content("a,b\n1,2\n3,4,5\n")
            .unwrap_err();

        assert_eq!(
            err,
            AppError::ParseError("Expected 2 fields in line 3, saw 3".to_string())
        );
    }

    #[test]
    fn test_error_line_counts_blank_lines() {
        let err = CsvParser::new()
            .parse_content("a,b\n\n\n1,2,3\n")
            .unwrap_err();
        assert_eq!(
            err,
            AppError::ParseError("Expected 2 fields in line 4, saw 3".to_string())
        );

        let err = CsvParser::new()
            .parse_content("a,b\r\n\r\n1,2\r\n\r\n3,4,5\r\n")
            .unwrap_err();
        assert_eq!(
            err,
            AppError::ParseError("Expected 2 fields in line 5, saw 3".to_string())
        );
    }

    #[test]
    fn test_unclosed_quote_is_parse_error() {
        let err = CsvParser::new().parse_content("a,b\n\"1,2\n").unwrap_err();
        assert_eq!(
            err,
            AppError::ParseError("EOF inside string starting at line 2".to_string())
        );

        let err = CsvParser::new().parse_content("\"a,b\n").unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_closed_and_literal_quotes_accepted() {
        let table = CsvParser::new()
            .parse_content("a,b\n\"say \"\"hi\"\"\",x\"y\n")
            .unwrap();
        assert_eq!(table.rows[0], vec!["say \"hi\"", "x\"y"]);
    }

    #[test]
    fn test_quoted_empty_header_is_unnamed_column() {
        let table = CsvParser::new().parse_content("\"\"\n1\n").unwrap();
        assert_eq!(table.columns, vec!["Unnamed: 0"]);
        assert_eq!(table.rows, vec![vec!["1"]]);
    }

    #[test]
    fn test_whitespace_lines_before_header_skipped() {
        let table = CsvParser::new().parse_content("  \na,b\n1,2\n").unwrap();
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_short_row_padded_unless_strict() {
        let table = CsvParser::new().parse_content("a,b,c\n1\n").unwrap();
        assert_eq!(table.rows[0], vec!["1", "", ""]);

        let err = CsvParser::new()
            .with_strict(true)
            .parse_content("a,b,c\n1\n")
            .unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = CsvParser::new().parse_content("a,b\n\n1,2\n\n3,4\n").unwrap();
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_quoted_fields() {
        let table = CsvParser::new()
            .parse_content("name,quote\nAda,\"Hello, world\"\nBob,\"line\nbreak\"\n")
            .unwrap();

        assert_eq!(table.rows[0][1], "Hello, world");
        assert_eq!(table.rows[1][1], "line\nbreak");
    }

    #[test]
    fn test_values_kept_verbatim_unless_trimmed() {
        let table = CsvParser::new().parse_content("a, b\n 1 ,2\n").unwrap();
        assert_eq!(table.columns, vec!["a", " b"]);
        assert_eq!(table.rows[0][0], " 1 ");

        let table = CsvParser::new()
            .with_trim(true)
            .parse_content("a, b\n 1 ,2\n")
            .unwrap();
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows[0][0], "1");
    }

    #[test]
    fn test_duplicate_and_empty_headers() {
        let table = CsvParser::new().parse_content(",a,a,a.1,\n1,2,3,4,5\n").unwrap();
        assert_eq!(
            table.columns,
            vec!["Unnamed: 0", "a", "a.1", "a.1.1", "Unnamed: 4"]
        );
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let err = CsvParser::new()
            .parse_bytes(&[b'a', b',', 0xFF, b'\n', b'1', b',', b'2'])
            .unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_parse_bytes_with_bom() {
        let table = CsvParser::new().parse_bytes(b"\xEF\xBB\xBFid,name\n1,Ada\n").unwrap();
        assert_eq!(table.columns, vec!["id", "name"]);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvParser::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvParser::detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(CsvParser::detect_delimiter("a\tb\nc\td"), b'\t');
        assert_eq!(CsvParser::detect_delimiter(""), b',');
    }

    #[test]
    fn test_auto_detect_from_config() {
        let parser = CsvParser::from_config(&PreviewConfig::auto_detect());
        let table = parser.parse_content("a|b\n1|2\n").unwrap();
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows[0], vec!["1", "2"]);
    }
}
