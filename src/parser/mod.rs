//! Tabular file parsing with encoding and delimiter auto-detection.
//!
//! Thin adapter over the `csv` crate: dialect handling (quoting, escaping,
//! record splitting) stays in the library, this module only decodes the
//! bytes, picks a delimiter, and assembles [`Row`] records. Every decoded
//! cell is passed through a caller-supplied per-value transform before it is
//! stored, which is where the grouping filter plugs in.
//!
//! Completion is the synchronous return value: a [`ParseResult`] carrying
//! the full ordered row sequence plus the detection metadata.

use crate::error::{ParseError, ParseOutcome};
use crate::models::{FieldValue, Row};
use std::path::Path;
use tracing::debug;

/// Configuration for one parse run.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Use the first row as column keys; otherwise keys are synthesized as
    /// `column_1`, `column_2`, ...
    pub treat_first_row_as_header: bool,
    /// Coerce numeric and boolean literals (and empty cells to null) before
    /// the per-value transform runs.
    pub infer_types: bool,
    /// Drop rows whose cells are all empty.
    pub skip_empty_lines: bool,
    /// Field delimiter; auto-detected from the first line when `None`.
    /// Must be an ASCII character (the CSV reader works on bytes); a
    /// non-ASCII delimiter trips a debug assertion and falls back to `,`.
    pub delimiter: Option<char>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            treat_first_row_as_header: true,
            infer_types: true,
            skip_empty_lines: true,
            delimiter: None,
        }
    }
}

/// Result of parsing with metadata.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed records, one per non-skipped line, in file order.
    pub rows: Vec<Row>,
    /// Detected or configured encoding.
    pub encoding: String,
    /// Detected or configured delimiter.
    pub delimiter: char,
    /// Column keys, in file order.
    pub headers: Vec<String>,
}

// =============================================================================
// Detection
// =============================================================================

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the specified encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> ParseOutcome<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => Ok(String::from_utf8_lossy(bytes).into_owned()),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.into_owned())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()),
        other => encoding_rs::Encoding::for_label(other.as_bytes())
            .map(|enc| enc.decode(bytes).0.into_owned())
            .ok_or_else(|| ParseError::Encoding(other.to_string())),
    }
}

/// Detect the delimiter by counting candidate occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let candidates = [';', ',', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &candidates {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse decoded CSV text, invoking `transform` once per cell.
///
/// The transform receives the (optionally coerced) cell value and its column
/// key, and its return value is what lands in the row.
pub fn parse_str(
    content: &str,
    options: &ParseOptions,
    mut transform: impl FnMut(FieldValue, &str) -> FieldValue,
) -> ParseOutcome<ParseResult> {
    if content.trim().is_empty() {
        return Err(ParseError::EmptyFile);
    }

    let delimiter = options.delimiter.unwrap_or_else(|| detect_delimiter(content));
    debug_assert!(delimiter.is_ascii(), "delimiter must be ASCII");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(u8::try_from(delimiter).unwrap_or(b','))
        .has_headers(options.treat_first_row_as_header)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut headers: Vec<String> = if options.treat_first_row_as_header {
        let header_record = reader.headers()?.clone();
        let headers: Vec<String> =
            header_record.iter().map(|h| h.trim().to_string()).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ParseError::NoHeaders);
        }
        headers
    } else {
        Vec::new()
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;

        // Headerless mode: synthesize positional keys from the first record.
        if headers.is_empty() {
            headers = (1..=record.len()).map(|i| format!("column_{}", i)).collect();
        }

        if options.skip_empty_lines && record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let mut row = Row::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let raw = record.get(i).unwrap_or("");
            let value = if options.infer_types {
                FieldValue::coerce(raw)
            } else {
                FieldValue::text(raw)
            };
            row.push(header.clone(), transform(value, header));
        }
        rows.push(row);
    }

    debug!(rows = rows.len(), columns = headers.len(), %delimiter, "parsed csv");

    Ok(ParseResult {
        rows,
        encoding: "utf-8".to_string(),
        delimiter,
        headers,
    })
}

/// Parse raw bytes with encoding and delimiter auto-detection.
pub fn parse_bytes(
    bytes: &[u8],
    options: &ParseOptions,
    transform: impl FnMut(FieldValue, &str) -> FieldValue,
) -> ParseOutcome<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    debug!(%encoding, "decoded csv content");

    let mut result = parse_str(&content, options, transform)?;
    result.encoding = encoding;
    Ok(result)
}

/// Parse a CSV file with auto-detection.
pub fn parse_file<P: AsRef<Path>>(
    path: P,
    options: &ParseOptions,
    transform: impl FnMut(FieldValue, &str) -> FieldValue,
) -> ParseOutcome<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, options, transform)
}
