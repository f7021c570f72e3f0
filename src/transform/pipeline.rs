//! File-processing entry point.
//!
//! Combines the stages for one file load: build the grouping filter from
//! the current pattern text, parse the file with the filter applied to
//! every cell, and return the finished table for rendering.
//!
//! # Example
//!
//! ```no_run
//! use pivotprep::transform::pipeline::{process_file, PivotOptions};
//!
//! let options = PivotOptions::with_patterns("timeout,refused");
//! let table = process_file("responses.csv", &options)?;
//! println!("{} rows over {} columns", table.info.row_count, table.info.headers.len());
//! # Ok::<(), pivotprep::error::PipelineError>(())
//! ```

use crate::error::PipelineOutcome;
use crate::parser::{parse_bytes, parse_file, ParseOptions, ParseResult};
use crate::transform::classifier::ValueFilter;
use crate::models::Row;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Options for one file load.
///
/// Ambient UI state (the pattern input text) is carried here explicitly;
/// the pipeline never reads it from anywhere else.
#[derive(Debug, Clone, Default)]
pub struct PivotOptions {
    /// Comma-separated grouping patterns, verbatim from the input field.
    /// Empty (or leading-comma) text disables grouping.
    pub pattern_text: String,
    /// Parser configuration.
    pub parse: ParseOptions,
}

impl PivotOptions {
    /// Options with the given pattern text and default parsing.
    pub fn with_patterns(pattern_text: impl Into<String>) -> Self {
        Self { pattern_text: pattern_text.into(), parse: ParseOptions::default() }
    }
}

/// Metadata about the parsed file.
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// A processed table, ready for the rendering collaborator.
#[derive(Debug, Clone)]
pub struct ProcessedTable {
    /// Transformed records in file order.
    pub rows: Vec<Row>,
    /// Parse metadata.
    pub info: CsvInfo,
    /// Whether grouping was active for this load.
    pub grouped: bool,
}

/// Process a CSV file into pivot-ready rows.
///
/// The filter strategy is selected once, before parsing starts: empty
/// pattern text means every value passes through unchanged.
pub fn process_file<P: AsRef<Path>>(
    path: P,
    options: &PivotOptions,
) -> PipelineOutcome<ProcessedTable> {
    let filter = ValueFilter::from_pattern_text(&options.pattern_text);
    let result = parse_file(path, &options.parse, |value, _| filter.apply(value))?;
    Ok(finish(result, filter.is_grouping()))
}

/// Process in-memory CSV bytes into pivot-ready rows.
pub fn process_bytes(bytes: &[u8], options: &PivotOptions) -> PipelineOutcome<ProcessedTable> {
    let filter = ValueFilter::from_pattern_text(&options.pattern_text);
    let result = parse_bytes(bytes, &options.parse, |value, _| filter.apply(value))?;
    Ok(finish(result, filter.is_grouping()))
}

fn finish(result: ParseResult, grouped: bool) -> ProcessedTable {
    let info = CsvInfo {
        encoding: result.encoding,
        delimiter: result.delimiter,
        headers: result.headers,
        row_count: result.rows.len(),
    };
    info!(
        rows = info.row_count,
        columns = info.headers.len(),
        encoding = %info.encoding,
        grouped,
        "processed csv for pivot"
    );
    ProcessedTable { rows: result.rows, info, grouped }
}
