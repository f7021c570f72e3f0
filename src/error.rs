//! Error types for the pivotprep pipeline.
//!
//! Two layers:
//!
//! - [`ParseError`] - CSV parsing and decoding errors
//! - [`PipelineError`] - Top-level file-processing errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Two conditions from the behavioral contract are deliberately *not*
//! errors:
//!
//! - Submitting a pattern with no file selected is a silent no-op handled in
//!   [`crate::ui`], never an `Err`.
//! - The grouping transform applies only to textual cells and passes every
//!   other value through unchanged, so a type-mismatch variant has nothing
//!   to represent.

use thiserror::Error;

// =============================================================================
// Parse Errors
// =============================================================================

/// Errors while reading and decoding a tabular file.
///
/// Malformed-record errors come straight from the `csv` crate; this crate
/// only wraps them, it does not interpret them.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode bytes with the detected encoding.
    #[error("Failed to decode content as {0}")]
    Encoding(String),

    /// Underlying CSV reader error.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// Header row could not be determined.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors from the file-processing entry points.
///
/// This is the error type returned by [`crate::transform::pipeline`] and by
/// the [`crate::ui`] triggers.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Parsing or decoding failed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for parse operations.
pub type ParseOutcome<T> = Result<T, ParseError>;

/// Result type for pipeline operations.
pub type PipelineOutcome<T> = Result<T, PipelineError>;
