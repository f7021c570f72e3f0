//! # Pivotprep - CSV to pivot-table preparation
//!
//! Pivotprep wires a file-selection surface to a CSV parser and a
//! pivot-table renderer, with an optional substring-based grouping
//! transform that buckets raw field values into caller-supplied categories.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Classifier │────▶│   Renderer  │
//! │  (any enc)  │     │  (auto-det) │     │  (grouping) │     │  (external) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! The classifier runs inside the parse, once per cell: each value is
//! replaced by the first configured pattern it contains, or kept as-is. An
//! empty pattern list turns the whole stage into a passthrough.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pivotprep::{PivotOptions, process_file};
//!
//! let options = PivotOptions::with_patterns("timeout,refused");
//! let table = process_file("responses.csv", &options)?;
//! println!("{} rows ready for the pivot widget", table.rows.len());
//! # Ok::<(), pivotprep::PipelineError>(())
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Field values and rows
//! - [`parser`] - CSV parsing with auto-detection
//! - [`transform`] - Grouping classifier and pipeline
//! - [`pivot`] - Renderer seam
//! - [`ui`] - Input-surface wiring

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Rendering seam
pub mod pivot;

// Input surface
pub mod ui;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ParseError, ParseOutcome, PipelineError, PipelineOutcome};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{FieldValue, Row};

// =============================================================================
// Re-exports - Classifier
// =============================================================================

pub use transform::classifier::{classify, PatternList, ValueFilter};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    detect_delimiter,
    detect_encoding,
    decode_content,
    parse_bytes,
    parse_file,
    parse_str,
    ParseOptions,
    ParseResult,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{process_bytes, process_file, CsvInfo, PivotOptions, ProcessedTable};

// =============================================================================
// Re-exports - Rendering and UI
// =============================================================================

pub use pivot::{JsonRenderer, PivotRenderer};
pub use ui::PivotUi;
