//! Value transformation.
//!
//! - Classifier: substring-based grouping of raw values
//! - Pipeline: file-processing entry point

pub mod classifier;
pub mod pipeline;

pub use classifier::{classify, PatternList, ValueFilter};
pub use pipeline::{process_bytes, process_file, PivotOptions, ProcessedTable};
