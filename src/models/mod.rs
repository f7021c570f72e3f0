//! Domain models for the pivotprep pipeline.
//!
//! This module contains the core data structures used throughout the
//! pipeline:
//!
//! - [`FieldValue`] - One parsed cell value, after optional type coercion
//! - [`Row`] - Ordered mapping from column key to transformed value
//!
//! Cell values are dynamically typed: the external parser hands every cell
//! over as text, and [`FieldValue::coerce`] optionally converts numeric and
//! boolean literals to their natural types before the per-value transform
//! runs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// =============================================================================
// Field Values
// =============================================================================

/// Strict float literal: optional sign, digits, optional fraction, optional
/// exponent. Keeps `NaN`, `inf` and `1_000` textual.
static NUMERIC_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").unwrap());

/// A single cell value taken from one parsed CSV cell.
///
/// Serializes untagged, so a [`Row`] round-trips as a plain JSON object
/// (`{"host": "srv-01", "count": 3}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Empty cell (only produced when type inference is on).
    Null,
    /// Boolean literal `true` / `false`.
    Bool(bool),
    /// Numeric literal.
    Number(f64),
    /// Everything else.
    Text(String),
}

impl FieldValue {
    /// Coerce a raw cell to its natural type.
    ///
    /// Mirrors the dynamic-typing step of the external parser: empty cells
    /// become [`FieldValue::Null`], `true`/`false` become booleans, strict
    /// float literals become numbers, anything else stays text.
    pub fn coerce(raw: &str) -> Self {
        if raw.is_empty() {
            FieldValue::Null
        } else if raw == "true" {
            FieldValue::Bool(true)
        } else if raw == "false" {
            FieldValue::Bool(false)
        } else if NUMERIC_LITERAL.is_match(raw) {
            match raw.parse::<f64>() {
                Ok(n) => FieldValue::Number(n),
                Err(_) => FieldValue::Text(raw.to_string()),
            }
        } else {
            FieldValue::Text(raw.to_string())
        }
    }

    /// Wrap a raw cell without coercion.
    pub fn text(raw: impl Into<String>) -> Self {
        FieldValue::Text(raw.into())
    }

    /// Get the textual content if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for the `Null` variant.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

// =============================================================================
// Rows
// =============================================================================

/// One parsed record: column key to transformed value, in header order.
///
/// Column order is the header order of the source file, which the pivot
/// renderer relies on for stable column listing. Serializes as a JSON
/// object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, FieldValue)>,
}

impl Row {
    /// Create an empty row with capacity for `columns` fields.
    pub fn with_capacity(columns: usize) -> Self {
        Self { fields: Vec::with_capacity(columns) }
    }

    /// Append a column. Keys are expected to be unique; a duplicate key is
    /// stored as-is and `get` returns the first occurrence.
    pub fn push(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.push((key.into(), value));
    }

    /// Look up a value by column key.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every cell is empty text or null.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, v)| match v {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        })
    }

    /// Iterate `(key, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FieldValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
