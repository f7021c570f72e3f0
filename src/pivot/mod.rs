//! Pivot rendering collaborator seam.
//!
//! The interactive pivot widget itself lives in the host application; this
//! crate only hands it the finished row sequence. [`PivotRenderer`] is the
//! narrow contract for that hand-off: one call per processed file, return
//! value unused.
//!
//! [`JsonRenderer`] is the bundled non-UI implementation, writing the rows
//! as a JSON array for hosts that pipe the result elsewhere.

use crate::models::Row;
use std::io::Write;

/// Consumer of the processed row sequence.
pub trait PivotRenderer {
    /// Render one ordered sequence of row records. Invoked exactly once per
    /// successful file load; a re-submission renders again with the fresh
    /// rows.
    fn render(&mut self, rows: &[Row]);
}

// Closures work as renderers, which keeps test and host wiring short.
impl<F: FnMut(&[Row])> PivotRenderer for F {
    fn render(&mut self, rows: &[Row]) {
        self(rows)
    }
}

/// Renderer that serializes the rows as a JSON array to a writer.
///
/// Serialization failures are swallowed after a log event: the rendering
/// side has no error channel back into the pipeline.
pub struct JsonRenderer<W: Write> {
    writer: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Take the writer back, e.g. to flush or inspect a buffer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PivotRenderer for JsonRenderer<W> {
    fn render(&mut self, rows: &[Row]) {
        if let Err(err) = serde_json::to_writer(&mut self.writer, rows) {
            tracing::warn!(%err, "failed to write rendered rows");
        }
    }
}
