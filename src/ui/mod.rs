//! Input surface wiring.
//!
//! The host toolkit owns the actual widgets; this module models the two
//! triggers they emit and the two pieces of state they hold (current
//! pattern text, currently selected file) as explicit values, decoupled
//! from any UI framework:
//!
//! - pattern field: submits on an `Enter` keypress, provided a file is
//!   already selected — otherwise the keypress is silently ignored;
//! - file picker: a "file changed" event processes the new file right away.
//!
//! Both triggers funnel into the same file-processing entry point and hand
//! the resulting rows to the renderer exactly once per successful load.

use crate::error::PipelineOutcome;
use crate::parser::ParseOptions;
use crate::pivot::PivotRenderer;
use crate::transform::pipeline::{process_file, CsvInfo, PivotOptions};
use std::path::PathBuf;
use tracing::debug;

/// Key identifier for [`PivotUi::pattern_key_pressed`]. Matches the DOM
/// convention for the submit key.
pub const ENTER: &str = "Enter";

/// Controller binding the input surface to the pipeline and the renderer.
pub struct PivotUi<R: PivotRenderer> {
    renderer: R,
    parse: ParseOptions,
    pattern_text: String,
    selected_file: Option<PathBuf>,
}

impl<R: PivotRenderer> PivotUi<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_parse_options(renderer, ParseOptions::default())
    }

    pub fn with_parse_options(renderer: R, parse: ParseOptions) -> Self {
        Self {
            renderer,
            parse,
            pattern_text: String::new(),
            selected_file: None,
        }
    }

    /// Mirror an edit of the pattern input field. No processing happens
    /// until one of the triggers fires.
    pub fn set_pattern_text(&mut self, text: impl Into<String>) {
        self.pattern_text = text.into();
    }

    /// Currently selected file, if any.
    pub fn selected_file(&self) -> Option<&PathBuf> {
        self.selected_file.as_ref()
    }

    /// Keypress in the pattern field.
    ///
    /// Only `Enter` submits, and only when a file is already selected;
    /// everything else is a no-op returning `Ok(None)`. The pattern text is
    /// re-read on every submission, so editing the patterns and pressing
    /// `Enter` re-groups the same file.
    pub fn pattern_key_pressed(&mut self, key: &str) -> PipelineOutcome<Option<CsvInfo>> {
        if key != ENTER {
            return Ok(None);
        }
        let Some(path) = self.selected_file.clone() else {
            debug!("enter pressed with no file selected, ignoring");
            return Ok(None);
        };
        self.process(path).map(Some)
    }

    /// "File changed" event from the file picker: remember the selection
    /// and process immediately with the current pattern text.
    pub fn file_chosen(&mut self, path: impl Into<PathBuf>) -> PipelineOutcome<CsvInfo> {
        let path = path.into();
        self.selected_file = Some(path.clone());
        self.process(path)
    }

    fn process(&mut self, path: PathBuf) -> PipelineOutcome<CsvInfo> {
        let options = PivotOptions {
            pattern_text: self.pattern_text.clone(),
            parse: self.parse.clone(),
        };
        let table = process_file(&path, &options)?;
        self.renderer.render(&table.rows);
        Ok(table.info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldValue, Row};
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;

    /// Renderer double that keeps every render call.
    #[derive(Clone, Default)]
    struct Recorder {
        renders: Rc<RefCell<Vec<Vec<Row>>>>,
    }

    impl PivotRenderer for Recorder {
        fn render(&mut self, rows: &[Row]) {
            self.renders.borrow_mut().push(rows.to_vec());
        }
    }

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const LOG: &str = "status\nconnection timeout\nok\n";

    #[test]
    fn test_enter_without_file_is_silent_noop() {
        let recorder = Recorder::default();
        let mut ui = PivotUi::new(recorder.clone());
        ui.set_pattern_text("timeout");

        let outcome = ui.pattern_key_pressed(ENTER).unwrap();
        assert!(outcome.is_none());
        assert!(recorder.renders.borrow().is_empty());
    }

    #[test]
    fn test_non_enter_keys_ignored() {
        let file = write_csv(LOG);
        let recorder = Recorder::default();
        let mut ui = PivotUi::new(recorder.clone());
        ui.file_chosen(file.path()).unwrap();

        for key in ["a", "Shift", "Escape", ""] {
            assert!(ui.pattern_key_pressed(key).unwrap().is_none());
        }
        // Only the file_chosen render happened.
        assert_eq!(recorder.renders.borrow().len(), 1);
    }

    #[test]
    fn test_file_chosen_renders_immediately() {
        let file = write_csv(LOG);
        let recorder = Recorder::default();
        let mut ui = PivotUi::new(recorder.clone());

        let info = ui.file_chosen(file.path()).unwrap();
        assert_eq!(info.row_count, 2);

        let renders = recorder.renders.borrow();
        assert_eq!(renders.len(), 1);
        assert_eq!(
            renders[0][0].get("status"),
            Some(&FieldValue::text("connection timeout"))
        );
    }

    #[test]
    fn test_resubmit_rereads_pattern_text() {
        let file = write_csv(LOG);
        let recorder = Recorder::default();
        let mut ui = PivotUi::new(recorder.clone());

        // First load without grouping.
        ui.file_chosen(file.path()).unwrap();
        // User types patterns and presses Enter: same file, regrouped.
        ui.set_pattern_text("timeout");
        let info = ui.pattern_key_pressed(ENTER).unwrap();
        assert!(info.is_some());

        let renders = recorder.renders.borrow();
        assert_eq!(renders.len(), 2);
        assert_eq!(
            renders[0][0].get("status"),
            Some(&FieldValue::text("connection timeout"))
        );
        assert_eq!(renders[1][0].get("status"), Some(&FieldValue::text("timeout")));
    }

    #[test]
    fn test_missing_file_propagates_error() {
        let mut ui = PivotUi::new(Recorder::default());
        assert!(ui.file_chosen("/no/such/file.csv").is_err());
        // The broken selection sticks, mirroring a picker that already fired.
        assert!(ui.selected_file().is_some());
    }
}
