//! `SummaryReporter<W>` — bridges `Reporter` to an `OutputWriter`.

use log::warn;

use mp_sim::{Reporter, Snapshot};

use crate::row::{PlaceRow, SummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`Reporter`] that writes every snapshot it receives to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `Reporter` methods
/// have no return value.  After `run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SummaryReporter<W: OutputWriter> {
    writer:     W,
    rows:       usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SummaryReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Summary rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("output write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> Reporter for SummaryReporter<W> {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        let result = self.writer.write_summary(&SummaryRow::from(snapshot));
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);

        if let Some(places) = &snapshot.places {
            let rows: Vec<PlaceRow> = places
                .iter()
                .map(|p| PlaceRow::new(snapshot.step.0, p))
                .collect();
            let result = self.writer.write_places(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_snapshot: &Snapshot) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
