//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, PlaceRow, SummaryRow};

/// Sink for reported rows.
///
/// Errors surface to [`SummaryReporter`][crate::SummaryReporter], which
/// keeps the first one for [`take_error`][crate::SummaryReporter::take_error].
pub trait OutputWriter {
    /// Write one health-state summary row.
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Write a batch of per-place rows.
    fn write_places(&mut self, rows: &[PlaceRow]) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
