//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, PathPointRow, StepSummaryRow};

/// Destination for route snapshots and per-step summaries.
///
/// Errors surface to the growth loop through
/// [`PathOutputObserver::take_error`][crate::PathOutputObserver::take_error].
pub trait OutputWriter {
    /// Replace the current snapshot with `rows`.
    fn write_points(&mut self, rows: &[PathPointRow]) -> OutputResult<()>;

    /// Append one step summary.
    fn write_step(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
