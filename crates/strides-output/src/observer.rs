//! `PathOutputObserver<W>`: bridges `GrowthObserver` to an `OutputWriter`.

use strides_core::NodeId;
use strides_graph::StreetGraph;
use strides_search::{GrowthObserver, GrowthReport, GrowthStep, HotSpot};

use crate::row::{PathPointRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`GrowthObserver`] that writes a route snapshot after every step to any
/// [`OutputWriter`] backend.
///
/// The latest hot-spot list is appended to every snapshot.  Errors from the
/// writer are stored internally because observer methods have no return
/// value; check [`take_error`][Self::take_error] once the run returns.
pub struct PathOutputObserver<W: OutputWriter> {
    writer:     W,
    hot_spots:  Vec<PathPointRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> PathOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, hot_spots: Vec::new(), last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_snapshot(&mut self, graph: &StreetGraph, path: &[NodeId]) {
        let mut rows = PathPointRow::from_path(graph, path);
        rows.extend(self.hot_spots.iter().cloned());
        let result = self.writer.write_points(&rows);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            log::error!("output write failed: {e}");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> GrowthObserver for PathOutputObserver<W> {
    fn on_hot_spots(&mut self, spots: &[HotSpot], _graph: &StreetGraph) {
        self.hot_spots = PathPointRow::from_hot_spots(spots);
    }

    fn on_step(&mut self, step: &GrowthStep<'_>, graph: &StreetGraph) {
        self.write_snapshot(graph, step.path);
        let result = self.writer.write_step(&StepSummaryRow::from(step));
        self.store_err(result);
    }

    fn on_finish(&mut self, report: &GrowthReport, graph: &StreetGraph) {
        self.write_snapshot(graph, &report.path);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
