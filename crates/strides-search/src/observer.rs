//! Growth observer trait for progress reporting and output.

use strides_graph::StreetGraph;

use crate::{GrowthReport, GrowthStep, HotSpot};

/// Callbacks invoked by [`RouteGrower::run`][crate::RouteGrower::run] as the
/// route grows.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl GrowthObserver for ProgressPrinter {
///     fn on_step(&mut self, step: &GrowthStep<'_>, _graph: &StreetGraph) {
///         println!("step {}: {:.2} km, {} streets", step.iteration, step.total_km, step.streets_completed);
///     }
/// }
/// ```
pub trait GrowthObserver {
    /// Called whenever the hot-spot list is (re)computed.  Only fires when
    /// hot-spot bias is enabled.
    fn on_hot_spots(&mut self, _spots: &[HotSpot], _graph: &StreetGraph) {}

    /// Called after every accepted growth step with the whole path so far.
    fn on_step(&mut self, _step: &GrowthStep<'_>, _graph: &StreetGraph) {}

    /// Called once when the loop terminates, for any reason.
    fn on_finish(&mut self, _report: &GrowthReport, _graph: &StreetGraph) {}
}

/// A [`GrowthObserver`] that does nothing.
pub struct NoopObserver;

impl GrowthObserver for NoopObserver {}
