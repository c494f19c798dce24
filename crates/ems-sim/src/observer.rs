//! Simulation observer trait for progress reporting and data collection.

use ems_analysis::MetricRow;
use ems_core::SimTime;
use ems_dispatch::Selection;
use ems_model::Case;

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] and
/// [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: dispatch counter
///
/// ```rust,ignore
/// struct Dispatches(usize);
///
/// impl SimObserver for Dispatches {
///     fn on_dispatch(&mut self, _case: &Case, _selection: &Selection, _now: SimTime) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// A case entered the pending queue.
    fn on_case_arrived(&mut self, _case: &Case) {}

    /// A pending case was assigned `selection.vehicle` at `now`.
    fn on_dispatch(&mut self, _case: &Case, _selection: &Selection, _now: SimTime) {}

    /// The case's vehicle is back at base; `case` carries every event.
    fn on_case_finished(&mut self, _case: &Case) {}

    /// A metric row was sampled.  `tags` names the row's columns.
    fn on_metrics(&mut self, _tags: &[String], _row: &MetricRow) {}

    /// Called once when [`Sim::run`][crate::Sim::run] returns normally.
    fn on_sim_end(&mut self, _end: SimTime) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
