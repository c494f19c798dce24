//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use ems_analysis::MetricRow;
use ems_core::{SimClock, SimConfig, SimTime};
use ems_model::Case;
use ems_sim::SimObserver;

use crate::row::{CaseRow, MetricsRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes finished cases and metric samples to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:      W,
    clock:       SimClock,
    cases:       usize,
    samples:     usize,
    last_error:  Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for wall-clock
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            clock:      config.make_clock(),
            cases:      0,
            samples:    0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Number of case rows handed to the writer.
    pub fn cases_written(&self) -> usize {
        self.cases
    }

    /// Number of metric rows handed to the writer.
    pub fn samples_written(&self) -> usize {
        self.samples
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                tracing::warn!(error = %e, "report write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_case_finished(&mut self, case: &Case) {
        let row = CaseRow::from_case(case, &self.clock);
        let result = self.writer.write_case(&row);
        if result.is_ok() {
            self.cases += 1;
        }
        self.store_err(result);
    }

    fn on_metrics(&mut self, _tags: &[String], row: &MetricRow) {
        let row = MetricsRow::from_metric_row(row, &self.clock);
        let result = self.writer.write_metrics(&row);
        if result.is_ok() {
            self.samples += 1;
        }
        self.store_err(result);
    }

    fn on_sim_end(&mut self, end: SimTime) {
        let result = self.writer.finish();
        self.store_err(result);
        tracing::debug!(%end, cases = self.cases, samples = self.samples, "reports flushed");
    }
}
