//! The `OutputWriter` trait implemented by report backends.

use crate::{CaseRow, MetricsRow, OutputResult};

/// A sink for finished cases and sampled metrics.
///
/// Errors are returned to the caller; [`SimOutputObserver`][crate::SimOutputObserver]
/// keeps the first one for [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one finished case.
    fn write_case(&mut self, row: &CaseRow) -> OutputResult<()>;

    /// Write one metric sample.
    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
