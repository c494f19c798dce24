//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `cases.csv`: one row per finished case
//! - `metrics.csv`: `timestamp` plus one column per metric tag

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CaseRow, MetricsRow, OutputError, OutputResult};

/// Writes simulation reports to two CSV files.
pub struct CsvWriter {
    cases:    Writer<File>,
    metrics:  Writer<File>,
    width:    usize,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files, and write the header rows.
    /// `tags` names the metric columns, usually `sim.metrics().tags()`.
    pub fn new(dir: &Path, tags: &[String]) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut cases = Writer::from_path(dir.join("cases.csv"))?;
        cases.write_record(CaseRow::header())?;

        let mut metrics = Writer::from_path(dir.join("metrics.csv"))?;
        metrics.write_record(std::iter::once("timestamp").chain(tags.iter().map(String::as_str)))?;

        Ok(Self { cases, metrics, width: tags.len(), finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_case(&mut self, row: &CaseRow) -> OutputResult<()> {
        self.cases.write_record(row.to_record())?;
        Ok(())
    }

    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()> {
        if row.values.len() != self.width {
            return Err(OutputError::MetricWidth { expected: self.width, got: row.values.len() });
        }
        self.metrics.write_record(row.to_record())?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.cases.flush()?;
        self.metrics.flush()?;
        Ok(())
    }
}
