//! `ems-output`: report writers for the EMS dispatch simulator.
//!
//! | Backend | Files created                 |
//! |---------|-------------------------------|
//! | CSV     | `cases.csv`, `metrics.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `ems_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ems_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"), sim.metrics().tags())?;
//! let mut obs = SimOutputObserver::new(writer, &sim.config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CaseRow, MetricsRow, REPORTED_KINDS, TIMESTAMP_FORMAT, format_timestamp};
pub use writer::OutputWriter;
