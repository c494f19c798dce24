//! CSV case loader.
//!
//! # CSV format
//!
//! One row per case, in any order:
//!
//! ```csv
//! id,date,latitude,longitude,priority
//! 1,2024-03-01 08:15:00.000,32.7157,-117.1611,2
//! 2,2024-03-01 08:21:30.250,32.7500,-117.1300,
//! ```
//!
//! `date` is a naive UTC timestamp (`%Y-%m-%d %H:%M:%S%.f`; the fraction is
//! optional) converted to `SimTime` against the run's [`SimClock`] epoch.
//! An empty `priority` leaves the case unprioritised; otherwise it must be
//! on the 1–4 scale.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;

use ems_core::{CaseId, GeoPoint, Priority, SimClock};
use ems_model::Case;

use crate::{CaseError, CaseResult, DefinedCaseSet};

/// `strftime` pattern of the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CaseRecord {
    id:        u32,
    date:      String,
    latitude:  f64,
    longitude: f64,
    priority:  Option<u8>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`DefinedCaseSet`] from a CSV file.
pub fn load_cases_csv(path: &Path, clock: &SimClock) -> CaseResult<DefinedCaseSet> {
    let file = std::fs::File::open(path)?;
    load_cases_reader(file, clock)
}

/// Like [`load_cases_csv`] but accepts any `Read` source.
pub fn load_cases_reader<R: Read>(reader: R, clock: &SimClock) -> CaseResult<DefinedCaseSet> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut cases = Vec::new();

    for result in csv_reader.deserialize::<CaseRecord>() {
        let row = result.map_err(|e| CaseError::Parse(e.to_string()))?;
        let id = CaseId(row.id);

        let date = NaiveDateTime::parse_from_str(&row.date, DATE_FORMAT)
            .map_err(|e| CaseError::Parse(format!("case {id}: invalid date {:?}: {e}", row.date)))?;
        let time = clock
            .sim_time_of_unix_millis(date.and_utc().timestamp_millis())
            .ok_or(CaseError::BeforeEpoch { id, date: row.date })?;

        let priority = match row.priority.map(Priority) {
            Some(p) if !p.is_standard() => {
                return Err(CaseError::Parse(format!("case {id}: priority {} is outside 1-4", p.value())));
            }
            p => p,
        };

        let location = GeoPoint::new(row.latitude, row.longitude);
        cases.push(Case::new(id, location, time, priority));
    }

    Ok(DefinedCaseSet::new(cases))
}
