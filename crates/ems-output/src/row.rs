//! Plain data row types written by output backends.

use chrono::DateTime;
use ems_analysis::MetricRow;
use ems_core::{GeoPoint, SimClock, SimTime};
use ems_model::{Case, EventKind};

/// Wall-clock format used for every timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Phases with their own duration column, in column order.  `Other` phases
/// are summed into the trailing `OTHER_duration` column instead.
pub const REPORTED_KINDS: [EventKind; 5] = [
    EventKind::ToIncident,
    EventKind::AtIncident,
    EventKind::ToHospital,
    EventKind::AtHospital,
    EventKind::ToBase,
];

/// UTC wall-clock rendering of `time`.  Falls back to the raw Unix
/// millisecond count if chrono cannot represent it.
pub fn format_timestamp(clock: &SimClock, time: SimTime) -> String {
    let millis = clock.unix_millis(time);
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
        None => millis.to_string(),
    }
}

// ── CaseRow ───────────────────────────────────────────────────────────────────

/// One finished case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRow {
    pub id:         u32,
    pub date:       String,
    pub latitude:   f64,
    pub longitude:  f64,
    pub priority:   Option<u8>,
    pub vehicle:    Option<u32>,
    pub start_time: Option<String>,
    /// Seconds spent in each of [`REPORTED_KINDS`], `None` if the phase
    /// never happened.
    pub durations:  [Option<f64>; 5],
    pub hospital:   Option<GeoPoint>,
    /// Seconds spent in `Other` phases.
    pub other_secs: f64,
}

impl CaseRow {
    pub fn header() -> Vec<String> {
        let mut cols: Vec<String> = ["id", "date", "latitude", "longitude", "priority", "vehicle", "start_time"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        cols.extend(REPORTED_KINDS.iter().map(|k| format!("{}_duration", k.label())));
        cols.push("hospital_latitude".to_owned());
        cols.push("hospital_longitude".to_owned());
        cols.push(format!("{}_duration", EventKind::Other.label()));
        cols
    }

    pub fn from_case(case: &Case, clock: &SimClock) -> Self {
        let durations = REPORTED_KINDS.map(|k| case.duration_of(k).map(|d| d.as_secs_f64()));
        Self {
            id:         case.id.0,
            date:       format_timestamp(clock, case.time),
            latitude:   case.location.lat,
            longitude:  case.location.lon,
            priority:   case.priority.map(|p| p.value()),
            vehicle:    case.vehicle().map(|v| v.0),
            start_time: case.start_time().map(|t| format_timestamp(clock, t)),
            durations,
            hospital:   case.hospital(),
            other_secs: case.duration_of(EventKind::Other).map_or(0.0, |d| d.as_secs_f64()),
        }
    }

    /// Field values in [`header`](Self::header) order; missing values are
    /// empty strings.
    pub fn to_record(&self) -> Vec<String> {
        let mut rec = vec![
            self.id.to_string(),
            self.date.clone(),
            self.latitude.to_string(),
            self.longitude.to_string(),
            opt(self.priority),
            opt(self.vehicle),
            self.start_time.clone().unwrap_or_default(),
        ];
        rec.extend(self.durations.iter().map(|d| opt(*d)));
        rec.push(opt(self.hospital.map(|h| h.lat)));
        rec.push(opt(self.hospital.map(|h| h.lon)));
        rec.push(self.other_secs.to_string());
        rec
    }
}

// ── MetricsRow ────────────────────────────────────────────────────────────────

/// One metric sample with a wall-clock timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub timestamp: String,
    /// One value per tag, in header order.
    pub values:    Vec<Option<f64>>,
}

impl MetricsRow {
    pub fn from_metric_row(row: &MetricRow, clock: &SimClock) -> Self {
        Self { timestamp: format_timestamp(clock, row.time), values: row.values.clone() }
    }

    pub fn to_record(&self) -> Vec<String> {
        std::iter::once(self.timestamp.clone())
            .chain(self.values.iter().map(|v| opt(*v)))
            .collect()
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
