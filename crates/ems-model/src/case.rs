//! Cases and their lifecycle events.
//!
//! A `Case` is created by a case source with only its arrival data filled
//! in.  The lifecycle machine assigns a vehicle at dispatch and appends one
//! [`Event`] per completed phase; the event list is append-only.

use std::fmt;
use std::time::Duration;

use ems_core::{CaseId, GeoPoint, Priority, SimTime, VehicleId};

use crate::{ModelError, ModelResult};

// ── EventKind ─────────────────────────────────────────────────────────────────

/// Lifecycle phase of a dispatched vehicle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    ToIncident,
    AtIncident,
    ToHospital,
    AtHospital,
    ToBase,
    Other,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::ToIncident,
        EventKind::AtIncident,
        EventKind::ToHospital,
        EventKind::AtHospital,
        EventKind::ToBase,
        EventKind::Other,
    ];

    /// Upper-case label used in report column names.
    pub fn label(self) -> &'static str {
        match self {
            EventKind::ToIncident => "TO_INCIDENT",
            EventKind::AtIncident => "AT_INCIDENT",
            EventKind::ToHospital => "TO_HOSPITAL",
            EventKind::AtHospital => "AT_HOSPITAL",
            EventKind::ToBase     => "TO_BASE",
            EventKind::Other      => "OTHER",
        }
    }

    /// `true` for phases spent driving.
    pub fn is_travel(self) -> bool {
        matches!(self, EventKind::ToIncident | EventKind::ToHospital | EventKind::ToBase)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// One completed lifecycle phase.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub kind:        EventKind,
    /// Where the vehicle is when the phase ends.
    pub destination: GeoPoint,
    pub duration:    Duration,
    /// Percentage error between simulated and real trip distance, when the
    /// duration came from a snapped matrix lookup.
    pub error:       Option<f64>,
    /// Snapped destination actually used for the lookup.
    pub sim_destination: Option<GeoPoint>,
}

impl Event {
    pub fn new(kind: EventKind, destination: GeoPoint, duration: Duration) -> Self {
        Self { kind, destination, duration, error: None, sim_destination: None }
    }
}

// ── Case ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Case {
    pub id:       CaseId,
    pub location: GeoPoint,
    /// Arrival time.
    pub time:     SimTime,
    pub priority: Option<Priority>,
    vehicle:      Option<VehicleId>,
    start_time:   Option<SimTime>,
    events:       Vec<Event>,
}

impl Case {
    pub fn new(id: CaseId, location: GeoPoint, time: SimTime, priority: Option<Priority>) -> Self {
        Self { id, location, time, priority, vehicle: None, start_time: None, events: Vec::new() }
    }

    /// Record the dispatch of `vehicle` at `now`.
    pub fn assign(&mut self, vehicle: VehicleId, now: SimTime) -> ModelResult<()> {
        if let Some(current) = self.vehicle {
            return Err(ModelError::AlreadyAssigned { case: self.id, vehicle: current });
        }
        self.vehicle = Some(vehicle);
        self.start_time = Some(now);
        Ok(())
    }

    /// Append a completed phase.
    pub fn record(&mut self, event: Event) {
        self.events.push(event);
    }

    #[inline]
    pub fn vehicle(&self) -> Option<VehicleId> {
        self.vehicle
    }

    /// Dispatch time.
    #[inline]
    pub fn start_time(&self) -> Option<SimTime> {
        self.start_time
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Waiting time between arrival and dispatch, or until `now` if the case
    /// is still pending.
    pub fn delay(&self, now: SimTime) -> Duration {
        self.start_time.unwrap_or(now).since(self.time)
    }

    /// Total time spent in phases of `kind`, or `None` if none occurred.
    pub fn duration_of(&self, kind: EventKind) -> Option<Duration> {
        self.events
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.duration)
            .reduce(|a, b| a + b)
    }

    /// The hospital visited, if the case had a transport leg.
    pub fn hospital(&self) -> Option<GeoPoint> {
        self.events
            .iter()
            .find(|e| e.kind == EventKind::AtHospital)
            .map(|e| e.destination)
    }

    /// `true` once the vehicle has returned to base.
    pub fn is_finished(&self) -> bool {
        self.events.last().is_some_and(|e| e.kind == EventKind::ToBase)
    }
}
