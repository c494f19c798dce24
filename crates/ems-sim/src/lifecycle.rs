//! Case lifecycle: phase order, phase durations, and the hospital leg.
//!
//! ```text
//! dispatch → ToIncident → AtIncident ─┬─→ ToHospital → AtHospital ─┬─→ ToBase → available
//!                                     └────────────────────────────┘
//! ```
//!
//! Travel phases draw from the travel generator, `AtIncident` from the
//! incident generator and `AtHospital` from the hospital generator.  The
//! hospital is chosen once, when `ToHospital` starts, and reused for
//! `AtHospital`.

use ems_core::{GeoPoint, Priority, SimRng, SimTime};
use ems_generators::{DurationGenerator, DurationInput, HospitalSelector};
use ems_model::{Case, Event, EventKind, Vehicle};

use crate::{SimError, SimResult};

// ── HospitalTransport ─────────────────────────────────────────────────────────

/// Whether a case includes the hospital leg.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HospitalTransport {
    /// Every case is transported.
    #[default]
    Always,
    /// No case is transported.
    Never,
    /// Cases at this priority or more urgent are transported, as are cases
    /// without a priority.
    UpToPriority(Priority),
    /// Each case is transported with this probability.
    Probability(f64),
}

impl HospitalTransport {
    pub fn validate(self) -> SimResult<Self> {
        match self {
            HospitalTransport::Probability(q) if !(0.0..=1.0).contains(&q) => Err(SimError::Config(
                format!("hospital transport probability must be in [0, 1], got {q}"),
            )),
            other => Ok(other),
        }
    }

    /// Decide for one case.  Only `Probability` consumes a draw.
    pub fn decide(self, priority: Option<Priority>, rng: &mut SimRng) -> bool {
        match self {
            HospitalTransport::Always => true,
            HospitalTransport::Never => false,
            HospitalTransport::UpToPriority(limit) => priority.is_none_or(|p| p <= limit),
            HospitalTransport::Probability(q) => rng.gen_bool(q),
        }
    }
}

// ── Phase order ───────────────────────────────────────────────────────────────

/// The phase after `completed`, or `None` once the vehicle is back at base.
pub fn next_phase(completed: EventKind, transport: bool) -> Option<EventKind> {
    match completed {
        EventKind::ToIncident => Some(EventKind::AtIncident),
        EventKind::AtIncident if transport => Some(EventKind::ToHospital),
        EventKind::AtIncident => Some(EventKind::ToBase),
        EventKind::ToHospital => Some(EventKind::AtHospital),
        EventKind::AtHospital | EventKind::Other => Some(EventKind::ToBase),
        EventKind::ToBase => None,
    }
}

// ── EventGenerator ────────────────────────────────────────────────────────────

/// Produces the event for each phase of a case.
pub struct EventGenerator {
    travel:   Box<dyn DurationGenerator>,
    incident: Box<dyn DurationGenerator>,
    hospital: Box<dyn DurationGenerator>,
    selector: Box<dyn HospitalSelector>,
}

impl EventGenerator {
    pub fn new(
        travel:   Box<dyn DurationGenerator>,
        incident: Box<dyn DurationGenerator>,
        hospital: Box<dyn DurationGenerator>,
        selector: Box<dyn HospitalSelector>,
    ) -> Self {
        Self { travel, incident, hospital, selector }
    }

    pub fn select_hospital(&mut self, at: SimTime, vehicle: &Vehicle) -> GeoPoint {
        self.selector.select(at, vehicle)
    }

    /// The `kind` phase of `case` served by `vehicle`, starting at `at`.
    ///
    /// Hospital phases go to `hospital`, or to a freshly selected one when
    /// it is `None`.
    pub fn generate(
        &mut self,
        kind:     EventKind,
        vehicle:  &Vehicle,
        case:     &Case,
        at:       SimTime,
        hospital: Option<GeoPoint>,
    ) -> SimResult<Event> {
        let from = vehicle.location();
        let (destination, generator) = match kind {
            EventKind::ToIncident => (case.location, &mut self.travel),
            EventKind::AtIncident => (case.location, &mut self.incident),
            EventKind::ToBase => (vehicle.base, &mut self.travel),
            EventKind::ToHospital | EventKind::AtHospital => {
                let dest = match hospital {
                    Some(h) => h,
                    None => self.selector.select(at, vehicle),
                };
                let g = if kind == EventKind::ToHospital { &mut self.travel } else { &mut self.hospital };
                (dest, g)
            }
            EventKind::Other => return Ok(Event::new(kind, from, std::time::Duration::ZERO)),
        };

        let sample = generator.generate(&DurationInput::trip(at, from, destination))?;
        Ok(Event {
            kind,
            destination,
            duration: sample.duration,
            error: sample.error,
            sim_destination: sample.sim_destination,
        })
    }
}

// ── ActiveCase ────────────────────────────────────────────────────────────────

/// A dispatched case and the phase its vehicle is currently in.
pub(crate) struct ActiveCase {
    pub case:      Case,
    /// The phase in progress; recorded on the case when it completes.
    pub phase:     Event,
    pub hospital:  Option<GeoPoint>,
    /// Decided when `AtIncident` completes.
    pub transport: Option<bool>,
}
