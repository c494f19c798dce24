//! The `Sim` struct and its event loop.

use std::collections::{BTreeMap, VecDeque};

use ems_analysis::{CoverageTracker, MetricAggregator, MetricContext};
use ems_cases::CaseSet;
use ems_core::{GeoPoint, SimClock, SimConfig, SimRng, SimTime, VehicleId};
use ems_dispatch::DispatchPolicy;
use ems_model::{Case, EventKind, Fleet, ModelError};

use crate::lifecycle::{next_phase, ActiveCase};
use crate::{EventGenerator, EventQueue, HospitalTransport, SimError, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P, C>` owns every piece of mutable state and advances from one
/// event time to the next.  Each [`step`](Sim::step) handles one time point:
///
/// 1. **Completions**: vehicles whose phase ends now record the event, move
///    to its destination, and start their next phase (or return to service).
/// 2. **Arrivals**: cases dated now join the FIFO pending queue.
/// 3. **Dispatch**: pending cases are offered to the policy oldest first,
///    until it finds no vehicle.
/// 4. **Metrics**: one row is sampled and handed to the observer.
///
/// Completions come before arrivals at equal times, so a vehicle finishing
/// now can take a case arriving now.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: DispatchPolicy, C: CaseSet> {
    pub config: SimConfig,

    /// Simulation clock; `clock.now` is the last processed time point.
    pub clock: SimClock,

    pub(crate) fleet:     Fleet<CoverageTracker>,
    pub(crate) policy:    P,
    pub(crate) cases:     C,
    pub(crate) events:    EventGenerator,
    pub(crate) transport: HospitalTransport,
    pub(crate) rng:       SimRng,
    pub(crate) metrics:   MetricAggregator,

    pub(crate) queue:     EventQueue,
    pub(crate) active:    BTreeMap<VehicleId, ActiveCase>,
    pub(crate) pending:   VecDeque<Case>,
    pub(crate) finished:  Vec<Case>,

    /// The next case from the source, read one ahead.
    pub(crate) lookahead:   Option<Case>,
    pub(crate) source_done: bool,
    pub(crate) arrivals:    usize,
}

impl<P: DispatchPolicy, C: CaseSet> Sim<P, C> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the case source is exhausted and every case has finished,
    /// or until the `end_time` budget is reached.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.step(observer)? {}

        tracing::info!(
            end      = %self.clock.now,
            policy   = self.policy.name(),
            arrivals = self.arrivals,
            finished = self.finished.len(),
            pending  = self.pending.len(),
            active   = self.active.len(),
            "simulation finished"
        );
        observer.on_sim_end(self.clock.now);
        Ok(())
    }

    /// Process the next time point.  Returns `false`, without advancing the
    /// clock, when there is nothing left to do or the next time point lies
    /// past `end_time`.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<bool> {
        self.fill_lookahead()?;

        let next_completion = self.queue.next_time();
        let next_arrival = self.lookahead.as_ref().map(|c| c.time);
        let now = match (next_completion, next_arrival) {
            (None, None) => return Ok(false),
            (Some(a), Some(b)) => a.min(b),
            (Some(t), None) | (None, Some(t)) => t,
        };
        if self.config.end_time.is_some_and(|end| now > end) {
            return Ok(false);
        }
        self.clock.advance_to(now);

        // ── ① Completions ─────────────────────────────────────────────────
        if next_completion == Some(now) {
            for vehicle in self.queue.drain_time(now).unwrap_or_default() {
                self.complete_phase(vehicle, now, observer)?;
            }
        }

        // ── ② Arrivals ────────────────────────────────────────────────────
        while let Some(case) = self.lookahead.take_if(|c| c.time == now) {
            self.arrivals += 1;
            observer.on_case_arrived(&case);
            self.pending.push_back(case);
            self.fill_lookahead()?;
        }

        // ── ③ Dispatch ────────────────────────────────────────────────────
        self.dispatch_pending(now, observer)?;

        // ── ④ Metrics ─────────────────────────────────────────────────────
        let ctx = MetricContext {
            now,
            vehicles: self.fleet.vehicles(),
            pending:  &self.pending,
            coverage: self.fleet.listener(),
        };
        self.metrics.calculate(&ctx);
        if let Some(row) = self.metrics.last() {
            observer.on_metrics(self.metrics.tags(), row);
        }

        Ok(true)
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn now(&self) -> SimTime {
        self.clock.now
    }

    pub fn fleet(&self) -> &Fleet<CoverageTracker> {
        &self.fleet
    }

    /// The live coverage tracker, synced with the fleet's availability.
    pub fn coverage(&self) -> &CoverageTracker {
        self.fleet.listener()
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn metrics(&self) -> &MetricAggregator {
        &self.metrics
    }

    /// Cases whose vehicle is back at base, in completion order.
    pub fn finished(&self) -> &[Case] {
        &self.finished
    }

    /// Cases waiting for a vehicle, oldest first.
    pub fn pending(&self) -> &VecDeque<Case> {
        &self.pending
    }

    /// Number of cases currently being served.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of cases that have arrived so far.
    pub fn arrivals(&self) -> usize {
        self.arrivals
    }

    // ── Case source ───────────────────────────────────────────────────────

    /// Read the next case into the lookahead slot unless one is already
    /// there, the source is done, or the `max_cases` quota is reached.
    fn fill_lookahead(&mut self) -> SimResult<()> {
        if self.lookahead.is_some() || self.source_done {
            return Ok(());
        }
        if self.config.max_cases.is_some_and(|max| self.arrivals >= max) {
            tracing::debug!(arrivals = self.arrivals, "case quota reached");
            self.source_done = true;
            return Ok(());
        }

        match self.cases.next_case()? {
            None => {
                tracing::debug!(arrivals = self.arrivals, "case source exhausted");
                self.source_done = true;
            }
            Some(case) if case.time < self.clock.now => {
                return Err(SimError::OutOfOrderCase { case: case.id, time: case.time, now: self.clock.now });
            }
            Some(case) => self.lookahead = Some(case),
        }
        Ok(())
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    fn dispatch_pending<O: SimObserver>(&mut self, now: SimTime, observer: &mut O) -> SimResult<()> {
        while let Some(case) = self.pending.front() {
            let Some(selection) = self.policy.select(self.fleet.vehicles(), case, now) else {
                tracing::debug!(
                    case    = %case.id,
                    pending = self.pending.len(),
                    policy  = self.policy.name(),
                    "no vehicle available; dispatch deferred"
                );
                break;
            };
            let Some(mut case) = self.pending.pop_front() else { break };

            self.fleet.deploy(selection.vehicle, case.id)?;
            case.assign(selection.vehicle, now)?;
            observer.on_dispatch(&case, &selection, now);
            self.begin_phase(selection.vehicle, case, EventKind::ToIncident, now, None, None)?;
        }
        Ok(())
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Generate the `kind` event for `vehicle` and schedule its completion.
    fn begin_phase(
        &mut self,
        vehicle:   VehicleId,
        case:      Case,
        kind:      EventKind,
        now:       SimTime,
        hospital:  Option<GeoPoint>,
        transport: Option<bool>,
    ) -> SimResult<()> {
        let v = self.fleet.get(vehicle).ok_or(ModelError::UnknownVehicle(vehicle))?;
        let phase = self.events.generate(kind, v, &case, now, hospital)?;
        self.queue.push(now + phase.duration, vehicle);
        self.active.insert(vehicle, ActiveCase { case, phase, hospital, transport });
        Ok(())
    }

    fn complete_phase<O: SimObserver>(
        &mut self,
        vehicle:  VehicleId,
        now:      SimTime,
        observer: &mut O,
    ) -> SimResult<()> {
        let ActiveCase { mut case, phase, mut hospital, mut transport } =
            self.active.remove(&vehicle).ok_or(SimError::NoActiveCase(vehicle))?;

        let kind = phase.kind;
        self.fleet.move_to(vehicle, phase.destination)?;
        case.record(phase);

        if kind == EventKind::AtIncident {
            transport = Some(self.transport.decide(case.priority, &mut self.rng));
        }

        match next_phase(kind, transport.unwrap_or(false)) {
            None => {
                self.fleet.release(vehicle)?;
                tracing::trace!(case = %case.id, %vehicle, "case finished");
                observer.on_case_finished(&case);
                self.finished.push(case);
            }
            Some(next) => {
                if next == EventKind::ToHospital {
                    let v = self.fleet.get(vehicle).ok_or(ModelError::UnknownVehicle(vehicle))?;
                    hospital = Some(self.events.select_hospital(now, v));
                }
                self.begin_phase(vehicle, case, next, now, hospital, transport)?;
            }
        }
        Ok(())
    }
}
