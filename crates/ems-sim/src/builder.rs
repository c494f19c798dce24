//! Fluent builder for constructing a [`Sim`].

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use ems_analysis::{CoverageRadii, CoverageTracker, MetricAggregator};
use ems_cases::CaseSet;
use ems_core::{GeoPoint, SimConfig, SimRng};
use ems_dispatch::DispatchPolicy;
use ems_model::{Fleet, FleetBuilder};
use ems_spatial::TravelTimes;

use crate::{EventGenerator, EventQueue, HospitalTransport, Sim, SimError, SimResult};

/// RNG stream offset for hospital-transport draws.
const TRANSPORT_STREAM: u64 = 0x7A5;

/// Fluent builder for [`Sim<P, C>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: epoch, seed, coverage radii, run limits
/// - `Arc<TravelTimes>`: the travel-time oracle
/// - [`FleetBuilder`]: the roster (at least one vehicle)
/// - `P: DispatchPolicy` and `C: CaseSet`
/// - [`EventGenerator`]: phase durations and hospital selection
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                   |
/// |------------------|-------------------------------------------|
/// | `.demands(v)`    | every destination of the oracle           |
/// | `.transport(t)`  | `HospitalTransport::Always`               |
/// | `.metrics(m)`    | `MetricAggregator::standard()`            |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, times, fleet, policy, cases, events)
///     .transport(HospitalTransport::UpToPriority(Priority(2)))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: DispatchPolicy, C: CaseSet> {
    config:    SimConfig,
    times:     Arc<TravelTimes>,
    fleet:     FleetBuilder,
    policy:    P,
    cases:     C,
    events:    EventGenerator,
    demands:   Option<Vec<GeoPoint>>,
    transport: HospitalTransport,
    metrics:   Option<MetricAggregator>,
}

impl<P: DispatchPolicy, C: CaseSet> SimBuilder<P, C> {
    pub fn new(
        config: SimConfig,
        times:  Arc<TravelTimes>,
        fleet:  FleetBuilder,
        policy: P,
        cases:  C,
        events: EventGenerator,
    ) -> Self {
        Self {
            config,
            times,
            fleet,
            policy,
            cases,
            events,
            demands:   None,
            transport: HospitalTransport::default(),
            metrics:   None,
        }
    }

    /// Demand points the live coverage tracker measures.
    pub fn demands(mut self, demands: Vec<GeoPoint>) -> Self {
        self.demands = Some(demands);
        self
    }

    pub fn transport(mut self, transport: HospitalTransport) -> Self {
        self.transport = transport;
        self
    }

    pub fn metrics(mut self, metrics: MetricAggregator) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Validate inputs, wire the fleet to a live coverage tracker, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P, C>> {
        if self.fleet.is_empty() {
            return Err(SimError::EmptyFleet);
        }
        let radii = CoverageRadii::from_config(&self.config)?;
        let transport = self.transport.validate()?;

        let demands = self
            .demands
            .unwrap_or_else(|| self.times.destinations().points().to_vec());
        let tracker = CoverageTracker::new(Arc::clone(&self.times), &demands, radii);
        let fleet: Fleet<CoverageTracker> = self.fleet.build(tracker)?;

        tracing::info!(
            vehicles = fleet.len(),
            demands  = demands.len(),
            policy   = self.policy.name(),
            "simulation built"
        );

        let mut root = SimRng::new(self.config.seed);
        Ok(Sim {
            clock:       self.config.make_clock(),
            config:      self.config,
            fleet,
            policy:      self.policy,
            cases:       self.cases,
            events:      self.events,
            transport,
            rng:         root.child(TRANSPORT_STREAM),
            metrics:     self.metrics.unwrap_or_else(MetricAggregator::standard),
            queue:       EventQueue::new(),
            active:      BTreeMap::new(),
            pending:     VecDeque::new(),
            finished:    Vec::new(),
            lookahead:   None,
            source_done: false,
            arrivals:    0,
        })
    }
}
