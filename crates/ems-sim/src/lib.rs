//! `ems-sim`: the discrete-event loop of the EMS dispatch simulator.
//!
//! # Event loop
//!
//! ```text
//! loop:
//!   now = min(next phase completion, next case arrival)
//!   ① Completions: record event, move vehicle, start next phase
//!                  (ToBase done → Fleet::release → coverage re-synced)
//!   ② Arrivals:    cases dated `now` join the FIFO pending queue
//!   ③ Dispatch:    policy.select for the oldest pending case, repeated
//!                  until it returns None (Fleet::deploy → coverage re-synced)
//!   ④ Metrics:     MetricAggregator::calculate, SimObserver::on_metrics
//! ```
//!
//! The loop ends when the case source is exhausted and every case has
//! finished, when the `max_cases` quota has arrived and drained, or when the
//! next time point lies past `end_time`.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ems_dispatch::FastestTravelTime;
//! use ems_sim::{EventGenerator, NoopObserver, SimBuilder};
//!
//! let policy = FastestTravelTime::new(Arc::clone(&times));
//! let mut sim = SimBuilder::new(config, times, fleet, policy, cases, events).build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{} cases finished", sim.finished().len());
//! ```

pub mod builder;
pub mod error;
pub mod lifecycle;
pub mod observer;
pub mod queue;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use lifecycle::{next_phase, EventGenerator, HospitalTransport};
pub use observer::{NoopObserver, SimObserver};
pub use queue::EventQueue;
pub use sim::Sim;
