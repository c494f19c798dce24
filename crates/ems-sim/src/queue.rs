//! `EventQueue`: pending phase completions keyed by time.
//!
//! Only deployed vehicles have entries, and each has exactly one (the end
//! of its current phase), so the queue stays as small as the busy fleet.

use std::collections::BTreeMap;

use ems_core::{SimTime, VehicleId};

/// Maps completion times to the vehicles whose phase ends then.
#[derive(Default)]
pub struct EventQueue {
    inner: BTreeMap<SimTime, Vec<VehicleId>>,
    /// Cached entry count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, time: SimTime, vehicle: VehicleId) {
        self.inner.entry(time).or_default().push(vehicle);
        self.total += 1;
    }

    /// Remove and return every vehicle due at exactly `time`, in push order.
    pub fn drain_time(&mut self, time: SimTime) -> Option<Vec<VehicleId>> {
        let vehicles = self.inner.remove(&time)?;
        self.total -= vehicles.len();
        Some(vehicles)
    }

    /// The earliest time with a queued completion.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct completion times.
    pub fn time_count(&self) -> usize {
        self.inner.len()
    }
}
