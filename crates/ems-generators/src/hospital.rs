//! Hospital selection for the transport leg.

use std::sync::Arc;

use ems_core::{GeoPoint, LocationIdx, SimRng, SimTime};
use ems_model::Vehicle;
use ems_spatial::TravelTimes;

use crate::{GeneratorError, GeneratorResult};

pub trait HospitalSelector {
    /// Choose the hospital `vehicle` transports its patient to.
    fn select(&mut self, at: SimTime, vehicle: &Vehicle) -> GeoPoint;
}

// ── RandomHospital ────────────────────────────────────────────────────────────

pub struct RandomHospital {
    hospitals: Vec<GeoPoint>,
    rng:       SimRng,
}

impl RandomHospital {
    pub fn new(hospitals: Vec<GeoPoint>, rng: SimRng) -> GeneratorResult<Self> {
        if hospitals.is_empty() {
            return Err(GeneratorError::Empty);
        }
        Ok(Self { hospitals, rng })
    }
}

impl HospitalSelector for RandomHospital {
    fn select(&mut self, _at: SimTime, _vehicle: &Vehicle) -> GeoPoint {
        self.hospitals[self.rng.gen_range(0..self.hospitals.len())]
    }
}

// ── FastestHospital ───────────────────────────────────────────────────────────

/// The hospital with the shortest matrix travel time from the vehicle's
/// snapped origin.  Equal times keep the hospital listed first.
pub struct FastestHospital {
    hospitals: Vec<GeoPoint>,
    /// Destination index of each hospital, snapped once.
    snaps:     Vec<LocationIdx>,
    times:     Arc<TravelTimes>,
}

impl FastestHospital {
    pub fn new(hospitals: Vec<GeoPoint>, times: Arc<TravelTimes>) -> GeneratorResult<Self> {
        if hospitals.is_empty() {
            return Err(GeneratorError::Empty);
        }
        let snaps = hospitals.iter().map(|&h| times.nearest_destination(h).index).collect();
        Ok(Self { hospitals, snaps, times })
    }
}

impl HospitalSelector for FastestHospital {
    fn select(&mut self, _at: SimTime, vehicle: &Vehicle) -> GeoPoint {
        let origin = self.times.nearest_origin(vehicle.location()).index;
        let mut best = 0;
        let mut best_time = self.times.time(origin, self.snaps[0]);
        for (i, &dest) in self.snaps.iter().enumerate().skip(1) {
            let t = self.times.time(origin, dest);
            if t < best_time {
                best = i;
                best_time = t;
            }
        }
        self.hospitals[best]
    }
}
