//! Dispatch the vehicle with the shortest matrix travel time.

use std::sync::Arc;

use ems_core::SimTime;
use ems_model::{Case, Vehicle};
use ems_spatial::TravelTimes;

use crate::{DispatchPolicy, Selection};

pub struct FastestTravelTime {
    times: Arc<TravelTimes>,
}

impl FastestTravelTime {
    pub fn new(times: Arc<TravelTimes>) -> Self {
        Self { times }
    }
}

impl DispatchPolicy for FastestTravelTime {
    fn name(&self) -> &'static str {
        "fastest_travel_time"
    }

    /// Strict minimum over available vehicles in roster order; the first of
    /// several equally fast vehicles wins.
    fn select(&mut self, roster: &[Vehicle], case: &Case, _now: SimTime) -> Option<Selection> {
        let dest = self.times.nearest_destination(case.location).index;
        let mut best: Option<Selection> = None;

        for v in roster.iter().filter(|v| v.is_available()) {
            let origin = self.times.nearest_origin(v.location()).index;
            let t = self.times.time(origin, dest);
            if best.is_none_or(|b| b.travel_time.is_some_and(|bt| t < bt)) {
                best = Some(Selection { vehicle: v.id, travel_time: Some(t) });
            }
        }
        best
    }
}
