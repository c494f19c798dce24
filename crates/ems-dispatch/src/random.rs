//! Uniform random selection among available vehicles.

use ems_core::{SimRng, SimTime};
use ems_model::{Case, Vehicle};

use crate::ranking::available;
use crate::{DispatchPolicy, Selection};

pub struct RandomSelector {
    rng: SimRng,
}

impl RandomSelector {
    pub fn new(rng: SimRng) -> Self {
        Self { rng }
    }
}

impl DispatchPolicy for RandomSelector {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select(&mut self, roster: &[Vehicle], _case: &Case, _now: SimTime) -> Option<Selection> {
        let candidates = available(roster);
        self.rng
            .choose(&candidates)
            .map(|v| Selection { vehicle: v.id, travel_time: None })
    }
}
