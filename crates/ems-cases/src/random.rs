//! Cases drawn from interval, location, and priority generators.

use ems_core::{CaseId, SimTime};
use ems_generators::{DurationGenerator, DurationInput, LocationGenerator, PriorityGenerator};
use ems_model::Case;

use crate::{CaseResult, CaseSet};

/// Generates cases on the fly.
///
/// Each call draws an inter-arrival gap from `interval`, advances the cursor
/// by it, and places the case with `location` and `priority` at the new
/// time.  Ids count from 1.  With a `quantity` the set ends after that many
/// cases; without one it never ends.
pub struct RandomCaseSet<I, L, P> {
    time:     SimTime,
    interval: I,
    location: L,
    priority: P,
    quantity: Option<usize>,
    emitted:  usize,
}

impl<I, L, P> RandomCaseSet<I, L, P>
where
    I: DurationGenerator,
    L: LocationGenerator,
    P: PriorityGenerator,
{
    pub fn new(start: SimTime, interval: I, location: L, priority: P) -> Self {
        Self { time: start, interval, location, priority, quantity: None, emitted: 0 }
    }

    /// Stop after `quantity` cases.
    pub fn with_quantity(mut self, quantity: usize) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl<I, L, P> CaseSet for RandomCaseSet<I, L, P>
where
    I: DurationGenerator,
    L: LocationGenerator,
    P: PriorityGenerator,
{
    fn next_case(&mut self) -> CaseResult<Option<Case>> {
        if self.quantity.is_some_and(|q| self.emitted >= q) {
            return Ok(None);
        }

        let gap = self.interval.generate(&DurationInput::at(self.time))?.duration;
        self.time += gap;
        let point = self.location.generate(self.time)?;
        let priority = self.priority.generate(self.time);

        self.emitted += 1;
        let id = CaseId(self.emitted as u32);
        Ok(Some(Case::new(id, point, self.time, Some(priority))))
    }

    fn time(&self) -> SimTime {
        self.time
    }

    fn set_time(&mut self, time: SimTime) {
        self.time = time;
    }

    fn len_hint(&self) -> Option<usize> {
        self.quantity
    }
}
