//! Replay of a known list of cases.

use std::collections::VecDeque;

use ems_core::SimTime;
use ems_model::Case;

use crate::{CaseResult, CaseSet};

/// Replays cases in time order.
///
/// Moving the cursor forward with [`set_time`](CaseSet::set_time) discards
/// every case dated before the new time.
#[derive(Clone, Debug, Default)]
pub struct DefinedCaseSet {
    cases: VecDeque<Case>,
    time:  SimTime,
    total: usize,
}

impl DefinedCaseSet {
    /// Sorts `cases` by time; cases sharing a timestamp keep their order.
    /// The cursor starts at the earliest case.
    pub fn new(mut cases: Vec<Case>) -> Self {
        cases.sort_by_key(|c| c.time);
        let time = cases.first().map_or(SimTime::ZERO, |c| c.time);
        let total = cases.len();
        Self { cases: cases.into(), time, total }
    }

    /// Cases not yet emitted.
    pub fn remaining(&self) -> usize {
        self.cases.len()
    }

    pub fn peek(&self) -> Option<&Case> {
        self.cases.front()
    }
}

impl CaseSet for DefinedCaseSet {
    fn next_case(&mut self) -> CaseResult<Option<Case>> {
        let case = self.cases.pop_front();
        if let Some(c) = &case {
            self.time = c.time;
        }
        Ok(case)
    }

    fn time(&self) -> SimTime {
        self.time
    }

    fn set_time(&mut self, time: SimTime) {
        while self.cases.front().is_some_and(|c| c.time < time) {
            self.cases.pop_front();
        }
        self.time = time;
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.total)
    }
}
