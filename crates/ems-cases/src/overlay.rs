//! `ScenarioCaseSet`: merge several scenarios into one case stream.

use ems_core::{CaseId, SimTime};
use ems_model::Case;

use crate::{CaseResult, CaseSet, ScenarioController};

/// Draws each case from whichever scenario is active at its time.
///
/// A candidate case is generated from the current scenario.  If the
/// controller reports a different scenario for the candidate's time, the
/// candidate is discarded, every bound case set is moved to the switch time,
/// and generation repeats from the new scenario.  Accepted cases are
/// renumbered 1, 2, 3… and their timestamps strictly increase: a case that
/// would not advance the stream is moved 1 ms past its predecessor.
///
/// A non-base scenario whose source runs dry is retired from the controller
/// and generation falls back to whatever is active at the current time.  The
/// stream ends only when the base scenario runs dry.
pub struct ScenarioCaseSet {
    controller: ScenarioController,
    current:    Option<String>,
    time:       SimTime,
    last:       Option<SimTime>,
    quantity:   Option<usize>,
    emitted:    usize,
    exhausted:  bool,
}

impl ScenarioCaseSet {
    pub fn new(controller: ScenarioController, start: SimTime) -> Self {
        Self {
            controller,
            current:   None,
            time:      start,
            last:      None,
            quantity:  None,
            emitted:   0,
            exhausted: false,
        }
    }

    /// Stop after `quantity` cases.
    pub fn with_quantity(mut self, quantity: usize) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn controller(&self) -> &ScenarioController {
        &self.controller
    }

    /// Label of the scenario the last case came from.
    pub fn current_scenario(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Pick the starting scenario on first use.
    fn current_label(&mut self) -> String {
        if let Some(label) = &self.current {
            return label.clone();
        }
        let (label, effective) = self.controller.retrieve_next_scenario(self.time);
        let label = label.to_owned();
        self.time = effective;
        tracing::debug!(scenario = %label, at = %effective, "initial scenario");
        self.current = Some(label.clone());
        label
    }

    fn generate(&mut self) -> CaseResult<Option<Case>> {
        let mut label = self.current_label();
        loop {
            let Some(case) = self.controller.case_set_mut(&label)?.next_case()? else {
                if !self.controller.retire(&label) {
                    tracing::debug!(scenario = %label, "base scenario exhausted");
                    return Ok(None);
                }
                let (next, effective) = self.controller.retrieve_next_scenario(self.time);
                let next = next.to_owned();
                tracing::debug!(from = %label, to = %next, at = %effective, "scenario exhausted");
                self.current = Some(next.clone());
                label = next;
                self.controller.set_times(self.time);
                continue;
            };

            self.controller.flush_inactive();
            let (next, effective) = self.controller.retrieve_next_scenario(case.time);
            let next = next.to_owned();

            if next == label {
                self.time = case.time;
                self.controller.set_times(self.time);
                self.controller.flush_inactive();
                return Ok(Some(case));
            }

            tracing::debug!(from = %label, to = %next, at = %effective, "scenario switch");
            self.current = Some(next.clone());
            label = next;
            self.time = effective;
            self.controller.set_times(self.time);
            self.controller.flush_inactive();
        }
    }
}

impl CaseSet for ScenarioCaseSet {
    fn next_case(&mut self) -> CaseResult<Option<Case>> {
        if self.exhausted || self.quantity.is_some_and(|q| self.emitted >= q) {
            return Ok(None);
        }

        let Some(mut case) = self.generate()? else {
            self.exhausted = true;
            return Ok(None);
        };

        if let Some(last) = self.last.filter(|&last| case.time <= last) {
            case.time = last.next_instant();
        }
        self.last = Some(case.time);

        self.emitted += 1;
        case.id = CaseId(self.emitted as u32);
        Ok(Some(case))
    }

    fn time(&self) -> SimTime {
        self.time
    }

    fn set_time(&mut self, time: SimTime) {
        self.time = time;
        self.controller.set_times(time);
    }

    fn len_hint(&self) -> Option<usize> {
        self.quantity
    }
}
