//! Scenarios and the controller that decides which one is active.
//!
//! # Activation model
//!
//! Every scenario has a window `[start, end)` (`end = None` is open-ended).
//! The scenario active at time `t` is the most recently declared one whose
//! window contains `t`, falling back to the first-declared *base* scenario.
//!
//! The controller remembers the scenario it last handed out and the time it
//! did so.  Asked about a later time, it reports a switch at the first window
//! boundary in between where the active scenario changes, so a burst that
//! starts between two background cases takes over at its own start time.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use ems_core::SimTime;

use crate::{CaseError, CaseResult, CaseSet};

// ── Scenario ──────────────────────────────────────────────────────────────────

/// A labelled case source with an activation window.
pub struct Scenario {
    pub label:    String,
    pub start:    SimTime,
    pub end:      Option<SimTime>,
    pub case_set: Box<dyn CaseSet>,
}

impl Scenario {
    /// An open-ended scenario active from `SimTime::ZERO`.
    pub fn background(label: impl Into<String>, case_set: Box<dyn CaseSet>) -> Self {
        Self { label: label.into(), start: SimTime::ZERO, end: None, case_set }
    }

    pub fn windowed(
        label: impl Into<String>,
        start: SimTime,
        end: Option<SimTime>,
        case_set: Box<dyn CaseSet>,
    ) -> Self {
        Self { label: label.into(), start, end, case_set }
    }

    pub fn contains(&self, time: SimTime) -> bool {
        time >= self.start && self.end.is_none_or(|end| time < end)
    }
}

// ── ScenarioController ────────────────────────────────────────────────────────

/// Registry of scenarios keyed by declaration order.
pub struct ScenarioController {
    /// Declaration sequence → scenario.  Sequence 0 is the base.
    scenarios: BTreeMap<usize, Scenario>,
    by_label:  FxHashMap<String, usize>,
    current:   Option<usize>,
    time:      SimTime,
}

impl ScenarioController {
    /// Fails on an empty list, a repeated label, or an empty window.
    pub fn new(scenarios: Vec<Scenario>) -> CaseResult<Self> {
        if scenarios.is_empty() {
            return Err(CaseError::NoScenarios);
        }

        let mut by_label = FxHashMap::default();
        let mut registry = BTreeMap::new();
        for (seq, s) in scenarios.into_iter().enumerate() {
            if let Some(end) = s.end.filter(|&end| end <= s.start) {
                return Err(CaseError::EmptyWindow { label: s.label, start: s.start, end });
            }
            if by_label.insert(s.label.clone(), seq).is_some() {
                return Err(CaseError::DuplicateScenario(s.label));
            }
            registry.insert(seq, s);
        }

        Ok(Self { scenarios: registry, by_label, current: None, time: SimTime::ZERO })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn base_label(&self) -> &str {
        &self.scenarios[&0].label
    }

    /// Label of the scenario last handed out, if any.
    pub fn current_label(&self) -> Option<&str> {
        self.current.map(|seq| self.scenarios[&seq].label.as_str())
    }

    /// Time of the last activation decision.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Labels of the registered scenarios in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.scenarios.values().map(|s| s.label.as_str())
    }

    pub fn case_set_mut(&mut self, label: &str) -> CaseResult<&mut dyn CaseSet> {
        let seq = *self
            .by_label
            .get(label)
            .ok_or_else(|| CaseError::UnknownScenario(label.to_owned()))?;
        match self.scenarios.get_mut(&seq) {
            Some(s) => Ok(s.case_set.as_mut()),
            None => Err(CaseError::UnknownScenario(label.to_owned())),
        }
    }

    /// Move the cursor of every registered case set to `time`.
    pub fn set_times(&mut self, time: SimTime) {
        for s in self.scenarios.values_mut() {
            s.case_set.set_time(time);
        }
    }

    // ── Activation ────────────────────────────────────────────────────────

    /// Declaration sequence of the scenario active at `time`.
    fn active_at(&self, time: SimTime) -> usize {
        self.scenarios
            .iter()
            .rev()
            .find(|(_, s)| s.contains(time))
            .map_or(0, |(&seq, _)| seq)
    }

    /// Label of the scenario active at `time`, ignoring the controller's
    /// current state.
    pub fn scenario_at(&self, time: SimTime) -> &str {
        &self.scenarios[&self.active_at(time)].label
    }

    /// The scenario to use for a case at `time`, and the time the choice
    /// takes effect.
    ///
    /// The effective time is the earliest window boundary in
    /// `(current time, time]` at which the active scenario differs from the
    /// current one.  A window that opens and closes entirely inside that
    /// interval still triggers a switch.  On the first call, or with no such
    /// boundary, the effective time is `time` itself.
    pub fn retrieve_next_scenario(&mut self, time: SimTime) -> (&str, SimTime) {
        let target = self.active_at(time);
        let (next, effective) = match self.current {
            Some(current) => self.first_change(current, time).unwrap_or((target, time)),
            None => (target, time),
        };

        self.current = Some(next);
        self.time = self.time.max(effective);
        (self.scenarios[&next].label.as_str(), effective)
    }

    /// First boundary in `(self.time, until]` where the active scenario is
    /// not `current`.
    fn first_change(&self, current: usize, until: SimTime) -> Option<(usize, SimTime)> {
        let mut boundaries: Vec<SimTime> = self
            .scenarios
            .values()
            .flat_map(|s| [Some(s.start), s.end])
            .flatten()
            .filter(|&b| b > self.time && b <= until)
            .collect();
        boundaries.sort_unstable();
        boundaries.dedup();

        boundaries
            .into_iter()
            .map(|b| (self.active_at(b), b))
            .find(|&(seq, _)| seq != current)
    }

    /// Remove the non-base scenario `label` before its window closes, e.g.
    /// once its case source has run dry.  Returns `false` for the base or an
    /// unknown label, which stay as they are.
    pub fn retire(&mut self, label: &str) -> bool {
        let Some(&seq) = self.by_label.get(label).filter(|&&seq| seq != 0) else {
            return false;
        };
        self.scenarios.remove(&seq);
        self.by_label.remove(label);
        if self.current == Some(seq) {
            self.current = None;
        }
        tracing::debug!(scenario = %label, at = %self.time, "scenario retired");
        true
    }

    /// Drop non-base scenarios whose window ended at or before the
    /// controller's time.  The current scenario is never dropped.
    pub fn flush_inactive(&mut self) {
        let now = self.time;
        let current = self.current;
        let expired: Vec<usize> = self
            .scenarios
            .iter()
            .filter(|&(&seq, s)| seq != 0 && Some(seq) != current && s.end.is_some_and(|end| end <= now))
            .map(|(&seq, _)| seq)
            .collect();

        for seq in expired {
            if let Some(s) = self.scenarios.remove(&seq) {
                self.by_label.remove(&s.label);
                tracing::debug!(scenario = %s.label, at = %now, "scenario window closed");
            }
        }
    }
}
