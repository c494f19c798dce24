//! Dispatch the vehicle whose absence hurts coverage least.

use ems_analysis::CoverageTracker;
use ems_core::SimTime;
use ems_model::{Case, Vehicle};

use crate::ranking::{available, compare_coverage, coverage_without_each};
use crate::{DispatchPolicy, Selection};

/// Evaluates the k "remove one" subsets of the k available vehicles and
/// keeps the vehicle whose removal leaves the best double coverage (primary
/// first, then secondary).  Among equal outcomes the earliest vehicle in
/// roster order wins.  Travel time is ignored and not reported.
pub struct LeastDisruption {
    scratch: CoverageTracker,
}

impl LeastDisruption {
    /// `scratch` is a tracker private to this policy (typically a clone of
    /// a freshly built one); its tracked set is overwritten on every call.
    pub fn new(scratch: CoverageTracker) -> Self {
        Self { scratch }
    }
}

impl DispatchPolicy for LeastDisruption {
    fn name(&self) -> &'static str {
        "least_disruption"
    }

    fn select(&mut self, roster: &[Vehicle], _case: &Case, _now: SimTime) -> Option<Selection> {
        let candidates = available(roster);
        let mut best = None;

        for (id, dc) in coverage_without_each(&mut self.scratch, &candidates) {
            match &best {
                Some((_, best_dc)) if compare_coverage(&dc, best_dc).is_le() => {}
                _ => best = Some((id, dc)),
            }
        }
        best.map(|(vehicle, _)| Selection { vehicle, travel_time: None })
    }
}
