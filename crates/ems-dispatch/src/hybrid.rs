//! Blend travel time and coverage disruption by case priority.
//!
//! # Scoring
//!
//! For every available vehicle `v`:
//!
//! ```text
//! time_ratio     = best_time / time(v)                     (1.0 when time(v) = 0)
//! coverage_ratio = (p·100 + s) / (best_p·100 + best_s + 1e-7)
//! score          = 3·time_ratio·|4 − priority| / 3  +  4·coverage_ratio·|1 − priority| / 3
//! ```
//!
//! `p`/`s` are the primary/secondary coverage percentages left if `v` were
//! dispatched and `best_*` those of the least disruptive vehicle.  Priority 1
//! scores on travel time alone, priority 4 on coverage alone.  The highest
//! score wins; equal scores keep the vehicle ranked faster.

use std::sync::Arc;

use ems_analysis::{CoverageTracker, DoubleCoverage};
use ems_core::{Priority, SimTime};
use ems_model::{Case, Vehicle};
use ems_spatial::TravelTimes;

use crate::ranking::{available, rank_by_disruption, rank_by_travel_time};
use crate::{DispatchPolicy, Selection};

const TIME_WEIGHT: f64 = 3.0;
const COVERAGE_WEIGHT: f64 = 4.0;
/// Keeps the coverage ratio finite when the best remaining coverage is zero.
const COVERAGE_EPSILON: f64 = 1e-7;

pub struct OptimalWeightedHybrid {
    times:   Arc<TravelTimes>,
    scratch: CoverageTracker,
}

impl OptimalWeightedHybrid {
    pub fn new(times: Arc<TravelTimes>, scratch: CoverageTracker) -> Self {
        Self { times, scratch }
    }

    /// Weighted score of one vehicle.
    pub fn score(time_ratio: f64, coverage_ratio: f64, priority: Priority) -> f64 {
        let p = priority.as_f64();
        TIME_WEIGHT * time_ratio * (4.0 - p).abs() / 3.0
            + COVERAGE_WEIGHT * coverage_ratio * (1.0 - p).abs() / 3.0
    }
}

/// Primary percentage weighted 100× over secondary.
fn coverage_points(dc: &DoubleCoverage) -> f64 {
    dc.primary * 100.0 * 100.0 + dc.secondary * 100.0
}

impl DispatchPolicy for OptimalWeightedHybrid {
    fn name(&self) -> &'static str {
        "optimal_weighted_hybrid"
    }

    fn select(&mut self, roster: &[Vehicle], case: &Case, _now: SimTime) -> Option<Selection> {
        let candidates = available(roster);
        if candidates.is_empty() {
            return None;
        }

        let priority = match case.priority {
            Some(p) => p,
            None => {
                tracing::warn!(
                    case = %case.id,
                    fallback = %Priority::FALLBACK,
                    "case has no priority; weighted dispatch assumes the fallback"
                );
                Priority::FALLBACK
            }
        };

        let dest = self.times.nearest_destination(case.location).index;
        let by_time = rank_by_travel_time(&self.times, &candidates, dest);
        let by_coverage = rank_by_disruption(&mut self.scratch, &candidates);

        let best_time = by_time[0].1.as_secs_f64();
        let best_points = coverage_points(&by_coverage[0].1) + COVERAGE_EPSILON;

        let mut best: Option<(Selection, f64)> = None;
        for &(vehicle, time) in &by_time {
            let Some((_, dc)) = by_coverage.iter().find(|(id, _)| *id == vehicle) else {
                continue;
            };
            let secs = time.as_secs_f64();
            let time_ratio = if secs == 0.0 { 1.0 } else { best_time / secs };
            let coverage_ratio = coverage_points(dc) / best_points;
            let score = Self::score(time_ratio, coverage_ratio, priority);

            if best.as_ref().is_none_or(|&(_, s)| score > s) {
                best = Some((Selection { vehicle, travel_time: Some(time) }, score));
            }
        }
        best.map(|(sel, _)| sel)
    }
}
