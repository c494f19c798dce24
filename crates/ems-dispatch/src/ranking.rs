//! Rankings shared by the selection policies.

use std::cmp::Ordering;
use std::time::Duration;

use ems_analysis::{CoverageTracker, DoubleCoverage};
use ems_core::{LocationIdx, VehicleId};
use ems_model::Vehicle;
use ems_spatial::TravelTimes;

/// Available vehicles in roster order.
pub fn available(roster: &[Vehicle]) -> Vec<&Vehicle> {
    roster.iter().filter(|v| v.is_available()).collect()
}

/// Matrix travel time from each vehicle's snapped origin to `destination`,
/// sorted ascending.  The sort is stable, so equal times keep roster order.
pub fn rank_by_travel_time(
    times: &TravelTimes,
    vehicles: &[&Vehicle],
    destination: LocationIdx,
) -> Vec<(VehicleId, Duration)> {
    let mut ranked: Vec<(VehicleId, Duration)> = vehicles
        .iter()
        .map(|v| {
            let origin = times.nearest_origin(v.location()).index;
            (v.id, times.time(origin, destination))
        })
        .collect();
    ranked.sort_by_key(|&(_, t)| t);
    ranked
}

/// Coverage left behind if each vehicle were dispatched, in roster order.
///
/// `scratch` is synced to `vehicles` first, then each candidate is removed,
/// measured, and re-added, so the whole ranking costs O(k·D) instead of
/// rebuilding k trackers.  On return `scratch` tracks exactly `vehicles`.
pub fn coverage_without_each(
    scratch: &mut CoverageTracker,
    vehicles: &[&Vehicle],
) -> Vec<(VehicleId, DoubleCoverage)> {
    scratch.sync_to(vehicles.iter().copied());
    vehicles
        .iter()
        .map(|v| {
            scratch.remove_vehicle(v.id);
            let dc = scratch.double_coverage();
            scratch.add_vehicle(v);
            (v.id, dc)
        })
        .collect()
}

/// Primary coverage first, then secondary.
pub fn compare_coverage(a: &DoubleCoverage, b: &DoubleCoverage) -> Ordering {
    a.primary
        .total_cmp(&b.primary)
        .then_with(|| a.secondary.total_cmp(&b.secondary))
}

/// [`coverage_without_each`] sorted best first.  The sort is stable, so equal
/// coverage keeps roster order.
pub fn rank_by_disruption(
    scratch: &mut CoverageTracker,
    vehicles: &[&Vehicle],
) -> Vec<(VehicleId, DoubleCoverage)> {
    let mut ranked = coverage_without_each(scratch, vehicles);
    ranked.sort_by(|(_, a), (_, b)| compare_coverage(b, a));
    ranked
}
