//! Configuration-driven policy construction.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ems_analysis::{CoverageRadii, CoverageTracker};
use ems_core::{GeoPoint, SimRng};
use ems_spatial::TravelTimes;

use crate::{
    DispatchError, DispatchPolicy, FastestTravelTime, LeastDisruption, OptimalWeightedHybrid,
    RandomSelector,
};

/// Which selection policy a run uses.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PolicyKind {
    #[default]
    FastestTravelTime,
    LeastDisruption,
    OptimalWeightedHybrid,
    Random,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::FastestTravelTime,
        PolicyKind::LeastDisruption,
        PolicyKind::OptimalWeightedHybrid,
        PolicyKind::Random,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::FastestTravelTime     => "fastest_travel_time",
            PolicyKind::LeastDisruption       => "least_disruption",
            PolicyKind::OptimalWeightedHybrid => "optimal_weighted_hybrid",
            PolicyKind::Random                => "random",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .into_iter()
            .find(|k| k.name() == s.trim())
            .ok_or_else(|| DispatchError::UnknownPolicy(s.to_owned()))
    }
}

/// Construct the policy `kind`.
///
/// Coverage-aware policies get their own scratch tracker over `demands`;
/// the random policy draws a child stream from `rng`.
pub fn build_policy(
    kind: PolicyKind,
    times: Arc<TravelTimes>,
    demands: &[GeoPoint],
    radii: CoverageRadii,
    rng: &mut SimRng,
) -> Box<dyn DispatchPolicy> {
    match kind {
        PolicyKind::FastestTravelTime => Box::new(FastestTravelTime::new(times)),
        PolicyKind::LeastDisruption => {
            Box::new(LeastDisruption::new(CoverageTracker::new(times, demands, radii)))
        }
        PolicyKind::OptimalWeightedHybrid => {
            let scratch = CoverageTracker::new(Arc::clone(&times), demands, radii);
            Box::new(OptimalWeightedHybrid::new(times, scratch))
        }
        PolicyKind::Random => Box::new(RandomSelector::new(rng.child(0xD15))),
    }
}
