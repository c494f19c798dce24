//! Incremental coverage tracking.
//!
//! # Model
//!
//! A demand point is *covered* at radius `r` by every available vehicle
//! whose snapped origin reaches the demand's snapped destination in strictly
//! less than `r`.  The tracker keeps, per radius, the set of covering vehicle
//! ids for every demand point, plus the set of vehicles it currently tracks
//! and the origin each was snapped to.
//!
//! Demand points are snapped once at construction.  Adding a vehicle snaps
//! it and scans all demands (O(D)); removing scans all demands (O(D)).
//! [`sync_availability`](CoverageTracker::sync_availability) diffs the roster
//! against the tracked set and skips vehicles whose location is unchanged, so
//! a step that flips one vehicle costs O(D + V), not O(V·D) or O(V log n)
//! nearest-origin lookups.
//!
//! With `secondary ≥ primary` the primary set of every demand is a subset of
//! its secondary set.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use ems_core::{GeoPoint, LocationIdx, SimConfig, VehicleId};
use ems_model::{AvailabilityListener, Vehicle};
use ems_spatial::TravelTimes;

use crate::{AnalysisError, AnalysisResult};

// ── Radii ─────────────────────────────────────────────────────────────────────

/// Which of the two coverage thresholds to query.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Radius {
    Primary,
    Secondary,
}

/// Primary (r1) and secondary (r2) travel-time thresholds, `r1 ≤ r2`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageRadii {
    primary:   Duration,
    secondary: Duration,
}

impl CoverageRadii {
    pub fn new(primary: Duration, secondary: Duration) -> AnalysisResult<Self> {
        if secondary < primary {
            return Err(AnalysisError::RadiiOrder { primary, secondary });
        }
        Ok(Self { primary, secondary })
    }

    pub fn from_config(config: &SimConfig) -> AnalysisResult<Self> {
        Self::new(config.primary_radius(), config.secondary_radius())
    }

    pub fn primary(&self) -> Duration {
        self.primary
    }

    pub fn secondary(&self) -> Duration {
        self.secondary
    }

    pub fn get(&self, radius: Radius) -> Duration {
        match radius {
            Radius::Primary   => self.primary,
            Radius::Secondary => self.secondary,
        }
    }
}

// ── CoverageState ─────────────────────────────────────────────────────────────

/// Covering vehicle ids for every demand point at one radius.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverageState {
    covering: Vec<BTreeSet<VehicleId>>,
}

impl CoverageState {
    fn new(demands: usize) -> Self {
        Self { covering: vec![BTreeSet::new(); demands] }
    }

    /// Vehicles covering demand `i`.
    pub fn covering(&self, demand: usize) -> &BTreeSet<VehicleId> {
        &self.covering[demand]
    }

    /// Number of demand points with at least one covering vehicle.
    pub fn covered_count(&self) -> usize {
        self.covering.iter().filter(|s| !s.is_empty()).count()
    }

    pub fn demand_count(&self) -> usize {
        self.covering.len()
    }

    fn remove(&mut self, id: VehicleId) {
        for set in &mut self.covering {
            set.remove(&id);
        }
    }
}

/// Single and redundant coverage, as fractions of demand points in [0, 1].
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoubleCoverage {
    /// Fraction of demands with at least one primary-radius vehicle.
    pub primary:   f64,
    /// Fraction of demands that keep coverage if their primary vehicle
    /// leaves (see [`CoverageTracker::double_coverage`]).
    pub secondary: f64,
}

// ── CoverageTracker ───────────────────────────────────────────────────────────

/// Where a tracked vehicle was when added, and the origin that snapped to.
#[derive(Copy, Clone, Debug)]
struct TrackedVehicle {
    location: GeoPoint,
    origin:   LocationIdx,
}

#[derive(Clone)]
pub struct CoverageTracker {
    times:        Arc<TravelTimes>,
    radii:        CoverageRadii,
    demand_snaps: Vec<LocationIdx>,
    primary:      CoverageState,
    secondary:    CoverageState,
    tracked:      BTreeMap<VehicleId, TrackedVehicle>,
}

impl CoverageTracker {
    /// Snap every demand point to the oracle's destinations.
    pub fn new(times: Arc<TravelTimes>, demands: &[GeoPoint], radii: CoverageRadii) -> Self {
        let demand_snaps = demands.iter().map(|&p| times.nearest_destination(p).index).collect();
        Self {
            times,
            radii,
            demand_snaps,
            primary:   CoverageState::new(demands.len()),
            secondary: CoverageState::new(demands.len()),
            tracked:   BTreeMap::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn radii(&self) -> CoverageRadii {
        self.radii
    }

    pub fn times(&self) -> &Arc<TravelTimes> {
        &self.times
    }

    pub fn demand_count(&self) -> usize {
        self.demand_snaps.len()
    }

    /// Destination index each demand point snapped to.
    pub fn demand_snaps(&self) -> &[LocationIdx] {
        &self.demand_snaps
    }

    pub fn state(&self, radius: Radius) -> &CoverageState {
        match radius {
            Radius::Primary   => &self.primary,
            Radius::Secondary => &self.secondary,
        }
    }

    pub fn is_tracked(&self, id: VehicleId) -> bool {
        self.tracked.contains_key(&id)
    }

    /// Tracked vehicles in id order.
    pub fn tracked(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.tracked.keys().copied()
    }

    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    // ── Incremental updates ───────────────────────────────────────────────

    /// Track exactly the available vehicles of `roster`.  Returns the number
    /// of vehicles whose coverage entries changed.
    pub fn sync_availability(&mut self, roster: &[Vehicle]) -> usize {
        self.sync_to(roster.iter().filter(|v| v.is_available()))
    }

    /// Track exactly `vehicles`, touching only those that changed, and
    /// return how many that was.
    ///
    /// A tracked vehicle at the same location is skipped without a lookup.
    /// One that moved and now snaps to a different origin is removed and
    /// re-added.
    pub fn sync_to<'a>(&mut self, vehicles: impl IntoIterator<Item = &'a Vehicle>) -> usize {
        let target: BTreeMap<VehicleId, &Vehicle> = vehicles.into_iter().map(|v| (v.id, v)).collect();

        let stale: Vec<VehicleId> = self
            .tracked
            .keys()
            .copied()
            .filter(|id| !target.contains_key(id))
            .collect();
        let mut changed = stale.len();
        for id in stale {
            self.remove_vehicle(id);
        }

        for v in target.values() {
            if self.add_vehicle(v) {
                changed += 1;
            }
        }
        changed
    }

    /// Start tracking `vehicle` at its current location.  Returns `true` if
    /// its coverage entries changed.
    ///
    /// A no-op if it is already tracked at the same location or at the same
    /// snapped origin.
    pub fn add_vehicle(&mut self, vehicle: &Vehicle) -> bool {
        let location = vehicle.location();
        let previous = self.tracked.get(&vehicle.id).copied();
        if previous.is_some_and(|t| t.location == location) {
            return false;
        }

        let origin = self.times.nearest_origin(location).index;
        match previous {
            Some(t) if t.origin == origin => {
                self.tracked.insert(vehicle.id, TrackedVehicle { location, origin });
                return false;
            }
            Some(_) => self.remove_vehicle(vehicle.id),
            None => {}
        }

        for (i, &dest) in self.demand_snaps.iter().enumerate() {
            let t = self.times.time(origin, dest);
            if t < self.radii.primary {
                self.primary.covering[i].insert(vehicle.id);
            }
            if t < self.radii.secondary {
                self.secondary.covering[i].insert(vehicle.id);
            }
        }
        self.tracked.insert(vehicle.id, TrackedVehicle { location, origin });
        true
    }

    /// Stop tracking `id`.  A no-op for untracked vehicles.
    pub fn remove_vehicle(&mut self, id: VehicleId) {
        if self.tracked.remove(&id).is_none() {
            return;
        }
        self.primary.remove(id);
        self.secondary.remove(id);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Fraction of demand points covered at `radius`.  `0.0` when there are
    /// no demand points.
    pub fn percent_coverage(&self, radius: Radius) -> f64 {
        let n = self.demand_count();
        if n == 0 {
            return 0.0;
        }
        self.state(radius).covered_count() as f64 / n as f64
    }

    /// Primary coverage and redundant (secondary) coverage.
    ///
    /// A demand counts toward `secondary` only if it has a primary vehicle
    /// and either two or more primary vehicles, or exactly one primary
    /// vehicle while its secondary set holds some other vehicle.
    pub fn double_coverage(&self) -> DoubleCoverage {
        let n = self.demand_count();
        if n == 0 {
            return DoubleCoverage::default();
        }

        let mut primary = 0usize;
        let mut secondary = 0usize;
        for (p, s) in self.primary.covering.iter().zip(&self.secondary.covering) {
            if p.is_empty() {
                continue;
            }
            primary += 1;
            if s.is_empty() {
                continue;
            }
            if p.len() >= 2 || s != p {
                secondary += 1;
            }
        }

        DoubleCoverage {
            primary:   primary as f64 / n as f64,
            secondary: secondary as f64 / n as f64,
        }
    }
}

impl AvailabilityListener for CoverageTracker {
    fn on_availability_changed(&mut self, roster: &[Vehicle]) {
        self.sync_availability(roster);
    }
}
