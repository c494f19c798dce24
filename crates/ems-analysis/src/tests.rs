//! Unit tests for ems-analysis.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;
    use std::time::Duration;

    use ems_core::{GeoPoint, VehicleId};
    use ems_model::Vehicle;
    use ems_spatial::{LocationSet, TravelTimeMatrix, TravelTimes};

    use crate::{CoverageRadii, CoverageTracker};

    /// Origin `i` sits at (0, i); destination `j` at (10, j).
    pub fn origin(i: usize) -> GeoPoint {
        GeoPoint::new(0.0, i as f64)
    }

    pub fn destination(j: usize) -> GeoPoint {
        GeoPoint::new(10.0, j as f64)
    }

    /// Oracle whose matrix is `secs[origin][destination]` in seconds.
    pub fn oracle(secs: &[&[u64]]) -> Arc<TravelTimes> {
        let n_o = secs.len();
        let n_d = secs[0].len();
        let origins = LocationSet::new((0..n_o).map(origin).collect()).unwrap();
        let destinations = LocationSet::new((0..n_d).map(destination).collect()).unwrap();
        let matrix = TravelTimeMatrix::from_fn(n_o, n_d, |o, d| Duration::from_secs(secs[o][d]));
        Arc::new(TravelTimes::new(origins, destinations, matrix).unwrap())
    }

    /// Default radii: r1 = 600 s, r2 = 840 s.
    pub fn radii() -> CoverageRadii {
        CoverageRadii::new(Duration::from_secs(600), Duration::from_secs(840)).unwrap()
    }

    /// Tracker over every destination of `secs` as a demand point.
    pub fn tracker(secs: &[&[u64]]) -> CoverageTracker {
        let tt = oracle(secs);
        let demands: Vec<_> = (0..secs[0].len()).map(destination).collect();
        CoverageTracker::new(tt, &demands, radii())
    }

    /// An available vehicle parked at origin `at`.
    pub fn vehicle(id: u32, at: usize) -> Vehicle {
        Vehicle::new(VehicleId(id), origin(at))
    }

    /// 4 origins × 5 destinations with a spread of times around both radii.
    pub const GRID: &[&[u64]] = &[
        &[100, 590, 600, 700, 900],
        &[650, 200, 839, 840, 300],
        &[900, 900, 100, 500, 800],
        &[599, 841, 700, 120, 1_000],
    ];
}

// ── CoverageTracker ───────────────────────────────────────────────────────────

#[cfg(test)]
mod coverage {
    use std::time::Duration;

    use ems_core::{GeoPoint, SimConfig, SimRng, VehicleId};
    use ems_model::Vehicle;

    use super::helpers::{self, vehicle, GRID};
    use crate::{AnalysisError, CoverageRadii, Radius};

    #[test]
    fn primary_and_secondary_sets() {
        // One demand; A reaches it in 500 s, B in 700 s.
        let mut t = helpers::tracker(&[&[500], &[700]]);
        t.add_vehicle(&vehicle(0, 0));
        t.add_vehicle(&vehicle(1, 1));

        let primary: Vec<_> = t.state(Radius::Primary).covering(0).iter().copied().collect();
        let secondary: Vec<_> = t.state(Radius::Secondary).covering(0).iter().copied().collect();
        assert_eq!(primary, vec![VehicleId(0)]);
        assert_eq!(secondary, vec![VehicleId(0), VehicleId(1)]);

        let dc = t.double_coverage();
        assert_eq!(dc.primary, 1.0);
        assert_eq!(dc.secondary, 1.0);
    }

    #[test]
    fn identical_singleton_sets_are_not_redundant() {
        let mut t = helpers::tracker(&[&[500]]);
        t.add_vehicle(&vehicle(0, 0));
        let dc = t.double_coverage();
        assert_eq!(dc.primary, 1.0);
        assert_eq!(dc.secondary, 0.0);
    }

    #[test]
    fn two_primary_vehicles_are_redundant() {
        let mut t = helpers::tracker(&[&[100], &[200]]);
        t.add_vehicle(&vehicle(0, 0));
        t.add_vehicle(&vehicle(1, 1));
        assert_eq!(t.double_coverage().secondary, 1.0);
    }

    #[test]
    fn secondary_only_does_not_count() {
        // 700 s is outside r1: no primary vehicle, so no redundancy either.
        let mut t = helpers::tracker(&[&[700], &[800]]);
        t.add_vehicle(&vehicle(0, 0));
        t.add_vehicle(&vehicle(1, 1));
        let dc = t.double_coverage();
        assert_eq!(dc.primary, 0.0);
        assert_eq!(dc.secondary, 0.0);
        assert_eq!(t.percent_coverage(Radius::Secondary), 1.0);
    }

    #[test]
    fn thresholds_are_strict() {
        let mut t = helpers::tracker(&[&[600, 840, 599, 839]]);
        t.add_vehicle(&vehicle(0, 0));
        assert!(t.state(Radius::Primary).covering(0).is_empty());
        assert!(t.state(Radius::Secondary).covering(1).is_empty());
        assert!(!t.state(Radius::Primary).covering(2).is_empty());
        assert!(!t.state(Radius::Secondary).covering(3).is_empty());
        assert_eq!(t.percent_coverage(Radius::Primary), 0.25);
        assert_eq!(t.percent_coverage(Radius::Secondary), 0.75);
    }

    #[test]
    fn zero_demands_report_zero() {
        let tt = helpers::oracle(&[&[100]]);
        let mut t = crate::CoverageTracker::new(tt, &[], helpers::radii());
        t.add_vehicle(&vehicle(0, 0));
        assert_eq!(t.percent_coverage(Radius::Primary), 0.0);
        let dc = t.double_coverage();
        assert_eq!((dc.primary, dc.secondary), (0.0, 0.0));
    }

    #[test]
    fn radii_order_validated() {
        assert!(matches!(
            CoverageRadii::new(Duration::from_secs(600), Duration::from_secs(599)),
            Err(AnalysisError::RadiiOrder { .. })
        ));
        let r = CoverageRadii::from_config(&SimConfig::default()).unwrap();
        assert_eq!(r.get(Radius::Secondary), Duration::from_secs(840));
    }

    #[test]
    fn add_then_remove_restores_state() {
        let mut t = helpers::tracker(GRID);
        t.add_vehicle(&vehicle(0, 0));
        t.add_vehicle(&vehicle(2, 2));
        let before_p = t.state(Radius::Primary).clone();
        let before_s = t.state(Radius::Secondary).clone();
        let before_tracked: Vec<_> = t.tracked().collect();

        t.add_vehicle(&vehicle(1, 1));
        t.remove_vehicle(VehicleId(1));

        assert_eq!(t.state(Radius::Primary), &before_p);
        assert_eq!(t.state(Radius::Secondary), &before_s);
        assert_eq!(t.tracked().collect::<Vec<_>>(), before_tracked);
    }

    #[test]
    fn primary_subset_of_secondary_under_random_churn() {
        let mut t = helpers::tracker(GRID);
        let mut rng = SimRng::new(2024);
        for _ in 0..500 {
            let id = rng.gen_range(0u32..8);
            if rng.gen_bool(0.5) {
                t.add_vehicle(&vehicle(id, rng.gen_range(0usize..4)));
            } else {
                t.remove_vehicle(VehicleId(id));
            }
            for d in 0..t.demand_count() {
                let p = t.state(Radius::Primary).covering(d);
                let s = t.state(Radius::Secondary).covering(d);
                assert!(p.is_subset(s), "demand {d}: {p:?} ⊄ {s:?}");
                assert!(p.iter().all(|v| t.is_tracked(*v)));
            }
        }
    }

    #[test]
    fn coverage_monotone_in_vehicles() {
        let mut t = helpers::tracker(GRID);
        let mut last = t.percent_coverage(Radius::Primary);
        for (id, at) in [(0, 0), (1, 1), (2, 2), (3, 3)] {
            t.add_vehicle(&vehicle(id, at));
            let now = t.percent_coverage(Radius::Primary);
            assert!(now >= last);
            last = now;
        }
        for id in [2, 0, 3, 1] {
            t.remove_vehicle(VehicleId(id));
            let now = t.percent_coverage(Radius::Primary);
            assert!(now <= last);
            last = now;
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn re_adding_at_new_origin_moves_coverage() {
        let mut t = helpers::tracker(&[&[100, 900], &[900, 100]]);
        t.add_vehicle(&vehicle(0, 0));
        assert_eq!(t.state(Radius::Primary).covered_count(), 1);
        assert!(!t.state(Radius::Primary).covering(0).is_empty());

        t.add_vehicle(&vehicle(0, 1));
        assert!(t.state(Radius::Primary).covering(0).is_empty());
        assert!(!t.state(Radius::Primary).covering(1).is_empty());
        assert_eq!(t.tracked_count(), 1);
    }

    #[test]
    fn sync_to_subset() {
        let mut t = helpers::tracker(GRID);
        let vs: Vec<_> = (0..4).map(|i| vehicle(i, i as usize)).collect();
        t.sync_to(&vs);
        assert_eq!(t.tracked_count(), 4);

        t.sync_to(vs.iter().filter(|v| v.id != VehicleId(2)));
        assert_eq!(t.tracked().collect::<Vec<_>>(), vec![VehicleId(0), VehicleId(1), VehicleId(3)]);

        // Same result as building from scratch.
        let mut fresh = helpers::tracker(GRID);
        for v in vs.iter().filter(|v| v.id != VehicleId(2)) {
            fresh.add_vehicle(v);
        }
        assert_eq!(t.state(Radius::Primary), fresh.state(Radius::Primary));
        assert_eq!(t.state(Radius::Secondary), fresh.state(Radius::Secondary));
    }

    #[test]
    fn sync_touches_only_changed_vehicles() {
        let mut t = helpers::tracker(GRID);
        let mut vs: Vec<_> = (0..4).map(|i| vehicle(i, i as usize)).collect();
        assert_eq!(t.sync_to(&vs), 4);
        assert_eq!(t.sync_to(&vs), 0);
        let settled = t.state(Radius::Primary).clone();

        // A nudge that still snaps to origin 0 leaves coverage alone.
        vs[0] = Vehicle::new(VehicleId(0), GeoPoint::new(0.001, 0.0));
        assert_eq!(t.sync_to(&vs), 0);
        assert_eq!(t.state(Radius::Primary), &settled);

        // One vehicle moves to another origin and one leaves.
        vs[1] = vehicle(1, 3);
        assert_eq!(t.sync_to(vs.iter().filter(|v| v.id != VehicleId(2))), 2);
        assert_eq!(t.tracked_count(), 3);

        let mut fresh = helpers::tracker(GRID);
        for v in vs.iter().filter(|v| v.id != VehicleId(2)) {
            fresh.add_vehicle(v);
        }
        assert_eq!(t.state(Radius::Primary), fresh.state(Radius::Primary));
        assert_eq!(t.state(Radius::Secondary), fresh.state(Radius::Secondary));
    }
}

// ── Tracker as fleet listener ─────────────────────────────────────────────────

#[cfg(test)]
mod listener {
    use ems_core::{CaseId, VehicleId};
    use ems_model::FleetBuilder;

    use super::helpers::{self, origin, GRID};
    use crate::Radius;

    #[test]
    fn fleet_keeps_tracker_in_sync() {
        let mut b = FleetBuilder::new();
        for i in 0..4 {
            b.add_vehicle(origin(i));
        }
        let mut fleet = b.build(helpers::tracker(GRID)).unwrap();
        assert_eq!(fleet.listener().tracked_count(), 4);

        fleet.deploy(VehicleId(3), CaseId(1)).unwrap();
        assert!(!fleet.listener().is_tracked(VehicleId(3)));
        // Destination 3 was reachable in 120 s only from origin 3, but
        // origin 2 still reaches it in 500 s.
        let covering: Vec<_> =
            fleet.listener().state(Radius::Primary).covering(3).iter().copied().collect();
        assert_eq!(covering, vec![VehicleId(2)]);

        fleet.release(VehicleId(3)).unwrap();
        assert!(fleet.listener().is_tracked(VehicleId(3)));
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics {
    use std::collections::VecDeque;

    use ems_core::{CaseId, GeoPoint, SimTime};
    use ems_model::Case;

    use super::helpers::{self, vehicle};
    use crate::{
        AnalysisError, CountPending, CoverageMetric, DoubleCoverageMetric, MetricAggregator,
        MetricContext, PercentCoverage, RadiusCoverage, TotalDelay,
    };

    #[test]
    fn standard_row() {
        let mut t = helpers::tracker(&[&[500, 100], &[700, 900]]);
        let roster = vec![vehicle(0, 0), vehicle(1, 1)];
        t.sync_availability(&roster);

        let pending: VecDeque<Case> = [
            Case::new(CaseId(1), GeoPoint::new(10.0, 0.0), SimTime::from_secs(10), None),
            Case::new(CaseId(2), GeoPoint::new(10.0, 1.0), SimTime::from_secs(40), None),
        ]
        .into_iter()
        .collect();

        let mut agg = MetricAggregator::standard();
        assert_eq!(
            agg.tags(),
            &[
                "percent_coverage",
                "primary_coverage",
                "secondary_coverage",
                "radius_coverage",
                "count_pending",
                "total_delay"
            ]
        );

        let ctx = MetricContext { now: SimTime::from_secs(100), vehicles: &roster, pending: &pending, coverage: &t };
        let row = agg.calculate(&ctx).clone();
        assert_eq!(row.time, SimTime::from_secs(100));
        assert_eq!(row.values[0], Some(1.0));
        assert_eq!(row.values[1], Some(1.0));
        // Demand 0 has {A} ⊂ {A, B}; demand 1 has {A} = {A}.
        assert_eq!(row.values[2], Some(0.5));
        // Worst best-response: max(min(500, 700), min(100, 900)) = 500 s.
        assert_eq!(row.values[3], Some(500.0));
        assert_eq!(row.values[4], Some(2.0));
        assert_eq!(row.values[5], Some(90.0 + 60.0));

        assert_eq!(agg.rows().len(), 1);
        assert_eq!(agg.latest("count_pending"), Some(2.0));
        assert_eq!(agg.latest("nope"), None);
    }

    #[test]
    fn radius_coverage_undefined_without_vehicles() {
        let t = helpers::tracker(&[&[500]]);
        let pending = VecDeque::new();
        let ctx = MetricContext { now: SimTime::ZERO, vehicles: &[], pending: &pending, coverage: &t };
        assert_eq!(RadiusCoverage.calculate(&ctx), vec![None]);
        assert_eq!(CountPending.calculate(&ctx), vec![Some(0.0)]);
        assert_eq!(TotalDelay.calculate(&ctx), vec![Some(0.0)]);
    }

    #[test]
    fn duplicate_tags_rejected() {
        let metrics: Vec<Box<dyn CoverageMetric>> = vec![
            Box::new(PercentCoverage::default().with_tag("primary_coverage")),
            Box::new(DoubleCoverageMetric::new()),
        ];
        assert!(matches!(
            MetricAggregator::new(metrics),
            Err(AnalysisError::DuplicateTag(tag)) if tag == "primary_coverage"
        ));
    }

    #[test]
    fn custom_tags_accepted() {
        let metrics: Vec<Box<dyn CoverageMetric>> = vec![
            Box::new(PercentCoverage::default().with_tag("pc")),
            Box::new(DoubleCoverageMetric::with_tags("p", "s")),
        ];
        let agg = MetricAggregator::new(metrics).unwrap();
        assert_eq!(agg.tags(), &["pc", "p", "s"]);
    }
}
