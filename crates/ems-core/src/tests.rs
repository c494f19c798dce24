//! Unit tests for ems-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CaseId, LocationIdx, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = VehicleId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VehicleId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(VehicleId(0) < VehicleId(1));
        assert!(LocationIdx(100) > LocationIdx(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(VehicleId::INVALID.0, u32::MAX);
        assert_eq!(CaseId::INVALID.0, u32::MAX);
        assert_eq!(LocationIdx::default(), LocationIdx::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(VehicleId(7).to_string(), "VehicleId(7)");
        assert_eq!(CaseId(1).to_string(), "CaseId(1)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(32.7157, -117.1611);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(32.0, -117.0);
        let b = GeoPoint::new(33.0, -117.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
        assert!((a.distance_km(b) - d / 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(32.70, -117.20);
        let b = GeoPoint::new(32.80, -117.10);
        assert!((a.distance_m(b) - b.distance_m(a)).abs() < 1e-6);
    }

    #[test]
    fn as_array_is_lat_lon() {
        assert_eq!(GeoPoint::new(1.5, -2.5).as_array(), [1.5, -2.5]);
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use crate::{SimClock, SimConfig, SimTime};

    #[test]
    fn sim_time_arithmetic() {
        let t = SimTime::from_secs(10);
        assert_eq!(t, SimTime(10_000));
        assert_eq!(t + Duration::from_secs(5), SimTime::from_secs(15));
        assert_eq!(SimTime::from_secs(15) - t, Duration::from_secs(5));
        assert_eq!(t.next_instant(), SimTime(10_001));
    }

    #[test]
    fn since_saturates() {
        let early = SimTime::from_secs(1);
        let late = SimTime::from_secs(3);
        assert_eq!(early.since(late), Duration::ZERO);
        assert_eq!(late.since(early), Duration::from_secs(2));
    }

    #[test]
    fn addition_saturates_instead_of_wrapping() {
        let near_end = SimTime(u64::MAX - 10);
        assert_eq!(near_end + Duration::from_millis(5), SimTime(u64::MAX - 5));
        assert_eq!(near_end + Duration::from_secs(1), SimTime(u64::MAX));
        // More milliseconds than fit in a u64.
        assert_eq!(SimTime::ZERO + Duration::MAX, SimTime(u64::MAX));

        let mut t = SimTime::from_secs(1);
        t += Duration::MAX;
        assert_eq!(t, SimTime(u64::MAX));
        assert_eq!(t.next_instant(), SimTime(u64::MAX));
    }

    #[test]
    fn sub_millisecond_durations_truncate() {
        let t = SimTime::ZERO + Duration::from_micros(1_999);
        assert_eq!(t, SimTime(1));
    }

    #[test]
    fn clock_advance_and_unix() {
        let mut clock = SimClock::new(1_000);
        clock.advance_to(SimTime::from_secs(60));
        assert_eq!(clock.now, SimTime::from_secs(60));
        assert_eq!(clock.unix_millis(clock.now), 1_060_000);
        assert_eq!(clock.sim_time_of_unix_millis(1_000_500), Some(SimTime(500)));
        assert_eq!(clock.sim_time_of_unix_millis(999_999), None);
    }

    #[test]
    fn clock_dhm() {
        // 25 hours
        let (d, h, m) = SimClock::elapsed_dhm(SimTime::from_secs(25 * 3_600 + 120));
        assert_eq!(d, 1);
        assert_eq!(h, 1);
        assert_eq!(m, 2);
    }

    #[test]
    fn display() {
        assert_eq!(SimTime(61_005).to_string(), "T+61.005s");
    }

    #[test]
    fn config_defaults() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.primary_radius(), Duration::from_secs(600));
        assert_eq!(cfg.secondary_radius(), Duration::from_secs(840));
        assert!(cfg.end_time.is_none());
        assert!(cfg.max_cases.is_none());
        assert_eq!(cfg.make_clock().now, SimTime::ZERO);
    }
}

#[cfg(test)]
mod rng {
    use rand::distributions::WeightedIndex;

    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn children_are_deterministic() {
        let mut root_a = SimRng::new(9);
        let mut root_b = SimRng::new(9);
        let mut ca = root_a.child(3);
        let mut cb = root_b.child(3);
        let a: u64 = ca.random();
        let b: u64 = cb.random();
        assert_eq!(a, b);
    }

    #[test]
    fn different_offsets_differ() {
        let mut root_a = SimRng::new(1);
        let mut root_b = SimRng::new(1);
        let mut c0 = root_a.child(0);
        let mut c1 = root_b.child(1);
        let a: u64 = c0.random();
        let b: u64 = c1.random();
        assert_ne!(a, b, "child streams for adjacent offsets should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.gen_range(0.0f64..1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }

    #[test]
    fn weighted_sample_respects_zero_weights() {
        let dist = WeightedIndex::new([0.0, 1.0, 0.0]).unwrap();
        let mut rng = SimRng::new(5);
        for _ in 0..500 {
            assert_eq!(rng.sample(&dist), 1);
        }
    }

    #[test]
    fn weighted_sample_roughly_proportional() {
        let dist = WeightedIndex::new([0.25, 0.75]).unwrap();
        let mut rng = SimRng::new(77);
        let mut counts = [0usize; 2];
        for _ in 0..10_000 {
            counts[rng.sample(&dist)] += 1;
        }
        let frac = counts[1] as f64 / 10_000.0;
        assert!((frac - 0.75).abs() < 0.03, "got {frac}");
    }

    #[test]
    fn same_seed_samples_agree() {
        let dist = WeightedIndex::new([0.1, 0.2, 0.3, 0.4]).unwrap();
        let mut a = SimRng::new(21);
        let mut b = SimRng::new(21);
        let xs: Vec<usize> = (0..50).map(|_| a.sample(&dist)).collect();
        let ys: Vec<usize> = (0..50).map(|_| b.sample(&dist)).collect();
        assert_eq!(xs, ys);
    }
}

#[cfg(test)]
mod priority {
    use crate::Priority;

    #[test]
    fn lower_is_more_urgent() {
        assert!(Priority::MOST_URGENT < Priority::LEAST_URGENT);
        assert_eq!(Priority::STANDARD.len(), 4);
        assert_eq!(Priority::FALLBACK.value(), 3);
    }

    #[test]
    fn standard_scale_bounds() {
        assert!(Priority::STANDARD.iter().all(|p| p.is_standard()));
        assert!(!Priority(0).is_standard());
        assert!(!Priority(5).is_standard());
    }

    #[test]
    fn display() {
        assert_eq!(Priority(2).to_string(), "P2");
        assert_eq!(Priority(4).as_f64(), 4.0);
    }
}
