//! Unit tests for ems-spatial.
//!
//! All tests use hand-crafted location sets so they run without data files.

#[cfg(test)]
mod helpers {
    use std::time::Duration;

    use ems_core::GeoPoint;

    use crate::{LocationSet, TravelTimeMatrix, TravelTimes};

    /// Two origins, three destinations.
    ///
    /// ```text
    ///            d0(0,0)  d1(0,1)  d2(1,1)
    /// o0(0,0)       0       60      120
    /// o1(1,1)     120       60        0
    /// ```
    pub fn small_oracle() -> TravelTimes {
        let origins = LocationSet::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)]).unwrap();
        let destinations = LocationSet::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
        ])
        .unwrap();
        let secs = [[0, 60, 120], [120, 60, 0]];
        let matrix = TravelTimeMatrix::from_fn(2, 3, |o, d| Duration::from_secs(secs[o][d]));
        TravelTimes::new(origins, destinations, matrix).unwrap()
    }
}

// ── LocationSet ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod location {
    use ems_core::{GeoPoint, LocationIdx};

    use crate::{LocationSet, SpatialError};

    #[test]
    fn empty_set_rejected() {
        assert!(matches!(LocationSet::new(vec![]), Err(SpatialError::EmptyLocationSet)));
    }

    #[test]
    fn non_finite_rejected() {
        let err = LocationSet::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(f64::NAN, 1.0)]);
        assert!(matches!(err, Err(SpatialError::InvalidLocation { index: 1, .. })));
    }

    #[test]
    fn nearest_picks_closest() {
        let set = LocationSet::new(vec![
            GeoPoint::new(32.70, -117.20),
            GeoPoint::new(32.80, -117.10),
            GeoPoint::new(32.90, -117.00),
        ])
        .unwrap();
        let snap = set.nearest(GeoPoint::new(32.81, -117.11));
        assert_eq!(snap.index, LocationIdx(1));
        assert_eq!(snap.point, GeoPoint::new(32.80, -117.10));
        let expected = GeoPoint::new(32.81, -117.11).distance_m(snap.point);
        assert!((snap.distance_m - expected).abs() < 1e-9);
    }

    #[test]
    fn exact_member_has_zero_distance() {
        let set = LocationSet::new(vec![GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0)]).unwrap();
        let snap = set.nearest(GeoPoint::new(3.0, 4.0));
        assert_eq!(snap.index, LocationIdx(1));
        assert!(snap.distance_m < 1e-6);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        // All four points are exactly 1 unit from the origin.
        let set = LocationSet::new(vec![
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(-1.0, 0.0),
            GeoPoint::new(0.0, -1.0),
        ])
        .unwrap();
        assert_eq!(set.nearest(GeoPoint::new(0.0, 0.0)).index, LocationIdx(0));

        let set = LocationSet::new(vec![
            GeoPoint::new(5.0, 5.0),
            GeoPoint::new(0.0, -1.0),
            GeoPoint::new(0.0, 1.0),
        ])
        .unwrap();
        assert_eq!(set.nearest(GeoPoint::new(0.0, 0.0)).index, LocationIdx(1));
    }

    #[test]
    fn duplicate_points_resolve_to_lowest_index() {
        let p = GeoPoint::new(10.0, 10.0);
        let set = LocationSet::new(vec![GeoPoint::new(0.0, 0.0), p, p, p]).unwrap();
        assert_eq!(set.nearest(GeoPoint::new(10.1, 10.1)).index, LocationIdx(1));
    }

    #[test]
    fn k_nearest_sorted() {
        let set = LocationSet::new(vec![
            GeoPoint::new(0.0, 3.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(0.0, 2.0),
        ])
        .unwrap();
        let snaps = set.k_nearest(GeoPoint::new(0.0, 0.0), 2);
        let idx: Vec<_> = snaps.iter().map(|s| s.index).collect();
        assert_eq!(idx, vec![LocationIdx(1), LocationIdx(2)]);
    }

    #[test]
    fn get_and_len() {
        let set = LocationSet::new(vec![GeoPoint::new(1.0, 1.0)]).unwrap();
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
        assert_eq!(set.get(LocationIdx(0)), Some(GeoPoint::new(1.0, 1.0)));
        assert_eq!(set.get(LocationIdx(1)), None);
    }
}

// ── TravelTimeMatrix ──────────────────────────────────────────────────────────

#[cfg(test)]
mod matrix {
    use std::time::Duration;

    use ems_core::LocationIdx;

    use crate::{SpatialError, TravelTimeMatrix};

    #[test]
    fn from_secs_rounds_to_millis() {
        let m = TravelTimeMatrix::from_secs(&[vec![1.2346, 0.0], vec![60.0, 2.5]]).unwrap();
        assert_eq!(m.origin_count(), 2);
        assert_eq!(m.destination_count(), 2);
        assert_eq!(m.get(LocationIdx(0), LocationIdx(0)), Some(Duration::from_millis(1_235)));
        assert_eq!(m.get(LocationIdx(1), LocationIdx(1)), Some(Duration::from_millis(2_500)));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = TravelTimeMatrix::from_secs(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(err, Err(SpatialError::RaggedRow { row: 1, found: 1, expected: 2 })));
    }

    #[test]
    fn negative_and_nan_rejected() {
        assert!(matches!(
            TravelTimeMatrix::from_secs(&[vec![1.0, -2.0]]),
            Err(SpatialError::InvalidTime { origin: 0, destination: 1, .. })
        ));
        assert!(TravelTimeMatrix::from_secs(&[vec![f64::NAN]]).is_err());
        assert!(TravelTimeMatrix::from_secs(&[vec![f64::INFINITY]]).is_err());
    }

    #[test]
    fn out_of_range_is_none() {
        let m = TravelTimeMatrix::from_fn(1, 2, |_, _| Duration::from_secs(1));
        assert!(m.get(LocationIdx(1), LocationIdx(0)).is_none());
        assert!(m.get(LocationIdx(0), LocationIdx(2)).is_none());
    }
}

// ── TravelTimes oracle ────────────────────────────────────────────────────────

#[cfg(test)]
mod oracle {
    use std::time::Duration;

    use ems_core::{GeoPoint, LocationIdx};

    use crate::{LocationSet, SpatialError, TravelTimeMatrix, TravelTimes};

    #[test]
    fn shape_mismatch_rejected() {
        let origins = LocationSet::new(vec![GeoPoint::new(0.0, 0.0)]).unwrap();
        let destinations = LocationSet::new(vec![GeoPoint::new(0.0, 0.0)]).unwrap();
        let matrix = TravelTimeMatrix::from_fn(2, 1, |_, _| Duration::ZERO);
        assert!(matches!(
            TravelTimes::new(origins, destinations, matrix),
            Err(SpatialError::ShapeMismatch { rows: 2, cols: 1, origins: 1, destinations: 1 })
        ));
    }

    #[test]
    fn time_lookup() {
        let tt = super::helpers::small_oracle();
        assert_eq!(tt.time(LocationIdx(0), LocationIdx(2)), Duration::from_secs(120));
        assert_eq!(tt.time(LocationIdx(1), LocationIdx(2)), Duration::ZERO);
    }

    #[test]
    fn try_time_out_of_matrix() {
        let tt = super::helpers::small_oracle();
        assert!(matches!(
            tt.try_time(LocationIdx(2), LocationIdx(0)),
            Err(SpatialError::OutOfMatrix { origins: 2, destinations: 3, .. })
        ));
        assert_eq!(tt.try_time(LocationIdx(0), LocationIdx(1)).unwrap(), Duration::from_secs(60));
    }

    #[test]
    #[should_panic(expected = "outside the 2x3 matrix")]
    fn time_out_of_matrix_panics() {
        let tt = super::helpers::small_oracle();
        tt.time(LocationIdx(0), LocationIdx(9));
    }

    #[test]
    fn time_between_snaps_both_ends() {
        let tt = super::helpers::small_oracle();
        // (0.1, 0.1) snaps to o0; (0.9, 0.95) snaps to d2.
        let t = tt.time_between(GeoPoint::new(0.1, 0.1), GeoPoint::new(0.9, 0.95));
        assert_eq!(t, Duration::from_secs(120));
        assert_eq!(tt.nearest_origin(GeoPoint::new(0.9, 0.9)).index, LocationIdx(1));
        assert_eq!(tt.nearest_destination(GeoPoint::new(0.1, 0.9)).index, LocationIdx(1));
    }
}

// ── CSV loaders ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;
    use std::time::Duration;

    use ems_core::{GeoPoint, LocationIdx};

    use crate::{load_locations_reader, load_matrix_reader, SpatialError, TravelTimes};

    #[test]
    fn locations_with_extra_columns() {
        let csv = "name,latitude,longitude\nbase_a,32.71,-117.16\nbase_b,32.75,-117.13\n";
        let set = load_locations_reader(Cursor::new(csv)).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(LocationIdx(1)), Some(GeoPoint::new(32.75, -117.13)));
    }

    #[test]
    fn locations_parse_error() {
        let csv = "latitude,longitude\nnorth,-117.0\n";
        assert!(matches!(load_locations_reader(Cursor::new(csv)), Err(SpatialError::Parse(_))));
    }

    #[test]
    fn empty_locations_file() {
        let csv = "latitude,longitude\n";
        assert!(matches!(load_locations_reader(Cursor::new(csv)), Err(SpatialError::EmptyLocationSet)));
    }

    #[test]
    fn matrix_headerless() {
        let csv = "0,312.5,780\n401,0,655.25\n";
        let m = load_matrix_reader(Cursor::new(csv)).unwrap();
        assert_eq!(m.origin_count(), 2);
        assert_eq!(m.destination_count(), 3);
        assert_eq!(m.get(LocationIdx(1), LocationIdx(2)), Some(Duration::from_millis(655_250)));
    }

    #[test]
    fn matrix_ragged_file() {
        let csv = "1,2,3\n4,5\n";
        assert!(matches!(
            load_matrix_reader(Cursor::new(csv)),
            Err(SpatialError::RaggedRow { row: 1, .. })
        ));
    }

    #[test]
    fn assembled_oracle() {
        let origins = load_locations_reader(Cursor::new("latitude,longitude\n0,0\n")).unwrap();
        let dests = load_locations_reader(Cursor::new("latitude,longitude\n0,0\n0,1\n")).unwrap();
        let matrix = load_matrix_reader(Cursor::new("0,90\n")).unwrap();
        let tt = TravelTimes::new(origins, dests, matrix).unwrap();
        assert_eq!(tt.time_between(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.9)), Duration::from_secs(90));
    }
}
