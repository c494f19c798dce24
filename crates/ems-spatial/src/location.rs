//! Fixed location sets with nearest-point snapping.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `LocationIdx`.
//! Every arbitrary point the simulator handles (vehicle positions, incident
//! locations, demand points) is snapped to a set member before a matrix
//! lookup.
//!
//! Ordering uses squared Euclidean distance in lat/lon space, which is
//! sufficient for nearest-point queries within a city.  The distance reported
//! in [`Snap`] is the haversine distance in metres.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ems_core::{GeoPoint, LocationIdx};

use crate::{SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct LocationEntry {
    point: [f64; 2], // [lat, lon]
    idx:   LocationIdx,
}

impl RTreeObject for LocationEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for LocationEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── Snap ──────────────────────────────────────────────────────────────────────

/// Result of snapping an arbitrary point onto a [`LocationSet`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snap {
    /// Index of the nearest member.
    pub index: LocationIdx,
    /// Position of the nearest member.
    pub point: GeoPoint,
    /// Haversine distance from the query point to `point`, in metres.
    pub distance_m: f64,
}

// ── LocationSet ───────────────────────────────────────────────────────────────

/// An immutable, non-empty set of points indexed by `LocationIdx`.
pub struct LocationSet {
    points:      Vec<GeoPoint>,
    spatial_idx: RTree<LocationEntry>,
}

impl LocationSet {
    /// Build a set from `points`.  The position in the `Vec` becomes the
    /// point's `LocationIdx`.
    ///
    /// Fails if `points` is empty or contains a non-finite coordinate.
    pub fn new(points: Vec<GeoPoint>) -> SpatialResult<Self> {
        if points.is_empty() {
            return Err(SpatialError::EmptyLocationSet);
        }
        if let Some((index, &point)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !p.lat.is_finite() || !p.lon.is_finite())
        {
            return Err(SpatialError::InvalidLocation { index, point });
        }

        let entries: Vec<LocationEntry> = points
            .iter()
            .enumerate()
            .map(|(i, p)| LocationEntry { point: p.as_array(), idx: LocationIdx(i as u32) })
            .collect();

        Ok(Self { points, spatial_idx: RTree::bulk_load(entries) })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn get(&self, idx: LocationIdx) -> Option<GeoPoint> {
        self.points.get(idx.index()).copied()
    }

    /// Snap `pos` to the nearest member.
    ///
    /// Equidistant members resolve to the lowest index.
    pub fn nearest(&self, pos: GeoPoint) -> Snap {
        let query = pos.as_array();
        let mut best = LocationIdx(0);
        let mut best_d2 = f64::INFINITY;

        for (entry, d2) in self.spatial_idx.nearest_neighbor_iter_with_distance_2(&query) {
            if d2 > best_d2 {
                break;
            }
            if d2 < best_d2 || entry.idx < best {
                best = entry.idx;
                best_d2 = d2;
            }
        }

        let point = self.points[best.index()];
        Snap { index: best, point, distance_m: pos.distance_m(point) }
    }

    /// Up to `k` nearest members, sorted by ascending distance.
    pub fn k_nearest(&self, pos: GeoPoint, k: usize) -> Vec<Snap> {
        self.spatial_idx
            .nearest_neighbor_iter(&pos.as_array())
            .take(k)
            .map(|e| {
                let point = self.points[e.idx.index()];
                Snap { index: e.idx, point, distance_m: pos.distance_m(point) }
            })
            .collect()
    }
}
