//! The travel-time oracle.
//!
//! `TravelTimes` bundles two disjoint location sets with the matrix between
//! them.  Vehicle positions snap to *origins*, incident and demand points
//! snap to *destinations*.  It is built once before a run and shared
//! read-only (`Arc<TravelTimes>`) by policies, the coverage tracker and the
//! travel-duration generator.

use std::time::Duration;

use ems_core::{GeoPoint, LocationIdx};

use crate::{LocationSet, Snap, SpatialError, SpatialResult, TravelTimeMatrix};

pub struct TravelTimes {
    origins:      LocationSet,
    destinations: LocationSet,
    matrix:       TravelTimeMatrix,
}

impl TravelTimes {
    /// Fails with [`SpatialError::ShapeMismatch`] unless the matrix has one
    /// row per origin and one column per destination.
    pub fn new(
        origins: LocationSet,
        destinations: LocationSet,
        matrix: TravelTimeMatrix,
    ) -> SpatialResult<Self> {
        if matrix.origin_count() != origins.len()
            || matrix.destination_count() != destinations.len()
        {
            return Err(SpatialError::ShapeMismatch {
                rows:         matrix.origin_count(),
                cols:         matrix.destination_count(),
                origins:      origins.len(),
                destinations: destinations.len(),
            });
        }
        Ok(Self { origins, destinations, matrix })
    }

    pub fn origins(&self) -> &LocationSet {
        &self.origins
    }

    pub fn destinations(&self) -> &LocationSet {
        &self.destinations
    }

    pub fn matrix(&self) -> &TravelTimeMatrix {
        &self.matrix
    }

    #[inline]
    pub fn nearest_origin(&self, pos: GeoPoint) -> Snap {
        self.origins.nearest(pos)
    }

    #[inline]
    pub fn nearest_destination(&self, pos: GeoPoint) -> Snap {
        self.destinations.nearest(pos)
    }

    /// Travel time between two snapped indices.
    ///
    /// # Panics
    ///
    /// If either index is outside the matrix.  Indices obtained from this
    /// oracle's own snaps are always in range.
    #[inline]
    pub fn time(&self, origin: LocationIdx, destination: LocationIdx) -> Duration {
        match self.matrix.get(origin, destination) {
            Some(t) => t,
            None => panic!(
                "travel-time lookup ({origin}, {destination}) outside the {}x{} matrix",
                self.matrix.origin_count(),
                self.matrix.destination_count()
            ),
        }
    }

    /// Checked variant of [`time`](Self::time).
    pub fn try_time(&self, origin: LocationIdx, destination: LocationIdx) -> SpatialResult<Duration> {
        self.matrix.get(origin, destination).ok_or(SpatialError::OutOfMatrix {
            origin,
            destination,
            origins:      self.matrix.origin_count(),
            destinations: self.matrix.destination_count(),
        })
    }

    /// Snap `from` to the origins and `to` to the destinations, then look up
    /// the time between them.
    pub fn time_between(&self, from: GeoPoint, to: GeoPoint) -> Duration {
        let o = self.origins.nearest(from);
        let d = self.destinations.nearest(to);
        self.time(o.index, d.index)
    }
}
