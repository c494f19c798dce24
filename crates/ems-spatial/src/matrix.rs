//! Dense origins × destinations travel-time table.
//!
//! Times are stored row-major as whole milliseconds in a flat `Vec<u32>`:
//!
//! ```text
//! times_ms[ origin * destinations + destination ]
//! ```
//!
//! `u32` milliseconds covers trips of up to ~49 days, far beyond any road
//! trip, at half the footprint of `u64`.

use std::time::Duration;

use ems_core::LocationIdx;

use crate::{SpatialError, SpatialResult};

/// Immutable travel-time matrix.  Every cell holds a defined duration ≥ 0.
#[derive(Clone, Debug)]
pub struct TravelTimeMatrix {
    origins:      usize,
    destinations: usize,
    times_ms:     Vec<u32>,
}

impl TravelTimeMatrix {
    /// Build from rows of travel times in **seconds**, one row per origin.
    ///
    /// Rejects ragged rows and negative, non-finite or oversized values.
    pub fn from_secs(rows: &[Vec<f64>]) -> SpatialResult<Self> {
        let destinations = rows.first().map_or(0, Vec::len);
        let mut times_ms = Vec::with_capacity(rows.len() * destinations);

        for (origin, row) in rows.iter().enumerate() {
            if row.len() != destinations {
                return Err(SpatialError::RaggedRow {
                    row: origin,
                    found: row.len(),
                    expected: destinations,
                });
            }
            for (destination, &secs) in row.iter().enumerate() {
                let ms = secs * 1_000.0;
                if !ms.is_finite() || ms < 0.0 || ms > u32::MAX as f64 {
                    return Err(SpatialError::InvalidTime { origin, destination, value: secs });
                }
                times_ms.push(ms.round() as u32);
            }
        }

        Ok(Self { origins: rows.len(), destinations, times_ms })
    }

    /// Build by evaluating `f(origin, destination)` for every cell.
    pub fn from_fn(
        origins: usize,
        destinations: usize,
        mut f: impl FnMut(usize, usize) -> Duration,
    ) -> Self {
        let mut times_ms = Vec::with_capacity(origins * destinations);
        for o in 0..origins {
            for d in 0..destinations {
                times_ms.push(f(o, d).as_millis().min(u32::MAX as u128) as u32);
            }
        }
        Self { origins, destinations, times_ms }
    }

    pub fn origin_count(&self) -> usize {
        self.origins
    }

    pub fn destination_count(&self) -> usize {
        self.destinations
    }

    /// Travel time for one cell, or `None` if either index is out of range.
    #[inline]
    pub fn get(&self, origin: LocationIdx, destination: LocationIdx) -> Option<Duration> {
        if origin.index() >= self.origins || destination.index() >= self.destinations {
            return None;
        }
        let ms = self.times_ms[origin.index() * self.destinations + destination.index()];
        Some(Duration::from_millis(ms as u64))
    }
}
