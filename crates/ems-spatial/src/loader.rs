//! CSV loaders for location sets and travel-time matrices.
//!
//! # Location CSV
//!
//! One row per location, in index order.  Extra columns (names, ids) are
//! ignored.
//!
//! ```csv
//! latitude,longitude
//! 32.7157,-117.1611
//! 32.7503,-117.1368
//! ```
//!
//! # Matrix CSV
//!
//! No header.  One row per origin, one column per destination, values in
//! seconds:
//!
//! ```csv
//! 0,312.5,780
//! 401,0,655.25
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ems_core::GeoPoint;

use crate::{LocationSet, SpatialError, SpatialResult, TravelTimeMatrix, TravelTimes};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LocationRecord {
    latitude:  f64,
    longitude: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`LocationSet`] from a CSV file with `latitude,longitude` columns.
pub fn load_locations_csv(path: &Path) -> SpatialResult<LocationSet> {
    let file = std::fs::File::open(path)?;
    load_locations_reader(file)
}

/// Like [`load_locations_csv`] but accepts any `Read` source.
pub fn load_locations_reader<R: Read>(reader: R) -> SpatialResult<LocationSet> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut points = Vec::new();

    for result in csv_reader.deserialize::<LocationRecord>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        points.push(GeoPoint::new(row.latitude, row.longitude));
    }

    LocationSet::new(points)
}

/// Load a [`TravelTimeMatrix`] from a headerless CSV of seconds.
pub fn load_matrix_csv(path: &Path) -> SpatialResult<TravelTimeMatrix> {
    let file = std::fs::File::open(path)?;
    load_matrix_reader(file)
}

/// Like [`load_matrix_csv`] but accepts any `Read` source.
pub fn load_matrix_reader<R: Read>(reader: R) -> SpatialResult<TravelTimeMatrix> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for result in csv_reader.deserialize::<Vec<f64>>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        rows.push(row);
    }

    TravelTimeMatrix::from_secs(&rows)
}

/// Load origins, destinations and the matrix between them in one call.
pub fn load_travel_times(
    origins: &Path,
    destinations: &Path,
    matrix: &Path,
) -> SpatialResult<TravelTimes> {
    TravelTimes::new(
        load_locations_csv(origins)?,
        load_locations_csv(destinations)?,
        load_matrix_csv(matrix)?,
    )
}
