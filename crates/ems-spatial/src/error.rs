//! Spatial-subsystem error type.

use thiserror::Error;

use ems_core::{GeoPoint, LocationIdx};

/// Errors produced by `ems-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("location set is empty")]
    EmptyLocationSet,

    #[error("location {index} is not a finite coordinate: {point}")]
    InvalidLocation { index: usize, point: GeoPoint },

    #[error("matrix row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },

    #[error(
        "matrix is {rows}x{cols} but the location sets are {origins}x{destinations}"
    )]
    ShapeMismatch { rows: usize, cols: usize, origins: usize, destinations: usize },

    #[error("invalid travel time {value}s at origin {origin}, destination {destination}")]
    InvalidTime { origin: usize, destination: usize, value: f64 },

    #[error("({origin}, {destination}) lies outside the {origins}x{destinations} matrix")]
    OutOfMatrix {
        origin:       LocationIdx,
        destination:  LocationIdx,
        origins:      usize,
        destinations: usize,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
