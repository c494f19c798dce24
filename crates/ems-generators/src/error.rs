//! Generator error type.
//!
//! Everything except `MissingTrip` and `SamplingExhausted` is a
//! configuration error raised at construction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("{0} needs a trip (origin and destination) to compute a duration")]
    MissingTrip(&'static str),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),

    #[error("expected {expected} entries, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("polygon {0} is degenerate (fewer than 3 vertices, non-finite, or zero area)")]
    DegeneratePolygon(usize),

    #[error("no locations to choose from")]
    Empty,

    #[error("no point accepted after {0} attempts")]
    SamplingExhausted(usize),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
