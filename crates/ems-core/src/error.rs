//! Framework error type.
//!
//! Sub-crates define their own error enums; `SimError` in `ems-sim` wraps
//! them all via `From` impls so the run loop can use `?` throughout.

use thiserror::Error;

use crate::{CaseId, VehicleId};

/// The top-level error type for `ems-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EmsError {
    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("case {0} not found")]
    CaseNotFound(CaseId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `ems-core`.
pub type EmsResult<T> = Result<T, EmsError>;
