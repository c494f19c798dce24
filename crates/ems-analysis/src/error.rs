//! Analysis-subsystem error type.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("secondary radius {secondary:?} is smaller than primary radius {primary:?}")]
    RadiiOrder { primary: Duration, secondary: Duration },

    #[error("metric tag {0:?} registered twice")]
    DuplicateTag(String),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
