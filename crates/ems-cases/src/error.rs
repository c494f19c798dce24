use ems_core::{CaseId, SimTime};
use ems_generators::GeneratorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaseError {
    #[error("case parse error: {0}")]
    Parse(String),

    #[error("case {id} dated {date:?} precedes the run epoch")]
    BeforeEpoch { id: CaseId, date: String },

    #[error("a scenario controller needs at least one scenario")]
    NoScenarios,

    #[error("scenario {0:?} declared twice")]
    DuplicateScenario(String),

    #[error("scenario {label:?} window [{start}, {end}) is empty")]
    EmptyWindow { label: String, start: SimTime, end: SimTime },

    #[error("unknown scenario {0:?}")]
    UnknownScenario(String),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CaseResult<T> = Result<T, CaseError>;
