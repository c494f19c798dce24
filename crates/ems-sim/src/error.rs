use ems_analysis::AnalysisError;
use ems_cases::CaseError;
use ems_core::{CaseId, SimTime, VehicleId};
use ems_generators::GeneratorError;
use ems_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("the fleet has no vehicles")]
    EmptyFleet,

    #[error("case {case} arrives at {time}, before the clock ({now})")]
    OutOfOrderCase { case: CaseId, time: SimTime, now: SimTime },

    #[error("{0} completed a phase but has no active case")]
    NoActiveCase(VehicleId),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Case(#[from] CaseError),
}

pub type SimResult<T> = Result<T, SimError>;
