//! Model-subsystem error type.

use thiserror::Error;

use ems_core::{CaseId, VehicleId};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("vehicle {0} is not in the fleet")]
    UnknownVehicle(VehicleId),

    #[error("vehicle {vehicle} is already deployed on {case}")]
    AlreadyDeployed { vehicle: VehicleId, case: CaseId },

    #[error("vehicle {0} is not deployed")]
    NotDeployed(VehicleId),

    #[error("roster position {position} holds {id}; ids must equal roster positions")]
    IdMismatch { position: usize, id: VehicleId },

    #[error("case {case} is already assigned to {vehicle}")]
    AlreadyAssigned { case: CaseId, vehicle: VehicleId },
}

pub type ModelResult<T> = Result<T, ModelError>;
