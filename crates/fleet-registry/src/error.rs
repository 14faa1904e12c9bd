use fleet_core::VehicleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("vehicle id {0} appears more than once")]
    DuplicateVehicle(VehicleId),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
