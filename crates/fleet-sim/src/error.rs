use fleet_core::{FleetError, GeoPoint};
use fleet_registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] FleetError),

    #[error("center {0} is not a valid coordinate")]
    InvalidCenter(GeoPoint),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

pub type SimResult<T> = Result<T, SimError>;
